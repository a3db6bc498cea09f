//! Interval trees and segment trees over aggregable range payloads.
//!
//! Every tree is built once from a list of payloads and then only queried.
//! A payload is anything implementing [`AggregableRange`]: a closed span
//! `[start, end]` together with a value that can be combined with another
//! value of the same kind (a set of tags, a sum, a minimum, ...).
//!
//!```
//! use intervals::*;
//!
//! let tree = IntervalTree::build(vec![
//!     IntervalPayload::new(1, 3, "A"),
//!     IntervalPayload::new(5, 8, "B"),
//!     IntervalPayload::new(2, 4, "C"),
//! ]);
//! let hit = tree.query(3).unwrap();
//! assert_eq!(hit.values().cloned().collect::<Vec<_>>(), vec!["A", "C"]);
//! assert!(tree.query(10).is_none());
//!```

#[macro_use]
extern crate derive_destructure;

pub mod config;
pub mod data;
pub mod error;
pub mod trees;

pub use config::TreeConfig;
pub use data::*;
pub use error::TreeError;
pub use trees::*;
