//! Printing trees sideways, one node per line:
//!```text
//! └── root
//!     ├── left
//!     └── right
//!```

use std::fmt;

/// A node that can be printed by [`write_tree`].
pub(crate) trait PrintNode {
    fn write_label(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    fn children(&self) -> Vec<&Self>;
}

/// Writes the tree rooted at `root`, or a placeholder line for an empty tree.
pub(crate) fn write_tree<N: PrintNode>(f: &mut fmt::Formatter<'_>, root: Option<&N>) -> fmt::Result {
    match root {
        None => writeln!(f, "Tree has no nodes."),
        Some(root) => write_node(f, root, "", true),
    }
}

fn write_node<N: PrintNode>(
    f: &mut fmt::Formatter<'_>,
    node: &N,
    prefix: &str,
    is_tail: bool,
) -> fmt::Result {
    write!(f, "{}{}", prefix, if is_tail { "└── " } else { "├── " })?;
    node.write_label(f)?;
    writeln!(f)?;

    let child_prefix = format!("{}{}", prefix, if is_tail { "    " } else { "│   " });
    let children = node.children();
    if let Some((last, rest)) = children.split_last() {
        for child in rest {
            write_node(f, *child, &child_prefix, false)?;
        }
        write_node(f, *last, &child_prefix, true)?;
    }
    Ok(())
}

#[cfg(test)]
struct Toy(&'static str, Vec<Toy>);

#[cfg(test)]
impl PrintNode for Toy {
    fn write_label(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }

    fn children(&self) -> Vec<&Self> {
        self.1.iter().collect()
    }
}

#[cfg(test)]
impl fmt::Display for Toy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(f, Some(self))
    }
}

#[test]
fn prints_sideways() {
    let tree = Toy("a", vec![Toy("b", vec![Toy("d", vec![])]), Toy("c", vec![])]);
    assert_eq!(
        tree.to_string(),
        "└── a\n    ├── b\n    │   └── d\n    └── c\n"
    );
}
