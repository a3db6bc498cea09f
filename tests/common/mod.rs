use intervals::*;
use rand::seq::SliceRandom;
use rand::{self, Rng};

/// Answers queries by scanning every span.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Reference {
    pub spans: Vec<Span>,
}

impl Reference {
    pub fn new(spans: Vec<Span>) -> Self {
        Reference { spans }
    }

    /// Indices of the spans intersecting `start..=end`, ascending.
    pub fn matching(&self, start: i64, end: i64) -> Vec<u32> {
        self.spans
            .iter()
            .enumerate()
            .filter(|(_, span)| span.intersects(start, end))
            .map(|(i, _)| i as u32)
            .collect()
    }

    /// Sum of `values` over the spans containing `index`.
    pub fn sum_at(&self, values: &[i64], index: i64) -> Option<i64> {
        self.matching(index, index)
            .into_iter()
            .map(|i| values[i as usize])
            .fold(None, |acc, value| Some(acc.unwrap_or(0) + value))
    }

    /// Payloads tagged by their index in the reference.
    pub fn tagged(&self) -> Vec<IntervalPayload<u32>> {
        self.spans
            .iter()
            .enumerate()
            .map(|(i, span)| IntervalPayload::new(span.start, span.end, i as u32))
            .collect()
    }

    pub fn summed(&self, values: &[i64]) -> Vec<RangeSumPayload<i64>> {
        self.spans
            .iter()
            .zip(values.iter())
            .map(|(span, &value)| RangeSumPayload::new(span.start, span.end, value))
            .collect()
    }

    /// The smallest and largest point worth querying.
    pub fn bounds(&self) -> (i64, i64) {
        let start = self.spans.iter().map(|span| span.start).min().unwrap_or(0);
        let end = self.spans.iter().map(|span| span.end).max().unwrap_or(0);
        (start - 3, end + 3)
    }
}

/// The tags of a query result, or an empty list for no result.
pub fn tags(found: Option<IntervalPayload<u32>>) -> Vec<u32> {
    match found {
        None => vec![],
        Some(found) => {
            assert!(!found.is_empty());
            found.values().cloned().collect()
        }
    }
}

/// `count` spans inside `0..domain`, possibly overlapping.
pub fn random_spans(count: usize, domain: i64) -> Vec<Span> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let start = rng.gen_range(0..domain);
            let len = rng.gen_range(0..domain / 4 + 1);
            Span::new(start, (start + len).min(domain - 1))
        })
        .collect()
}

/// `count` spans inside `0..domain`, none overlapping, in random order.
/// Consecutive spans may touch at a single point.
pub fn random_disjoint_spans(count: usize, domain: i64) -> Vec<Span> {
    let mut rng = rand::thread_rng();
    let mut points: Vec<i64> = (0..2 * count).map(|_| rng.gen_range(0..domain)).collect();
    points.sort_unstable();
    let mut spans: Vec<Span> = points
        .chunks(2)
        .map(|pair| Span::new(pair[0], pair[1]))
        .collect();
    spans.shuffle(&mut rng);
    spans
}

pub fn random_values(count: usize) -> Vec<i64> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| rng.gen_range(-1000..=1000)).collect()
}

/// A random query range around the reference's spans.
pub fn random_query(reference: &Reference) -> (i64, i64) {
    let mut rng = rand::thread_rng();
    let (low, high) = reference.bounds();
    let a = rng.gen_range(low..=high);
    let b = rng.gen_range(low..=high);
    (a.min(b), a.max(b))
}

/// Checks that a tree of tagged payloads answers every point and many ranges
/// like the reference does.
pub fn check_against_reference<T>(tree: &T, reference: &Reference, num_ranges: usize)
where
    T: RangeTree<IntervalPayload<u32>>,
{
    tree.assert_correctness();
    let (low, high) = reference.bounds();
    for index in low..=high {
        assert_eq!(
            tags(tree.query(index)),
            reference.matching(index, index),
            "stabbing {}",
            index
        );
    }
    for _ in 0..num_ranges {
        let (start, end) = random_query(reference);
        assert_eq!(
            tags(tree.query_range(start, end)),
            reference.matching(start, end),
            "range {}->{}",
            start,
            end
        );
    }
}
