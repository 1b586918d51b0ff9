//! # Tagged-Sequence Segments
//!
//! A tagged token sequence decomposes into contiguous runs sharing one
//! tag. Confidence estimators score these segments; the aggregation
//! math lives with the estimator, not here.

use crate::record::record_types::Token;

/// A contiguous run of identically-tagged tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The run's shared tag, if the tokens were tagged.
    pub tag: Option<String>,

    /// Start position in the token sequence, inclusive.
    pub start: usize,

    /// End position, exclusive.
    pub end: usize,
}

impl Segment {
    /// The number of tokens in the segment.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the segment is empty. Decomposition never produces one.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Decompose a tagged token sequence into contiguous same-tag segments.
///
/// Segments are returned in sequence order and cover every position
/// exactly once.
pub fn segments(tokens: &[Token]) -> Vec<Segment> {
    let mut result = Vec::new();

    let mut start = 0;
    while start < tokens.len() {
        let tag = &tokens[start].tag;

        let mut end = start + 1;
        while end < tokens.len() && &tokens[end].tag == tag {
            end += 1;
        }

        result.push(Segment {
            tag: tag.clone(),
            start,
            end,
        });
        start = end;
    }

    result
}

/// Score a tagged sequence by its least-confident segment.
///
/// ## Arguments
/// * `tokens` - the tagged token sequence.
/// * `score` - the per-segment scoring function.
///
/// ## Returns
/// The minimum segment score, or `None` for an empty sequence.
pub fn min_segment_score<F>(
    tokens: &[Token],
    mut score: F,
) -> Option<f64>
where
    F: FnMut(&Segment) -> f64,
{
    segments(tokens)
        .iter()
        .map(|segment| score(segment))
        .fold(None, |lowest, current| match lowest {
            Some(value) if value <= current => Some(value),
            _ => Some(current),
        })
}
