//! Literal token-sequence search in a flat token stream.

use crate::error::{ExtractorError, Result};

/// Split text into whitespace-delimited tokens.
#[must_use]
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Find the first index at or after `start` where `query` occurs contiguously.
///
/// Returns `None` when the query does not occur (or is empty).
///
/// # Examples
/// ```
/// use plenaries::tokens::find_sequence;
///
/// let tokens = ["a", "b", "a", "c"];
/// assert_eq!(find_sequence(&tokens, &["a", "c"], 0), Some(2));
/// assert_eq!(find_sequence(&tokens, &["x"], 0), None);
/// ```
pub fn find_sequence<T, Q>(tokens: &[T], query: &[Q], start: usize) -> Option<usize>
where
    T: AsRef<str>,
    Q: AsRef<str>,
{
    let first = query.first()?.as_ref();
    let mut pos = start;

    while pos < tokens.len() {
        let candidate = pos + tokens[pos..].iter().position(|t| t.as_ref() == first)?;
        if matches_at(tokens, query, candidate) {
            return Some(candidate);
        }
        pos = candidate + 1;
    }

    None
}

/// Every index where `query` occurs, scanning on from one past each match.
///
/// Overlapping occurrences are all reported.
pub fn find_occurrences<T, Q>(tokens: &[T], query: &[Q]) -> Vec<usize>
where
    T: AsRef<str>,
    Q: AsRef<str>,
{
    let mut result = Vec::new();
    let mut next = find_sequence(tokens, query, 0);
    while let Some(pos) = next {
        result.push(pos);
        next = find_sequence(tokens, query, pos + 1);
    }
    result
}

/// Like [`find_sequence`] from the start, but a missing query is a hard failure.
pub fn get_sequence<T, Q>(tokens: &[T], query: &[Q], context: &str) -> Result<usize>
where
    T: AsRef<str>,
    Q: AsRef<str>,
{
    find_sequence(tokens, query, 0).ok_or_else(|| ExtractorError::MissingMarker {
        marker: query
            .iter()
            .map(|q| q.as_ref())
            .collect::<Vec<_>>()
            .join(" "),
        context: context.to_string(),
    })
}

fn matches_at<T, Q>(tokens: &[T], query: &[Q], pos: usize) -> bool
where
    T: AsRef<str>,
    Q: AsRef<str>,
{
    tokens.len() - pos >= query.len()
        && tokens[pos..pos + query.len()]
            .iter()
            .zip(query)
            .all(|(t, q)| t.as_ref() == q.as_ref())
}
