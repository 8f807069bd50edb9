//! Host-side option filtering.
//!
//! The search dropdown never filters by its query; it forwards the query to
//! the host and shows whatever option list comes back. These helpers are for
//! hosts that filter locally instead of asking a backend.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// One matched option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterMatch {
    /// Index of the matched option in the original list.
    pub index: usize,
    /// Match score (higher is better).
    pub score: u32,
}

/// Fuzzy-match `query` against `items`.
///
/// Returns matches sorted by score, highest first; ties keep list order.
/// An empty (or all-whitespace) query matches everything with score 0.
pub fn fuzzy_filter(query: &str, items: &[String]) -> Vec<FilterMatch> {
    if query.trim().is_empty() {
        return (0..items.len())
            .map(|index| FilterMatch { index, score: 0 })
            .collect();
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );

    let mut buf = Vec::new();
    let mut matches: Vec<FilterMatch> = items
        .iter()
        .enumerate()
        .filter_map(|(index, label)| {
            let haystack = Utf32Str::new(label, &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .map(|score| FilterMatch { index, score })
        })
        .collect();

    // Stable sort keeps host order among equal scores
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

/// Options matching `query`, best match first.
pub fn filter_options(query: &str, options: &[String]) -> Vec<String> {
    fuzzy_filter(query, options)
        .into_iter()
        .filter_map(|m| options.get(m.index).cloned())
        .collect()
}
