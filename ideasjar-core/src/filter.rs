//! Client-side search over the loaded idea list.

use crate::model::Idea;

/// True when `content` contains `query`, ignoring case. An empty query matches everything.
pub fn matches_query(content: &str, query: &str) -> bool {
    query.is_empty() || content.to_lowercase().contains(&query.to_lowercase())
}

/// Lazily yields the ideas whose content contains `query` (case-insensitive),
/// in the order they appear in `ideas`. No trimming or tokenization.
pub fn filter_ideas<'a>(ideas: &'a [Idea], query: &str) -> impl Iterator<Item = &'a Idea> + 'a {
    let needle = query.to_lowercase();
    ideas
        .iter()
        .filter(move |idea| needle.is_empty() || idea.content.to_lowercase().contains(&needle))
}
