// WHY: second, pure stage over the append-only raw match list
// Grouping is keyed on canonical form so duplicates collapse to one representative

use std::collections::HashMap;
use tracing::debug;

use super::{Match, MatchSet};

/// What makes two raw matches "the same" during deduplication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveKey {
    /// One representative per canonical form
    #[default]
    Canonical,
    /// One entry per distinct (canonical form, original text) pair
    CanonicalAndOriginal,
}

/// Collapse raw matches to one representative per canonical form, longest first
pub fn resolve(raw_matches: Vec<Match>) -> MatchSet {
    resolve_with(raw_matches, ResolveKey::Canonical)
}

/// Deduplicate with an explicit key and order by descending length.
///
/// Within a group the match with the shortest `original` (in code points) wins;
/// on an exact tie the first one encountered is kept. Groups are ordered by
/// first appearance and then stably sorted by length, so equal-length entries
/// keep that first-appearance order.
pub fn resolve_with(raw_matches: Vec<Match>, key: ResolveKey) -> MatchSet {
    let raw_count = raw_matches.len();
    let mut slots: HashMap<(String, Option<String>), usize> = HashMap::new();
    let mut representatives: Vec<Match> = Vec::new();

    for candidate in raw_matches {
        let group_key = match key {
            ResolveKey::Canonical => (candidate.canonical.as_str().to_owned(), None),
            ResolveKey::CanonicalAndOriginal => (
                candidate.canonical.as_str().to_owned(),
                Some(candidate.original.clone()),
            ),
        };

        match slots.get(&group_key) {
            Some(&slot) => {
                if candidate.original_len() < representatives[slot].original_len() {
                    representatives[slot] = candidate;
                }
            }
            None => {
                slots.insert(group_key, representatives.len());
                representatives.push(candidate);
            }
        }
    }

    representatives.sort_by(|a, b| b.length.cmp(&a.length));

    debug!(
        raw_count,
        resolved_count = representatives.len(),
        ?key,
        "Resolved raw palindrome matches"
    );
    representatives
}
