//! Free-text tag normalisation.
//!
//! Interests, skills, and event tags arrive from upstream sources with
//! inconsistent casing and stray whitespace. Every comparison in the engine
//! happens on the normalised form produced here, so "  Java " and "java"
//! always denote the same tag.

use std::collections::BTreeSet;

/// Normalises a collection of free-text tags.
///
/// Each entry is trimmed and lowercased; entries that are empty after
/// trimming are dropped. The result is an ordered set, so duplicates
/// collapse and iteration order is deterministic.
///
/// # Examples
///
/// ```
/// use eventide_core::tags::normalise;
///
/// let tags = normalise(["  Java ", "SPRING", "java", "   "]);
/// assert_eq!(tags.into_iter().collect::<Vec<_>>(), ["java", "spring"]);
/// ```
#[must_use]
pub fn normalise<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .filter_map(|tag| {
            let trimmed = tag.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
        })
        .collect()
}
