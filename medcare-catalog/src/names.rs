//! Name normalization for record matching.
//!
//! Two views of a display name are used when pairing records across
//! snapshots:
//!
//! - [`slugify`] produces a canonical hyphenated key for exact comparisons.
//! - [`name_tokens`] produces a stopword-filtered word set for fuzzy
//!   comparisons, where dosage units and form words are noise.

use std::collections::{BTreeSet, HashSet};

/// Words dropped by [`name_tokens`] unless a config overrides them.
pub const DEFAULT_STOPWORDS: [&str; 9] = [
    "tablet", "tablets", "capsule", "capsules", "mg", "ml", "g", "tab", "tabs",
];

/// [`DEFAULT_STOPWORDS`] as an owned set.
pub fn default_stopwords() -> HashSet<String> {
    DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect()
}

/// Convert a name to a lowercase, hyphen-separated slug.
///
/// `&` becomes the word "and"; every run of non-alphanumeric characters
/// collapses into a single `-`, and leading/trailing separators are dropped.
///
/// # Examples
///
/// ```
/// use medcare_catalog::names::slugify;
///
/// assert_eq!(slugify("Cenforce 100 mg"), "cenforce-100-mg");
/// assert_eq!(slugify("  Johnson & Johnson "), "johnson-and-johnson");
/// assert_eq!(slugify("--"), "");
/// ```
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase().replace('&', " and ");
    let mut result = String::with_capacity(lowered.len());
    let mut last_was_separator = false;

    for c in lowered.chars() {
        if c.is_alphanumeric() {
            result.push(c);
            last_was_separator = false;
        } else if !last_was_separator {
            result.push('-');
            last_was_separator = true;
        }
    }

    result.trim_matches('-').to_string()
}

/// Split a name into lowercase ASCII alphanumeric words, minus stopwords.
///
/// # Examples
///
/// ```
/// use medcare_catalog::names::{default_stopwords, name_tokens};
///
/// let tokens = name_tokens("Azithromycin 250 Tablet", &default_stopwords());
/// assert_eq!(tokens.into_iter().collect::<Vec<_>>(), vec!["250", "azithromycin"]);
/// ```
pub fn name_tokens(text: &str, stopwords: &HashSet<String>) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty() && !stopwords.contains(*word))
        .map(str::to_string)
        .collect()
}
