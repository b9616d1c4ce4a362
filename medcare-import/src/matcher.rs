//! Pairing current records with prior records.
//!
//! Three tiers are tried in order and the first hit wins:
//!
//! 1. exact identifier,
//! 2. slug of the display name (against prior names and brand-name details),
//! 3. Jaccard overlap of name tokens, accepted at or above the configured
//!    threshold.

use std::collections::BTreeSet;
use std::fmt;

use medcare_catalog::{Record, name_tokens, slugify};

use crate::config::ReconcileConfig;
use crate::index::PriorIndex;

/// How a match was determined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchMethod {
    /// Same non-empty identifier
    Id,
    /// Same name slug
    Slug,
    /// Token overlap, with the winning Jaccard score
    Fuzzy { score: f64 },
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMethod::Id => f.write_str("id"),
            MatchMethod::Slug => f.write_str("name"),
            MatchMethod::Fuzzy { score } => write!(f, "fuzzy {score:.2}"),
        }
    }
}

/// A prior record paired with a current one.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    /// Position of the prior record in the index
    pub position: usize,
    pub record: &'a Record,
    pub method: MatchMethod,
}

/// Intersection size over union size. Zero when both sets are empty.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let inter = a.intersection(b).count();
    let union = a.len() + b.len() - inter;
    if union == 0 {
        0.0
    } else {
        inter as f64 / union as f64
    }
}

/// Find the prior record corresponding to `current`, if any.
pub fn match_record<'a>(
    current: &Record,
    index: &PriorIndex<'a>,
    config: &ReconcileConfig,
) -> Option<Match<'a>> {
    match_by_id(current, index)
        .or_else(|| match_by_slug(current, index))
        .or_else(|| match_by_tokens(current, index, config))
}

/// Tier 1: identifier lookup.
pub fn match_by_id<'a>(current: &Record, index: &PriorIndex<'a>) -> Option<Match<'a>> {
    let id = current.id();
    if id.is_empty() {
        return None;
    }
    let position = index.position_by_id(id)?;
    Some(Match {
        position,
        record: index.get(position)?,
        method: MatchMethod::Id,
    })
}

/// Tier 2: name slug lookup.
pub fn match_by_slug<'a>(current: &Record, index: &PriorIndex<'a>) -> Option<Match<'a>> {
    let slug = slugify(current.name());
    if slug.is_empty() {
        return None;
    }
    let position = index.position_by_slug(&slug)?;
    Some(Match {
        position,
        record: index.get(position)?,
        method: MatchMethod::Slug,
    })
}

/// Tier 3: best token overlap.
///
/// Candidates with an empty or disjoint token set are skipped. A later
/// candidate only wins with a strictly higher score, so ties go to the
/// earliest prior record.
pub fn match_by_tokens<'a>(
    current: &Record,
    index: &PriorIndex<'a>,
    config: &ReconcileConfig,
) -> Option<Match<'a>> {
    let tokens = name_tokens(current.name(), &config.stopwords);
    if tokens.is_empty() {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for (candidate, position) in index.token_sets() {
        if candidate.is_empty() || candidate.is_disjoint(&tokens) {
            continue;
        }
        let score = jaccard(&tokens, candidate);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((position, score));
        }
    }

    let (position, score) = best?;
    if score < config.fuzzy_threshold {
        log::debug!(
            "No fuzzy match for '{}' (best score {:.2})",
            current.name(),
            score
        );
        return None;
    }
    Some(Match {
        position,
        record: index.get(position)?,
        method: MatchMethod::Fuzzy { score },
    })
}
