//! Reconciliation progress reporting.
//!
//! Reporters see every record as it is matched, with the tier that matched
//! it, so long runs can show how the match mix develops before the final
//! [`ReconcileStats`] are ready.

use std::cell::Cell;
use std::fmt;

use crate::matcher::MatchMethod;
use crate::reconcile::ReconcileStats;

/// Records seen so far, split by how they were matched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MatchTally {
    pub by_id: usize,
    pub by_slug: usize,
    pub by_fuzzy: usize,
    pub unmatched: usize,
}

impl MatchTally {
    /// Count one record; `None` means no prior match.
    pub fn add(&mut self, method: Option<MatchMethod>) {
        match method {
            Some(MatchMethod::Id) => self.by_id += 1,
            Some(MatchMethod::Slug) => self.by_slug += 1,
            Some(MatchMethod::Fuzzy { .. }) => self.by_fuzzy += 1,
            None => self.unmatched += 1,
        }
    }

    pub fn matched(&self) -> usize {
        self.by_id + self.by_slug + self.by_fuzzy
    }

    pub fn seen(&self) -> usize {
        self.matched() + self.unmatched
    }
}

impl fmt::Display for MatchTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} matched ({} id, {} name, {} fuzzy), {} unmatched",
            self.matched(),
            self.by_id,
            self.by_slug,
            self.by_fuzzy,
            self.unmatched
        )
    }
}

/// Receives reconciliation progress updates.
pub trait ReconcileProgress {
    /// A phase starts (e.g., "Loading prior snapshots").
    fn on_phase(&self, message: &str);

    /// A current record was matched and merged. `position` is 1-based;
    /// `method` is `None` when no prior record matched.
    fn on_record(&self, position: usize, total: usize, name: &str, method: Option<MatchMethod>);

    /// Every record has been reconciled.
    fn on_complete(&self, stats: &ReconcileStats);
}

/// Discards all updates.
pub struct SilentProgress;

impl ReconcileProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_record(&self, _position: usize, _total: usize, _name: &str, _method: Option<MatchMethod>) {}
    fn on_complete(&self, _stats: &ReconcileStats) {}
}

/// Logs phases, a running match tally every [`LogProgress::EVERY`] records,
/// and each fuzzy match at debug level.
#[derive(Debug, Default)]
pub struct LogProgress {
    tally: Cell<MatchTally>,
}

impl LogProgress {
    pub const EVERY: usize = 500;

    pub fn new() -> Self {
        Self::default()
    }

    /// Counts so far.
    pub fn tally(&self) -> MatchTally {
        self.tally.get()
    }
}

impl ReconcileProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_record(&self, position: usize, total: usize, name: &str, method: Option<MatchMethod>) {
        let mut tally = self.tally.get();
        tally.add(method);
        self.tally.set(tally);

        if let Some(method @ MatchMethod::Fuzzy { .. }) = method {
            log::debug!("  '{}' matched [{}]", name, method);
        }
        if position.is_multiple_of(Self::EVERY) || position == total {
            log::info!("  [{}/{}] {}", position, total, tally);
        }
    }

    fn on_complete(&self, stats: &ReconcileStats) {
        log::info!(
            "Restored details for {} records. Total entries: {}",
            stats.details_restored,
            stats.total
        );
    }
}
