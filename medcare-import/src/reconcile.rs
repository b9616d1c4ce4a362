//! Snapshot reconciliation.
//!
//! The generation step rebuilds `medicines.json` from the folder hierarchy
//! and loses anything curated by hand since the last run. This module pairs
//! each regenerated record with its counterpart in one or more earlier
//! snapshots and merges the curated data back, producing a fully normalized
//! record list in the original order.

use std::path::{Path, PathBuf};

use medcare_catalog::{
    Field, Record, Snapshot, SnapshotError, SnapshotSource, load_snapshot, load_snapshot_required,
    save_snapshot,
};
use thiserror::Error;

use crate::config::{ConfigError, ReconcileConfig};
use crate::index::PriorIndex;
use crate::matcher::{MatchMethod, match_record};
use crate::merge::merge_record;
use crate::progress::ReconcileProgress;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// File locations and switches for [`reconcile_files`].
pub struct ReconcileOptions {
    /// The regenerated snapshot. Must exist.
    pub current: PathBuf,
    /// Earlier snapshots, most recent first. Missing files count as empty.
    pub previous: Vec<PathBuf>,
    /// Additional snapshots; ones that fail to load are skipped.
    pub extra: Vec<PathBuf>,
    /// Where to write the result; defaults to `current`.
    pub output: Option<PathBuf>,
    /// Report without writing.
    pub dry_run: bool,
}

impl ReconcileOptions {
    /// Options for `current` with the conventional prior snapshots beside it
    /// (see [`default_prior_paths`]), writing back in place.
    pub fn new(current: impl Into<PathBuf>) -> Self {
        let current = current.into();
        Self {
            previous: default_prior_paths(&current),
            current,
            extra: Vec::new(),
            output: None,
            dry_run: false,
        }
    }
}

/// The two earlier generations kept next to a snapshot:
/// `<stem>.previous.json` then `<stem>.previous2.json`.
pub fn default_prior_paths(current: &Path) -> Vec<PathBuf> {
    let stem = current
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "medicines".to_string());
    ["previous", "previous2"]
        .iter()
        .map(|generation| current.with_file_name(format!("{stem}.{generation}.json")))
        .collect()
}

/// Statistics from a reconciliation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileStats {
    pub total: usize,
    pub prior_records: usize,
    pub matched_by_id: usize,
    pub matched_by_slug: usize,
    pub matched_by_fuzzy: usize,
    pub unmatched: usize,
    /// Matches whose prior record had a non-empty detail list.
    pub details_restored: usize,
    /// Scalar fields filled in from prior records, across all records.
    pub fields_restored: usize,
}

impl ReconcileStats {
    pub fn matched(&self) -> usize {
        self.matched_by_id + self.matched_by_slug + self.matched_by_fuzzy
    }
}

/// Detail for a single matched record (used for CLI output).
#[derive(Debug, Clone)]
pub struct MatchDetail {
    /// Position in the current snapshot
    pub position: usize,
    pub current_id: String,
    pub current_name: String,
    pub prior_id: String,
    pub prior_name: String,
    pub method: MatchMethod,
    pub restored_fields: Vec<Field>,
}

/// Result of reconciliation: the output records plus stats and per-match
/// details.
#[derive(Debug)]
pub struct ReconcileResult {
    pub records: Vec<Record>,
    pub stats: ReconcileStats,
    pub details: Vec<MatchDetail>,
}

/// Reconcile `current` against `priors`, in memory.
///
/// The prior snapshots are only read. Output order follows `current`.
pub fn reconcile(
    current: Vec<Record>,
    priors: &[Snapshot],
    config: &ReconcileConfig,
    progress: &dyn ReconcileProgress,
) -> ReconcileResult {
    let index = PriorIndex::build(priors, config);
    let mut stats = ReconcileStats {
        total: current.len(),
        prior_records: index.len(),
        ..ReconcileStats::default()
    };
    if index.is_empty() {
        log::warn!("No prior records found; details will only be normalized");
    }
    let mut details = Vec::new();
    let mut records = Vec::with_capacity(current.len());

    progress.on_phase(&format!(
        "Reconciling {} records against {} prior records",
        current.len(),
        index.len()
    ));

    let total = current.len();
    for (position, mut record) in current.into_iter().enumerate() {
        let found = match_record(&record, &index, config);
        let outcome = merge_record(&mut record, found.map(|m| m.record), config);

        match found {
            Some(m) => {
                match m.method {
                    MatchMethod::Id => stats.matched_by_id += 1,
                    MatchMethod::Slug => stats.matched_by_slug += 1,
                    MatchMethod::Fuzzy { .. } => stats.matched_by_fuzzy += 1,
                }
                if outcome.details_restored {
                    stats.details_restored += 1;
                }
                stats.fields_restored += outcome.restored_fields.len();
                details.push(MatchDetail {
                    position,
                    current_id: record.id().to_string(),
                    current_name: record.name().to_string(),
                    prior_id: m.record.id().to_string(),
                    prior_name: m.record.name().to_string(),
                    method: m.method,
                    restored_fields: outcome.restored_fields,
                });
            }
            None => {
                log::debug!("No prior match for '{}'", record.name());
                stats.unmatched += 1;
            }
        }

        progress.on_record(position + 1, total, record.name(), found.map(|m| m.method));
        records.push(record);
    }

    progress.on_complete(&stats);

    ReconcileResult {
        records,
        stats,
        details,
    }
}

/// Load the prior snapshots named by `options`, in priority order.
///
/// `previous` files are required to decode when present; `extra` files that
/// fail for any reason are logged and skipped.
pub fn load_priors(options: &ReconcileOptions) -> Result<Vec<Snapshot>, ReconcileError> {
    let mut snapshots = Vec::new();

    for path in &options.previous {
        let records = load_snapshot(path)?;
        if records.is_empty() {
            log::debug!("No prior records in {}", path.display());
        }
        snapshots.push(Snapshot::new(
            SnapshotSource::Prior {
                generation: snapshots.len() + 1,
            },
            records,
        ));
    }

    for path in &options.extra {
        match load_snapshot(path) {
            Ok(records) => snapshots.push(Snapshot::new(
                SnapshotSource::Prior {
                    generation: snapshots.len() + 1,
                },
                records,
            )),
            Err(e) => log::warn!("Skipping extra snapshot: {}", e),
        }
    }

    Ok(snapshots)
}

/// Load, reconcile and (unless dry-running) write back a snapshot.
///
/// Nothing is written if any required input fails to load.
pub fn reconcile_files(
    options: &ReconcileOptions,
    config: &ReconcileConfig,
    progress: &dyn ReconcileProgress,
) -> Result<ReconcileResult, ReconcileError> {
    progress.on_phase(&format!(
        "Loading current snapshot {}",
        options.current.display()
    ));
    let current = load_snapshot_required(&options.current)?;

    progress.on_phase("Loading prior snapshots");
    let priors = load_priors(options)?;
    for snapshot in &priors {
        log::debug!("  {}: {} records", snapshot.source, snapshot.len());
    }

    let result = reconcile(current, &priors, config, progress);

    if !options.dry_run {
        let output = options.output.as_ref().unwrap_or(&options.current);
        save_snapshot(output, &result.records)?;
        log::debug!("Wrote {}", output.display());
    }

    Ok(result)
}
