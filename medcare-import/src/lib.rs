//! Reconcile regenerated catalog snapshots against earlier ones.
//!
//! This crate owns the reconciliation logic: indexing prior snapshots,
//! matching current records to prior ones, merging curated fields and
//! details back in, and the detail auto-fill pass.

pub mod autofill;
pub mod config;
pub mod index;
pub mod matcher;
pub mod merge;
pub mod progress;
pub mod reconcile;

pub use autofill::{autofill_all, autofill_details, inferred_defaults};
pub use config::{ConfigError, ReconcileConfig, Settings, settings_path};
pub use index::PriorIndex;
pub use matcher::{Match, MatchMethod, jaccard, match_record};
pub use merge::{MergeOutcome, merge_details, merge_record, restore_fields};
pub use progress::{LogProgress, MatchTally, ReconcileProgress, SilentProgress};
pub use reconcile::{
    MatchDetail, ReconcileError, ReconcileOptions, ReconcileResult, ReconcileStats,
    default_prior_paths, load_priors, reconcile, reconcile_files,
};
