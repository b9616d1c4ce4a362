//! Product catalog data model, name normalization, detail schema, and
//! snapshot JSON I/O.
//!
//! This crate has no knowledge of how snapshots are reconciled; it defines
//! the record types and the pure helpers `medcare-import` builds on.

pub mod names;
pub mod schema;
pub mod snapshot;
pub mod types;

pub use names::{DEFAULT_STOPWORDS, default_stopwords, name_tokens, slugify};
pub use schema::{BRAND_NAME_LABEL, CANONICAL_LABELS, DetailSchema, LabelSpec};
pub use snapshot::{
    SnapshotError, TextEncoding, decode_records, load_snapshot, load_snapshot_required,
    save_snapshot, to_json_string,
};
pub use types::*;
