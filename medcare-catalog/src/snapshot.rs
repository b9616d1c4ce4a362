//! JSON loading and saving for record snapshots.
//!
//! Snapshots come from several editors and from git checkouts, so loading
//! tries a fixed list of text encodings and keeps the first one that yields
//! a JSON array. Saving always writes pretty-printed UTF-8.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::types::Record;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Snapshot not found: {0}")]
    NotFound(String),
    #[error("Failed to read JSON file {path}: no supported encoding produced a record list")]
    Decode { path: String },
    #[error("I/O error writing {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON serialization failed for {path}: {source}")]
    Serialize {
        path: String,
        source: serde_json::Error,
    },
}

/// Text encodings tried by [`load_snapshot`], in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf8Bom,
    Utf16Bom,
    Utf16Le,
    Utf16Be,
}

impl TextEncoding {
    pub const ATTEMPT_ORDER: [TextEncoding; 5] = [
        TextEncoding::Utf8,
        TextEncoding::Utf8Bom,
        TextEncoding::Utf16Bom,
        TextEncoding::Utf16Le,
        TextEncoding::Utf16Be,
    ];

    /// Strictly decode `bytes`; `None` on any malformed sequence.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
            TextEncoding::Utf8Bom => {
                let rest = bytes.strip_prefix(b"\xEF\xBB\xBF")?;
                std::str::from_utf8(rest).ok().map(str::to_string)
            }
            TextEncoding::Utf16Bom => {
                let (encoding, bom_len) = encoding_rs::Encoding::for_bom(bytes)?;
                if encoding == encoding_rs::UTF_8 {
                    return None;
                }
                encoding
                    .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
                    .map(|text| text.into_owned())
            }
            TextEncoding::Utf16Le => encoding_rs::UTF_16LE
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned()),
            TextEncoding::Utf16Be => encoding_rs::UTF_16BE
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned()),
        }
    }
}

/// Decode raw file contents into records.
///
/// Returns the records and the encoding that worked, or `None` if no
/// encoding produced a JSON array. Array entries that aren't objects are
/// skipped.
pub fn decode_records(bytes: &[u8]) -> Option<(Vec<Record>, TextEncoding)> {
    for encoding in TextEncoding::ATTEMPT_ORDER {
        let Some(text) = encoding.decode(bytes) else {
            continue;
        };
        let Ok(Value::Array(entries)) = serde_json::from_str::<Value>(&text) else {
            continue;
        };
        let records = entries
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        return Some((records, encoding));
    }
    None
}

/// Load a snapshot. A missing file is an empty snapshot.
pub fn load_snapshot(path: &Path) -> Result<Vec<Record>, SnapshotError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    load_snapshot_required(path)
}

/// Load a snapshot that must exist.
pub fn load_snapshot_required(path: &Path) -> Result<Vec<Record>, SnapshotError> {
    if !path.exists() {
        return Err(SnapshotError::NotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path).map_err(|e| SnapshotError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    decode_records(&bytes)
        .map(|(records, _)| records)
        .ok_or_else(|| SnapshotError::Decode {
            path: path.display().to_string(),
        })
}

/// Serialize records as indented, Unicode-preserving JSON.
///
/// Output is the normalized form of what was loaded, not a byte copy:
/// modelled scalar keys are always written as strings (`12` becomes `"12"`),
/// keys that were `null` are omitted, and unmodelled keys follow the
/// modelled ones with their original JSON values.
pub fn to_json_string(records: &[Record]) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(records)?;
    text.push('\n');
    Ok(text)
}

/// Write a snapshot, replacing `path` only once the full file is on disk.
///
/// The content is [`to_json_string`]'s normalized form. On failure the
/// temporary `*.json.tmp` file is removed and `path` is left untouched.
pub fn save_snapshot(path: &Path, records: &[Record]) -> Result<(), SnapshotError> {
    let write_err = |e: std::io::Error| SnapshotError::Write {
        path: path.display().to_string(),
        source: e,
    };

    let text = to_json_string(records).map_err(|e| SnapshotError::Serialize {
        path: path.display().to_string(),
        source: e,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let tmp = path.with_extension("json.tmp");
    if let Err(e) = std::fs::write(&tmp, text).and_then(|()| std::fs::rename(&tmp, path)) {
        let _ = std::fs::remove_file(&tmp);
        return Err(write_err(e));
    }

    Ok(())
}
