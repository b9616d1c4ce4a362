//! Reconciliation settings.
//!
//! [`ReconcileConfig`] is the immutable value handed to the index, matcher,
//! merger and normalizer. It is usually built from the `[reconcile]` table of
//! `settings.toml`; every key is optional and falls back to the built-in
//! defaults.
//!
//! ```toml
//! [paths]
//! current = "src/data/medicines.json"
//! previous = ["src/data/medicines.previous.json", "src/data/medicines.previous2.json"]
//!
//! [reconcile]
//! fuzzy_threshold = 0.5
//! stopwords = ["tablet", "tablets", "mg"]
//! prefer_fields = ["storage", "shelfLife"]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use medcare_catalog::{BRAND_NAME_LABEL, DetailSchema, Field, LabelSpec, default_stopwords};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Minimum Jaccard score for a fuzzy name match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.5;

/// Scalar fields restored from a prior record when the current one is blank.
pub const DEFAULT_PREFER_FIELDS: [Field; 10] = [
    Field::Dosage,
    Field::Usage,
    Field::Composition,
    Field::Strength,
    Field::PackSize,
    Field::PackagingType,
    Field::TabletsInStrip,
    Field::ShelfLife,
    Field::MedicineType,
    Field::Storage,
];

/// Immutable inputs to a reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// Canonical detail labels and their default-source fields.
    pub schema: DetailSchema,
    /// Lowercase words ignored by fuzzy token matching.
    pub stopwords: HashSet<String>,
    pub prefer_fields: Vec<Field>,
    /// Detail label holding a record's brand name (matched case-insensitively).
    pub brand_label: String,
    pub fuzzy_threshold: f64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            schema: DetailSchema::default(),
            stopwords: default_stopwords(),
            prefer_fields: DEFAULT_PREFER_FIELDS.to_vec(),
            brand_label: BRAND_NAME_LABEL.to_string(),
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

/// Contents of `settings.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub paths: PathSettings,
    #[serde(default)]
    pub reconcile: ReconcileSettings,
}

/// Default snapshot locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub previous: Vec<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

/// Overrides for [`ReconcileConfig`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzzy_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopwords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefer_fields: Option<Vec<Field>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<LabelSpec>>,
}

/// Canonical path to the settings file: `~/.config/medcare/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("medcare").join("settings.toml")
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Resolve the `[reconcile]` overrides against the built-in defaults.
    pub fn reconcile_config(&self) -> Result<ReconcileConfig, ConfigError> {
        let mut config = ReconcileConfig::default();
        let overrides = &self.reconcile;

        if let Some(threshold) = overrides.fuzzy_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::Invalid(format!(
                    "fuzzy_threshold must be between 0 and 1, got {threshold}"
                )));
            }
            config.fuzzy_threshold = threshold;
        }
        if let Some(ref words) = overrides.stopwords {
            config.stopwords = words.iter().map(|w| w.trim().to_lowercase()).collect();
        }
        if let Some(ref fields) = overrides.prefer_fields {
            config.prefer_fields = fields.clone();
        }
        if let Some(ref label) = overrides.brand_label {
            if label.trim().is_empty() {
                return Err(ConfigError::Invalid("brand_label must not be empty".into()));
            }
            config.brand_label = label.clone();
        }
        if let Some(ref labels) = overrides.labels {
            if labels.is_empty() {
                return Err(ConfigError::Invalid("labels must not be empty".into()));
            }
            if let Some(spec) = labels.iter().find(|spec| spec.label.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "label for field {:?} must not be empty",
                    spec.field
                )));
            }
            config.schema = DetailSchema::new(labels.clone());
        }

        Ok(config)
    }
}
