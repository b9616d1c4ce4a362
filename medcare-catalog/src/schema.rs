//! The ordered detail-row schema every output record carries.
//!
//! A [`DetailSchema`] is an ordered list of canonical labels, each optionally
//! tied to the scalar [`Field`] that supplies its default value. Normalizing a
//! record puts the canonical labels first, in schema order, and keeps any
//! custom labels after them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{DetailRow, Field, Record, is_blank};

/// One canonical detail label and the field its default comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSpec {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
}

impl LabelSpec {
    pub fn new(label: impl Into<String>, field: Option<Field>) -> Self {
        Self {
            label: label.into(),
            field,
        }
    }
}

/// The label every brand-name lookup uses by default.
pub const BRAND_NAME_LABEL: &str = "Brand Name";

/// Canonical labels and their default-source fields.
pub const CANONICAL_LABELS: [(&str, Field); 12] = [
    (BRAND_NAME_LABEL, Field::Name),
    ("Manufacturer", Field::Manufacturer),
    ("Strength", Field::Strength),
    ("Composition", Field::Composition),
    ("Form", Field::Form),
    ("Pack Size", Field::PackSize),
    ("Packaging Type", Field::PackagingType),
    ("Tablets in a Strip", Field::TabletsInStrip),
    ("Shelf Life", Field::ShelfLife),
    ("Category", Field::Category),
    ("Medicine Type", Field::MedicineType),
    ("Storage", Field::Storage),
];

/// Ordered canonical label set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSchema {
    labels: Vec<LabelSpec>,
}

impl Default for DetailSchema {
    fn default() -> Self {
        Self {
            labels: CANONICAL_LABELS
                .iter()
                .map(|(label, field)| LabelSpec::new(*label, Some(*field)))
                .collect(),
        }
    }
}

impl DetailSchema {
    /// Build a schema from an explicit label list. Duplicate labels keep
    /// their first position.
    pub fn new(labels: Vec<LabelSpec>) -> Self {
        let mut seen = HashSet::new();
        let labels = labels
            .into_iter()
            .filter(|spec| seen.insert(spec.label.clone()))
            .collect();
        Self { labels }
    }

    pub fn specs(&self) -> &[LabelSpec] {
        &self.labels
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|spec| spec.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn is_canonical(&self, label: &str) -> bool {
        self.labels.iter().any(|spec| spec.label == label)
    }

    /// The canonical label fed by `field`, if any.
    pub fn label_for(&self, field: Field) -> Option<&str> {
        self.labels
            .iter()
            .find(|spec| spec.field == Some(field))
            .map(|spec| spec.label.as_str())
    }

    /// Per-label defaults drawn from the record's own scalar fields, in
    /// schema order.
    pub fn defaults(&self, record: &Record) -> Vec<String> {
        self.labels
            .iter()
            .map(|spec| {
                spec.field
                    .map(|field| record.text(field).to_string())
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Rebuild the record's details so the canonical labels come first.
    ///
    /// Each canonical value is the record's own non-blank value, else the
    /// scalar-field default, else `""`. Idempotent.
    pub fn normalize(&self, record: &mut Record) {
        let defaults = self.defaults(record);
        self.normalize_with(record, &defaults);
    }

    /// [`normalize`](Self::normalize) with caller-supplied defaults, one per
    /// canonical label in schema order.
    pub fn normalize_with(&self, record: &mut Record, defaults: &[String]) {
        let rows = std::mem::take(&mut record.details);
        let mut out = Vec::with_capacity(self.labels.len() + rows.len());

        for (i, spec) in self.labels.iter().enumerate() {
            let current = find_value(&rows, &spec.label).unwrap_or("");
            let value = if is_blank(current) {
                defaults.get(i).map(String::as_str).unwrap_or("")
            } else {
                current
            };
            out.push(DetailRow::new(spec.label.as_str(), value));
        }

        out.extend(self.custom_rows([rows.as_slice()]));
        record.details = out;
    }

    /// Non-canonical rows from each source in turn, first occurrence of a
    /// label wins.
    pub fn custom_rows<'a, const N: usize>(&self, sources: [&'a [DetailRow]; N]) -> Vec<DetailRow> {
        let mut seen: HashSet<&str> = self.labels().collect();
        let mut out = Vec::new();
        for rows in sources {
            for row in rows {
                if seen.insert(row.label.as_str()) {
                    out.push(row.clone());
                }
            }
        }
        out
    }

    /// `true` if the record's details start with exactly the canonical
    /// labels, in order, and no label repeats.
    pub fn is_normalized(&self, record: &Record) -> bool {
        if record.details.len() < self.labels.len() {
            return false;
        }
        let prefix_ok = self
            .labels
            .iter()
            .zip(&record.details)
            .all(|(spec, row)| spec.label == row.label);
        let mut seen = HashSet::new();
        prefix_ok && record.labels().all(|label| seen.insert(label))
    }
}

/// Value of the first row with this label.
pub fn find_value<'a>(rows: &'a [DetailRow], label: &str) -> Option<&'a str> {
    rows.iter()
        .find(|row| row.label == label)
        .map(|row| row.value.as_str())
}
