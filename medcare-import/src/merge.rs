//! Field and detail merging between a current record and its prior match.
//!
//! Two different precedence rules apply:
//!
//! - Scalar fields only fill gaps: a prior value is copied when the current
//!   value is blank, never otherwise.
//! - Canonical detail rows prefer the prior value whenever it is non-blank,
//!   so hand-curated details survive a regeneration that produced different
//!   text.

use medcare_catalog::{DetailRow, DetailSchema, Field, Record, is_blank, schema::find_value};

use crate::config::ReconcileConfig;

/// What a merge changed on the current record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Scalar fields filled from the prior record.
    pub restored_fields: Vec<Field>,
    /// The prior record carried a non-empty detail list.
    pub details_restored: bool,
}

/// Copy prior values into blank current fields.
///
/// Returns the fields that were filled.
pub fn restore_fields(current: &mut Record, prior: &Record, fields: &[Field]) -> Vec<Field> {
    let mut restored = Vec::new();
    for &field in fields {
        if !current.is_blank(field) || prior.is_blank(field) {
            continue;
        }
        current.set(field, prior.text(field));
        restored.push(field);
    }
    restored
}

/// Merge the detail lists of `record` and `prior` into a new list.
///
/// Canonical rows take the prior value if non-blank, else the record's own
/// value if non-blank, else the default from the record's scalar fields.
/// Custom labels follow: the record's own first, then the prior's, each
/// label once.
pub fn merge_details(schema: &DetailSchema, record: &Record, prior: &Record) -> Vec<DetailRow> {
    let defaults = schema.defaults(record);
    let mut merged = Vec::with_capacity(schema.len());

    for (spec, default) in schema.specs().iter().zip(&defaults) {
        let prior_value = find_value(&prior.details, &spec.label).unwrap_or("");
        let current_value = find_value(&record.details, &spec.label).unwrap_or("");
        let value = if !is_blank(prior_value) {
            prior_value
        } else if !is_blank(current_value) {
            current_value
        } else {
            default.as_str()
        };
        merged.push(DetailRow::new(spec.label.as_str(), value));
    }

    merged.extend(schema.custom_rows([record.details.as_slice(), prior.details.as_slice()]));
    merged
}

/// Reconcile `current` with its matched prior record, if any, and normalize
/// its details.
pub fn merge_record(
    current: &mut Record,
    prior: Option<&Record>,
    config: &ReconcileConfig,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    if let Some(prior) = prior {
        outcome.restored_fields = restore_fields(current, prior, &config.prefer_fields);
        current.details = merge_details(&config.schema, current, prior);
        outcome.details_restored = !prior.details.is_empty();
    }

    config.schema.normalize(current);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_skips_fields_outside_the_preferred_set() {
        let mut current = Record::new("x", "X");
        let prior = Record::new("x", "Old X")
            .with(Field::Manufacturer, "Centurion")
            .with(Field::Storage, "Cool");

        let restored = restore_fields(&mut current, &prior, &[Field::Storage]);

        assert_eq!(restored, vec![Field::Storage]);
        assert_eq!(current.text(Field::Storage), "Cool");
        assert_eq!(current.get(Field::Manufacturer), None);
        assert_eq!(current.name(), "X");
    }

    #[test]
    fn restore_treats_whitespace_as_blank() {
        let mut current = Record::new("x", "X").with(Field::ShelfLife, "  ");
        let prior = Record::new("x", "X").with(Field::ShelfLife, "24 months");
        restore_fields(&mut current, &prior, &[Field::ShelfLife]);
        assert_eq!(current.text(Field::ShelfLife), "24 months");
    }

    #[test]
    fn blank_prior_does_not_overwrite() {
        let mut current = Record::new("x", "X");
        let prior = Record::new("x", "X").with(Field::Dosage, " ");
        let restored = restore_fields(&mut current, &prior, &[Field::Dosage]);
        assert!(restored.is_empty());
        assert_eq!(current.get(Field::Dosage), None);
    }

    #[test]
    fn details_fall_back_to_defaults() {
        let schema = DetailSchema::default();
        let record = Record::new("x", "Xeno 5").with(Field::Form, "Capsule");
        let prior = Record::new("x", "Xeno 5");

        let merged = merge_details(&schema, &record, &prior);

        assert_eq!(merged.len(), 12);
        assert_eq!(merged[0], DetailRow::new("Brand Name", "Xeno 5"));
        assert_eq!(find_value(&merged, "Form"), Some("Capsule"));
    }
}
