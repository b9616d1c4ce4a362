//! Data model types for the product catalog.
//!
//! A [`Record`] is one product entry of a snapshot (`medicines.json`). Scalar
//! attributes are `Option<String>` so an absent key and an empty string stay
//! distinguishable on disk; reconciliation treats both as empty.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Returns `true` if the value is empty or whitespace-only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// ── Scalar fields ───────────────────────────────────────────────────────────

/// A named scalar attribute of a [`Record`].
///
/// Serialized with the same camelCase key the snapshot JSON uses, so config
/// files can name fields directly (e.g. `"packSize"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Id,
    Name,
    Category,
    Manufacturer,
    Form,
    Strength,
    Composition,
    PackSize,
    PackagingType,
    TabletsInStrip,
    ShelfLife,
    MedicineType,
    Storage,
    Dosage,
    Usage,
}

impl Field {
    /// Every scalar field, in snapshot key order.
    pub const ALL: [Field; 15] = [
        Field::Id,
        Field::Name,
        Field::Category,
        Field::Manufacturer,
        Field::Form,
        Field::Strength,
        Field::Composition,
        Field::PackSize,
        Field::PackagingType,
        Field::TabletsInStrip,
        Field::ShelfLife,
        Field::MedicineType,
        Field::Storage,
        Field::Dosage,
        Field::Usage,
    ];

    /// JSON key of this field.
    pub fn key(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Category => "category",
            Field::Manufacturer => "manufacturer",
            Field::Form => "form",
            Field::Strength => "strength",
            Field::Composition => "composition",
            Field::PackSize => "packSize",
            Field::PackagingType => "packagingType",
            Field::TabletsInStrip => "tabletsInStrip",
            Field::ShelfLife => "shelfLife",
            Field::MedicineType => "medicineType",
            Field::Storage => "storage",
            Field::Dosage => "dosage",
            Field::Usage => "usage",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ── Detail rows ─────────────────────────────────────────────────────────────

/// One labeled attribute of a record's extended detail list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
}

impl DetailRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Read a row from raw JSON, dropping anything that isn't an object with
    /// a non-empty label.
    fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let label = obj.get("label").and_then(json_text)?;
        if label.is_empty() {
            return None;
        }
        let value = obj.get("value").and_then(json_text).unwrap_or_default();
        Some(Self { label, value })
    }
}

// ── Record ──────────────────────────────────────────────────────────────────

/// A single product entry.
///
/// Keys this type doesn't model (`price`, `image`, `inStock`, ...) are kept
/// in [`Record::extra`] and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub composition: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub pack_size: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub packaging_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub tablets_in_strip: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub shelf_life: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub medicine_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(default, deserialize_with = "lenient_details")]
    pub details: Vec<DetailRow>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Create a record with just an identifier and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Builder-style setter, mostly for tests and fixtures.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Builder-style detail row append.
    pub fn with_detail(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.push(DetailRow::new(label, value));
        self
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Id => &self.id,
            Field::Name => &self.name,
            Field::Category => &self.category,
            Field::Manufacturer => &self.manufacturer,
            Field::Form => &self.form,
            Field::Strength => &self.strength,
            Field::Composition => &self.composition,
            Field::PackSize => &self.pack_size,
            Field::PackagingType => &self.packaging_type,
            Field::TabletsInStrip => &self.tablets_in_strip,
            Field::ShelfLife => &self.shelf_life,
            Field::MedicineType => &self.medicine_type,
            Field::Storage => &self.storage,
            Field::Dosage => &self.dosage,
            Field::Usage => &self.usage,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Id => &mut self.id,
            Field::Name => &mut self.name,
            Field::Category => &mut self.category,
            Field::Manufacturer => &mut self.manufacturer,
            Field::Form => &mut self.form,
            Field::Strength => &mut self.strength,
            Field::Composition => &mut self.composition,
            Field::PackSize => &mut self.pack_size,
            Field::PackagingType => &mut self.packaging_type,
            Field::TabletsInStrip => &mut self.tablets_in_strip,
            Field::ShelfLife => &mut self.shelf_life,
            Field::MedicineType => &mut self.medicine_type,
            Field::Storage => &mut self.storage,
            Field::Dosage => &mut self.dosage,
            Field::Usage => &mut self.usage,
        }
    }

    /// The raw value of a field; `None` if the key was absent.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// The value of a field, with an absent key read as `""`.
    pub fn text(&self, field: Field) -> &str {
        self.get(field).unwrap_or("")
    }

    /// `true` if the field is absent, empty, or whitespace-only.
    pub fn is_blank(&self, field: Field) -> bool {
        is_blank(self.text(field))
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Identifier, or `""` when absent.
    pub fn id(&self) -> &str {
        self.text(Field::Id)
    }

    /// Display name, or `""` when absent.
    pub fn name(&self) -> &str {
        self.text(Field::Name)
    }

    /// Value of the first detail row with exactly this label.
    pub fn detail(&self, label: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }

    /// Value of the first detail row whose label matches case-insensitively.
    pub fn detail_ignore_case(&self, label: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|row| row.label.eq_ignore_ascii_case(label))
            .map(|row| row.value.as_str())
    }

    /// Detail labels in list order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.details.iter().map(|row| row.label.as_str())
    }
}

// ── Snapshot ────────────────────────────────────────────────────────────────

/// Where a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    /// The freshly regenerated record set.
    Current,
    /// An earlier saved generation; `1` is the most recent.
    Prior { generation: usize },
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotSource::Current => f.write_str("current"),
            SnapshotSource::Prior { generation } => write!(f, "prior #{generation}"),
        }
    }
}

/// One generation of the full record list.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub source: SnapshotSource,
    pub records: Vec<Record>,
}

impl Snapshot {
    pub fn new(source: SnapshotSource, records: Vec<Record>) -> Self {
        Self { source, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Lenient decoding ────────────────────────────────────────────────────────

/// Render a scalar JSON value as text. `null` reads as absent.
fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(json_text(&value))
}

fn lenient_details<'de, D>(deserializer: D) -> Result<Vec<DetailRow>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = match Value::deserialize(deserializer)? {
        Value::Array(items) => items.iter().filter_map(DetailRow::from_json).collect(),
        _ => Vec::new(),
    };
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_and_empty_fields_stay_distinct() {
        let absent: Record = serde_json::from_value(json!({"id": "a", "name": "A"})).unwrap();
        let empty: Record =
            serde_json::from_value(json!({"id": "a", "name": "A", "storage": ""})).unwrap();

        assert_eq!(absent.get(Field::Storage), None);
        assert_eq!(empty.get(Field::Storage), Some(""));
        assert!(absent.is_blank(Field::Storage));
        assert!(empty.is_blank(Field::Storage));

        let out = serde_json::to_value(&absent).unwrap();
        assert!(out.get("storage").is_none());
        let out = serde_json::to_value(&empty).unwrap();
        assert_eq!(out["storage"], "");
    }

    #[test]
    fn malformed_detail_rows_are_dropped() {
        let record: Record = serde_json::from_value(json!({
            "id": "x",
            "name": "X",
            "details": [
                "not a row",
                {"value": "no label"},
                {"label": "", "value": "empty label"},
                {"label": null, "value": "null label"},
                {"label": "Strength"},
                {"label": "Pack Size", "value": 10}
            ]
        }))
        .unwrap();

        assert_eq!(
            record.details,
            vec![DetailRow::new("Strength", ""), DetailRow::new("Pack Size", "10")]
        );
    }

    #[test]
    fn non_list_details_read_as_empty() {
        let record: Record =
            serde_json::from_value(json!({"id": "x", "name": "X", "details": {"a": 1}})).unwrap();
        assert!(record.details.is_empty());
    }

    #[test]
    fn unknown_keys_round_trip() {
        let record: Record = serde_json::from_value(json!({
            "id": "x",
            "name": "X",
            "price": 12.5,
            "inStock": true,
            "images": ["a.jpg"]
        }))
        .unwrap();
        assert_eq!(record.extra.len(), 3);

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["price"], 12.5);
        assert_eq!(out["inStock"], true);
        assert_eq!(out["images"][0], "a.jpg");
    }

    #[test]
    fn numeric_scalars_read_as_text() {
        let record: Record =
            serde_json::from_value(json!({"id": 42, "name": "X", "tabletsInStrip": 10})).unwrap();
        assert_eq!(record.id(), "42");
        assert_eq!(record.text(Field::TabletsInStrip), "10");
    }

    #[test]
    fn brand_lookup_ignores_case() {
        let record = Record::new("x", "X").with_detail("brand name", "Cenforce 100 mg");
        assert_eq!(record.detail("Brand Name"), None);
        assert_eq!(record.detail_ignore_case("Brand Name"), Some("Cenforce 100 mg"));
    }
}
