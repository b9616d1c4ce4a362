//! Detail auto-fill from inferred values.
//!
//! A normalization pass like [`DetailSchema::normalize`], except that blank
//! canonical rows are filled from values inferred from the record's name
//! and pack size rather than copied verbatim from its scalar fields.

use std::sync::LazyLock;

use medcare_catalog::{DetailSchema, Field, Record, schema::find_value};
use regex::Regex;

/// Medicine type used when the record has no `medicineType` key at all.
pub const DEFAULT_MEDICINE_TYPE: &str = "Allopathic";

/// Storage text used when the record has no `storage` key at all.
pub const DEFAULT_STORAGE: &str = "Store below 25°C, protect from light";

/// Active ingredients recognized in product names, grouped by therapy area.
pub const ACTIVE_KEYWORDS: &[&str] = &[
    // ED
    "sildenafil",
    "tadalafil",
    "vardenafil",
    "avanafil",
    "dapoxetine",
    // Antibiotics / antiparasitic
    "azithromycin",
    "amoxicillin",
    "cefadroxil",
    "cefixime",
    "cefpodoxime",
    "ceftriaxone",
    "doxycycline",
    "levofloxacin",
    "moxifloxacin",
    "roxithromycin",
    "clindamycin",
    "ivermectin",
    "mebendazole",
    "triclabendazole",
    "nitazoxanide",
    "piperacillin",
    "tazobactam",
    // Antiviral
    "oseltamivir",
    "valacyclovir",
    "molnupiravir",
    "sofosbuvir",
    "ledipasvir",
    "daclatasvir",
    "velpatasvir",
    "ganciclovir",
    // Hormones & steroids
    "testosterone",
    "progesterone",
    "anastrozole",
    "nandrolone",
    "methandienone",
    "minoxidil",
    "estradiol",
    "cyproterone",
    "dienogest",
    "mesterolone",
    "enclomiphene",
    "clomiphene",
    // Anti-malarial
    "artemether",
    "lumefantrine",
    "artesunate",
    "hydroxychloroquine",
    // Pain relief
    "naproxen",
    "carisoprodol",
    "amitriptyline",
    "paracetamol",
];

const MAX_ACTIVES: usize = 2;

static DOSAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(mg|ml|g)\b").expect("valid regex"));

static COUNT_BY_COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*[x*]\s*(\d+)\s*(?:tablet|capsule)s?").expect("valid regex")
});

static STRIP_OF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"strip\s*of\s*(\d+)\s*(?:tablet|capsule)s?").expect("valid regex")
});

/// The record's strength, or the first `<number> <unit>` in its name.
pub fn infer_strength(record: &Record) -> String {
    let explicit = record.text(Field::Strength).trim();
    if !explicit.is_empty() {
        return explicit.to_string();
    }
    DOSAGE_RE
        .captures(record.name())
        .map(|caps| format!("{} {}", &caps[1], caps[2].to_lowercase()))
        .unwrap_or_default()
}

/// Known active ingredients named in the record's name, at most two, in
/// keyword-list order.
pub fn infer_actives(record: &Record) -> Vec<&'static str> {
    let name = record.name().to_lowercase();
    ACTIVE_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| name.contains(keyword))
        .take(MAX_ACTIVES)
        .collect()
}

/// "Active + Active <strength>", falling back to the existing composition.
pub fn infer_composition(record: &Record) -> String {
    let actives = infer_actives(record);
    if actives.is_empty() {
        return record.text(Field::Composition).trim().to_string();
    }
    let joined = actives
        .iter()
        .map(|active| capitalize(active))
        .collect::<Vec<_>>()
        .join(" + ");
    let strength = infer_strength(record);
    format!("{joined} {strength}").trim().to_string()
}

/// Packaging type implied by pack-size text and dosage form.
pub fn infer_packaging_type(pack_size: &str, form: &str) -> Option<&'static str> {
    let pack_size = pack_size.to_lowercase();
    let form = form.to_lowercase();

    if pack_size.contains("bottle")
        || ["syrup", "solution", "suspension"]
            .iter()
            .any(|k| form.contains(k))
    {
        Some("Bottle")
    } else if pack_size.contains("vial") || form.contains("injection") {
        Some("Vial")
    } else if pack_size.contains("ampoule") {
        Some("Ampoule")
    } else if pack_size.contains("sachet") {
        Some("Sachet")
    } else if ["strip", "tablet", "capsule"]
        .iter()
        .any(|k| pack_size.contains(k))
    {
        Some("Blister Pack")
    } else {
        None
    }
}

/// Units per strip from text like `10 x 10 Tablets` or `Strip of 15 capsules`.
pub fn infer_tablets_in_strip(pack_size: &str) -> Option<String> {
    let pack_size = pack_size.to_lowercase().replace('×', "x");
    if let Some(caps) = COUNT_BY_COUNT_RE.captures(&pack_size) {
        return Some(caps[2].to_string());
    }
    STRIP_OF_RE
        .captures(&pack_size)
        .map(|caps| caps[1].to_string())
}

/// Per-label defaults for `record`, in schema order, using inference where a
/// label's field supports it.
pub fn inferred_defaults(schema: &DetailSchema, record: &Record) -> Vec<String> {
    let from_details_or_field = |field: Field| -> String {
        schema
            .label_for(field)
            .and_then(|label| find_value(&record.details, label))
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| record.text(field))
            .to_string()
    };
    let pack_size = from_details_or_field(Field::PackSize);
    let form = from_details_or_field(Field::Form);

    schema
        .specs()
        .iter()
        .map(|spec| match spec.field {
            None => String::new(),
            Some(Field::Strength) => infer_strength(record),
            Some(Field::Composition) => infer_composition(record),
            Some(Field::PackagingType) => infer_packaging_type(&pack_size, &form)
                .map(str::to_string)
                .unwrap_or_else(|| record.text(Field::PackagingType).to_string()),
            Some(Field::TabletsInStrip) => infer_tablets_in_strip(&pack_size)
                .unwrap_or_else(|| record.text(Field::TabletsInStrip).to_string()),
            Some(Field::MedicineType) => record
                .get(Field::MedicineType)
                .unwrap_or(DEFAULT_MEDICINE_TYPE)
                .to_string(),
            Some(Field::Storage) => record
                .get(Field::Storage)
                .unwrap_or(DEFAULT_STORAGE)
                .to_string(),
            Some(field) => record.text(field).to_string(),
        })
        .collect()
}

/// Normalize `record`'s details with inferred defaults.
///
/// Returns `true` if the detail list changed.
pub fn autofill_details(schema: &DetailSchema, record: &mut Record) -> bool {
    let before = record.details.clone();
    let defaults = inferred_defaults(schema, record);
    schema.normalize_with(record, &defaults);
    record.details != before
}

/// Run [`autofill_details`] over every record; returns how many changed.
pub fn autofill_all(schema: &DetailSchema, records: &mut [Record]) -> usize {
    let mut updated = 0;
    for record in records.iter_mut() {
        if autofill_details(schema, record) {
            log::debug!("Auto-filled details for '{}'", record.name());
            updated += 1;
        }
    }
    updated
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
