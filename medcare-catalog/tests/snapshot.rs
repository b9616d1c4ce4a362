use medcare_catalog::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE: &str = r#"[
  {
    "id": "cenforce-100",
    "name": "Cenforce 100 mg",
    "price": 18.0,
    "storage": "Store below 25°C",
    "details": [
      {"label": "Brand Name", "value": "Cenforce 100 mg"},
      {"label": "Batch", "value": "B-7"}
    ]
  },
  "stray string",
  42,
  {"id": "zinc", "name": "Zinc"}
]"#;

fn write_bytes(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

fn utf16(text: &str, big_endian: bool) -> Vec<u8> {
    text.encode_utf16()
        .flat_map(|unit| {
            if big_endian {
                unit.to_be_bytes()
            } else {
                unit.to_le_bytes()
            }
        })
        .collect()
}

fn assert_sample(records: &[Record]) {
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id(), "cenforce-100");
    assert_eq!(records[0].text(Field::Storage), "Store below 25°C");
    assert_eq!(records[0].detail("Batch"), Some("B-7"));
    assert_eq!(records[1].name(), "Zinc");
}

#[test]
fn missing_snapshot_is_empty() {
    let tmp = TempDir::new().unwrap();
    let records = load_snapshot(&tmp.path().join("medicines.previous.json")).unwrap();
    assert!(records.is_empty());
}

#[test]
fn missing_required_snapshot_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let err = load_snapshot_required(&tmp.path().join("medicines.json")).unwrap_err();
    assert!(matches!(err, SnapshotError::NotFound(_)));
}

#[test]
fn loads_plain_utf8() {
    let tmp = TempDir::new().unwrap();
    let path = write_bytes(tmp.path(), "a.json", SAMPLE.as_bytes());
    assert_sample(&load_snapshot(&path).unwrap());
}

#[test]
fn loads_utf8_with_bom() {
    let mut bytes = b"\xEF\xBB\xBF".to_vec();
    bytes.extend_from_slice(SAMPLE.as_bytes());
    let (records, encoding) = decode_records(&bytes).unwrap();
    assert_eq!(encoding, TextEncoding::Utf8Bom);
    assert_sample(&records);
}

#[test]
fn loads_utf16_with_bom() {
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(utf16(SAMPLE, false));
    let (records, encoding) = decode_records(&bytes).unwrap();
    assert_eq!(encoding, TextEncoding::Utf16Bom);
    assert_sample(&records);
}

#[test]
fn loads_utf16_without_bom() {
    let (records, encoding) = decode_records(&utf16(SAMPLE, false)).unwrap();
    assert_eq!(encoding, TextEncoding::Utf16Le);
    assert_sample(&records);

    let (records, encoding) = decode_records(&utf16(SAMPLE, true)).unwrap();
    assert_eq!(encoding, TextEncoding::Utf16Be);
    assert_sample(&records);
}

#[test]
fn undecodable_file_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let path = write_bytes(tmp.path(), "bad.json", b"\xFF\x00not json at all\x01");
    let err = load_snapshot(&path).unwrap_err();
    assert!(matches!(err, SnapshotError::Decode { .. }));
}

#[test]
fn top_level_object_is_rejected() {
    assert!(decode_records(br#"{"id": "x"}"#).is_none());
}

#[test]
fn save_writes_indented_unicode_json() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("out").join("medicines.json");
    let records = vec![Record::new("x", "X").with(Field::Storage, "Store below 25°C")];

    save_snapshot(&path, &records).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n  {\n    \"id\": \"x\""));
    assert!(text.contains("25°C"));
    assert!(text.ends_with("]\n"));
    assert!(!path.with_extension("json.tmp").exists());
    assert_eq!(load_snapshot(&path).unwrap(), records);
}

#[test]
fn save_replaces_existing_file() {
    let tmp = TempDir::new().unwrap();
    let path = write_bytes(tmp.path(), "medicines.json", SAMPLE.as_bytes());

    save_snapshot(&path, &[]).unwrap();

    assert!(load_snapshot(&path).unwrap().is_empty());
}

#[test]
fn failed_save_removes_the_temp_file() {
    let tmp = TempDir::new().unwrap();
    // A non-empty directory where the snapshot should go makes the rename fail.
    let path = tmp.path().join("medicines.json");
    fs::create_dir(&path).unwrap();
    write_bytes(&path, "keep.txt", b"x");

    let err = save_snapshot(&path, &[Record::new("x", "X")]).unwrap_err();

    assert!(matches!(err, SnapshotError::Write { .. }));
    assert!(!path.with_extension("json.tmp").exists());
    assert!(path.join("keep.txt").exists());
}

#[test]
fn save_writes_the_normalized_form() {
    let records = decode_records(
        br#"[{"id": "x", "name": "X", "storage": null, "packSize": 30, "price": 12.5, "inStock": null}]"#,
    )
    .unwrap()
    .0;

    let out: serde_json::Value = serde_json::from_str(&to_json_string(&records).unwrap()).unwrap();

    assert!(out[0].get("storage").is_none());
    assert_eq!(out[0]["packSize"], "30");
    assert_eq!(out[0]["price"], 12.5);
    assert!(out[0]["inStock"].is_null());
}
