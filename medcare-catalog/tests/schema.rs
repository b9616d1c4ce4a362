use medcare_catalog::*;
use proptest::prelude::*;

fn label_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Brand Name".to_string()),
        Just("Storage".to_string()),
        Just("Pack Size".to_string()),
        Just("Batch".to_string()),
        Just("Origin".to_string()),
        "[A-Za-z ]{1,12}",
    ]
}

fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), Just("   ".to_string()), "[a-z0-9 °]{0,16}"]
}

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        proptest::option::of(value_strategy()),
        proptest::option::of(value_strategy()),
        proptest::option::of(value_strategy()),
        proptest::collection::vec((label_strategy(), value_strategy()), 0..16),
    )
        .prop_map(|(name, storage, pack_size, rows)| {
            let mut record = Record::default();
            record.id = Some("id".to_string());
            record.name = name;
            record.storage = storage;
            record.pack_size = pack_size;
            record.details = rows
                .into_iter()
                .map(|(label, value)| DetailRow::new(label, value))
                .collect();
            record
        })
}

proptest! {
    #[test]
    fn normalize_is_idempotent(record in record_strategy()) {
        let schema = DetailSchema::default();
        let mut once = record.clone();
        schema.normalize(&mut once);
        let mut twice = once.clone();
        schema.normalize(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn canonical_labels_form_the_prefix(record in record_strategy()) {
        let schema = DetailSchema::default();
        let mut record = record;
        schema.normalize(&mut record);
        prop_assert!(schema.is_normalized(&record));
        let prefix: Vec<&str> = record.labels().take(schema.len()).collect();
        let canonical: Vec<&str> = schema.labels().collect();
        prop_assert_eq!(prefix, canonical);
    }
}

#[test]
fn custom_labels_keep_relative_order() {
    let schema = DetailSchema::default();
    let mut record = Record::new("x", "X")
        .with_detail("Zeta", "1")
        .with_detail("Alpha", "2")
        .with_detail("Storage", "Cool place");
    schema.normalize(&mut record);
    let tail: Vec<&str> = record.labels().skip(12).collect();
    assert_eq!(tail, vec!["Zeta", "Alpha"]);
    assert_eq!(record.detail("Storage"), Some("Cool place"));
}
