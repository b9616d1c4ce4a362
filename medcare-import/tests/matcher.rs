use medcare_catalog::*;
use medcare_import::*;

fn priors(records: Vec<Record>) -> Vec<Snapshot> {
    vec![Snapshot::new(SnapshotSource::Prior { generation: 1 }, records)]
}

#[test]
fn id_match_beats_slug_and_tokens() {
    let snapshots = priors(vec![
        Record::new("other", "Cenforce 100 mg"),
        Record::new("cenforce-100", "Something Else Entirely"),
    ]);
    let config = ReconcileConfig::default();
    let index = PriorIndex::build(&snapshots, &config);

    let current = Record::new("cenforce-100", "Cenforce 100 mg");
    let found = match_record(&current, &index, &config).unwrap();

    assert_eq!(found.method, MatchMethod::Id);
    assert_eq!(found.record.name(), "Something Else Entirely");
}

#[test]
fn slug_matches_brand_name_detail() {
    let snapshots = priors(vec![
        Record::new("sildenafil-100", "Sildenafil Citrate")
            .with_detail("Brand Name", "Cenforce 100 mg"),
    ]);
    let config = ReconcileConfig::default();
    let index = PriorIndex::build(&snapshots, &config);

    let current = Record::new("cenforce-100-new", "Cenforce 100 MG");
    let found = match_record(&current, &index, &config).unwrap();

    assert_eq!(found.method, MatchMethod::Slug);
    assert_eq!(found.record.id(), "sildenafil-100");
}

#[test]
fn low_jaccard_score_is_rejected() {
    let snapshots = priors(vec![Record::new("p650", "Paracetamol 650")]);
    let config = ReconcileConfig::default();
    let index = PriorIndex::build(&snapshots, &config);

    let current = Record::new("p500", "Paracetamol 500");
    assert!(match_record(&current, &index, &config).is_none());
}

#[test]
fn stopwords_do_not_count_against_overlap() {
    let snapshots = priors(vec![Record::new("azee", "Azithromycin 250 Tablet")]);
    let config = ReconcileConfig::default();
    let index = PriorIndex::build(&snapshots, &config);

    let current = Record::new("azithro", "Azithromycin-250");
    let found = match_record(&current, &index, &config).unwrap();

    assert_eq!(found.method, MatchMethod::Fuzzy { score: 1.0 });
    assert_eq!(found.record.id(), "azee");
}

#[test]
fn score_at_threshold_is_accepted() {
    // {ivermectin, 12} vs {ivermectin, 12, iverheal, 6}: 2 / 4
    let snapshots = priors(vec![Record::new("iverheal", "Iverheal 6 Ivermectin 12")]);
    let config = ReconcileConfig::default();
    let index = PriorIndex::build(&snapshots, &config);

    let current = Record::new("ivermectin-12", "Ivermectin 12 mg");
    let found = match_record(&current, &index, &config).unwrap();
    assert_eq!(found.method, MatchMethod::Fuzzy { score: 0.5 });
}

#[test]
fn fuzzy_ties_go_to_the_earliest_candidate() {
    let snapshots = vec![
        Snapshot::new(
            SnapshotSource::Prior { generation: 1 },
            vec![Record::new("first", "Vidalista 20 Black")],
        ),
        Snapshot::new(
            SnapshotSource::Prior { generation: 2 },
            vec![Record::new("second", "Vidalista 20 Yellow")],
        ),
    ];
    let config = ReconcileConfig::default();
    let index = PriorIndex::build(&snapshots, &config);

    let current = Record::new("vidalista", "Vidalista 20 Tablets");
    let found = match_record(&current, &index, &config).unwrap();

    assert_eq!(found.record.id(), "first");
    assert_eq!(found.position, 0);
}

#[test]
fn higher_score_beats_earlier_candidate() {
    let snapshots = priors(vec![
        Record::new("weak", "Tadalafil 20 Generic Pack"),
        Record::new("strong", "Tadalafil 20"),
    ]);
    let config = ReconcileConfig::default();
    let index = PriorIndex::build(&snapshots, &config);

    let current = Record::new("tada", "Tadalafil 20 mg");
    let found = match_record(&current, &index, &config).unwrap();
    assert_eq!(found.record.id(), "strong");
}

#[test]
fn stopword_only_names_never_fuzzy_match() {
    let snapshots = priors(vec![Record::new("blank", "Tablets 10 mg"), Record::new("nameless", "")]);
    let config = ReconcileConfig::default();
    let index = PriorIndex::build(&snapshots, &config);

    let current = Record::new("x", "Tablet");
    assert!(match_record(&current, &index, &config).is_none());

    let current = Record::new("y", "mg");
    assert!(match_record(&current, &index, &config).is_none());
}

#[test]
fn custom_threshold_is_respected() {
    let snapshots = priors(vec![Record::new("p650", "Paracetamol 650")]);
    let config = ReconcileConfig {
        fuzzy_threshold: 0.3,
        ..ReconcileConfig::default()
    };
    let index = PriorIndex::build(&snapshots, &config);

    let current = Record::new("p500", "Paracetamol 500");
    let found = match_record(&current, &index, &config).unwrap();
    assert!(matches!(found.method, MatchMethod::Fuzzy { score } if score < 0.34));
}

#[test]
fn no_priors_means_no_match() {
    let snapshots: Vec<Snapshot> = Vec::new();
    let config = ReconcileConfig::default();
    let index = PriorIndex::build(&snapshots, &config);
    assert!(index.is_empty());
    assert!(match_record(&Record::new("x", "X"), &index, &config).is_none());
}
