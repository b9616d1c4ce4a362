//! Lookup structures over every prior snapshot.
//!
//! Built once per run from the prior snapshots in the order given, then only
//! read. Every key is first-seen-wins, so an earlier snapshot (or an earlier
//! record within one) is never displaced by a later one.

use std::collections::{BTreeSet, HashMap};

use medcare_catalog::{Record, Snapshot, name_tokens, slugify};

use crate::config::ReconcileConfig;

/// An indexed view of the prior records for fast matching.
pub struct PriorIndex<'a> {
    /// Backing store: all prior records, snapshot order then record order.
    records: Vec<&'a Record>,
    /// Non-empty identifier → record position
    by_id: HashMap<&'a str, usize>,
    /// Slug of the name, or of the brand-name detail → record position
    by_name_slug: HashMap<String, usize>,
    /// One token set per record, in record order
    token_index: Vec<(BTreeSet<String>, usize)>,
}

impl<'a> PriorIndex<'a> {
    /// Build an index over the concatenation of `snapshots`.
    pub fn build(snapshots: &'a [Snapshot], config: &ReconcileConfig) -> Self {
        Self::from_records(snapshots.iter().flat_map(|s| s.records.iter()), config)
    }

    /// Build an index from records already in priority order.
    pub fn from_records<I>(records: I, config: &ReconcileConfig) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut index = Self {
            records: Vec::new(),
            by_id: HashMap::new(),
            by_name_slug: HashMap::new(),
            token_index: Vec::new(),
        };

        for record in records {
            let pos = index.records.len();
            index.records.push(record);

            let id = record.id();
            if !id.is_empty() {
                index.by_id.entry(id).or_insert(pos);
            }

            let brand = record.detail_ignore_case(&config.brand_label);

            let name_slug = slugify(record.name());
            if !name_slug.is_empty() {
                index.by_name_slug.entry(name_slug).or_insert(pos);
            }
            if let Some(brand) = brand {
                let brand_slug = slugify(brand);
                if !brand_slug.is_empty() {
                    index.by_name_slug.entry(brand_slug).or_insert(pos);
                }
            }

            let mut tokens = name_tokens(record.name(), &config.stopwords);
            if let Some(brand) = brand {
                tokens.extend(name_tokens(brand, &config.stopwords));
            }
            index.token_index.push((tokens, pos));
        }

        log::debug!(
            "Indexed {} prior records ({} ids, {} name keys)",
            index.records.len(),
            index.by_id.len(),
            index.by_name_slug.len(),
        );

        index
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record at `pos` in index order.
    pub fn get(&self, pos: usize) -> Option<&'a Record> {
        self.records.get(pos).copied()
    }

    /// Position of the first prior record with this identifier.
    pub fn position_by_id(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Position of the first prior record claiming this name slug.
    pub fn position_by_slug(&self, slug: &str) -> Option<usize> {
        self.by_name_slug.get(slug).copied()
    }

    /// Token sets in index order, paired with record positions.
    pub fn token_sets(&self) -> impl Iterator<Item = (&BTreeSet<String>, usize)> {
        self.token_index.iter().map(|(tokens, pos)| (tokens, *pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medcare_catalog::SnapshotSource;

    fn snapshot(generation: usize, records: Vec<Record>) -> Snapshot {
        Snapshot::new(SnapshotSource::Prior { generation }, records)
    }

    #[test]
    fn first_snapshot_wins_id_collisions() {
        let snapshots = vec![
            snapshot(1, vec![Record::new("zinc", "Zinc A")]),
            snapshot(2, vec![Record::new("zinc", "Zinc B")]),
        ];
        let index = PriorIndex::build(&snapshots, &ReconcileConfig::default());

        assert_eq!(index.len(), 2);
        let pos = index.position_by_id("zinc").unwrap();
        assert_eq!(index.get(pos).unwrap().name(), "Zinc A");
    }

    #[test]
    fn empty_ids_are_not_indexed() {
        let snapshots = vec![snapshot(1, vec![Record::new("", "Nameless")])];
        let index = PriorIndex::build(&snapshots, &ReconcileConfig::default());
        assert_eq!(index.position_by_id(""), None);
        assert_eq!(index.position_by_slug("nameless"), Some(0));
    }

    #[test]
    fn brand_name_slug_never_displaces_an_earlier_name() {
        let first = Record::new("a", "Cenforce 100 mg");
        let second = Record::new("b", "Sildenafil Citrate")
            .with_detail("Brand Name", "Cenforce 100 mg")
            .with_detail("Manufacturer", "Centurion");
        let snapshots = vec![snapshot(1, vec![first, second])];
        let index = PriorIndex::build(&snapshots, &ReconcileConfig::default());

        assert_eq!(index.position_by_slug("cenforce-100-mg"), Some(0));
        assert_eq!(index.position_by_slug("sildenafil-citrate"), Some(1));
    }

    #[test]
    fn brand_name_label_is_case_insensitive() {
        let record = Record::new("b", "Generic").with_detail("BRAND NAME", "Vidalista 20");
        let snapshots = vec![snapshot(1, vec![record])];
        let index = PriorIndex::build(&snapshots, &ReconcileConfig::default());
        assert_eq!(index.position_by_slug("vidalista-20"), Some(0));
    }

    #[test]
    fn token_sets_union_name_and_brand() {
        let record = Record::new("b", "Tadalafil 20 mg Tablets")
            .with_detail("Brand Name", "Vidalista 20");
        let snapshots = vec![snapshot(1, vec![record, Record::new("c", "")])];
        let index = PriorIndex::build(&snapshots, &ReconcileConfig::default());

        let sets: Vec<_> = index.token_sets().collect();
        assert_eq!(sets.len(), 2);
        let words: Vec<&str> = sets[0].0.iter().map(String::as_str).collect();
        assert_eq!(words, vec!["20", "tadalafil", "vidalista"]);
        assert!(sets[1].0.is_empty());
    }
}
