use std::collections::BTreeMap;

/// Secondary grouping of a collection: key -> positions of the records carrying it,
/// in collection order. Built wholesale; callers rebuild after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedIndex {
    buckets: BTreeMap<String, Vec<usize>>,
}

impl DerivedIndex {
    /// Records whose extractor yields no keys, or only blank keys, land in no bucket.
    pub fn build<T, F, K>(records: &[T], keys: F) -> Self
    where
        F: Fn(&T) -> K,
        K: IntoIterator<Item = String>,
    {
        let mut buckets: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (pos, record) in records.iter().enumerate() {
            for key in keys(record) {
                if key.trim().is_empty() {
                    continue;
                }
                let bucket = buckets.entry(key).or_default();
                // positions grow monotonically, so a repeated key shows up as the last entry
                if bucket.last() != Some(&pos) {
                    bucket.push(pos);
                }
            }
        }
        Self { buckets }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    pub fn positions(&self, key: &str) -> &[usize] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn lookup<'a, T>(&self, records: &'a [T], key: &str) -> Vec<&'a T> {
        self.positions(key)
            .iter()
            .filter_map(|&pos| records.get(pos))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: &'static str,
        class_id: &'static str,
        tags: Vec<&'static str>,
    }

    fn items() -> Vec<Item> {
        vec![
            Item { id: "s1", class_id: "class001", tags: vec!["9A"] },
            Item { id: "s2", class_id: "class002", tags: vec!["9A", "9B", "9A"] },
            Item { id: "s3", class_id: "class001", tags: vec![] },
            Item { id: "s4", class_id: "  ", tags: vec![""] },
        ]
    }

    fn by_class(item: &Item) -> Option<String> {
        Some(item.class_id.to_string())
    }

    #[test]
    fn lookup_preserves_collection_order() {
        let data = items();
        let idx = DerivedIndex::build(&data, by_class);
        let hits: Vec<&str> = idx.lookup(&data, "class001").iter().map(|i| i.id).collect();
        assert_eq!(hits, vec!["s1", "s3"]);
        assert!(idx.lookup(&data, "class999").is_empty());
    }

    #[test]
    fn blank_keys_are_excluded_and_union_is_complete() {
        let data = items();
        let idx = DerivedIndex::build(&data, by_class);
        assert_eq!(idx.keys().count(), 2);

        let mut seen: Vec<usize> = idx
            .keys()
            .flat_map(|k| idx.positions(k).iter().copied())
            .collect();
        seen.sort();
        let expected: Vec<usize> = data
            .iter()
            .enumerate()
            .filter(|(_, i)| !i.class_id.trim().is_empty())
            .map(|(p, _)| p)
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn multi_key_records_appear_once_per_bucket() {
        let data = items();
        let idx = DerivedIndex::build(&data, |i: &Item| {
            i.tags.iter().map(|t| t.to_string()).collect::<Vec<_>>()
        });
        assert_eq!(idx.positions("9A"), &[0, 1]);
        assert_eq!(idx.positions("9B"), &[1]);
        let keys: BTreeSet<&str> = idx.keys().collect();
        assert_eq!(keys, BTreeSet::from(["9A", "9B"]));
    }
}
