use crate::index::DerivedIndex;
use crate::query::{self, FilterConfig, Record, SortConfig, SEARCH_DIMENSION};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Classes,
    Students,
    Teachers,
    Experiences,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Classes => "classes",
            EntityKind::Students => "students",
            EntityKind::Teachers => "teachers",
            EntityKind::Experiences => "experiences",
        }
    }
}

/// Named key extractor for one derived index of a store.
pub struct IndexSpec<T> {
    pub name: &'static str,
    pub keys: fn(&T) -> Vec<String>,
}

pub trait Entity: Record + Clone + Serialize + DeserializeOwned {
    const KIND: EntityKind;
    const ID_PREFIX: &'static str;

    fn set_id(&mut self, id: String);

    fn indexes() -> Vec<IndexSpec<Self>>;
}

/// Ordered collection of one entity kind plus its active filter/sort and derived indexes.
pub struct EntityStore<T: Entity> {
    records: Vec<T>,
    filter: FilterConfig,
    sort: Option<SortConfig>,
    default_filter: FilterConfig,
    default_sort: Option<SortConfig>,
    specs: Vec<IndexSpec<T>>,
    indexes: BTreeMap<&'static str, DerivedIndex>,
    current: Option<String>,
}

impl<T: Entity> EntityStore<T> {
    pub fn new(records: Vec<T>) -> Self {
        let mut store = Self {
            records,
            filter: FilterConfig::new(),
            sort: None,
            default_filter: FilterConfig::new(),
            default_sort: None,
            specs: T::indexes(),
            indexes: BTreeMap::new(),
            current: None,
        };
        store.rebuild();
        store
    }

    /// Initial filter/sort, also restored by `reset_filters`.
    pub fn with_defaults(mut self, filter: FilterConfig, sort: Option<SortConfig>) -> Self {
        self.default_filter = filter.clone();
        self.default_sort = sort.clone();
        self.filter = filter;
        self.sort = sort;
        self
    }

    pub fn kind(&self) -> EntityKind {
        T::KIND
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.position(id).map(|pos| &self.records[pos])
    }

    /// Look a record up and remember it as the store's current record.
    pub fn fetch_by_id(&mut self, id: &str) -> Option<&T> {
        match self.position(id) {
            Some(pos) => {
                self.current = Some(id.to_string());
                Some(&self.records[pos])
            }
            None => {
                self.current = None;
                None
            }
        }
    }

    /// Resolved on every call, so it never goes stale after a mutation or delete.
    pub fn current(&self) -> Option<&T> {
        self.current.as_deref().and_then(|id| self.get(id))
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    pub fn sort(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    pub fn filtered(&self) -> Vec<&T> {
        query::apply(&self.records, &self.filter, self.sort.as_ref())
    }

    /// Filtered view with extra dimensions layered over the active filter.
    pub fn filtered_with(&self, overrides: &FilterConfig) -> Vec<&T> {
        let filter = self.filter.merged(overrides);
        query::apply(&self.records, &filter, self.sort.as_ref())
    }

    pub fn index_names(&self) -> Vec<&'static str> {
        self.specs.iter().map(|s| s.name).collect()
    }

    /// `None` when the store has no index of that name.
    pub fn by_key(&self, index: &str, key: &str) -> Option<Vec<&T>> {
        self.indexes
            .get(index)
            .map(|idx| idx.lookup(&self.records, key))
    }

    pub fn index_keys(&self, index: &str) -> Option<Vec<&str>> {
        self.indexes.get(index).map(|idx| idx.keys().collect())
    }

    pub fn set_filter(&mut self, dimension: &str, value: &str) {
        self.filter.set(dimension, value);
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.filter.set(SEARCH_DIMENSION, query);
    }

    pub fn set_sort(&mut self, field: &str) -> &SortConfig {
        self.sort.insert(SortConfig::toggled(self.sort.as_ref(), field))
    }

    pub fn reset_filters(&mut self) {
        self.filter = self.default_filter.clone();
        self.sort = self.default_sort.clone();
    }

    /// Missing attributes default to empty/zero. Returns `None` when the data is not an
    /// object or carries values of the wrong type.
    pub fn create(&mut self, data: &serde_json::Value) -> Option<T> {
        let Some(obj) = data.as_object() else {
            tracing::warn!(kind = T::KIND.as_str(), "create payload is not an object");
            return None;
        };
        let mut obj = obj.clone();
        obj.remove("id");
        let mut record: T = match serde_json::from_value(serde_json::Value::Object(obj)) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(kind = T::KIND.as_str(), error = %e, "create rejected");
                return None;
            }
        };
        record.set_id(self.next_id());
        self.insert(record.clone());
        Some(record)
    }

    fn insert(&mut self, record: T) {
        tracing::debug!(kind = T::KIND.as_str(), id = record.id(), "insert");
        self.records.push(record);
        self.rebuild();
    }

    /// Shallow merge of `patch` over the stored record; `id` is never overwritten.
    pub fn update(&mut self, id: &str, patch: &serde_json::Value) -> bool {
        let Some(pos) = self.position(id) else {
            tracing::debug!(kind = T::KIND.as_str(), id, "update: not found");
            return false;
        };
        let Some(patch) = patch.as_object() else {
            tracing::warn!(kind = T::KIND.as_str(), id, "update patch is not an object");
            return false;
        };
        let merged = serde_json::to_value(&self.records[pos]).and_then(|mut value| {
            if let Some(obj) = value.as_object_mut() {
                for (k, v) in patch {
                    if k != "id" {
                        obj.insert(k.clone(), v.clone());
                    }
                }
            }
            serde_json::from_value::<T>(value)
        });
        match merged {
            Ok(record) => {
                self.records[pos] = record;
                self.rebuild();
                true
            }
            Err(e) => {
                tracing::warn!(kind = T::KIND.as_str(), id, error = %e, "update rejected");
                false
            }
        }
    }

    /// No cascade: dependents referencing `id` are left in place.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(pos) = self.position(id) else {
            tracing::debug!(kind = T::KIND.as_str(), id, "delete: not found");
            return false;
        };
        self.records.remove(pos);
        self.rebuild();
        true
    }

    /// Apply an in-place mutation to one record and rebuild the indexes.
    pub fn modify(&mut self, id: &str, f: impl FnOnce(&mut T)) -> bool {
        let Some(pos) = self.position(id) else {
            tracing::debug!(kind = T::KIND.as_str(), id, "modify: not found");
            return false;
        };
        f(&mut self.records[pos]);
        self.rebuild();
        true
    }

    fn rebuild(&mut self) {
        self.indexes = self
            .specs
            .iter()
            .map(|spec| (spec.name, DerivedIndex::build(&self.records, spec.keys)))
            .collect();
    }

    fn next_id(&self) -> String {
        let mut n = self.records.len() + 1;
        loop {
            let id = format!("{}{:03}", T::ID_PREFIX, n);
            if self.position(&id).is_none() {
                return id;
            }
            n += 1;
        }
    }
}
