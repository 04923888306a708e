use crate::query::{FieldValue, Record};
use crate::store::{Entity, EntityKind, IndexSpec};
use crate::students::parse_duration_secs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceStatus {
    Active,
    Completed,
    Upcoming,
}

impl ExperienceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceStatus::Active => "active",
            ExperienceStatus::Completed => "completed",
            ExperienceStatus::Upcoming => "upcoming",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub duration: String,
    pub avg_global_score: f64,
    pub avg_classes_score: f64,
    pub class_assignments: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ExperienceStatus>,
}

impl Record for Experience {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Id(&self.id)),
            "title" => Some(FieldValue::Text(&self.title)),
            "duration" => Some(FieldValue::Text(&self.duration)),
            "durationSeconds" => {
                parse_duration_secs(&self.duration).map(|s| FieldValue::Number(s as f64))
            }
            "avgGlobalScore" => Some(FieldValue::Number(self.avg_global_score)),
            "avgClassesScore" => Some(FieldValue::Number(self.avg_classes_score)),
            "classAssignments" => Some(FieldValue::Number(self.class_assignments as f64)),
            "thumbnail" => self.thumbnail.as_deref().map(FieldValue::Text),
            "status" => self.status.map(|s| FieldValue::Id(s.as_str())),
            _ => None,
        }
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.title]
    }
}

impl Entity for Experience {
    const KIND: EntityKind = EntityKind::Experiences;
    const ID_PREFIX: &'static str = "exp";

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn indexes() -> Vec<IndexSpec<Self>> {
        vec![IndexSpec {
            name: "status",
            keys: |e| e.status.map(|s| s.as_str().to_string()).into_iter().collect(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use crate::store::EntityStore;
    use serde_json::json;

    fn titles(v: &[&Experience]) -> Vec<String> {
        v.iter().map(|e| e.title.clone()).collect()
    }

    #[test]
    fn search_atomic_is_case_insensitive() {
        let mut store = EntityStore::new(seed::experiences());
        store.set_search_query("atomic");
        assert_eq!(
            titles(&store.filtered()),
            vec!["Atomic Bonds", "Atomic Bond Types"]
        );
    }

    #[test]
    fn status_index_and_filter() {
        let mut store = EntityStore::new(seed::experiences());
        let upcoming = store.by_key("status", "upcoming").unwrap();
        assert_eq!(titles(&upcoming), vec!["Atomic Bond Types", "Chemical Reactions II"]);

        store.set_filter("status", "active");
        store.set_sort("durationSeconds");
        store.set_sort("durationSeconds");
        assert_eq!(
            titles(&store.filtered()),
            vec!["Chemical Reactions I", "Atomic Bonds", "Nobel Gasses"]
        );
    }

    #[test]
    fn runaway_duration_drops_out_of_duration_filter() {
        let mut store = EntityStore::new(seed::experiences());
        assert!(store.update("exp002", &json!({ "duration": "99999999999999999999min" })));
        store.set_sort("durationSeconds");
        assert_eq!(store.filtered().len(), 5);

        store.set_filter("durationSeconds", "360");
        assert!(store.filtered().is_empty());
        store.set_filter("durationSeconds", "480");
        assert_eq!(titles(&store.filtered()), vec!["Atomic Bonds"]);
    }

    #[test]
    fn statusless_experience_is_not_indexed() {
        let mut store = EntityStore::new(seed::experiences());
        let e = store
            .create(&json!({ "title": "Optics", "duration": "10min" }))
            .expect("created");
        assert_eq!(e.id, "exp006");
        assert!(e.status.is_none());
        let indexed: usize = ["active", "completed", "upcoming"]
            .iter()
            .map(|k| store.by_key("status", k).unwrap().len())
            .sum();
        assert_eq!(indexed, store.len() - 1);
    }
}
