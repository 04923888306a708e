use crate::query::{FieldValue, Record};
use crate::store::{Entity, EntityKind, IndexSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassExperience {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upcoming_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Class {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub student_count: u32,
    pub avg_score: f64,
    pub completion_rate: f64,
    pub completed_experiences: Vec<ClassExperience>,
    pub upcoming_experiences: Vec<ClassExperience>,
}

impl Class {
    /// Leading digits of the class name: `9A` is grade `9`, `10B` is grade `10`.
    pub fn grade(&self) -> &str {
        let end = self
            .name
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.name.len());
        &self.name[..end]
    }
}

impl Record for Class {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Id(&self.id)),
            "name" => Some(FieldValue::Text(&self.name)),
            "subject" => Some(FieldValue::Text(&self.subject)),
            "grade" => Some(FieldValue::Id(self.grade())),
            "studentCount" => Some(FieldValue::Number(self.student_count as f64)),
            "avgScore" => Some(FieldValue::Number(self.avg_score)),
            "completionRate" => Some(FieldValue::Number(self.completion_rate)),
            _ => None,
        }
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.name, &self.subject]
    }
}

impl Entity for Class {
    const KIND: EntityKind = EntityKind::Classes;
    const ID_PREFIX: &'static str = "class";

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn indexes() -> Vec<IndexSpec<Self>> {
        vec![
            IndexSpec {
                name: "grade",
                keys: |c| vec![c.grade().to_string()],
            },
            IndexSpec {
                name: "subject",
                keys: |c| vec![c.subject.clone()],
            },
        ]
    }
}
