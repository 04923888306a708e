use crate::query::{FieldValue, Record};
use crate::store::{Entity, EntityKind, EntityStore, IndexSpec};
use serde::{Deserialize, Serialize};

/// One student's result on one experience in one class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub student_id: String,
    pub score: f64,
    pub attempts: u32,
    pub mistakes: u32,
    pub time: String,
    pub completion: f64,
    pub badges: u32,
    pub class_id: String,
    pub experience_id: String,
}

/// Seconds in a human duration such as `8min 24secs`, `20min` or `1h 5m`.
/// `None` when nothing parses or the total does not fit in a `u64`.
pub fn parse_duration_secs(s: &str) -> Option<u64> {
    let mut total: u64 = 0;
    let mut number: Option<u64> = None;
    let mut seen = false;
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if let Some(d) = c.to_digit(10) {
            number = Some(number.unwrap_or(0).checked_mul(10)?.checked_add(d as u64)?);
            continue;
        }
        if c.is_alphabetic() {
            let Some(n) = number.take() else {
                continue;
            };
            let unit = match c.to_ascii_lowercase() {
                'h' => 3600,
                'm' => 60,
                's' => 1,
                _ => return None,
            };
            total = total.checked_add(n.checked_mul(unit)?)?;
            seen = true;
            while chars.peek().is_some_and(|c| c.is_alphabetic()) {
                chars.next();
            }
        }
    }
    // bare trailing number counts as minutes
    if let Some(n) = number {
        total = total.checked_add(n.checked_mul(60)?)?;
        seen = true;
    }
    seen.then_some(total)
}

impl Record for Student {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Id(&self.id)),
            "name" => Some(FieldValue::Text(&self.name)),
            "studentId" => Some(FieldValue::Id(&self.student_id)),
            "score" => Some(FieldValue::Number(self.score)),
            "attempts" => Some(FieldValue::Number(self.attempts as f64)),
            "mistakes" => Some(FieldValue::Number(self.mistakes as f64)),
            "time" => Some(FieldValue::Text(&self.time)),
            "timeSeconds" => parse_duration_secs(&self.time).map(|s| FieldValue::Number(s as f64)),
            "completion" => Some(FieldValue::Number(self.completion)),
            "badges" => Some(FieldValue::Number(self.badges as f64)),
            "classId" => Some(FieldValue::Id(&self.class_id)),
            "experienceId" => Some(FieldValue::Id(&self.experience_id)),
            _ => None,
        }
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.name, &self.student_id]
    }
}

impl Entity for Student {
    const KIND: EntityKind = EntityKind::Students;
    const ID_PREFIX: &'static str = "s";

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn indexes() -> Vec<IndexSpec<Self>> {
        vec![
            IndexSpec {
                name: "classId",
                keys: |s| vec![s.class_id.clone()],
            },
            IndexSpec {
                name: "experienceId",
                keys: |s| vec![s.experience_id.clone()],
            },
            IndexSpec {
                name: "studentId",
                keys: |s| vec![s.student_id.clone()],
            },
        ]
    }
}

impl EntityStore<Student> {
    /// Narrow to a class and/or experience; absent or blank arguments keep the current filter.
    pub fn fetch(&mut self, class_id: Option<&str>, experience_id: Option<&str>) -> Vec<&Student> {
        if let Some(c) = class_id.filter(|c| !c.trim().is_empty()) {
            self.set_filter("classId", c);
        }
        if let Some(e) = experience_id.filter(|e| !e.trim().is_empty()) {
            self.set_filter("experienceId", e);
        }
        self.filtered()
    }

    /// First performance row for a student number, used to open a student session.
    pub fn find_by_student_id(&self, student_id: &str) -> Option<&Student> {
        self.by_key("studentId", student_id)
            .and_then(|rows| rows.into_iter().next())
    }
}
