use crate::query::{FieldValue, FilterConfig, Record};
use crate::store::{Entity, EntityKind, EntityStore, IndexSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeacherStats {
    pub assigned_classes: u32,
    pub number_of_students: u32,
    pub assigned_experiences: u32,
    pub average_students_score: f64,
    pub average_students_completion: f64,
    pub average_time_per_experience: String,
}

impl Default for TeacherStats {
    fn default() -> Self {
        Self {
            assigned_classes: 0,
            number_of_students: 0,
            assigned_experiences: 0,
            average_students_score: 0.0,
            average_students_completion: 0.0,
            average_time_per_experience: "0 minutes".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub assigned_classes: Vec<String>,
    pub assigned_experiences: Vec<String>,
    pub stats: TeacherStats,
    pub is_active: bool,
}

impl Default for Teacher {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            email: String::new(),
            subject: String::new(),
            assigned_classes: Vec::new(),
            assigned_experiences: Vec::new(),
            stats: TeacherStats::default(),
            is_active: true,
        }
    }
}

impl Teacher {
    fn sync_assignment_counts(&mut self) {
        self.stats.assigned_classes = self.assigned_classes.len() as u32;
        self.stats.assigned_experiences = self.assigned_experiences.len() as u32;
    }
}

impl Record for Teacher {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Id(&self.id)),
            "name" => Some(FieldValue::Text(&self.name)),
            "email" => Some(FieldValue::Text(&self.email)),
            "subject" => Some(FieldValue::Text(&self.subject)),
            "assignedClasses" => Some(FieldValue::List(&self.assigned_classes)),
            "assignedExperiences" => Some(FieldValue::List(&self.assigned_experiences)),
            "isActive" => Some(FieldValue::Bool(self.is_active)),
            "stats.assignedClasses" => Some(FieldValue::Number(self.stats.assigned_classes as f64)),
            "stats.numberOfStudents" => {
                Some(FieldValue::Number(self.stats.number_of_students as f64))
            }
            "stats.assignedExperiences" => {
                Some(FieldValue::Number(self.stats.assigned_experiences as f64))
            }
            "stats.averageStudentsScore" => {
                Some(FieldValue::Number(self.stats.average_students_score))
            }
            "stats.averageStudentsCompletion" => {
                Some(FieldValue::Number(self.stats.average_students_completion))
            }
            "stats.averageTimePerExperience" => {
                Some(FieldValue::Text(&self.stats.average_time_per_experience))
            }
            _ => None,
        }
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.name, &self.email, &self.subject]
    }
}

impl Entity for Teacher {
    const KIND: EntityKind = EntityKind::Teachers;
    const ID_PREFIX: &'static str = "t";

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn indexes() -> Vec<IndexSpec<Self>> {
        vec![
            IndexSpec {
                name: "status",
                keys: |t| {
                    let status = if t.is_active { "active" } else { "deactivated" };
                    vec![status.to_string()]
                },
            },
            IndexSpec {
                name: "subject",
                keys: |t| vec![t.subject.clone()],
            },
            IndexSpec {
                name: "class",
                keys: |t| t.assigned_classes.clone(),
            },
            IndexSpec {
                name: "experience",
                keys: |t| t.assigned_experiences.clone(),
            },
        ]
    }
}

fn active_only(active: bool) -> FilterConfig {
    FilterConfig::new().with("isActive", active.to_string())
}

impl EntityStore<Teacher> {
    /// Active teachers under the current search/filter.
    pub fn list_active(&self) -> Vec<&Teacher> {
        self.filtered_with(&active_only(true))
    }

    pub fn list_deactivated(&self) -> Vec<&Teacher> {
        self.filtered_with(&active_only(false))
    }

    /// Index lookup restricted to active teachers (by subject, class or experience).
    pub fn active_by_key(&self, index: &str, key: &str) -> Option<Vec<&Teacher>> {
        self.by_key(index, key)
            .map(|hits| hits.into_iter().filter(|t| t.is_active).collect())
    }

    /// Idempotent: assigning an already assigned class still reports success.
    pub fn assign_class(&mut self, teacher_id: &str, class_id: &str) -> bool {
        self.modify(teacher_id, |t| {
            if !t.assigned_classes.iter().any(|c| c == class_id) {
                t.assigned_classes.push(class_id.to_string());
            }
            t.sync_assignment_counts();
        })
    }

    pub fn unassign_class(&mut self, teacher_id: &str, class_id: &str) -> bool {
        self.modify(teacher_id, |t| {
            t.assigned_classes.retain(|c| c != class_id);
            t.sync_assignment_counts();
        })
    }

    pub fn assign_experience(&mut self, teacher_id: &str, experience_id: &str) -> bool {
        self.modify(teacher_id, |t| {
            if !t.assigned_experiences.iter().any(|e| e == experience_id) {
                t.assigned_experiences.push(experience_id.to_string());
            }
            t.sync_assignment_counts();
        })
    }

    pub fn unassign_experience(&mut self, teacher_id: &str, experience_id: &str) -> bool {
        self.modify(teacher_id, |t| {
            t.assigned_experiences.retain(|e| e != experience_id);
            t.sync_assignment_counts();
        })
    }

    /// Deactivation drops every assignment and zeroes the stats.
    pub fn deactivate(&mut self, teacher_id: &str) -> bool {
        self.modify(teacher_id, |t| {
            t.is_active = false;
            t.assigned_classes.clear();
            t.assigned_experiences.clear();
            t.stats = TeacherStats::default();
        })
    }

    pub fn activate(&mut self, teacher_id: &str) -> bool {
        self.modify(teacher_id, |t| t.is_active = true)
    }
}
