use crate::classes::Class;
use crate::config::Config;
use crate::experiences::Experience;
use crate::gate::GatePolicy;
use crate::pending::PendingQueue;
use crate::query::{FilterConfig, SortConfig};
use crate::seed;
use crate::session::Session;
use crate::stats::{ReportSources, StatsStore};
use crate::store::EntityStore;
use crate::students::Student;
use crate::teachers::Teacher;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub classes: EntityStore<Class>,
    pub students: EntityStore<Student>,
    pub teachers: EntityStore<Teacher>,
    pub experiences: EntityStore<Experience>,
    pub stats: StatsStore,
    pub session: Session,
    pub pending: PendingQueue,
    pub gate: GatePolicy,
}

impl AppState {
    /// `--empty` leaves the four collections blank; session and stats fixtures are always loaded.
    pub fn new(cfg: &Config) -> Self {
        let (classes, students, teachers, experiences) = if cfg.empty {
            (Vec::new(), Vec::new(), Vec::new(), Vec::new())
        } else {
            (
                seed::classes(),
                seed::students(),
                seed::teachers(),
                seed::experiences(),
            )
        };
        let student_defaults = FilterConfig::new()
            .with("classId", "class001")
            .with("experienceId", "exp001");

        Self {
            classes: EntityStore::new(classes),
            students: EntityStore::new(students)
                .with_defaults(student_defaults, Some(SortConfig::ascending("name"))),
            teachers: EntityStore::new(teachers),
            experiences: EntityStore::new(experiences),
            stats: StatsStore::seeded(),
            session: Session::seeded(),
            pending: PendingQueue::new(cfg.delay()),
            gate: cfg.gate_policy(),
        }
    }

    /// Split borrow: the stats store mutably, every collection read-only.
    pub fn stats_and_sources(&mut self) -> (&mut StatsStore, ReportSources<'_>) {
        (
            &mut self.stats,
            ReportSources {
                students: &self.students,
                classes: &self.classes,
                teachers: &self.teachers,
                experiences: &self.experiences,
            },
        )
    }
}
