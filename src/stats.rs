use crate::classes::Class;
use crate::experiences::Experience;
use crate::query::{self, Distribution, FilterConfig, SCORE_BUCKETS};
use crate::seed;
use crate::store::EntityStore;
use crate::students::Student;
use crate::teachers::Teacher;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub avg_score: f64,
    pub avg_completion_rate: f64,
    pub students_in_class: u32,
    #[serde(rename = "assignedVRExperiences")]
    pub assigned_vr_experiences: u32,
    pub avg_engagement_time: String,
    pub avg_mistakes: String,
    pub score_distribution: Distribution,
    pub mistakes_distribution: Distribution,
    pub time_distribution: Distribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceStats {
    pub avg_score: f64,
    pub completion_rate: f64,
    pub students_assigned: u32,
    pub avg_time: String,
    pub avg_mistakes: f64,
    pub score_distribution: Distribution,
}

impl ExperienceStats {
    fn placeholder() -> Self {
        Self {
            avg_score: 0.0,
            completion_rate: 0.0,
            students_assigned: 0,
            avg_time: "0 min".to_string(),
            avg_mistakes: 0.0,
            score_distribution: Distribution {
                labels: seed::score_labels(),
                values: vec![0; SCORE_BUCKETS.len()],
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherStatsSummary {
    pub avg_students_score: f64,
    pub avg_students_completion: f64,
    pub assigned_classes: u32,
    pub number_of_students: u32,
    pub assigned_experiences: u32,
    pub avg_time_per_experience: String,
}

impl TeacherStatsSummary {
    fn placeholder() -> Self {
        Self {
            avg_students_score: 0.0,
            avg_students_completion: 0.0,
            assigned_classes: 0,
            number_of_students: 0,
            assigned_experiences: 0,
            avg_time_per_experience: "0 minutes".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Active stats filters. Empty strings mean "all".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsFilters {
    pub class: String,
    pub grade: String,
    pub experience: String,
    pub teacher: String,
    pub date_range: DateRange,
}

/// Partial filter update as sent by a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsFilterPatch {
    pub class: Option<String>,
    pub grade: Option<String>,
    pub experience: Option<String>,
    pub teacher: Option<String>,
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTicket {
    pub format: ExportFormat,
    pub download_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredStats {
    pub avg_score: f64,
    pub avg_completion_rate: f64,
    pub total_students: usize,
    pub total_experiences: usize,
    pub top_performing_class: Option<String>,
    pub lowest_performing_class: Option<String>,
    pub most_active_teacher: Option<String>,
    pub most_popular_experience: Option<String>,
    pub score_distribution: Distribution,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdowns {
    pub by_class: Option<OverallStats>,
    pub by_experience: Option<ExperienceStats>,
    pub by_teacher: Option<TeacherStatsSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: String,
    pub filters: StatsFilters,
    pub overall_stats: OverallStats,
    pub filtered_stats: FilteredStats,
    pub detailed_breakdowns: Breakdowns,
}

/// Read-only views over the entity stores a report aggregates.
pub struct ReportSources<'a> {
    pub students: &'a EntityStore<Student>,
    pub classes: &'a EntityStore<Class>,
    pub teachers: &'a EntityStore<Teacher>,
    pub experiences: &'a EntityStore<Experience>,
}

pub struct StatsStore {
    overall: OverallStats,
    by_class: BTreeMap<String, OverallStats>,
    by_experience: BTreeMap<String, ExperienceStats>,
    by_teacher: BTreeMap<String, TeacherStatsSummary>,
    filters: StatsFilters,
    default_date_range: DateRange,
}

impl StatsStore {
    pub fn seeded() -> Self {
        let default_date_range = seed::default_date_range();
        Self {
            overall: seed::overall_stats(),
            by_class: seed::class_stats(),
            by_experience: seed::experience_stats(),
            by_teacher: seed::teacher_stats_summaries(),
            filters: Self::blank_filters(&default_date_range),
            default_date_range,
        }
    }

    fn blank_filters(date_range: &DateRange) -> StatsFilters {
        StatsFilters {
            class: String::new(),
            grade: String::new(),
            experience: String::new(),
            teacher: String::new(),
            date_range: date_range.clone(),
        }
    }

    pub fn filters(&self) -> &StatsFilters {
        &self.filters
    }

    /// Merge `patch` into the active filters; a patch without a date range
    /// restores the default range.
    pub fn apply_filters(&mut self, patch: StatsFilterPatch) {
        if let Some(v) = patch.class {
            self.filters.class = v;
        }
        if let Some(v) = patch.grade {
            self.filters.grade = v;
        }
        if let Some(v) = patch.experience {
            self.filters.experience = v;
        }
        if let Some(v) = patch.teacher {
            self.filters.teacher = v;
        }
        self.filters.date_range = patch
            .date_range
            .unwrap_or_else(|| self.default_date_range.clone());
        tracing::debug!(filters = ?self.filters, "stats filters applied");
    }

    pub fn reset_filters(&mut self) {
        self.filters = Self::blank_filters(&self.default_date_range);
    }

    pub fn overall(&mut self, patch: Option<StatsFilterPatch>) -> &OverallStats {
        if let Some(patch) = patch {
            self.apply_filters(patch);
        }
        &self.overall
    }

    /// Falls back to the overall figures when the class has no stats of its own.
    pub fn class_stats(&mut self, class_id: &str, patch: StatsFilterPatch) -> &OverallStats {
        self.apply_filters(StatsFilterPatch {
            class: Some(class_id.to_string()),
            ..patch
        });
        self.by_class.get(class_id).unwrap_or(&self.overall)
    }

    pub fn experience_stats(&mut self, experience_id: &str, patch: StatsFilterPatch) -> ExperienceStats {
        self.apply_filters(StatsFilterPatch {
            experience: Some(experience_id.to_string()),
            ..patch
        });
        self.by_experience
            .get(experience_id)
            .cloned()
            .unwrap_or_else(ExperienceStats::placeholder)
    }

    pub fn teacher_stats(&mut self, teacher_id: &str, patch: StatsFilterPatch) -> TeacherStatsSummary {
        self.apply_filters(StatsFilterPatch {
            teacher: Some(teacher_id.to_string()),
            ..patch
        });
        self.by_teacher
            .get(teacher_id)
            .cloned()
            .unwrap_or_else(TeacherStatsSummary::placeholder)
    }

    pub fn export(&self, format: ExportFormat) -> ExportTicket {
        let stamp = Utc::now().timestamp_millis();
        tracing::info!(format = format.extension(), "stats export requested");
        ExportTicket {
            format,
            download_url: format!("/exports/stats-export-{stamp}.{}", format.extension()),
        }
    }

    /// Aggregate the student rows selected by the (merged) filters into a report.
    pub fn report(&mut self, patch: StatsFilterPatch, src: &ReportSources<'_>) -> Report {
        self.apply_filters(patch);
        let rows = self.report_rows(src);

        let score = query::summarize(&rows, "score");
        let completion = query::summarize(&rows, "completion");
        let total_students = rows
            .iter()
            .map(|r| r.student_id.as_str())
            .collect::<HashSet<_>>()
            .len();
        let total_experiences = rows
            .iter()
            .map(|r| r.experience_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        let class_avgs = class_averages(&rows);
        let class_name = |id: &str| {
            src.classes
                .get(id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| id.to_string())
        };
        let top = first_extreme(&class_avgs, |a, b| a > b).map(|(id, _)| class_name(id));
        let lowest = first_extreme(&class_avgs, |a, b| a < b).map(|(id, _)| class_name(id));

        let active: Vec<(&Teacher, f64)> = src
            .teachers
            .records()
            .iter()
            .filter(|t| t.is_active)
            .map(|t| (t, t.assigned_classes.len() as f64))
            .collect();
        let most_active_teacher = first_extreme(&active, |a, b| a > b).map(|(t, _)| t.name.clone());

        let experiences: Vec<(&Experience, f64)> = src
            .experiences
            .records()
            .iter()
            .map(|e| (e, e.class_assignments as f64))
            .collect();
        let most_popular_experience =
            first_extreme(&experiences, |a, b| a > b).map(|(e, _)| e.title.clone());

        let f = &self.filters;
        let detailed_breakdowns = Breakdowns {
            by_class: (!f.class.is_empty())
                .then(|| self.by_class.get(&f.class).cloned())
                .flatten(),
            by_experience: (!f.experience.is_empty())
                .then(|| self.by_experience.get(&f.experience).cloned())
                .flatten(),
            by_teacher: (!f.teacher.is_empty())
                .then(|| self.by_teacher.get(&f.teacher).cloned())
                .flatten(),
        };

        Report {
            generated_at: Utc::now().to_rfc3339(),
            filters: self.filters.clone(),
            overall_stats: self.overall.clone(),
            filtered_stats: FilteredStats {
                avg_score: score.mean,
                avg_completion_rate: completion.mean,
                total_students,
                total_experiences,
                top_performing_class: top,
                lowest_performing_class: lowest,
                most_active_teacher,
                most_popular_experience,
                score_distribution: query::distribution(&rows, "score", &SCORE_BUCKETS),
            },
            detailed_breakdowns,
        }
    }

    fn report_rows<'a>(&self, src: &ReportSources<'a>) -> Vec<&'a Student> {
        let f = &self.filters;
        let filter = FilterConfig::new()
            .with("classId", f.class.as_str())
            .with("experienceId", f.experience.as_str());
        let mut rows = query::apply(src.students.records(), &filter, None);

        if !f.grade.trim().is_empty() {
            let in_grade: HashSet<&str> = src
                .classes
                .by_key("grade", f.grade.trim())
                .unwrap_or_default()
                .into_iter()
                .map(|c| c.id.as_str())
                .collect();
            rows.retain(|r| in_grade.contains(r.class_id.as_str()));
        }

        if !f.teacher.trim().is_empty() {
            // teachers list classes by name, students reference them by id
            let names: HashSet<&str> = src
                .teachers
                .get(f.teacher.trim())
                .map(|t| t.assigned_classes.iter().map(String::as_str).collect())
                .unwrap_or_default();
            rows.retain(|r| {
                src.classes
                    .get(&r.class_id)
                    .is_some_and(|c| names.contains(c.name.as_str()))
            });
        }
        rows
    }
}

/// Mean score per class id, in order of first appearance.
fn class_averages<'a>(rows: &[&'a Student]) -> Vec<(&'a str, f64)> {
    let mut acc: Vec<(&str, f64, usize)> = Vec::new();
    for r in rows {
        match acc.iter_mut().find(|(id, _, _)| *id == r.class_id) {
            Some(entry) => {
                entry.1 += r.score;
                entry.2 += 1;
            }
            None => acc.push((r.class_id.as_str(), r.score, 1)),
        }
    }
    acc.into_iter()
        .map(|(id, sum, n)| (id, sum / n as f64))
        .collect()
}

/// First entry whose value beats every other under `better`; earlier entries win ties.
fn first_extreme<T: Copy>(items: &[(T, f64)], better: impl Fn(f64, f64) -> bool) -> Option<(T, f64)> {
    let mut best: Option<(T, f64)> = None;
    for &(item, value) in items {
        match best {
            Some((_, b)) if !better(value, b) => {}
            _ => best = Some((item, value)),
        }
    }
    best
}
