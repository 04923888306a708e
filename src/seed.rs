//! Startup data for every store.

use crate::classes::{Class, ClassExperience};
use crate::experiences::{Experience, ExperienceStatus};
use crate::query::Distribution;
use crate::stats::{DateRange, ExperienceStats, OverallStats, TeacherStatsSummary};
use crate::students::Student;
use crate::teachers::{Teacher, TeacherStats};
use std::collections::BTreeMap;

fn completed(id: &str, title: &str, rate: f64) -> ClassExperience {
    ClassExperience {
        id: id.to_string(),
        title: title.to_string(),
        completion_rate: Some(rate),
        upcoming_date: None,
    }
}

fn upcoming(id: &str, title: &str, date: &str) -> ClassExperience {
    ClassExperience {
        id: id.to_string(),
        title: title.to_string(),
        completion_rate: None,
        upcoming_date: Some(date.to_string()),
    }
}

fn chemistry_class(id: &str, name: &str, student_count: u32) -> Class {
    Class {
        id: id.to_string(),
        name: name.to_string(),
        subject: "Chemistry".to_string(),
        student_count,
        avg_score: 77.0,
        completion_rate: 92.0,
        completed_experiences: vec![
            completed("exp001", "Atomic Bonds", 98.0),
            completed("exp002", "Nobel Gasses", 81.0),
            completed("exp003", "Chemical reactions I", 91.0),
        ],
        upcoming_experiences: vec![upcoming("exp006", "Atomic Bonds 2", "Aug 12th")],
    }
}

pub fn classes() -> Vec<Class> {
    vec![
        chemistry_class("class001", "9A", 24),
        chemistry_class("class002", "9B", 26),
        chemistry_class("class003", "9C", 26),
    ]
}

#[allow(clippy::too_many_arguments)]
fn student(
    id: &str,
    name: &str,
    student_id: &str,
    score: f64,
    attempts: u32,
    mistakes: u32,
    time: &str,
    completion: f64,
    badges: u32,
    class_id: &str,
    experience_id: &str,
) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        student_id: student_id.to_string(),
        score,
        attempts,
        mistakes,
        time: time.to_string(),
        completion,
        badges,
        class_id: class_id.to_string(),
        experience_id: experience_id.to_string(),
    }
}

pub fn students() -> Vec<Student> {
    vec![
        student("s001", "John Cena", "1124", 95.0, 1, 2, "8min 24secs", 100.0, 0, "class001", "exp001"),
        student("s002", "Emily Johnson", "1125", 88.0, 2, 4, "9min 12secs", 100.0, 1, "class001", "exp001"),
        student("s003", "Michael Smith", "1126", 92.0, 1, 3, "7min 45secs", 100.0, 1, "class001", "exp001"),
        student("s004", "Sarah Williams", "1127", 97.0, 1, 1, "8min 02secs", 100.0, 2, "class001", "exp001"),
        student("s005", "David Brown", "1128", 85.0, 2, 5, "10min 18secs", 100.0, 0, "class001", "exp001"),
        student("s006", "Jessica Davis", "1129", 91.0, 1, 3, "8min 50secs", 100.0, 1, "class001", "exp001"),
        student("s007", "Daniel Wilson", "1130", 78.0, 3, 7, "12min 05secs", 90.0, 0, "class002", "exp001"),
        student("s008", "Olivia Martinez", "1131", 94.0, 1, 2, "7min 38secs", 100.0, 2, "class002", "exp001"),
        student("s009", "James Taylor", "1132", 83.0, 2, 5, "9min 42secs", 95.0, 0, "class002", "exp001"),
        student("s010", "Sophia Anderson", "1133", 90.0, 1, 3, "8min 15secs", 100.0, 1, "class002", "exp001"),
        student("s011", "John Cena", "1124", 87.0, 2, 4, "5min 55secs", 100.0, 0, "class001", "exp002"),
        student("s012", "Emily Johnson", "1125", 92.0, 1, 2, "6min 10secs", 100.0, 1, "class001", "exp002"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn teacher(
    id: &str,
    name: &str,
    email: &str,
    subject: &str,
    classes: &[&str],
    experiences: &[&str],
    stats: TeacherStats,
    is_active: bool,
) -> Teacher {
    Teacher {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        subject: subject.to_string(),
        assigned_classes: classes.iter().map(|s| s.to_string()).collect(),
        assigned_experiences: experiences.iter().map(|s| s.to_string()).collect(),
        stats,
        is_active,
    }
}

fn teacher_stats(
    classes: u32,
    students: u32,
    experiences: u32,
    score: f64,
    completion: f64,
    time: &str,
) -> TeacherStats {
    TeacherStats {
        assigned_classes: classes,
        number_of_students: students,
        assigned_experiences: experiences,
        average_students_score: score,
        average_students_completion: completion,
        average_time_per_experience: time.to_string(),
    }
}

pub fn teachers() -> Vec<Teacher> {
    vec![
        teacher(
            "t001",
            "Sarah Silvergold",
            "Sarah.Silver@sst.uni",
            "Chemistry",
            &["9A", "9B", "9C", "9D", "9E", "9F"],
            &["Periodic Table", "Chemical Bonds", "Electrons and Orbits", "Noble Gasses", "Metals"],
            teacher_stats(6, 142, 7, 87.0, 92.0, "7 minutes"),
            true,
        ),
        teacher(
            "t002",
            "Michael Jones",
            "Michael.Jones@sst.uni",
            "Physics",
            &["8A", "8B", "8C"],
            &["Gravity", "Motion", "Electricity"],
            teacher_stats(3, 72, 5, 82.0, 88.0, "8 minutes"),
            true,
        ),
        teacher(
            "t003",
            "Matt Stoopido",
            "Matt.Stoopido@sst.uni",
            "Biology",
            &["7A", "7B"],
            &["Cell Structure", "DNA"],
            teacher_stats(2, 48, 4, 85.0, 90.0, "6 minutes"),
            true,
        ),
        teacher(
            "t004",
            "Miranda Fanta",
            "Miranda.Fanta@sst.uni",
            "Chemistry",
            &["10A", "10B"],
            &["Advanced Chemical Reactions", "Organic Chemistry"],
            teacher_stats(2, 46, 3, 88.0, 93.0, "9 minutes"),
            true,
        ),
        teacher(
            "t005",
            "Slavic Armament",
            "Slavic.Armament@sst.uni",
            "Math",
            &["11A"],
            &["Calculus", "Trigonometry"],
            teacher_stats(1, 24, 2, 79.0, 85.0, "10 minutes"),
            true,
        ),
        teacher(
            "t006",
            "Penny McSeelit",
            "Penny.McSeelit@sst.uni",
            "Biology",
            &[],
            &[],
            TeacherStats::default(),
            false,
        ),
        teacher(
            "t007",
            "Steve Blackface",
            "Steve.Blackface@sst.uni",
            "Physics",
            &[],
            &[],
            TeacherStats::default(),
            false,
        ),
        teacher(
            "t008",
            "Tania Reddaert",
            "Tania.Reddaert@sst.uni",
            "Math",
            &[],
            &[],
            TeacherStats::default(),
            false,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn experience(
    id: &str,
    title: &str,
    duration: &str,
    global: f64,
    classes: f64,
    assignments: u32,
    thumbnail: &str,
    status: ExperienceStatus,
) -> Experience {
    Experience {
        id: id.to_string(),
        title: title.to_string(),
        duration: duration.to_string(),
        avg_global_score: global,
        avg_classes_score: classes,
        class_assignments: assignments,
        thumbnail: Some(thumbnail.to_string()),
        status: Some(status),
    }
}

pub fn experiences() -> Vec<Experience> {
    use ExperienceStatus::{Active, Upcoming};
    vec![
        experience("exp001", "Atomic Bonds", "8min", 92.0, 97.0, 3, "/thumbnails/atomic-bonds.png", Active),
        experience("exp002", "Nobel Gasses", "6min", 72.0, 87.0, 3, "/thumbnails/nobel-gasses.png", Active),
        experience("exp003", "Chemical Reactions I", "20min", 88.0, 89.0, 2, "/thumbnails/chemical-reactions.png", Active),
        experience("exp004", "Atomic Bond Types", "15min", 81.0, 85.0, 2, "/thumbnails/atomic-bond-types.png", Upcoming),
        experience("exp005", "Chemical Reactions II", "25min", 76.0, 79.0, 1, "/thumbnails/chemical-reactions-2.png", Upcoming),
    ]
}

const SCORE_LABELS: [&str; 6] = ["0-50", "50-59", "60-69", "70-79", "80-89", "90-100"];
const MISTAKE_LABELS: [&str; 6] = ["0-1", "2-3", "4-5", "6-7", "8-9", "10+"];
const TIME_LABELS: [&str; 6] = ["0-5min", "5-10min", "10-15min", "15-20min", "20-25min", "25min+"];

pub fn overall_stats() -> OverallStats {
    OverallStats {
        avg_score: 77.0,
        avg_completion_rate: 92.0,
        students_in_class: 28,
        assigned_vr_experiences: 8,
        avg_engagement_time: "8 min 40 secs".to_string(),
        avg_mistakes: "7 Mistakes".to_string(),
        score_distribution: Distribution::new(&SCORE_LABELS, &[5, 10, 15, 20, 25, 15]),
        mistakes_distribution: Distribution::new(&MISTAKE_LABELS, &[10, 20, 30, 25, 10, 5]),
        time_distribution: Distribution::new(&TIME_LABELS, &[15, 35, 25, 15, 8, 2]),
    }
}

pub fn class_stats() -> BTreeMap<String, OverallStats> {
    let class001 = OverallStats {
        avg_completion_rate: 96.0,
        score_distribution: Distribution::new(&SCORE_LABELS, &[5, 8, 20, 22, 20, 25]),
        mistakes_distribution: Distribution::new(&MISTAKE_LABELS, &[12, 25, 28, 20, 10, 5]),
        time_distribution: Distribution::new(&TIME_LABELS, &[18, 32, 26, 14, 8, 2]),
        ..overall_stats()
    };
    BTreeMap::from([("class001".to_string(), class001)])
}

pub fn experience_stats() -> BTreeMap<String, ExperienceStats> {
    let exp001 = ExperienceStats {
        avg_score: 92.0,
        completion_rate: 95.0,
        students_assigned: 72,
        avg_time: "8 min 24 secs".to_string(),
        avg_mistakes: 2.0,
        score_distribution: Distribution::new(&SCORE_LABELS, &[0, 2, 5, 10, 15, 40]),
    };
    BTreeMap::from([("exp001".to_string(), exp001)])
}

pub fn teacher_stats_summaries() -> BTreeMap<String, TeacherStatsSummary> {
    let t001 = TeacherStatsSummary {
        avg_students_score: 87.0,
        avg_students_completion: 92.0,
        assigned_classes: 6,
        number_of_students: 142,
        assigned_experiences: 7,
        avg_time_per_experience: "7 minutes".to_string(),
    };
    BTreeMap::from([("t001".to_string(), t001)])
}

pub fn default_date_range() -> DateRange {
    DateRange {
        start: "Aug 12th 2024".to_string(),
        end: "Oct 12th 2024".to_string(),
    }
}

pub fn score_labels() -> Vec<String> {
    SCORE_LABELS.iter().map(|s| s.to_string()).collect()
}
