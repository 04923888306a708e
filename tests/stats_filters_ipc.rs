mod common;

use common::Sidecar;
use serde_json::json;

fn s<'a>(v: &'a serde_json::Value, ptr: &str) -> Option<&'a str> {
    v.pointer(ptr).and_then(|x| x.as_str())
}

#[test]
fn filter_merge_keeps_dimensions_and_restores_default_range() {
    let mut lmsd = Sidecar::spawn();
    let f = lmsd.request_ok(
        "stats.applyFilters",
        json!({ "grade": "9", "dateRange": { "start": "Jan 1st 2024", "end": "Feb 1st 2024" } }),
    );
    assert_eq!(s(&f, "/grade"), Some("9"));
    assert_eq!(s(&f, "/dateRange/start"), Some("Jan 1st 2024"));

    let f = lmsd.request_ok("stats.applyFilters", json!({ "class": "class002" }));
    assert_eq!(s(&f, "/grade"), Some("9"));
    assert_eq!(s(&f, "/class"), Some("class002"));
    assert_eq!(s(&f, "/dateRange/start"), Some("Aug 12th 2024"));
    assert_eq!(s(&f, "/dateRange/end"), Some("Oct 12th 2024"));

    let f = lmsd.request_ok("stats.resetFilters", json!({}));
    assert_eq!(s(&f, "/grade"), Some(""));
    assert_eq!(s(&f, "/class"), Some(""));
}

#[test]
fn per_entity_stats_fall_back() {
    let mut lmsd = Sidecar::spawn();
    let overall = lmsd.request_ok("stats.overall", json!({}));
    assert_eq!(overall.get("assignedVRExperiences").and_then(|v| v.as_u64()), Some(8));

    let c1 = lmsd.request_ok("stats.class", json!({ "classId": "class001" }));
    assert_eq!(c1.get("avgCompletionRate").and_then(|v| v.as_f64()), Some(96.0));
    let c3 = lmsd.request_ok("stats.class", json!({ "classId": "class003" }));
    assert_eq!(c3.get("avgCompletionRate").and_then(|v| v.as_f64()), Some(92.0));
    let f = lmsd.request_ok("stats.filters", json!({}));
    assert_eq!(s(&f, "/class"), Some("class003"));

    let unknown = lmsd.request_ok("stats.experience", json!({ "experienceId": "exp404" }));
    assert_eq!(unknown.get("avgScore").and_then(|v| v.as_f64()), Some(0.0));
    let known = lmsd.request_ok("stats.experience", json!({ "experienceId": "exp001" }));
    assert_eq!(known.get("studentsAssigned").and_then(|v| v.as_u64()), Some(72));
    let teacher = lmsd.request_ok("stats.teacher", json!({ "teacherId": "t404" }));
    assert_eq!(teacher.get("numberOfStudents").and_then(|v| v.as_u64()), Some(0));
}

#[test]
fn report_is_computed_from_the_collections() {
    let mut lmsd = Sidecar::spawn();
    let report = lmsd.request_ok("stats.report", json!({ "filters": { "experience": "exp001" } }));
    assert_eq!(report.pointer("/filteredStats/totalStudents").and_then(|v| v.as_u64()), Some(10));
    assert_eq!(s(&report, "/filteredStats/topPerformingClass"), Some("9A"));
    assert_eq!(s(&report, "/filteredStats/lowestPerformingClass"), Some("9B"));
    assert_eq!(s(&report, "/filteredStats/mostActiveTeacher"), Some("Sarah Silvergold"));
    assert!(report.get("generatedAt").and_then(|v| v.as_str()).is_some());
    assert!(report.pointer("/detailedBreakdowns/byExperience").is_some_and(|v| v.is_object()));

    // a student who drops out changes the next report
    let _ = lmsd.request_ok("students.delete", json!({ "id": "s007" }));
    let report = lmsd.request_ok("stats.report", json!({}));
    assert_eq!(report.pointer("/filteredStats/totalStudents").and_then(|v| v.as_u64()), Some(9));
    assert_eq!(s(&report, "/filters/experience"), Some("exp001"));
}

#[test]
fn export_returns_a_stamped_url() {
    let mut lmsd = Sidecar::spawn();
    let csv = lmsd.request_ok("stats.export", json!({ "format": "csv" }));
    let url = s(&csv, "/downloadUrl").expect("downloadUrl");
    assert!(url.starts_with("/exports/stats-export-"));
    assert!(url.ends_with(".csv"));

    assert_eq!(lmsd.request_err("stats.export", json!({ "format": "xls" })), "bad_params");
    assert_eq!(lmsd.request_err("stats.export", json!({})), "bad_params");
}
