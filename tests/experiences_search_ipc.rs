mod common;

use common::{strings, Sidecar};
use serde_json::json;

#[test]
fn search_and_status_lookup() {
    let mut lmsd = Sidecar::spawn();
    let atomic = lmsd.request_ok("experiences.setSearchQuery", json!({ "query": "atomic" }));
    assert_eq!(strings(&atomic, "title"), vec!["Atomic Bonds", "Atomic Bond Types"]);

    let upcoming = lmsd.request_ok("experiences.byKey", json!({ "index": "status", "key": "upcoming" }));
    assert_eq!(
        strings(&upcoming, "title"),
        vec!["Atomic Bond Types", "Chemical Reactions II"]
    );
}

#[test]
fn filter_by_status_sorted_by_parsed_duration() {
    let mut lmsd = Sidecar::spawn();
    let _ = lmsd.request_ok("experiences.setFilter", json!({ "dimension": "status", "value": "active" }));
    let _ = lmsd.request_ok("experiences.setSort", json!({ "field": "durationSeconds" }));
    let desc = lmsd.request_ok("experiences.setSort", json!({ "field": "durationSeconds" }));
    assert_eq!(
        strings(&desc, "title"),
        vec!["Chemical Reactions I", "Atomic Bonds", "Nobel Gasses"]
    );

    let reset = lmsd.request_ok("experiences.resetFilters", json!({}));
    assert_eq!(strings(&reset, "id").len(), 5);
    assert!(reset.get("sort").map(|v| v.is_null()).unwrap_or(false));
}

#[test]
fn classes_grade_index_follows_renames_and_current_class() {
    let mut lmsd = Sidecar::spawn();
    let nine = lmsd.request_ok("classes.byKey", json!({ "index": "grade", "key": "9" }));
    assert_eq!(strings(&nine, "id").len(), 3);

    let got = lmsd.request_ok("classes.get", json!({ "id": "class002" }));
    assert_eq!(got.get("name").and_then(|v| v.as_str()), Some("9B"));
    let _ = lmsd.request_ok("classes.update", json!({ "id": "class002", "patch": { "name": "10B" } }));
    let current = lmsd.request_ok("classes.current", json!({}));
    assert_eq!(current.get("name").and_then(|v| v.as_str()), Some("10B"));

    let ten = lmsd.request_ok("classes.byKey", json!({ "index": "grade", "key": "10" }));
    assert_eq!(strings(&ten, "id"), vec!["class002"]);

    // no cascade: students still reference the deleted class
    let _ = lmsd.request_ok("classes.delete", json!({ "id": "class002" }));
    assert!(lmsd.request_ok("classes.current", json!({})).is_null());
    let orphans = lmsd.request_ok("students.byKey", json!({ "index": "classId", "key": "class002" }));
    assert_eq!(strings(&orphans, "id").len(), 4);
}
