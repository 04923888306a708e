mod common;

use common::{strings, Sidecar};
use serde_json::json;

#[test]
fn default_view_is_class001_exp001_by_name() {
    let mut lmsd = Sidecar::spawn();
    let listed = lmsd.request_ok("students.list", json!({}));
    assert_eq!(
        strings(&listed, "name"),
        vec![
            "David Brown",
            "Emily Johnson",
            "Jessica Davis",
            "John Cena",
            "Michael Smith",
            "Sarah Williams"
        ]
    );
    assert_eq!(listed.pointer("/filter/classId").and_then(|v| v.as_str()), Some("class001"));
    assert_eq!(listed.pointer("/sort/direction").and_then(|v| v.as_str()), Some("asc"));
}

#[test]
fn sort_toggles_on_same_field_and_resets_on_new_field() {
    let mut lmsd = Sidecar::spawn();
    let desc = lmsd.request_ok("students.setSort", json!({ "field": "name" }));
    assert_eq!(desc.pointer("/sort/direction").and_then(|v| v.as_str()), Some("desc"));
    assert_eq!(strings(&desc, "name").first().map(String::as_str), Some("Sarah Williams"));

    let by_score = lmsd.request_ok("students.setSort", json!({ "field": "score" }));
    assert_eq!(by_score.pointer("/sort/direction").and_then(|v| v.as_str()), Some("asc"));
    assert_eq!(
        strings(&by_score, "id"),
        vec!["s005", "s002", "s006", "s003", "s001", "s004"]
    );
}

#[test]
fn fetch_narrows_and_search_spans_name_and_student_id() {
    let mut lmsd = Sidecar::spawn();
    let class2 = lmsd.request_ok("students.fetch", json!({ "classId": "class002" }));
    assert_eq!(strings(&class2, "id").len(), 4);
    assert_eq!(class2.pointer("/filter/experienceId").and_then(|v| v.as_str()), Some("exp001"));

    let by_number = lmsd.request_ok("students.setSearchQuery", json!({ "query": "1131" }));
    assert_eq!(strings(&by_number, "name"), vec!["Olivia Martinez"]);

    let by_name = lmsd.request_ok("students.setSearchQuery", json!({ "query": "TAYLOR" }));
    assert_eq!(strings(&by_name, "id"), vec!["s009"]);

    let cleared = lmsd.request_ok("students.setSearchQuery", json!({ "query": "" }));
    assert_eq!(strings(&cleared, "id").len(), 4);

    let reset = lmsd.request_ok("students.resetFilters", json!({}));
    assert_eq!(strings(&reset, "id").len(), 6);
    assert_eq!(reset.pointer("/filter/classId").and_then(|v| v.as_str()), Some("class001"));
}

#[test]
fn numeric_filter_and_index_lookup() {
    let mut lmsd = Sidecar::spawn();
    let perfect = lmsd.request_ok(
        "students.setFilter",
        json!({ "dimension": "badges", "value": 2 }),
    );
    assert_eq!(strings(&perfect, "id"), vec!["s004"]);

    let exp2 = lmsd.request_ok("students.byKey", json!({ "index": "experienceId", "key": "exp002" }));
    assert_eq!(strings(&exp2, "id"), vec!["s011", "s012"]);

    assert_eq!(
        lmsd.request_err("students.byKey", json!({ "index": "shoeSize", "key": "9" })),
        "bad_params"
    );
}

#[test]
fn create_update_delete_keep_indexes_current() {
    let mut lmsd = Sidecar::spawn();
    let created = lmsd.request_ok(
        "students.create",
        json!({ "name": "New Kid", "studentId": "2000", "classId": "class003", "experienceId": "exp001" }),
    );
    assert_eq!(created.get("id").and_then(|v| v.as_str()), Some("s013"));
    assert_eq!(created.get("score").and_then(|v| v.as_f64()), Some(0.0));

    let in_class3 = lmsd.request_ok("students.byKey", json!({ "index": "classId", "key": "class003" }));
    assert_eq!(strings(&in_class3, "id"), vec!["s013"]);

    let updated = lmsd.request_ok(
        "students.update",
        json!({ "id": "s013", "patch": { "classId": "class002", "id": "hijack" } }),
    );
    assert_eq!(updated.get("success").and_then(|v| v.as_bool()), Some(true));
    let moved = lmsd.request_ok("students.get", json!({ "id": "s013" }));
    assert_eq!(moved.get("classId").and_then(|v| v.as_str()), Some("class002"));

    let bad = lmsd.request_ok("students.update", json!({ "id": "s013", "patch": { "score": "high" } }));
    assert_eq!(bad.get("success").and_then(|v| v.as_bool()), Some(false));

    let deleted = lmsd.request_ok("students.delete", json!({ "id": "s013" }));
    assert_eq!(deleted.get("success").and_then(|v| v.as_bool()), Some(true));
    let again = lmsd.request_ok("students.delete", json!({ "id": "s013" }));
    assert_eq!(again.get("success").and_then(|v| v.as_bool()), Some(false));
    assert!(lmsd.request_ok("students.get", json!({ "id": "s013" })).is_null());
}
