mod common;

use common::Sidecar;
use serde_json::json;

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let mut lmsd = Sidecar::spawn();

    let health = lmsd.request_ok("health", json!({}));
    assert_eq!(health.pointer("/counts/classes").and_then(|v| v.as_u64()), Some(3));
    assert_eq!(health.pointer("/counts/students").and_then(|v| v.as_u64()), Some(12));
    assert_eq!(health.pointer("/counts/teachers").and_then(|v| v.as_u64()), Some(8));
    assert_eq!(health.pointer("/counts/experiences").and_then(|v| v.as_u64()), Some(5));

    for method in [
        "session.get",
        "classes.list",
        "students.list",
        "teachers.list",
        "teachers.listDeactivated",
        "experiences.list",
        "stats.overall",
        "stats.filters",
        "stats.report",
        "actions.list",
    ] {
        let _ = lmsd.request_ok(method, json!({}));
    }
    let _ = lmsd.request_ok("route.resolve", json!({ "path": "/admin" }));
    let _ = lmsd.request_ok("gate.evaluate", json!({ "requiredRole": "teacher" }));
    let _ = lmsd.request_ok("classes.indexes", json!({}));

    assert_eq!(lmsd.request_err("nope.method", json!({})), "not_implemented");
    assert_eq!(lmsd.request_err("classes.explode", json!({})), "not_implemented");
    assert_eq!(lmsd.request_err("classes.get", json!({})), "bad_params");
}

#[test]
fn unparseable_line_gets_bad_json_without_id() {
    let mut lmsd = Sidecar::spawn();
    let resp = lmsd.send_raw("{not json");
    assert_eq!(resp.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(resp.pointer("/error/code").and_then(|v| v.as_str()), Some("bad_json"));
    assert!(resp.get("id").is_none());

    // the loop keeps serving afterwards
    let _ = lmsd.request_ok("health", json!({}));
}

#[test]
fn empty_flag_starts_without_collections() {
    let mut lmsd = Sidecar::spawn_with(&["--delay-ms", "0", "--empty"]);
    let health = lmsd.request_ok("health", json!({}));
    assert_eq!(health.pointer("/counts/classes").and_then(|v| v.as_u64()), Some(0));

    let listed = lmsd.request_ok("classes.list", json!({}));
    assert_eq!(listed.get("total").and_then(|v| v.as_u64()), Some(0));

    let created = lmsd.request_ok("classes.create", json!({ "name": "7A", "subject": "Biology" }));
    assert_eq!(created.get("id").and_then(|v| v.as_str()), Some("class001"));
    assert_eq!(created.get("studentCount").and_then(|v| v.as_u64()), Some(0));
}
