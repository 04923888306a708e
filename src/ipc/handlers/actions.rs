use crate::error::LmsError;
use crate::ipc::error::respond;
use crate::ipc::helpers::{optional_bool, optional_str, required_str, to_json};
use crate::ipc::router::settle;
use crate::ipc::types::{AppState, Request};
use serde_json::{json, Map, Value};
use std::time::Instant;

const STORE_KINDS: [&str; 4] = ["classes", "students", "teachers", "experiences"];

/// Mutations only; reads are always answered immediately.
fn is_deferrable(method: &str) -> bool {
    let Some((kind, op)) = method.split_once('.') else {
        return false;
    };
    if !STORE_KINDS.contains(&kind) {
        return false;
    }
    matches!(op, "create" | "update" | "delete")
        || (kind == "teachers"
            && matches!(
                op,
                "assignClass"
                    | "unassignClass"
                    | "assignExperience"
                    | "unassignExperience"
                    | "activate"
                    | "deactivate"
            ))
}

pub fn is_deferred(req: &Request) -> bool {
    optional_bool(req, "deferred")
}

fn handle_defer(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    if !is_deferrable(&req.method) {
        return Err(LmsError::NotDeferrable(req.method.clone()));
    }
    let view_id = optional_str(req, "viewId")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);
    let mut params: Map<String, Value> = req.params.as_object().cloned().unwrap_or_default();
    params.remove("deferred");
    params.remove("viewId");

    let now = Instant::now();
    let delay_ms = state.pending.delay().as_millis() as u64;
    let action = state
        .pending
        .enqueue(&req.method, Value::Object(params), view_id, now);
    Ok(json!({
        "deferred": true,
        "ticket": action.ticket,
        "method": action.method,
        "viewId": action.view_id,
        "delayMs": delay_ms,
    }))
}

/// Answer a `deferred: true` request with a ticket instead of running it.
pub fn defer(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, handle_defer(state, req))
}

fn handle_list(state: &mut AppState, _req: &Request) -> Result<Value, LmsError> {
    let settled: Vec<_> = state.pending.outcomes().collect();
    Ok(json!({
        "pending": to_json(&state.pending.snapshot(Instant::now())),
        "settled": to_json(&settled),
    }))
}

fn handle_settle(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let force = optional_bool(req, "force");
    let outcomes = settle(state, Instant::now(), force);
    Ok(json!({ "settled": to_json(&outcomes), "remaining": state.pending.len() }))
}

fn handle_cancel(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let ticket = required_str(req, "ticket")?;
    state.pending.cancel(ticket)?;
    Ok(json!({ "success": true, "ticket": ticket }))
}

fn handle_discard_view(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let view_id = required_str(req, "viewId")?;
    let cancelled = state.pending.discard_view(view_id);
    Ok(json!({ "viewId": view_id, "cancelled": cancelled }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    let out = match req.method.as_str() {
        "actions.list" => handle_list(state, req),
        "actions.settle" => handle_settle(state, req),
        "actions.cancel" => handle_cancel(state, req),
        "views.discard" => handle_discard_view(state, req),
        _ => return None,
    };
    Some(respond(&req.id, out))
}
