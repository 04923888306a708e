use super::handlers;
use super::types::{AppState, Request};
use crate::error::LmsError;
use crate::ipc::error::fail;
use crate::pending::ActionOutcome;
use std::time::Instant;

pub fn handle_request(state: &mut AppState, req: Request) -> serde_json::Value {
    settle(state, Instant::now(), false);
    if handlers::actions::is_deferred(&req) {
        return handlers::actions::defer(state, &req);
    }
    dispatch(state, &req)
}

pub(crate) fn dispatch(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Some(resp) = handlers::core::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::session::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::actions::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::stats::try_handle(state, req) {
        return resp;
    }
    // kind-specific methods shadow the generic store operations
    if let Some(resp) = handlers::students::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::teachers::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::entities::try_handle(state, req) {
        return resp;
    }

    fail(&req.id, &LmsError::UnknownMethod(req.method.clone()))
}

/// Apply due deferred actions in enqueue order. A cancelled action is recorded
/// and dropped without touching any store.
pub(crate) fn settle(state: &mut AppState, now: Instant, force: bool) -> Vec<ActionOutcome> {
    let ready = state.pending.take_ready(now, force);
    let mut outcomes = Vec::with_capacity(ready.len());
    for action in ready {
        let outcome = if action.token.is_cancelled() {
            ActionOutcome::cancelled(&action)
        } else {
            let req = Request {
                id: action.ticket.clone(),
                method: action.method.clone(),
                params: action.params.clone(),
            };
            let resp = dispatch(state, &req);
            let result = resp
                .get("result")
                .or_else(|| resp.get("error"))
                .cloned()
                .unwrap_or(serde_json::Value::Null);
            ActionOutcome::applied(&action, result)
        };
        tracing::debug!(ticket = %outcome.ticket, method = %outcome.method, status = ?outcome.status, "action settled");
        state.pending.record(outcome.clone());
        outcomes.push(outcome);
    }
    outcomes
}
