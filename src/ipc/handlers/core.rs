use crate::error::LmsError;
use crate::gate::{self, Role};
use crate::ipc::error::respond;
use crate::ipc::helpers::{required_str, to_json};
use crate::ipc::types::{AppState, Request};
use serde_json::{json, Value};

fn handle_health(state: &mut AppState, _req: &Request) -> Result<Value, LmsError> {
    Ok(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "counts": {
            "classes": state.classes.len(),
            "students": state.students.len(),
            "teachers": state.teachers.len(),
            "experiences": state.experiences.len(),
        },
        "pendingActions": state.pending.len(),
        "requireSession": state.gate.require_session,
    }))
}

fn role_param(req: &Request, key: &str) -> Result<Option<Role>, LmsError> {
    match req.params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => s.parse().map(Some),
        Some(other) => Err(LmsError::UnknownRole(other.to_string())),
    }
}

/// `sessionRole` omitted means "the current session"; an explicit `null` means no session.
fn handle_gate_evaluate(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let required = role_param(req, "requiredRole")?;
    let session = if req.params.get("sessionRole").is_some() {
        role_param(req, "sessionRole")?
    } else {
        state.session.role()
    };
    Ok(to_json(&state.gate.evaluate(required, session)))
}

fn handle_route_resolve(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let path = required_str(req, "path")?;
    let resolved = gate::resolve(path, state.session.role(), &state.gate);
    Ok(match resolved {
        Some(r) => {
            let mut v = to_json(&r);
            v["matched"] = json!(true);
            v
        }
        None => json!({ "matched": false, "path": path }),
    })
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    let out = match req.method.as_str() {
        "health" => handle_health(state, req),
        "gate.evaluate" => handle_gate_evaluate(state, req),
        "route.resolve" => handle_route_resolve(state, req),
        _ => return None,
    };
    Some(respond(&req.id, out))
}
