use crate::error::LmsError;
use crate::ipc::error::respond;
use crate::ipc::helpers::{required_str, to_json};
use crate::ipc::types::{AppState, Request};
use serde_json::{json, Value};

fn handle_get(state: &mut AppState, _req: &Request) -> Result<Value, LmsError> {
    Ok(to_json(&state.session))
}

fn handle_login(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let username = required_str(req, "username")?;
    let success = state
        .session
        .login(username, &state.teachers, &state.students);
    Ok(json!({ "success": success, "session": to_json(&state.session) }))
}

fn handle_logout(state: &mut AppState, _req: &Request) -> Result<Value, LmsError> {
    state.session.logout();
    Ok(json!({ "success": true }))
}

fn handle_set_notification_count(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let count = req
        .params
        .get("count")
        .and_then(|v| v.as_u64())
        .ok_or(LmsError::MissingParam("count"))?;
    let count = u32::try_from(count)
        .map_err(|_| LmsError::BadParams(format!("count out of range: {count}")))?;
    state.session.set_notification_count(count);
    Ok(json!({ "notificationCount": state.session.notification_count }))
}

fn handle_mark_notifications_read(state: &mut AppState, _req: &Request) -> Result<Value, LmsError> {
    state.session.mark_notifications_read();
    Ok(json!({ "notificationCount": state.session.notification_count }))
}

fn handle_has_permission(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let permission = required_str(req, "permission")?;
    Ok(json!({ "allowed": state.session.has_permission(permission) }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    let out = match req.method.as_str() {
        "session.get" => handle_get(state, req),
        "session.login" => handle_login(state, req),
        "session.logout" => handle_logout(state, req),
        "session.setNotificationCount" => handle_set_notification_count(state, req),
        "session.markNotificationsRead" => handle_mark_notifications_read(state, req),
        "session.hasPermission" => handle_has_permission(state, req),
        _ => return None,
    };
    Some(respond(&req.id, out))
}
