use crate::error::LmsError;
use crate::ipc::error::respond;
use crate::ipc::handlers::entities::list_view;
use crate::ipc::helpers::{required_str, scalar_string, to_json};
use crate::ipc::types::{AppState, Request};
use serde_json::{json, Value};

fn handle_list(state: &mut AppState, _req: &Request) -> Result<Value, LmsError> {
    Ok(list_view(&state.teachers, state.teachers.list_active()))
}

fn handle_list_deactivated(state: &mut AppState, _req: &Request) -> Result<Value, LmsError> {
    Ok(list_view(&state.teachers, state.teachers.list_deactivated()))
}

/// Filter, search and sort changes answer with the active list, the same rows
/// `teachers.list` returns, plus the deactivated rows under the same filter.
fn handle_view(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let teachers = &mut state.teachers;
    match req.method.as_str() {
        "teachers.setFilter" => {
            let dim = required_str(req, "dimension")?;
            teachers.set_filter(dim, &scalar_string(req, "value")?);
        }
        "teachers.setSearchQuery" => teachers.set_search_query(&scalar_string(req, "query")?),
        "teachers.setSort" => {
            teachers.set_sort(required_str(req, "field")?);
        }
        _ => teachers.reset_filters(),
    }
    let teachers = &state.teachers;
    let mut view = list_view(teachers, teachers.list_active());
    view["deactivated"] = to_json(&teachers.list_deactivated());
    Ok(view)
}

/// Subject, class and experience lookups only ever return active teachers.
fn handle_by_key(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let index = required_str(req, "index")?;
    let key = required_str(req, "key")?;
    let hits = match index {
        "status" => state.teachers.by_key(index, key),
        _ => state.teachers.active_by_key(index, key),
    };
    let items = hits.ok_or_else(|| LmsError::UnknownIndex(index.to_string()))?;
    Ok(json!({ "index": index, "key": key, "items": to_json(&items) }))
}

fn handle_assignment(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let teacher_id = required_str(req, "teacherId")?;
    let teachers = &mut state.teachers;
    let success = match req.method.as_str() {
        "teachers.assignClass" => teachers.assign_class(teacher_id, required_str(req, "classId")?),
        "teachers.unassignClass" => {
            teachers.unassign_class(teacher_id, required_str(req, "classId")?)
        }
        "teachers.assignExperience" => {
            teachers.assign_experience(teacher_id, required_str(req, "experienceId")?)
        }
        _ => teachers.unassign_experience(teacher_id, required_str(req, "experienceId")?),
    };
    Ok(json!({ "success": success }))
}

fn handle_status(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let id = required_str(req, "id")?;
    let success = if req.method == "teachers.activate" {
        state.teachers.activate(id)
    } else {
        state.teachers.deactivate(id)
    };
    Ok(json!({ "success": success }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    let out = match req.method.as_str() {
        "teachers.list" => handle_list(state, req),
        "teachers.listDeactivated" => handle_list_deactivated(state, req),
        "teachers.byKey" => handle_by_key(state, req),
        "teachers.setFilter"
        | "teachers.setSearchQuery"
        | "teachers.setSort"
        | "teachers.resetFilters" => handle_view(state, req),
        "teachers.assignClass"
        | "teachers.unassignClass"
        | "teachers.assignExperience"
        | "teachers.unassignExperience" => handle_assignment(state, req),
        "teachers.activate" | "teachers.deactivate" => handle_status(state, req),
        _ => return None,
    };
    Some(respond(&req.id, out))
}
