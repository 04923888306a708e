use crate::error::LmsError;
use crate::ipc::error::respond;
use crate::ipc::handlers::entities::list_view;
use crate::ipc::helpers::{optional_str, required_str, to_json};
use crate::ipc::types::{AppState, Request};
use serde_json::Value;

fn handle_fetch(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let class_id = optional_str(req, "classId");
    let experience_id = optional_str(req, "experienceId");
    state.students.fetch(class_id, experience_id);
    Ok(list_view(&state.students, state.students.filtered()))
}

fn handle_find_by_student_id(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let student_id = required_str(req, "studentId")?;
    Ok(to_json(&state.students.find_by_student_id(student_id)))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    let out = match req.method.as_str() {
        "students.fetch" => handle_fetch(state, req),
        "students.findByStudentId" => handle_find_by_student_id(state, req),
        _ => return None,
    };
    Some(respond(&req.id, out))
}
