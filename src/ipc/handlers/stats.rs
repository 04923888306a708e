use crate::error::LmsError;
use crate::ipc::error::respond;
use crate::ipc::helpers::{parse, parse_or_default, required_str, to_json};
use crate::ipc::types::{AppState, Request};
use crate::stats::{ExportFormat, StatsFilterPatch};
use serde_json::{json, Value};

fn handle_overall(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let patch = match req.params.get("filters") {
        Some(v) if !v.is_null() => Some(parse::<StatsFilterPatch>(v, "filters")?),
        _ => None,
    };
    Ok(to_json(state.stats.overall(patch)))
}

fn handle_class(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let class_id = required_str(req, "classId")?;
    let patch = parse_or_default(req, "filters")?;
    Ok(to_json(state.stats.class_stats(class_id, patch)))
}

fn handle_experience(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let experience_id = required_str(req, "experienceId")?;
    let patch = parse_or_default(req, "filters")?;
    Ok(to_json(&state.stats.experience_stats(experience_id, patch)))
}

fn handle_teacher(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let teacher_id = required_str(req, "teacherId")?;
    let patch = parse_or_default(req, "filters")?;
    Ok(to_json(&state.stats.teacher_stats(teacher_id, patch)))
}

fn handle_apply_filters(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let patch: StatsFilterPatch = if req.params.is_null() {
        StatsFilterPatch::default()
    } else {
        parse(&req.params, "filters")?
    };
    state.stats.apply_filters(patch);
    Ok(to_json(state.stats.filters()))
}

fn handle_reset_filters(state: &mut AppState, _req: &Request) -> Result<Value, LmsError> {
    state.stats.reset_filters();
    Ok(to_json(state.stats.filters()))
}

fn handle_filters(state: &mut AppState, _req: &Request) -> Result<Value, LmsError> {
    Ok(to_json(state.stats.filters()))
}

fn handle_report(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let patch = parse_or_default(req, "filters")?;
    let (stats, sources) = state.stats_and_sources();
    Ok(to_json(&stats.report(patch, &sources)))
}

fn handle_export(state: &mut AppState, req: &Request) -> Result<Value, LmsError> {
    let format: ExportFormat = match req.params.get("format") {
        Some(v) => parse(v, "format")?,
        None => return Err(LmsError::MissingParam("format")),
    };
    let ticket = state.stats.export(format);
    Ok(json!({ "success": true, "format": ticket.format, "downloadUrl": ticket.download_url }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    let out = match req.method.as_str() {
        "stats.overall" => handle_overall(state, req),
        "stats.class" => handle_class(state, req),
        "stats.experience" => handle_experience(state, req),
        "stats.teacher" => handle_teacher(state, req),
        "stats.applyFilters" => handle_apply_filters(state, req),
        "stats.resetFilters" => handle_reset_filters(state, req),
        "stats.filters" => handle_filters(state, req),
        "stats.report" => handle_report(state, req),
        "stats.export" => handle_export(state, req),
        _ => return None,
    };
    Some(respond(&req.id, out))
}
