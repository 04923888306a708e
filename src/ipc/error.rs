use crate::error::LmsError;
use serde_json::json;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

pub fn fail(id: &str, e: &LmsError) -> serde_json::Value {
    err(id, e.code(), e.to_string(), None)
}

/// Envelope a handler outcome.
pub fn respond(id: &str, out: Result<serde_json::Value, LmsError>) -> serde_json::Value {
    match out {
        Ok(v) => ok(id, v),
        Err(e) => {
            tracing::debug!(id, code = e.code(), error = %e, "request failed");
            fail(id, &e)
        }
    }
}
