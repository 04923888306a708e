use crate::error::LmsError;
use crate::ipc::types::Request;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub fn required_str<'a>(req: &'a Request, key: &'static str) -> Result<&'a str, LmsError> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(LmsError::MissingParam(key))
}

pub fn optional_str<'a>(req: &'a Request, key: &str) -> Option<&'a str> {
    req.params.get(key).and_then(|v| v.as_str())
}

pub fn optional_bool(req: &Request, key: &str) -> bool {
    req.params
        .get(key)
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Filter values arrive as strings, numbers or booleans; `null` clears the dimension.
pub fn scalar_string(req: &Request, key: &'static str) -> Result<String, LmsError> {
    match req.params.get(key) {
        None => Err(LmsError::MissingParam(key)),
        Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(_) => Err(LmsError::BadParams(format!("params.{key} must be a scalar"))),
    }
}

pub fn parse<T: DeserializeOwned>(value: &Value, what: &str) -> Result<T, LmsError> {
    serde_json::from_value(value.clone())
        .map_err(|e| LmsError::BadParams(format!("invalid {what}: {e}")))
}

/// Parse `params[key]` when present, otherwise the type's default.
pub fn parse_or_default<T: DeserializeOwned + Default>(
    req: &Request,
    key: &str,
) -> Result<T, LmsError> {
    match req.params.get(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(v) => parse(v, key),
    }
}

pub fn to_json<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
