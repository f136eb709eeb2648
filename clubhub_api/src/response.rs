//! Response bodies, read once and parsed best-effort.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ClassifiedError;

/// Body of a response. JSON when it parses, the raw text otherwise.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Parses an already-read body. Never fails.
    pub fn from_text(raw: String) -> Self {
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(raw),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Json(_) => None,
            ResponseBody::Text(raw) => Some(raw),
        }
    }

    /// Deserializes the body into `T`. `status` is the status of the response
    /// the body came from and is carried into the error on mismatch.
    pub fn decode<T: DeserializeOwned>(self, status: u16) -> Result<T, ClassifiedError> {
        match self {
            ResponseBody::Json(value) => serde_json::from_value::<T>(value.clone()).map_err(|e| {
                tracing::error!("Failed to decode response body: {}", e);
                ClassifiedError::unexpected_body(status, e, value)
            }),
            ResponseBody::Text(raw) => {
                tracing::error!("Expected JSON, got: {}", truncate_body(&raw));
                Err(ClassifiedError::unexpected_body(
                    status,
                    "expected JSON",
                    Value::String(raw),
                ))
            }
        }
    }

    /// The body as an error payload.
    pub(crate) fn to_payload(&self) -> Value {
        match self {
            ResponseBody::Json(value) => value.clone(),
            ResponseBody::Text(raw) if raw.is_empty() => Value::Null,
            ResponseBody::Text(raw) => Value::String(raw.clone()),
        }
    }

    /// Human-readable message from a `message`, `error` or `detail` field.
    ///
    /// FastAPI validation failures put a list of `{loc, msg, type}` objects in
    /// `detail`; the first `msg` is used.
    pub(crate) fn server_message(&self) -> Option<String> {
        let object = self.as_json()?.as_object()?;
        for field in ["message", "error", "detail"] {
            match object.get(field) {
                Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
                Some(Value::Array(items)) => {
                    if let Some(msg) = items
                        .iter()
                        .find_map(|item| item.get("msg").and_then(Value::as_str))
                    {
                        return Some(msg.to_string());
                    }
                }
                _ => {}
            }
        }
        None
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
