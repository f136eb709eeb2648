//! Description of a single logical API call.

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::ClassifiedError;

/// Default ceiling for one attempt (send plus body read).
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to perform one call. Built fresh per call.
#[derive(Clone, Debug)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path appended to the client's base address, e.g. `/api/members`.
    pub path: String,
    /// Caller-supplied segments (usually IDs) appended after `path`, each
    /// percent-encoded as a single segment.
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout: Duration,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            segments: Vec::new(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Appends one path segment. `/`, `?` and `#` inside it are escaped, so
    /// an ID can never address a different route.
    pub fn with_segment(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_bearer_token(self, token: &str) -> Self {
        self.with_header("authorization", &format!("Bearer {}", token))
    }

    /// Attaches a JSON body. Fails only if `body` cannot be represented as JSON.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, ClassifiedError> {
        let value = serde_json::to_value(body).map_err(ClassifiedError::invalid_request)?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether any header with this name (case-insensitive) is set.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}
