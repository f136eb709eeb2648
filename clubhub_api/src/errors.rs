//! Classified errors returned by the request client.

use serde::ser::SerializeStruct;
use serde::Serialize;
use serde_json::Value;

/// Status used for failures where no response was received at all.
pub const STATUS_NETWORK: u16 = 0;
/// Status used when an attempt exceeds its timeout.
pub const STATUS_TIMEOUT: u16 = 408;

pub(crate) const NETWORK_MESSAGE: &str =
    "Unable to connect to server. Please check your internet connection.";
pub(crate) const TIMEOUT_MESSAGE: &str =
    "Request timeout. Please check your connection and try again.";

/// Category of a failed call, derived from its status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response was received (connection refused, DNS failure, offline).
    Network,
    /// The attempt did not complete within its timeout.
    Timeout,
    /// 401 or 403.
    Auth,
    /// 429.
    RateLimited,
    /// 404.
    NotFound,
    /// 500 and above.
    Server,
    /// Any other 4xx.
    Client,
    /// A status outside the taxonomy, e.g. a 2xx whose body had the wrong shape.
    Unexpected,
}

impl ErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            STATUS_NETWORK => ErrorKind::Network,
            STATUS_TIMEOUT => ErrorKind::Timeout,
            401 | 403 => ErrorKind::Auth,
            404 => ErrorKind::NotFound,
            429 => ErrorKind::RateLimited,
            400..=499 => ErrorKind::Client,
            500..=u16::MAX => ErrorKind::Server,
            _ => ErrorKind::Unexpected,
        }
    }
}

/// The failure value of every client call.
///
/// Only `message`, `status` and `payload` are stored. The category flags are
/// computed from `status` on demand, so they always agree with it.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ClassifiedError {
    message: String,
    status: u16,
    payload: Value,
}

impl ClassifiedError {
    pub fn new(status: u16, message: impl Into<String>, payload: Value) -> Self {
        Self {
            message: message.into(),
            status,
            payload,
        }
    }

    /// Transport failure after retries were exhausted.
    pub fn network() -> Self {
        Self::new(STATUS_NETWORK, NETWORK_MESSAGE, Value::Null)
    }

    /// The attempt was cancelled by its timeout.
    pub fn timeout() -> Self {
        Self::new(STATUS_TIMEOUT, TIMEOUT_MESSAGE, Value::Null)
    }

    /// Builds an error from a non-success response, preferring the message
    /// the server put in the body over the default table.
    pub fn from_response(status: u16, body: &crate::ResponseBody) -> Self {
        let message = body
            .server_message()
            .unwrap_or_else(|| default_message(status));
        Self::new(status, message, body.to_payload())
    }

    /// A response arrived but its body did not have the expected shape.
    pub fn unexpected_body(status: u16, detail: impl std::fmt::Display, payload: Value) -> Self {
        Self::new(
            status,
            format!("Unexpected response from server: {}", detail),
            payload,
        )
    }

    /// The request could not be built locally (bad URL, unserializable body).
    pub fn invalid_request(detail: impl std::fmt::Display) -> Self {
        Self::new(400, format!("Invalid request: {}", detail), Value::Null)
    }

    /// An admin call was attempted without a stored session.
    pub fn not_logged_in() -> Self {
        Self::new(401, "Not logged in. Please login first.", Value::Null)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Parsed body of the failed response, `Value::String` for non-JSON bodies,
    /// `Value::Null` when there was no response.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from_status(self.status)
    }

    pub fn is_network_error(&self) -> bool {
        self.kind() == ErrorKind::Network
    }

    pub fn is_timeout(&self) -> bool {
        self.kind() == ErrorKind::Timeout
    }

    pub fn is_rate_limited(&self) -> bool {
        self.kind() == ErrorKind::RateLimited
    }

    pub fn is_auth_error(&self) -> bool {
        self.kind() == ErrorKind::Auth
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_server_error(&self) -> bool {
        self.kind() == ErrorKind::Server
    }

    pub fn is_client_error(&self) -> bool {
        self.kind() == ErrorKind::Client
    }
}

impl Serialize for ClassifiedError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ClassifiedError", 10)?;
        s.serialize_field("message", &self.message)?;
        s.serialize_field("status", &self.status)?;
        s.serialize_field("payload", &self.payload)?;
        s.serialize_field("isNetworkError", &self.is_network_error())?;
        s.serialize_field("isTimeout", &self.is_timeout())?;
        s.serialize_field("isRateLimited", &self.is_rate_limited())?;
        s.serialize_field("isAuthError", &self.is_auth_error())?;
        s.serialize_field("isNotFound", &self.is_not_found())?;
        s.serialize_field("isServerError", &self.is_server_error())?;
        s.serialize_field("isClientError", &self.is_client_error())?;
        s.end()
    }
}

/// Static per-status fallback used when the body carries no message.
pub fn default_message(status: u16) -> String {
    match status {
        STATUS_NETWORK => NETWORK_MESSAGE.to_string(),
        400 => "Invalid request. Please check your input.".to_string(),
        401 => "Session expired. Please login again.".to_string(),
        403 => "You do not have permission to perform this action.".to_string(),
        404 => "The requested resource was not found.".to_string(),
        STATUS_TIMEOUT => TIMEOUT_MESSAGE.to_string(),
        409 => "This resource already exists or conflicts with another record.".to_string(),
        422 => "Validation failed. Please check your input.".to_string(),
        429 => "Too many requests. Please wait a moment and try again.".to_string(),
        500 => "Server error. Please try again later.".to_string(),
        502..=504 => "The server is temporarily unavailable. Please try again later.".to_string(),
        other => format!("Request failed with status {}.", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(err: &ClassifiedError) -> [bool; 7] {
        [
            err.is_network_error(),
            err.is_timeout(),
            err.is_rate_limited(),
            err.is_auth_error(),
            err.is_not_found(),
            err.is_server_error(),
            err.is_client_error(),
        ]
    }

    #[test]
    fn at_most_one_flag_is_set_for_any_status() {
        for status in 0..=600u16 {
            let err = ClassifiedError::new(status, "x", Value::Null);
            let set = flags(&err).iter().filter(|f| **f).count();
            assert!(set <= 1, "status {} sets {} flags", status, set);
        }
    }

    #[test]
    fn auth_flag_matches_401_and_403_only() {
        for status in 0..=600u16 {
            let err = ClassifiedError::new(status, "x", Value::Null);
            assert_eq!(err.is_auth_error(), status == 401 || status == 403);
        }
    }

    #[test]
    fn kind_table() {
        assert_eq!(ErrorKind::from_status(0), ErrorKind::Network);
        assert_eq!(ErrorKind::from_status(408), ErrorKind::Timeout);
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Auth);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::Auth);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(429), ErrorKind::RateLimited);
        assert_eq!(ErrorKind::from_status(422), ErrorKind::Client);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::Server);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::Server);
        assert_eq!(ErrorKind::from_status(200), ErrorKind::Unexpected);
    }

    #[test]
    fn network_and_timeout_constructors() {
        let net = ClassifiedError::network();
        assert_eq!(net.status(), 0);
        assert!(net.is_network_error());
        assert_eq!(
            net.message(),
            "Unable to connect to server. Please check your internet connection."
        );

        let timeout = ClassifiedError::timeout();
        assert_eq!(timeout.status(), 408);
        assert!(timeout.is_timeout());
        assert!(!timeout.is_network_error());
    }

    #[test]
    fn default_messages() {
        assert_eq!(default_message(401), "Session expired. Please login again.");
        assert_eq!(
            default_message(503),
            "The server is temporarily unavailable. Please try again later."
        );
        assert_eq!(default_message(418), "Request failed with status 418.");
    }

    #[test]
    fn serializes_flags_alongside_fields() {
        let err = ClassifiedError::new(500, "db down", serde_json::json!({"detail": "db down"}));
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["message"], "db down");
        assert_eq!(value["status"], 500);
        assert_eq!(value["payload"]["detail"], "db down");
        assert_eq!(value["isServerError"], true);
        assert_eq!(value["isAuthError"], false);
        assert_eq!(value["isNetworkError"], false);
    }

    #[test]
    fn display_is_the_message() {
        let err = ClassifiedError::new(404, "Member not found", Value::Null);
        assert_eq!(err.to_string(), "Member not found");
    }
}
