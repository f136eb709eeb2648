//! Error types for the library layer.

use std::fmt;

use clubhub_api::ClassifiedError;

/// Errors produced by the library layer, wrapping classified API errors
/// and adding configuration, serialization, and input validation failures.
#[derive(Debug)]
pub enum ClubError {
    /// A classified error from the request client.
    Api(ClassifiedError),
    /// A required setting is missing or malformed.
    Config(String),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// Reading or writing a local file failed.
    Io(std::io::Error),
}

impl ClubError {
    /// The classified API error, if this is one.
    pub fn as_api(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ClubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "{}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ClubError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ClassifiedError> for ClubError {
    fn from(e: ClassifiedError) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for ClubError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl From<std::io::Error> for ClubError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
