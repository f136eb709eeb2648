//! Runtime configuration read from the environment (and `.env`).

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ClubError;

/// Base address of the backend, e.g. `http://localhost:8000`. Required.
pub const API_URL_VAR: &str = "CLUBHUB_API_URL";
/// Where the CLI keeps its session. Optional.
pub const SESSION_FILE_VAR: &str = "CLUBHUB_SESSION_FILE";
/// Lifetime of cached public listings in seconds. Optional.
pub const CACHE_TTL_VAR: &str = "CLUBHUB_CACHE_TTL_SECS";

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);
const SESSION_FILE_NAME: &str = ".clubhub_session.json";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
    pub cache_ttl: Duration,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ClubError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClubError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ClubError::Config(format!("{} is not set", API_URL_VAR)))?;
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ClubError::Config(format!(
                "{} must start with http:// or https://, got '{}'",
                API_URL_VAR, api_url
            )));
        }

        let session_file = match lookup(SESSION_FILE_VAR).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => lookup("HOME")
                .map(|home| PathBuf::from(home).join(SESSION_FILE_NAME))
                .unwrap_or_else(|| PathBuf::from(SESSION_FILE_NAME)),
        };

        let cache_ttl = match lookup(CACHE_TTL_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| {
                    ClubError::Config(format!(
                        "{} must be a whole number of seconds, got '{}'",
                        CACHE_TTL_VAR, raw
                    ))
                })?,
            None => DEFAULT_CACHE_TTL,
        };

        Ok(Self {
            api_url,
            session_file,
            cache_ttl,
        })
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.to_string();
        self
    }
}
