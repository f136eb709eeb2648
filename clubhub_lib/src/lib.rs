//! Library layer for ClubHub: configuration, cached API client, persistent
//! credentials, and input validation.
//!
//! Wraps the `clubhub_api` crate with an in-memory TTL cache for public
//! listings and a file-backed credential store for CLI sessions.

pub mod cache;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod validation;

pub use clubhub_api;
pub use clubhub_api::types;
pub use clubhub_api::{
    ClassifiedError, ErrorKind, LeaderboardQuery, MemberQuery, MemberSortBy, SortDirection,
};

pub use client::CachedClient;
pub use config::Config;
pub use credentials::FileCredentialStore;
pub use error::ClubError;
