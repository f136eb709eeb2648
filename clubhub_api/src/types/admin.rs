//! Admin accounts and sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Admin record returned by `/api/admin/me`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Admin {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default, deserialize_with = "super::datetime::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Profile embedded in a login response and kept in the credential store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AdminProfile {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdminRegistration {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Response of `/api/admin/register`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Registered {
    pub message: String,
    pub admin_id: String,
}

/// Response of `/api/admin/login`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdminSession {
    pub token: String,
    pub admin: AdminProfile,
}
