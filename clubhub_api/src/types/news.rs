use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a news post (UUID string).
pub type NewsID = String;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct News {
    pub id: NewsID,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "super::datetime::deserialize")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewsInput {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
