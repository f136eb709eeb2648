//! Club tournaments.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MemberID;

/// Unique identifier for a tournament (UUID string).
pub type TournamentID = String;

/// Lifecycle stage. Unrecognised server values are kept in `Other`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TournamentStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    Other(String),
}

impl From<String> for TournamentStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().parse() {
            Ok(status) => status,
            Err(()) => TournamentStatus::Other(raw),
        }
    }
}

impl From<TournamentStatus> for String {
    fn from(status: TournamentStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TournamentStatus::Upcoming => "upcoming",
            TournamentStatus::Ongoing => "ongoing",
            TournamentStatus::Completed => "completed",
            TournamentStatus::Other(raw) => raw.as_str(),
        })
    }
}

impl FromStr for TournamentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(TournamentStatus::Upcoming),
            "ongoing" => Ok(TournamentStatus::Ongoing),
            "completed" => Ok(TournamentStatus::Completed),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Tournament {
    pub id: TournamentID,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "super::datetime::deserialize")]
    pub start_date: DateTime<Utc>,
    #[serde(default, deserialize_with = "super::datetime::deserialize_option")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: TournamentStatus,
    /// Member IDs.
    #[serde(default)]
    pub participants: Vec<MemberID>,
    #[serde(deserialize_with = "super::datetime::deserialize")]
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or replacing a tournament.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TournamentInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: TournamentStatus,
    pub participants: Vec<MemberID>,
}
