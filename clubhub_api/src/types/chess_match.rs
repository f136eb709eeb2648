//! Recorded games between two members.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MemberID;

/// Unique identifier for a match (UUID string).
pub type MatchID = String;

/// Game outcome in PGN notation.
///
/// The server stores results as free text, so anything outside the three
/// PGN outcomes is kept verbatim in `Other` instead of failing the whole list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatchResult {
    WhiteWins,
    BlackWins,
    Draw,
    Other(String),
}

impl MatchResult {
    pub fn is_known(&self) -> bool {
        !matches!(self, MatchResult::Other(_))
    }
}

impl From<String> for MatchResult {
    fn from(raw: String) -> Self {
        match raw.trim().parse() {
            Ok(result) => result,
            Err(()) => MatchResult::Other(raw),
        }
    }
}

impl From<MatchResult> for String {
    fn from(result: MatchResult) -> Self {
        result.to_string()
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchResult::WhiteWins => "1-0",
            MatchResult::BlackWins => "0-1",
            MatchResult::Draw => "1/2-1/2",
            MatchResult::Other(raw) => raw.as_str(),
        })
    }
}

/// Strict parse: only the three PGN outcomes.
impl FromStr for MatchResult {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1-0" => Ok(MatchResult::WhiteWins),
            "0-1" => Ok(MatchResult::BlackWins),
            "1/2-1/2" | "½-½" => Ok(MatchResult::Draw),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Match {
    pub id: MatchID,
    pub player1_id: MemberID,
    #[serde(default)]
    pub player1_name: Option<String>,
    pub player2_id: MemberID,
    #[serde(default)]
    pub player2_name: Option<String>,
    pub result: MatchResult,
    #[serde(deserialize_with = "super::datetime::deserialize")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub tournament_name: Option<String>,
    #[serde(deserialize_with = "super::datetime::deserialize")]
    pub created_at: DateTime<Utc>,
}

/// Payload for recording a match. Player names are resolved by the server.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchInput {
    pub player1_id: MemberID,
    pub player2_id: MemberID,
    pub result: MatchResult,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament_name: Option<String>,
}
