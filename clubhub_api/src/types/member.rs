//! Club members and the rating leaderboard.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a member (UUID string).
pub type MemberID = String;

/// Chess.com rating pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeControl {
    #[default]
    Rapid,
    Blitz,
    Bullet,
}

impl TimeControl {
    pub const ALL: [TimeControl; 3] = [TimeControl::Rapid, TimeControl::Blitz, TimeControl::Bullet];
}

impl fmt::Display for TimeControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeControl::Rapid => "rapid",
            TimeControl::Blitz => "blitz",
            TimeControl::Bullet => "bullet",
        })
    }
}

impl FromStr for TimeControl {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rapid" => Ok(TimeControl::Rapid),
            "blitz" => Ok(TimeControl::Blitz),
            "bullet" => Ok(TimeControl::Bullet),
            _ => Err(()),
        }
    }
}

/// Member record returned by `/api/members`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub id: MemberID,
    pub name: String,
    pub department: String,
    pub chess_com_username: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub rapid_rating: Option<i64>,
    #[serde(default)]
    pub blitz_rating: Option<i64>,
    #[serde(default)]
    pub bullet_rating: Option<i64>,
    #[serde(deserialize_with = "super::datetime::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "super::datetime::deserialize")]
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Last known rating in the given pool, if the member has played it.
    pub fn rating(&self, time_control: TimeControl) -> Option<i64> {
        match time_control {
            TimeControl::Rapid => self.rapid_rating,
            TimeControl::Blitz => self.blitz_rating,
            TimeControl::Bullet => self.bullet_rating,
        }
    }
}

/// Payload for creating or updating a member. Ratings are filled in by the server.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MemberInput {
    pub name: String,
    pub department: String,
    pub chess_com_username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A ranked member. Only members with a rating in the pool are listed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    #[serde(flatten)]
    pub member: Member,
}

/// Response of `/api/leaderboard`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Leaderboard {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub time_control: TimeControl,
}
