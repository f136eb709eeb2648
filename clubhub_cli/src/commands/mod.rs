//! CLI subcommand implementations.

pub mod admin;
pub mod auth;
pub mod leaderboard;
pub mod matches;
pub mod members;
pub mod news;
pub mod tournaments;
