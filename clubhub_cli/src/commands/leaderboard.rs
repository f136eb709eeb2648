use anyhow::Result;
use clap::Args;
use clubhub_lib::validation;
use clubhub_lib::{CachedClient, LeaderboardQuery};

use crate::output::{print_leaderboard, OutputFormat};

#[derive(Args)]
pub struct LeaderboardArgs {
    /// Time control: rapid, blitz, bullet
    #[arg(long, default_value = "rapid")]
    pub time_control: String,

    /// Show only the top N entries
    #[arg(long)]
    pub top: Option<usize>,
}

pub async fn run(
    args: &LeaderboardArgs,
    client: &CachedClient,
    format: &OutputFormat,
) -> Result<()> {
    let tc = validation::validate_time_control(&args.time_control)?;
    let query = LeaderboardQuery::default().with_time_control(tc);

    let mut board = client.get_leaderboard(&query).await?;
    if let Some(top) = args.top {
        board.leaderboard.truncate(top);
    }

    eprintln!("{} leaderboard ({} ranked)", board.time_control, board.leaderboard.len());
    print_leaderboard(&board, format)
}
