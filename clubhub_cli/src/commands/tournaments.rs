use anyhow::Result;
use clap::Args;
use clubhub_lib::validation;
use clubhub_lib::CachedClient;

use crate::output::{print_tournaments, OutputFormat};

#[derive(Args)]
pub struct TournamentsArgs {
    /// Show a single tournament by ID
    #[arg(long)]
    pub id: Option<String>,

    /// Filter by status: upcoming, ongoing, completed
    #[arg(long)]
    pub status: Option<String>,
}

pub async fn run(
    args: &TournamentsArgs,
    client: &CachedClient,
    format: &OutputFormat,
) -> Result<()> {
    if let Some(ref id) = args.id {
        let id = validation::validate_id(id)?;
        let tournament = client.get_tournament(&id).await?;
        return print_tournaments(std::slice::from_ref(&tournament), format);
    }

    let mut tournaments = client.get_tournaments().await?;
    if let Some(ref status) = args.status {
        let status = validation::validate_tournament_status(status)?;
        tournaments.retain(|t| t.status == status);
    }

    eprintln!("{} tournaments", tournaments.len());
    print_tournaments(&tournaments, format)
}
