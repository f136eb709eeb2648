use anyhow::Result;
use clap::Args;
use clubhub_lib::validation;
use clubhub_lib::CachedClient;

use crate::output::{print_matches, OutputFormat};

#[derive(Args)]
pub struct MatchesArgs {
    /// Only matches involving this member ID
    #[arg(long)]
    pub member: Option<String>,

    /// Only matches from this tournament (case-insensitive name)
    #[arg(long)]
    pub tournament: Option<String>,

    /// Only matches on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub since: Option<String>,
}

pub async fn run(args: &MatchesArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let mut matches = client.get_matches().await?;

    if let Some(ref member) = args.member {
        let id = validation::validate_id(member)?;
        matches.retain(|m| m.player1_id == id || m.player2_id == id);
    }

    if let Some(ref tournament) = args.tournament {
        let name = validation::validate_title(tournament)?.to_lowercase();
        matches.retain(|m| {
            m.tournament_name
                .as_deref()
                .is_some_and(|t| t.to_lowercase() == name)
        });
    }

    if let Some(ref since) = args.since {
        let since = validation::validate_date(since)?;
        matches.retain(|m| m.date >= since);
    }

    eprintln!("{} matches", matches.len());
    print_matches(&matches, format)
}
