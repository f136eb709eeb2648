mod commands;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clubhub_lib::cache::TtlCache;
use clubhub_lib::clubhub_api::Client;
use clubhub_lib::{CachedClient, ClubError, Config, FileCredentialStore};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "clubhub")]
#[command(about = "Browse and manage the university chess club")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Backend base address (overrides CLUBHUB_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List or look up members
    Members(commands::members::MembersArgs),
    /// Show the rating leaderboard
    Leaderboard(commands::leaderboard::LeaderboardArgs),
    /// List or look up tournaments
    Tournaments(commands::tournaments::TournamentsArgs),
    /// List recorded matches
    Matches(commands::matches::MatchesArgs),
    /// List or read club news
    News(commands::news::NewsArgs),
    /// Log in as an admin
    Login(commands::auth::LoginArgs),
    /// Forget the stored admin session
    Logout,
    /// Show the logged-in admin
    Whoami,
    /// Admin operations (requires login)
    Admin(commands::admin::AdminArgs),
}

/// `--api-url` stands in for a missing `CLUBHUB_API_URL` and overrides a set one.
fn load_config(api_url: Option<&str>) -> Result<Config, ClubError> {
    match (api_url, Config::from_env()) {
        (Some(url), Ok(config)) => Ok(config.with_api_url(url)),
        (None, Ok(config)) => Ok(config),
        (Some(url), Err(ClubError::Config(_))) => Config::from_lookup(|key| {
            if key == clubhub_lib::config::API_URL_VAR {
                Some(url.to_string())
            } else {
                std::env::var(key).ok()
            }
        }),
        (_, Err(e)) => Err(e),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clubhub=info".parse().unwrap()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let config = load_config(cli.api_url.as_deref())?;

    let credentials = Arc::new(FileCredentialStore::open(&config.session_file)?);
    let inner = Client::with_credentials(&config.api_url, credentials)?;
    let client = CachedClient::new(inner, TtlCache::new(config.cache_ttl));

    let result = match &cli.command {
        Commands::Members(args) => commands::members::run(args, &client, &format).await,
        Commands::Leaderboard(args) => commands::leaderboard::run(args, &client, &format).await,
        Commands::Tournaments(args) => commands::tournaments::run(args, &client, &format).await,
        Commands::Matches(args) => commands::matches::run(args, &client, &format).await,
        Commands::News(args) => commands::news::run(args, &client, &format).await,
        Commands::Login(args) => commands::auth::login(args, &client).await,
        Commands::Logout => commands::auth::logout(&client),
        Commands::Whoami => commands::auth::whoami(&client, &format).await,
        Commands::Admin(args) => commands::admin::run(args, &client, &format).await,
    };

    if let Err(err) = &result {
        if let Some(api) = err.downcast_ref::<ClubError>().and_then(ClubError::as_api) {
            if api.is_auth_error() {
                eprintln!("Hint: run `clubhub login` to start a new admin session.");
            } else if api.is_network_error() || api.is_timeout() {
                eprintln!("Hint: check that {} is reachable.", config.api_url);
            }
        }
    }
    result
}
