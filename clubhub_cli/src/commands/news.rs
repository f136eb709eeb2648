use anyhow::Result;
use clap::Args;
use clubhub_lib::validation;
use clubhub_lib::CachedClient;

use crate::output::{print_news, print_news_item, OutputFormat};

#[derive(Args)]
pub struct NewsArgs {
    /// Read a single article by ID
    #[arg(long)]
    pub id: Option<String>,

    /// Show only the N most recent articles
    #[arg(long)]
    pub limit: Option<usize>,
}

pub async fn run(args: &NewsArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    if let Some(ref id) = args.id {
        let id = validation::validate_id(id)?;
        let item = client.get_news_item(&id).await?;
        return print_news_item(&item, format);
    }

    let mut news = client.get_news().await?;
    news.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    if let Some(limit) = args.limit {
        news.truncate(limit);
    }

    print_news(&news, format)
}
