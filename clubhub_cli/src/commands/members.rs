use anyhow::Result;
use clap::Args;
use clubhub_lib::validation;
use clubhub_lib::{CachedClient, MemberQuery};

use crate::output::{print_members, OutputFormat};

#[derive(Args)]
pub struct MembersArgs {
    /// Show a single member by ID
    #[arg(long)]
    pub id: Option<String>,

    /// Search by name, department or chess.com username
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by department (exact, case-insensitive)
    #[arg(long)]
    pub department: Option<String>,

    /// Minimum rating in the --time-control pool
    #[arg(long)]
    pub min_rating: Option<i64>,

    /// Rating pool for --min-rating: rapid, blitz, bullet
    #[arg(long, default_value = "rapid")]
    pub time_control: String,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Results per page
    #[arg(long, default_value = "20")]
    pub page_size: usize,

    /// Sort field: name, department, joined, rapid, blitz, bullet
    #[arg(long, default_value = "name")]
    pub sort_by: String,

    /// Sort direction: asc or desc
    #[arg(long, default_value = "asc")]
    pub direction: String,
}

fn build_query(args: &MembersArgs) -> Result<MemberQuery> {
    let mut query = MemberQuery::default()
        .with_page(validation::validate_page(args.page)?)
        .with_page_size(validation::validate_page_size(args.page_size)?)
        .with_sort_by(validation::validate_member_sort(&args.sort_by)?)
        .with_sort_direction(validation::validate_sort_direction(&args.direction)?);

    if let Some(ref search) = args.search {
        let sanitized = validation::validate_search(search)?;
        query = query.with_search(&sanitized);
    }

    if let Some(ref department) = args.department {
        let validated = validation::validate_name(department)?;
        query = query.with_department(&validated);
    }

    if let Some(min) = args.min_rating {
        let tc = validation::validate_time_control(&args.time_control)?;
        query = query.with_min_rating(tc, min);
    }

    Ok(query)
}

pub async fn run(args: &MembersArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    if let Some(ref id) = args.id {
        let id = validation::validate_id(id)?;
        let member = client.get_member(&id).await?;
        return print_members(std::slice::from_ref(&member), format);
    }

    let query = build_query(args)?;
    let page = client.search_members(&query).await?;

    eprintln!(
        "Page {}/{} ({} total members)",
        page.page, page.total_pages, page.total_items
    );

    print_members(&page.items, format)
}
