use anyhow::Result;
use chrono::{DateTime, Utc};
use clubhub_lib::types::{Admin, DashboardStats, Leaderboard, Match, Member, News, Tournament};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct MemberRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Department")]
    #[serde(rename = "Department")]
    department: String,
    #[tabled(rename = "Chess.com")]
    #[serde(rename = "Chess.com")]
    chess_com: String,
    #[tabled(rename = "Rapid")]
    #[serde(rename = "Rapid")]
    rapid: String,
    #[tabled(rename = "Blitz")]
    #[serde(rename = "Blitz")]
    blitz: String,
    #[tabled(rename = "Bullet")]
    #[serde(rename = "Bullet")]
    bullet: String,
}

#[derive(Tabled, Serialize)]
struct LeaderboardRow {
    #[tabled(rename = "Rank")]
    #[serde(rename = "Rank")]
    rank: u32,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Department")]
    #[serde(rename = "Department")]
    department: String,
    #[tabled(rename = "Chess.com")]
    #[serde(rename = "Chess.com")]
    chess_com: String,
    #[tabled(rename = "Rating")]
    #[serde(rename = "Rating")]
    rating: String,
}

#[derive(Tabled, Serialize)]
struct TournamentRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Start")]
    #[serde(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    #[serde(rename = "End")]
    end: String,
    #[tabled(rename = "Players")]
    #[serde(rename = "Players")]
    players: usize,
}

#[derive(Tabled, Serialize)]
struct MatchRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "White")]
    #[serde(rename = "White")]
    white: String,
    #[tabled(rename = "Black")]
    #[serde(rename = "Black")]
    black: String,
    #[tabled(rename = "Result")]
    #[serde(rename = "Result")]
    result: String,
    #[tabled(rename = "Tournament")]
    #[serde(rename = "Tournament")]
    tournament: String,
}

#[derive(Tabled, Serialize)]
struct NewsRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Summary")]
    #[serde(rename = "Summary")]
    summary: String,
}

#[derive(Tabled, Serialize)]
struct FieldRow {
    #[tabled(rename = "Field")]
    #[serde(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

const SUMMARY_CHARS: usize = 60;

fn build_member_rows(members: &[Member]) -> Vec<MemberRow> {
    members
        .iter()
        .map(|m| MemberRow {
            id: m.id.clone(),
            name: m.name.clone(),
            department: m.department.clone(),
            chess_com: m.chess_com_username.clone(),
            rapid: format_rating(m.rapid_rating),
            blitz: format_rating(m.blitz_rating),
            bullet: format_rating(m.bullet_rating),
        })
        .collect()
}

fn build_leaderboard_rows(board: &Leaderboard) -> Vec<LeaderboardRow> {
    board
        .leaderboard
        .iter()
        .map(|entry| LeaderboardRow {
            rank: entry.rank,
            name: entry.member.name.clone(),
            department: entry.member.department.clone(),
            chess_com: entry.member.chess_com_username.clone(),
            rating: format_rating(entry.member.rating(board.time_control)),
        })
        .collect()
}

fn build_tournament_rows(tournaments: &[Tournament]) -> Vec<TournamentRow> {
    tournaments
        .iter()
        .map(|t| TournamentRow {
            id: t.id.clone(),
            name: t.name.clone(),
            status: t.status.to_string(),
            start: format_date(&t.start_date),
            end: t.end_date.as_ref().map(format_date).unwrap_or_else(|| "-".into()),
            players: t.participants.len(),
        })
        .collect()
}

fn build_match_rows(matches: &[Match]) -> Vec<MatchRow> {
    matches
        .iter()
        .map(|m| MatchRow {
            date: format_date(&m.date),
            white: m.player1_name.clone().unwrap_or_else(|| m.player1_id.clone()),
            black: m.player2_name.clone().unwrap_or_else(|| m.player2_id.clone()),
            result: m.result.to_string(),
            tournament: m.tournament_name.clone().unwrap_or_else(|| "-".into()),
        })
        .collect()
}

fn build_news_rows(news: &[News]) -> Vec<NewsRow> {
    news.iter()
        .map(|n| NewsRow {
            id: n.id.clone(),
            date: format_date(&n.created_at),
            title: n.title.clone(),
            summary: summarize(&n.content, SUMMARY_CHARS),
        })
        .collect()
}

fn build_admin_rows(admin: &Admin) -> Vec<FieldRow> {
    let mut rows = vec![
        field("ID", &admin.id),
        field("Username", &admin.username),
        field("Email", &admin.email),
    ];
    if let Some(created) = &admin.created_at {
        rows.push(field("Since", &format_date(created)));
    }
    rows
}

fn build_stats_rows(stats: &DashboardStats) -> Vec<FieldRow> {
    vec![
        field("Members", &stats.members.to_string()),
        field("Tournaments", &stats.tournaments.to_string()),
        field("Matches", &stats.matches.to_string()),
        field("News", &stats.news.to_string()),
    ]
}

fn field(name: &str, value: &str) -> FieldRow {
    FieldRow {
        field: name.to_string(),
        value: value.to_string(),
    }
}

// -- Dispatch --

fn emit<R: Tabled + Serialize, T: Serialize + ?Sized>(
    rows: Vec<R>,
    raw: &T,
    format: &OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => write_csv(std::io::stdout(), &rows)?,
        OutputFormat::Json => print_json(raw),
    }
    Ok(())
}

pub fn print_members(members: &[Member], format: &OutputFormat) -> Result<()> {
    emit(build_member_rows(members), members, format)
}

pub fn print_leaderboard(board: &Leaderboard, format: &OutputFormat) -> Result<()> {
    emit(build_leaderboard_rows(board), board, format)
}

pub fn print_tournaments(tournaments: &[Tournament], format: &OutputFormat) -> Result<()> {
    emit(build_tournament_rows(tournaments), tournaments, format)
}

pub fn print_matches(matches: &[Match], format: &OutputFormat) -> Result<()> {
    emit(build_match_rows(matches), matches, format)
}

pub fn print_news(news: &[News], format: &OutputFormat) -> Result<()> {
    emit(build_news_rows(news), news, format)
}

/// Full article body; tables would truncate it.
pub fn print_news_item(item: &News, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table | OutputFormat::Markdown => {
            println!("{}", item.title);
            println!("{}", format_date(&item.created_at));
            println!();
            println!("{}", item.content);
            Ok(())
        }
        _ => emit(build_news_rows(std::slice::from_ref(item)), item, format),
    }
}

pub fn print_admin(admin: &Admin, format: &OutputFormat) -> Result<()> {
    emit(build_admin_rows(admin), admin, format)
}

pub fn print_stats(stats: &DashboardStats, format: &OutputFormat) -> Result<()> {
    emit(build_stats_rows(stats), stats, format)
}

fn write_csv<W: std::io::Write, R: Serialize>(writer: W, rows: &[R]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_rating(rating: Option<i64>) -> String {
    rating.map(|r| r.to_string()).unwrap_or_else(|| "-".into())
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// First line of `content`, cut to `max` characters with an ellipsis.
fn summarize(content: &str, max: usize) -> String {
    let first_line = content.lines().next().unwrap_or("").trim();
    if first_line.chars().count() <= max {
        return first_line.to_string();
    }
    let cut: String = first_line.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}
