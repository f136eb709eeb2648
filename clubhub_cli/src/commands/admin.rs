use anyhow::Result;
use clap::{Args, Subcommand};
use clubhub_lib::types::{MatchInput, MemberInput, NewsInput, TournamentInput};
use clubhub_lib::validation;
use clubhub_lib::CachedClient;

use crate::output::{
    print_matches, print_members, print_news, print_stats, print_tournaments, OutputFormat,
};

#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Show dashboard record counts
    Stats,
    /// Check that the backend is up
    Health,
    /// Add a member
    AddMember(MemberFields),
    /// Replace a member's details
    UpdateMember {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        fields: MemberFields,
    },
    /// Remove a member
    DeleteMember {
        #[arg(long)]
        id: String,
    },
    /// Pull fresh ratings from chess.com for every member
    RefreshRatings,
    /// Record a match result
    AddMatch(MatchFields),
    /// Remove a match
    DeleteMatch {
        #[arg(long)]
        id: String,
    },
    /// Create a tournament
    AddTournament(TournamentFields),
    /// Replace a tournament's details
    UpdateTournament {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        fields: TournamentFields,
    },
    /// Remove a tournament
    DeleteTournament {
        #[arg(long)]
        id: String,
    },
    /// Publish a news article
    AddNews(NewsFields),
    /// Replace a news article
    UpdateNews {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        fields: NewsFields,
    },
    /// Remove a news article
    DeleteNews {
        #[arg(long)]
        id: String,
    },
}

#[derive(Args)]
pub struct MemberFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub department: String,
    #[arg(long)]
    pub chess_com_username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Args)]
pub struct MatchFields {
    /// White player's member ID
    #[arg(long)]
    pub white: String,
    /// Black player's member ID
    #[arg(long)]
    pub black: String,
    /// 1-0, 0-1, 1/2-1/2 (or white, black, draw)
    #[arg(long)]
    pub result: String,
    /// YYYY-MM-DD or RFC 3339
    #[arg(long)]
    pub date: String,
    #[arg(long)]
    pub tournament: Option<String>,
}

#[derive(Args)]
pub struct TournamentFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    /// YYYY-MM-DD or RFC 3339
    #[arg(long)]
    pub start: String,
    #[arg(long)]
    pub end: Option<String>,
    /// upcoming, ongoing, completed
    #[arg(long, default_value = "upcoming")]
    pub status: String,
    /// Participant member IDs (repeatable)
    #[arg(long = "participant")]
    pub participants: Vec<String>,
}

#[derive(Args)]
pub struct NewsFields {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub content: String,
    #[arg(long)]
    pub image_url: Option<String>,
}

impl MemberFields {
    fn to_input(&self) -> Result<MemberInput> {
        Ok(MemberInput {
            name: validation::validate_name(&self.name)?,
            department: validation::validate_name(&self.department)?,
            chess_com_username: validation::validate_chess_username(&self.chess_com_username)?,
            email: validation::validate_email(&self.email)?,
            phone: self.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()).map(String::from),
        })
    }
}

impl MatchFields {
    fn to_input(&self) -> Result<MatchInput> {
        let player1_id = validation::validate_id(&self.white)?;
        let player2_id = validation::validate_id(&self.black)?;
        if player1_id == player2_id {
            anyhow::bail!("a member cannot play against themselves");
        }
        Ok(MatchInput {
            player1_id,
            player2_id,
            result: validation::validate_match_result(&self.result)?,
            date: validation::validate_date(&self.date)?,
            tournament_name: self
                .tournament
                .as_deref()
                .map(validation::validate_title)
                .transpose()?,
        })
    }
}

impl TournamentFields {
    fn to_input(&self) -> Result<TournamentInput> {
        let start_date = validation::validate_date(&self.start)?;
        let end_date = self.end.as_deref().map(validation::validate_date).transpose()?;
        if end_date.is_some_and(|end| end < start_date) {
            anyhow::bail!("tournament cannot end before it starts");
        }
        Ok(TournamentInput {
            name: validation::validate_title(&self.name)?,
            description: self
                .description
                .as_deref()
                .map(validation::validate_content)
                .transpose()?,
            start_date,
            end_date,
            status: validation::validate_tournament_status(&self.status)?,
            participants: self
                .participants
                .iter()
                .map(|id| validation::validate_id(id))
                .collect::<Result<_, _>>()?,
        })
    }
}

impl NewsFields {
    fn to_input(&self) -> Result<NewsInput> {
        Ok(NewsInput {
            title: validation::validate_title(&self.title)?,
            content: validation::validate_content(&self.content)?,
            image_url: self.image_url.clone().filter(|u| !u.trim().is_empty()),
        })
    }
}

pub async fn run(args: &AdminArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    match &args.command {
        AdminCommand::Stats => print_stats(&client.get_stats().await?, format)?,
        AdminCommand::Health => {
            let health = client.health().await?;
            println!("{} ({})", health.status, health.timestamp);
        }
        AdminCommand::AddMember(fields) => {
            let member = client.create_member(&fields.to_input()?).await?;
            print_members(std::slice::from_ref(&member), format)?;
        }
        AdminCommand::UpdateMember { id, fields } => {
            let id = validation::validate_id(id)?;
            let member = client.update_member(&id, &fields.to_input()?).await?;
            print_members(std::slice::from_ref(&member), format)?;
        }
        AdminCommand::DeleteMember { id } => {
            let id = validation::validate_id(id)?;
            eprintln!("{}", client.delete_member(&id).await?.message);
        }
        AdminCommand::RefreshRatings => {
            eprintln!("{}", client.refresh_ratings().await?.message);
        }
        AdminCommand::AddMatch(fields) => {
            let game = client.create_match(&fields.to_input()?).await?;
            print_matches(std::slice::from_ref(&game), format)?;
        }
        AdminCommand::DeleteMatch { id } => {
            let id = validation::validate_id(id)?;
            eprintln!("{}", client.delete_match(&id).await?.message);
        }
        AdminCommand::AddTournament(fields) => {
            let tournament = client.create_tournament(&fields.to_input()?).await?;
            print_tournaments(std::slice::from_ref(&tournament), format)?;
        }
        AdminCommand::UpdateTournament { id, fields } => {
            let id = validation::validate_id(id)?;
            let tournament = client.update_tournament(&id, &fields.to_input()?).await?;
            print_tournaments(std::slice::from_ref(&tournament), format)?;
        }
        AdminCommand::DeleteTournament { id } => {
            let id = validation::validate_id(id)?;
            eprintln!("{}", client.delete_tournament(&id).await?.message);
        }
        AdminCommand::AddNews(fields) => {
            let item = client.create_news(&fields.to_input()?).await?;
            print_news(std::slice::from_ref(&item), format)?;
        }
        AdminCommand::UpdateNews { id, fields } => {
            let id = validation::validate_id(id)?;
            let item = client.update_news(&id, &fields.to_input()?).await?;
            print_news(std::slice::from_ref(&item), format)?;
        }
        AdminCommand::DeleteNews { id } => {
            let id = validation::validate_id(id)?;
            eprintln!("{}", client.delete_news(&id).await?.message);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_fields_reject_self_play() {
        let fields = MatchFields {
            white: "a".into(),
            black: "a".into(),
            result: "draw".into(),
            date: "2024-04-12".into(),
            tournament: None,
        };
        assert!(fields.to_input().is_err());
    }

    #[test]
    fn match_fields_normalize_result() {
        let fields = MatchFields {
            white: "a".into(),
            black: "b".into(),
            result: "white".into(),
            date: "2024-04-12".into(),
            tournament: Some("Spring Open".into()),
        };
        let input = fields.to_input().unwrap();
        assert_eq!(input.result, clubhub_lib::types::MatchResult::WhiteWins);
        assert_eq!(input.tournament_name.as_deref(), Some("Spring Open"));
    }

    #[test]
    fn tournament_fields_check_date_order() {
        let fields = TournamentFields {
            name: "Spring Open".into(),
            description: None,
            start: "2024-04-12".into(),
            end: Some("2024-04-10".into()),
            status: "upcoming".into(),
            participants: vec![],
        };
        assert!(fields.to_input().is_err());
    }

    #[test]
    fn member_fields_drop_blank_phone() {
        let fields = MemberFields {
            name: "Anika Rahman".into(),
            department: "CSE".into(),
            chess_com_username: "anika_r".into(),
            email: "Anika@CU.ac.bd".into(),
            phone: Some("  ".into()),
        };
        let input = fields.to_input().unwrap();
        assert_eq!(input.phone, None);
        assert_eq!(input.email, "anika@cu.ac.bd");
    }
}
