mod datetime;

mod meta;
pub use self::meta::{DashboardStats, Health, MessageResponse, Page};

mod member;
pub use self::member::{Leaderboard, LeaderboardEntry, Member, MemberID, MemberInput, TimeControl};

mod tournament;
pub use self::tournament::{Tournament, TournamentID, TournamentInput, TournamentStatus};

mod chess_match;
pub use self::chess_match::{Match, MatchID, MatchInput, MatchResult};

mod news;
pub use self::news::{News, NewsID, NewsInput};

mod admin;
pub use self::admin::{Admin, AdminCredentials, AdminProfile, AdminRegistration, AdminSession, Registered};
