mod common;
pub use self::common::{Query, SortDirection};

mod leaderboard;
pub use self::leaderboard::LeaderboardQuery;

mod member;
pub use self::member::{MemberQuery, MemberSortBy};
