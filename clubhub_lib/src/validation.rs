use chrono::{DateTime, NaiveDate, Utc};
use clubhub_api::types::{MatchResult, TimeControl, TournamentStatus};
use clubhub_api::{MemberSortBy, SortDirection};

use crate::error::ClubError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_CONTENT_LENGTH: usize = 20_000;
pub const MAX_PAGE_SIZE: usize = 100;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, ClubError> {
    if input.len() > max_len {
        return Err(ClubError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(ClubError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

pub fn validate_search(input: &str) -> Result<String, ClubError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Member names and departments.
pub fn validate_name(input: &str) -> Result<String, ClubError> {
    sanitize_text(input, MAX_NAME_LENGTH)
}

pub fn validate_title(input: &str) -> Result<String, ClubError> {
    sanitize_text(input, MAX_TITLE_LENGTH)
}

/// News bodies keep their line breaks; only other control characters are dropped.
pub fn validate_content(input: &str) -> Result<String, ClubError> {
    if input.len() > MAX_CONTENT_LENGTH {
        return Err(ClubError::InvalidInput(format!(
            "content exceeds maximum length of {} bytes",
            MAX_CONTENT_LENGTH
        )));
    }
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || matches!(c, '\n' | '\t'))
        .collect();
    let cleaned = cleaned.trim().to_string();
    if cleaned.is_empty() {
        return Err(ClubError::InvalidInput("content is empty".to_string()));
    }
    Ok(cleaned)
}

/// Shallow shape check; the server does the authoritative validation.
pub fn validate_email(input: &str) -> Result<String, ClubError> {
    let email = input.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !email.contains(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    };
    if valid {
        Ok(email)
    } else {
        Err(ClubError::InvalidInput(format!(
            "'{}' is not a valid email address",
            input
        )))
    }
}

/// Chess.com usernames: 3-25 characters of letters, digits, `_` or `-`.
pub fn validate_chess_username(input: &str) -> Result<String, ClubError> {
    let username = input.trim();
    let valid = (3..=25).contains(&username.len())
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(username.to_string())
    } else {
        Err(ClubError::InvalidInput(format!(
            "'{}' is not a valid chess.com username (3-25 letters, digits, '_' or '-')",
            input
        )))
    }
}

/// Accepts PGN results plus the shorthands `white`, `black` and `draw`.
pub fn validate_match_result(input: &str) -> Result<MatchResult, ClubError> {
    let normalized = input.trim().to_lowercase();
    match normalized.as_str() {
        "white" | "w" => Ok(MatchResult::WhiteWins),
        "black" | "b" => Ok(MatchResult::BlackWins),
        "draw" | "d" => Ok(MatchResult::Draw),
        other => other.parse().map_err(|_| {
            ClubError::InvalidInput(format!(
                "unknown result '{}'. Valid values: 1-0, 0-1, 1/2-1/2 (or white, black, draw)",
                input
            ))
        }),
    }
}

pub fn validate_tournament_status(input: &str) -> Result<TournamentStatus, ClubError> {
    input.trim().to_lowercase().parse().map_err(|_| {
        ClubError::InvalidInput(format!(
            "unknown tournament status '{}'. Valid values: upcoming, ongoing, completed",
            input
        ))
    })
}

pub fn validate_time_control(input: &str) -> Result<TimeControl, ClubError> {
    input.trim().to_lowercase().parse().map_err(|_| {
        ClubError::InvalidInput(format!(
            "unknown time control '{}'. Valid values: rapid, blitz, bullet",
            input
        ))
    })
}

/// `name`, `department`, `joined`, or a time control to sort by rating.
pub fn validate_member_sort(input: &str) -> Result<MemberSortBy, ClubError> {
    match input.trim().to_lowercase().as_str() {
        "name" => Ok(MemberSortBy::Name),
        "department" | "dept" => Ok(MemberSortBy::Department),
        "joined" => Ok(MemberSortBy::Joined),
        other => other
            .parse::<TimeControl>()
            .map(MemberSortBy::Rating)
            .map_err(|_| {
                ClubError::InvalidInput(format!(
                    "unknown sort field '{}'. Valid values: name, department, joined, rapid, blitz, bullet",
                    input
                ))
            }),
    }
}

pub fn validate_sort_direction(input: &str) -> Result<SortDirection, ClubError> {
    input.trim().to_lowercase().parse().map_err(|_| {
        ClubError::InvalidInput(format!(
            "unknown sort direction '{}'. Valid values: asc, desc",
            input
        ))
    })
}

pub fn validate_page(page: usize) -> Result<usize, ClubError> {
    if page < 1 {
        return Err(ClubError::InvalidInput("page must be at least 1".to_string()));
    }
    Ok(page)
}

pub fn validate_page_size(page_size: usize) -> Result<usize, ClubError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ClubError::InvalidInput(format!(
            "page size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(page_size)
}

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp. Plain dates are midnight UTC.
pub fn validate_date(input: &str) -> Result<DateTime<Utc>, ClubError> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            ClubError::InvalidInput(format!(
                "invalid date '{}'. Use YYYY-MM-DD or an RFC 3339 timestamp",
                input
            ))
        })
}

/// Member, tournament, match and news IDs are UUIDs or short slugs.
pub fn validate_id(input: &str) -> Result<String, ClubError> {
    let id = input.trim();
    if id.is_empty()
        || id.len() > 64
        || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ClubError::InvalidInput(format!("invalid id '{}'", input)));
    }
    Ok(id.to_string())
}
