//! Client-side filtering, sorting and pagination of the member directory.
//!
//! `/api/members` returns the whole directory in one response, so the
//! narrowing that a directory page needs happens here.

use std::cmp::Ordering;

use crate::types::{Member, Page, TimeControl};

use super::SortDirection;

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemberSortBy {
    #[default]
    Name,
    Department,
    Rating(TimeControl),
    /// Join date.
    Joined,
}

#[derive(Clone, Debug)]
pub struct MemberQuery {
    pub search: Option<String>,
    pub department: Option<String>,
    pub min_rating: Option<(TimeControl, i64)>,
    pub sort_by: MemberSortBy,
    pub sort_direction: SortDirection,
    /// 1-indexed.
    pub page: usize,
    pub page_size: usize,
}

impl Default for MemberQuery {
    fn default() -> Self {
        Self {
            search: None,
            department: None,
            min_rating: None,
            sort_by: MemberSortBy::Name,
            sort_direction: SortDirection::Asc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl MemberQuery {
    /// Case-insensitive substring match on name, department or chess.com username.
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    /// Case-insensitive exact match on department.
    pub fn with_department(mut self, department: &str) -> Self {
        self.department = Some(department.to_string());
        self
    }

    /// Keeps only members rated at least `rating` in `time_control`.
    pub fn with_min_rating(mut self, time_control: TimeControl, rating: i64) -> Self {
        self.min_rating = Some((time_control, rating));
        self
    }

    pub fn with_sort_by(mut self, sort_by: MemberSortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn with_sort_direction(mut self, sort_direction: SortDirection) -> Self {
        self.sort_direction = sort_direction;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn matches(&self, member: &Member) -> bool {
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty()
                && ![&member.name, &member.department, &member.chess_com_username]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        if let Some(department) = &self.department {
            if !member.department.trim().eq_ignore_ascii_case(department.trim()) {
                return false;
            }
        }
        if let Some((time_control, min)) = self.min_rating {
            match member.rating(time_control) {
                Some(rating) if rating >= min => {}
                _ => return false,
            }
        }
        true
    }

    fn compare(&self, a: &Member, b: &Member) -> Ordering {
        let directed = |ord: Ordering| match self.sort_direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        match self.sort_by {
            MemberSortBy::Name => directed(a.name.to_lowercase().cmp(&b.name.to_lowercase())),
            MemberSortBy::Department => directed(
                a.department
                    .to_lowercase()
                    .cmp(&b.department.to_lowercase())
                    .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
            ),
            MemberSortBy::Joined => directed(a.created_at.cmp(&b.created_at)),
            // Unrated members go last whichever way the list is sorted.
            MemberSortBy::Rating(tc) => match (a.rating(tc), b.rating(tc)) {
                (Some(x), Some(y)) => directed(x.cmp(&y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }

    /// Filters, sorts (stably) and slices `members` into the requested page.
    pub fn apply(&self, members: &[Member]) -> Page<Member> {
        let mut selected: Vec<&Member> = members.iter().filter(|m| self.matches(m)).collect();
        selected.sort_by(|a, b| self.compare(a, b));

        let page_size = self.page_size.max(1);
        let page = self.page.max(1);
        let total_items = selected.len();
        let total_pages = total_items.div_ceil(page_size);
        let items = selected
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect();

        Page {
            items,
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn member(name: &str, department: &str, rapid: Option<i64>, day: u32) -> Member {
        let joined = Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap();
        Member {
            id: name.to_lowercase(),
            name: name.to_string(),
            department: department.to_string(),
            chess_com_username: format!("{}_cu", name.to_lowercase()),
            email: format!("{}@cu.ac.bd", name.to_lowercase()),
            phone: None,
            rapid_rating: rapid,
            blitz_rating: None,
            bullet_rating: None,
            created_at: joined,
            updated_at: joined,
        }
    }

    fn directory() -> Vec<Member> {
        vec![
            member("Rahim", "CSE", Some(1500), 3),
            member("karim", "EEE", None, 1),
            member("Anika", "CSE", Some(1800), 2),
            member("Tanvir", "Physics", Some(1200), 4),
        ]
    }

    fn names(page: &Page<Member>) -> Vec<&str> {
        page.items.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn default_sorts_by_name_case_insensitively() {
        let page = MemberQuery::default().apply(&directory());
        assert_eq!(names(&page), vec!["Anika", "karim", "Rahim", "Tanvir"]);
        assert_eq!(page.total_items, 4);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn search_hits_name_department_and_username() {
        let page = MemberQuery::default().with_search("cse").apply(&directory());
        assert_eq!(names(&page), vec!["Anika", "Rahim"]);

        let page = MemberQuery::default().with_search("TANVIR_cu").apply(&directory());
        assert_eq!(names(&page), vec!["Tanvir"]);

        let page = MemberQuery::default().with_search("   ").apply(&directory());
        assert_eq!(page.total_items, 4);
    }

    #[test]
    fn department_is_exact_match() {
        let page = MemberQuery::default().with_department("physics").apply(&directory());
        assert_eq!(names(&page), vec!["Tanvir"]);
        let page = MemberQuery::default().with_department("Phys").apply(&directory());
        assert!(page.items.is_empty());
    }

    #[test]
    fn min_rating_drops_unrated() {
        let page = MemberQuery::default()
            .with_min_rating(TimeControl::Rapid, 1400)
            .apply(&directory());
        assert_eq!(names(&page), vec!["Anika", "Rahim"]);
    }

    #[test]
    fn rating_sort_keeps_unrated_last() {
        let desc = MemberQuery::default()
            .with_sort_by(MemberSortBy::Rating(TimeControl::Rapid))
            .with_sort_direction(SortDirection::Desc)
            .apply(&directory());
        assert_eq!(names(&desc), vec!["Anika", "Rahim", "Tanvir", "karim"]);

        let asc = MemberQuery::default()
            .with_sort_by(MemberSortBy::Rating(TimeControl::Rapid))
            .apply(&directory());
        assert_eq!(names(&asc), vec!["Tanvir", "Rahim", "Anika", "karim"]);
    }

    #[test]
    fn joined_and_department_sorts() {
        let page = MemberQuery::default()
            .with_sort_by(MemberSortBy::Joined)
            .apply(&directory());
        assert_eq!(names(&page), vec!["karim", "Anika", "Rahim", "Tanvir"]);

        let page = MemberQuery::default()
            .with_sort_by(MemberSortBy::Department)
            .apply(&directory());
        assert_eq!(names(&page), vec!["Anika", "Rahim", "karim", "Tanvir"]);
    }

    #[test]
    fn pagination() {
        let members = directory();
        let first = MemberQuery::default().with_page_size(3).apply(&members);
        assert_eq!(names(&first), vec!["Anika", "karim", "Rahim"]);
        assert_eq!(first.total_pages, 2);

        let second = MemberQuery::default().with_page_size(3).with_page(2).apply(&members);
        assert_eq!(names(&second), vec!["Tanvir"]);

        let beyond = MemberQuery::default().with_page_size(3).with_page(9).apply(&members);
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_items, 4);
        assert_eq!(beyond.page, 9);
    }

    #[test]
    fn zero_page_and_size_are_clamped() {
        let page = MemberQuery::default().with_page(0).with_page_size(0).apply(&directory());
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);
        assert_eq!(names(&page), vec!["Anika"]);
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn empty_directory() {
        let page = MemberQuery::default().apply(&[]);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
    }
}
