use serde::{Deserialize, Serialize};

/// One page of a client-side paginated list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-indexed page number.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// `{"message": ...}` acknowledgement returned by deletes and bulk actions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
}

/// Record counts shown on the admin dashboard.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub members: u64,
    pub tournaments: u64,
    pub matches: u64,
    pub news: u64,
}
