//! Shared query infrastructure: the [`Query`] trait and [`SortDirection`].

use std::str::FromStr;

use crate::RequestDescriptor;

/// Implemented by queries the server evaluates. Appends the query's
/// parameters to a request.
pub trait Query {
    fn add_to_request(&self, request: RequestDescriptor) -> RequestDescriptor;
}

/// Sort order for client-side sorting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (A-Z, lowest first). This is the default.
    #[default]
    Asc,
    /// Descending order (Z-A, highest first).
    Desc,
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}
