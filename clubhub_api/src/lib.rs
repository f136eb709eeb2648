mod client;
pub mod credentials;
mod endpoints;
mod errors;
mod query;
mod request;
mod response;
pub mod types;
pub use self::client::{Client, RetryPolicy};
pub use self::credentials::{CredentialPolicy, CredentialStore, MemoryCredentialStore};
pub use self::errors::{default_message, ClassifiedError, ErrorKind, STATUS_NETWORK, STATUS_TIMEOUT};
pub use self::query::{LeaderboardQuery, MemberQuery, MemberSortBy, Query, SortDirection};
pub use self::request::{RequestDescriptor, REQUEST_TIMEOUT};
pub use self::response::ResponseBody;
pub use reqwest::Method;
