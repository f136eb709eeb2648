//! Credential storage capability injected into the [`Client`](crate::Client).

use dashmap::DashMap;

/// Bearer token of the logged-in admin.
pub const ADMIN_TOKEN: &str = "admin_token";
/// JSON profile of the logged-in admin.
pub const ADMIN_PROFILE: &str = "admin_user";
/// Bearer token of the logged-in member.
pub const MEMBER_TOKEN: &str = "member_token";
/// JSON profile of the logged-in member.
pub const MEMBER_PROFILE: &str = "member_user";

/// Every entry that makes up a client-held session.
pub const SESSION_KEYS: [&str; 4] = [ADMIN_TOKEN, ADMIN_PROFILE, MEMBER_TOKEN, MEMBER_PROFILE];

/// Key/value storage for session credentials.
///
/// `clear` must be idempotent: removing a missing key is a no-op.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn clear(&self, key: &str);

    /// Removes all four session entries.
    fn clear_session(&self) {
        for key in SESSION_KEYS {
            self.clear(key);
        }
    }
}

/// Process-local store. The default when no persistent store is injected.
#[derive(Default)]
pub struct MemoryCredentialStore {
    entries: DashMap<String, String>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn clear(&self, key: &str) {
        self.entries.remove(key);
    }
}

/// When a 401 response should wipe the credential store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CredentialPolicy {
    /// Clear only when the server message mentions "expired" or "token"
    /// (case-insensitive). Depends on backend wording; a 401 phrased any
    /// other way leaves a dead token in place.
    #[default]
    ExpiredTokenMessage,
    /// Clear on every 401. Prefer this when the backend's messages are not
    /// under your control.
    AnyUnauthorized,
}

impl CredentialPolicy {
    pub fn should_clear(&self, message: &str) -> bool {
        match self {
            CredentialPolicy::AnyUnauthorized => true,
            CredentialPolicy::ExpiredTokenMessage => {
                let lower = message.to_lowercase();
                lower.contains("expired") || lower.contains("token")
            }
        }
    }
}
