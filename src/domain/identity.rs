use serde::{Deserialize, Serialize};

/// Guest players are keyed on client IP + user agent. No expiry and no
/// merge-on-login: a guest moving devices starts fresh.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuestFingerprint {
    pub ip: String,
    pub user_agent: String,
}

/// Exactly one of the two is ever in play for a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Identity {
    User(i64),
    Guest(GuestFingerprint),
}

/// Per-account settings the identity resolver hands the core alongside an
/// authenticated id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountFlags {
    pub include_very_hard: bool,
}
