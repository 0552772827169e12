//! Access decision logic.
//!
//! The decision is a pure function of the caller's identity, the configured
//! admin identity and a snapshot of stored state. Reading that state is the
//! job of [`crate::services::access_service::AccessService`].

use crate::models::dto::response::AccessReason;

/// Canonical form of an identity: trimmed and ASCII-lowercased.
pub fn normalize_identity(identity: &str) -> String {
    identity.trim().to_ascii_lowercase()
}

pub const MIN_IDENTITY_LEN: usize = 3;
pub const MAX_IDENTITY_LEN: usize = 254;

/// An identity is accepted for the allow-list only if it looks like an email
/// of a plausible length.
pub fn looks_like_email(identity: &str) -> bool {
    (MIN_IDENTITY_LEN..=MAX_IDENTITY_LEN).contains(&identity.len()) && identity.contains('@')
}

/// The single distinguished admin, configured outside the document store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminIdentity(String);

impl AdminIdentity {
    pub fn new(identity: &str) -> Self {
        AdminIdentity(normalize_identity(identity))
    }

    /// An empty admin identity never matches anyone.
    pub fn matches(&self, identity: &str) -> bool {
        !self.0.is_empty() && self.0 == normalize_identity(identity)
    }
}

/// Stored state relevant to one identity, read in a single pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessSnapshot {
    pub allow_all: bool,
    pub allow_listed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessDecision {
    pub reason: AccessReason,
}

impl AccessDecision {
    pub const DENIED: AccessDecision = AccessDecision {
        reason: AccessReason::Denied,
    };

    pub fn is_granted(&self) -> bool {
        self.reason != AccessReason::Denied
    }

    pub fn reason_label(&self) -> &'static str {
        match self.reason {
            AccessReason::Admin => "admin",
            AccessReason::AllowAll => "allow_all",
            AccessReason::AllowListed => "allow_listed",
            AccessReason::Denied => "denied",
        }
    }
}

pub fn decide(identity: &str, admin: &AdminIdentity, snapshot: AccessSnapshot) -> AccessDecision {
    if normalize_identity(identity).is_empty() {
        return AccessDecision::DENIED;
    }
    let reason = if admin.matches(identity) {
        AccessReason::Admin
    } else if snapshot.allow_all {
        AccessReason::AllowAll
    } else if snapshot.allow_listed {
        AccessReason::AllowListed
    } else {
        AccessReason::Denied
    };
    AccessDecision { reason }
}
