use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String, // Subject (verified email)
    pub iat: usize,  // Issued at (as UTC timestamp)
    pub exp: usize,  // Expiration time (as UTC timestamp)
}

impl SessionClaims {
    pub fn new(identity: &str, issued_at: DateTime<Utc>, ttl_seconds: i64) -> Self {
        let exp = issued_at + Duration::seconds(ttl_seconds);

        Self {
            sub: identity.to_string(),
            iat: issued_at.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }

    pub fn identity(&self) -> &str {
        &self.sub
    }
}
