use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One identity on the allow-list. Stored keyed by the identity itself.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct AllowListEntry {
    #[serde(rename = "_id")]
    pub identity: String,
    pub added_at: DateTime<Utc>,
    pub added_by: String,
}

impl AllowListEntry {
    pub fn new(identity: &str, added_by: &str) -> Self {
        AllowListEntry {
            identity: identity.to_string(),
            added_at: Utc::now(),
            added_by: added_by.to_string(),
        }
    }
}
