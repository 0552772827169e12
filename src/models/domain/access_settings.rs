use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ACCESS_SETTINGS_ID: &str = "access";

/// The singleton document holding the global allow-all flag.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessSettings {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub allow_all: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl AccessSettings {
    pub fn new(allow_all: bool, updated_by: &str) -> Self {
        AccessSettings {
            id: ACCESS_SETTINGS_ID.to_string(),
            allow_all,
            updated_at: Some(Utc::now()),
            updated_by: Some(updated_by.to_string()),
        }
    }
}

impl Default for AccessSettings {
    fn default() -> Self {
        AccessSettings {
            id: ACCESS_SETTINGS_ID.to_string(),
            allow_all: false,
            updated_at: None,
            updated_by: None,
        }
    }
}
