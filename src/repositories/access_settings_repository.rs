use async_trait::async_trait;
use mongodb::{bson::doc, options::ReplaceOptions, Collection};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{access_settings::ACCESS_SETTINGS_ID, AccessSettings},
};

#[async_trait]
pub trait AccessSettingsRepository: Send + Sync {
    /// `None` when the settings document has never been written.
    async fn get(&self) -> AppResult<Option<AccessSettings>>;
    async fn save(&self, settings: AccessSettings) -> AppResult<AccessSettings>;
}

pub struct MongoAccessSettingsRepository {
    collection: Collection<AccessSettings>,
}

impl MongoAccessSettingsRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.settings(),
        }
    }
}

#[async_trait]
impl AccessSettingsRepository for MongoAccessSettingsRepository {
    async fn get(&self) -> AppResult<Option<AccessSettings>> {
        let settings = self
            .collection
            .find_one(doc! { "_id": ACCESS_SETTINGS_ID })
            .await?;
        Ok(settings)
    }

    async fn save(&self, settings: AccessSettings) -> AppResult<AccessSettings> {
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(doc! { "_id": ACCESS_SETTINGS_ID }, &settings)
            .with_options(options)
            .await?;

        Ok(settings)
    }
}
