use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{
    config::Config,
    errors::AppResult,
    models::domain::{AccessSettings, AllowListEntry},
};

const APP_NAME: &str = "quizify-server";

/// The access store: one collection of allow-list entries keyed by identity,
/// and one holding the single settings document.
#[derive(Clone)]
pub struct Database {
    client: Client,
    authorized_users: Collection<AllowListEntry>,
    settings: Collection<AccessSettings>,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(Duration::from_secs(5));
        options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(options)?;
        let database = Self::from_client(client, config);
        database.health_check().await?;

        log::info!(
            "Access store ready: {}.{} and {}.{}",
            config.mongo_db_name,
            config.authorized_users_collection,
            config.mongo_db_name,
            config.settings_collection
        );

        Ok(database)
    }

    /// Binds the configured collections without contacting the server.
    pub fn from_client(client: Client, config: &Config) -> Self {
        let db = client.database(&config.mongo_db_name);
        Self {
            authorized_users: db.collection(&config.authorized_users_collection),
            settings: db.collection(&config.settings_collection),
            client,
        }
    }

    pub fn authorized_users(&self) -> Collection<AllowListEntry> {
        self.authorized_users.clone()
    }

    pub fn settings(&self) -> Collection<AccessSettings> {
        self.settings.clone()
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
