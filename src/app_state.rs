use std::sync::Arc;

use crate::{
    auth::{policy::AdminIdentity, GitHubIdentityProvider, IdentityProvider, SessionService},
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        AccessSettingsRepository, AllowListRepository, MongoAccessSettingsRepository,
        MongoAllowListRepository,
    },
    services::{
        access_service::AccessService,
        model_service::{OpenAiQuizGenerator, QuizGenerator},
        quiz_service::QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<SessionService>,
    pub access_service: Arc<AccessService>,
    pub quiz_service: Arc<QuizService>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let allow_list: Arc<dyn AllowListRepository> =
            Arc::new(MongoAllowListRepository::new(&db));
        let settings: Arc<dyn AccessSettingsRepository> =
            Arc::new(MongoAccessSettingsRepository::new(&db));

        let generator: Arc<dyn QuizGenerator> = Arc::new(OpenAiQuizGenerator::new(&config));
        let identity_provider: Arc<dyn IdentityProvider> =
            Arc::new(GitHubIdentityProvider::new(&config));

        let mut state =
            Self::from_parts(config, allow_list, settings, generator, identity_provider);
        state.db = Some(db);
        Ok(state)
    }

    /// Wires the services over the given collaborators without touching the network.
    pub fn from_parts(
        config: Config,
        allow_list: Arc<dyn AllowListRepository>,
        settings: Arc<dyn AccessSettingsRepository>,
        generator: Arc<dyn QuizGenerator>,
        identity_provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        let access_service = Arc::new(AccessService::new(
            AdminIdentity::new(&config.admin_email),
            allow_list,
            settings,
        ));

        Self {
            sessions: Arc::new(SessionService::from_config(&config)),
            access_service,
            quiz_service: Arc::new(QuizService::new(generator)),
            identity_provider,
            config: Arc::new(config),
            db: None,
        }
    }
}
