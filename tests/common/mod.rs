#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use quizify_server::{
    app_state::AppState,
    auth::{IdentityProvider, VerifiedIdentity},
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{AccessSettings, AllowListEntry},
    repositories::{AccessSettingsRepository, AllowListRepository},
    services::model_service::{QuizGenerator, StructuredPrompt},
};

pub const ADMIN: &str = "admin@x.com";

pub struct InMemoryAllowListRepository {
    entries: Arc<RwLock<HashMap<String, AllowListEntry>>>,
    offline: AtomicBool,
}

impl InMemoryAllowListRepository {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            offline: AtomicBool::new(false),
        }
    }

    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    fn check_online(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::StoreUnavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AllowListRepository for InMemoryAllowListRepository {
    async fn exists(&self, identity: &str) -> AppResult<bool> {
        self.check_online()?;
        let entries = self.entries.read().await;
        Ok(entries.contains_key(identity))
    }

    async fn find_all(&self) -> AppResult<Vec<AllowListEntry>> {
        self.check_online()?;
        let entries = self.entries.read().await;
        let mut items: Vec<_> = entries.values().cloned().collect();
        items.sort_by(|a, b| a.identity.cmp(&b.identity));
        Ok(items)
    }

    async fn upsert(&self, entry: AllowListEntry) -> AppResult<AllowListEntry> {
        self.check_online()?;
        let mut entries = self.entries.write().await;
        entries.insert(entry.identity.clone(), entry.clone());
        Ok(entry)
    }

    async fn delete(&self, identity: &str) -> AppResult<bool> {
        self.check_online()?;
        let mut entries = self.entries.write().await;
        Ok(entries.remove(identity).is_some())
    }
}

pub struct InMemoryAccessSettingsRepository {
    settings: Arc<RwLock<Option<AccessSettings>>>,
}

impl InMemoryAccessSettingsRepository {
    pub fn new() -> Self {
        Self {
            settings: Arc::new(RwLock::new(None)),
        }
    }
}

#[async_trait]
impl AccessSettingsRepository for InMemoryAccessSettingsRepository {
    async fn get(&self) -> AppResult<Option<AccessSettings>> {
        let settings = self.settings.read().await;
        Ok(settings.clone())
    }

    async fn save(&self, settings: AccessSettings) -> AppResult<AccessSettings> {
        let mut current = self.settings.write().await;
        *current = Some(settings.clone());
        Ok(settings)
    }
}

pub struct CannedGenerator(pub Value);

#[async_trait]
impl QuizGenerator for CannedGenerator {
    async fn generate(&self, _prompt: StructuredPrompt) -> AppResult<Value> {
        Ok(self.0.clone())
    }
}

/// Accepts any code and reports it back as the verified email.
pub struct EchoIdentityProvider;

#[async_trait]
impl IdentityProvider for EchoIdentityProvider {
    fn authorize_url(&self, state: &str) -> AppResult<String> {
        Ok(format!("https://idp.test/authorize?state={}", state))
    }

    async fn verify(&self, code: &str, _redirect_uri: Option<&str>) -> AppResult<VerifiedIdentity> {
        Ok(VerifiedIdentity {
            email: code.to_string(),
            login: "tester".to_string(),
        })
    }
}

pub struct Harness {
    pub state: AppState,
    pub allow_list: Arc<InMemoryAllowListRepository>,
}

pub fn test_config() -> Config {
    Config {
        admin_email: ADMIN.to_string(),
        jwt_secret: "integration_test_secret_value_0123456789".to_string().into(),
        session_ttl_seconds: 3600,
        session_cookie_secure: false,
        login_path: "/login".to_string(),
        public_path_prefixes: vec![
            "/login".to_string(),
            "/auth".to_string(),
            "/health".to_string(),
        ],
        ..Config::from_env()
    }
}

pub fn harness() -> Harness {
    harness_with_config(test_config())
}

pub fn harness_with_config(config: Config) -> Harness {
    let allow_list = Arc::new(InMemoryAllowListRepository::new());
    let state = AppState::from_parts(
        config,
        allow_list.clone(),
        Arc::new(InMemoryAccessSettingsRepository::new()),
        Arc::new(CannedGenerator(serde_json::json!({
            "questions": [{ "question": "Mars is red", "isTrue": true }]
        }))),
        Arc::new(EchoIdentityProvider),
    );
    Harness { state, allow_list }
}
