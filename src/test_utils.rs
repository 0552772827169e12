#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{
        quiz::{MultipleChoiceQuestion, TrueFalseQuestion},
        Quiz,
    };

    fn mcq(question: &str, options: [&str; 4], correct: &str) -> MultipleChoiceQuestion {
        MultipleChoiceQuestion {
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: correct.to_string(),
        }
    }

    fn tf(question: &str, is_true: bool) -> TrueFalseQuestion {
        TrueFalseQuestion {
            question: question.to_string(),
            is_true,
        }
    }

    /// Two multiple-choice questions: "Jupiter" then "Paris".
    pub fn sample_mcq_quiz() -> Quiz {
        Quiz::Mcq(vec![
            mcq(
                "Which planet is largest?",
                ["Mars", "Jupiter", "Venus", "Mercury"],
                "Jupiter",
            ),
            mcq(
                "What is the capital of France?",
                ["Lyon", "Paris", "Nice", "Lille"],
                "Paris",
            ),
        ])
    }

    /// Three statements: true, false, true.
    pub fn sample_tf_quiz() -> Quiz {
        Quiz::Tf(vec![
            tf("Water boils at 100C at sea level", true),
            tf("The sun orbits the earth", false),
            tf("Rust has no garbage collector", true),
        ])
    }
}

#[cfg(test)]
pub mod fakes {
    use std::{
        collections::BTreeMap,
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
    };

    use async_trait::async_trait;
    use serde_json::Value;
    use tokio::sync::RwLock;

    use crate::{
        app_state::AppState,
        auth::{IdentityProvider, VerifiedIdentity},
        config::Config,
        errors::{AppError, AppResult},
        models::domain::{AccessSettings, AllowListEntry},
        repositories::{AccessSettingsRepository, AllowListRepository},
        services::model_service::{QuizGenerator, StructuredPrompt},
    };

    /// Allow-list held in memory. After `go_offline` every call reports the
    /// store as unavailable.
    #[derive(Default)]
    pub struct InMemoryAllowListRepository {
        entries: RwLock<BTreeMap<String, AllowListEntry>>,
        offline: AtomicBool,
    }

    impl InMemoryAllowListRepository {
        pub fn go_offline(&self) {
            self.offline.store(true, Ordering::SeqCst);
        }

        fn check_online(&self) -> AppResult<()> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(AppError::StoreUnavailable("allow-list offline".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl AllowListRepository for InMemoryAllowListRepository {
        async fn exists(&self, identity: &str) -> AppResult<bool> {
            self.check_online()?;
            Ok(self.entries.read().await.contains_key(identity))
        }

        async fn find_all(&self) -> AppResult<Vec<AllowListEntry>> {
            self.check_online()?;
            Ok(self.entries.read().await.values().cloned().collect())
        }

        async fn upsert(&self, entry: AllowListEntry) -> AppResult<AllowListEntry> {
            self.check_online()?;
            self.entries
                .write()
                .await
                .insert(entry.identity.clone(), entry.clone());
            Ok(entry)
        }

        async fn delete(&self, identity: &str) -> AppResult<bool> {
            self.check_online()?;
            Ok(self.entries.write().await.remove(identity).is_some())
        }
    }

    #[derive(Default)]
    pub struct InMemoryAccessSettingsRepository {
        settings: RwLock<Option<AccessSettings>>,
        offline: AtomicBool,
    }

    impl InMemoryAccessSettingsRepository {
        pub fn go_offline(&self) {
            self.offline.store(true, Ordering::SeqCst);
        }

        fn check_online(&self) -> AppResult<()> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(AppError::StoreUnavailable("settings offline".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl AccessSettingsRepository for InMemoryAccessSettingsRepository {
        async fn get(&self) -> AppResult<Option<AccessSettings>> {
            self.check_online()?;
            Ok(self.settings.read().await.clone())
        }

        async fn save(&self, settings: AccessSettings) -> AppResult<AccessSettings> {
            self.check_online()?;
            *self.settings.write().await = Some(settings.clone());
            Ok(settings)
        }
    }

    /// Returns the same JSON for every prompt.
    pub struct CannedGenerator(pub Value);

    #[async_trait]
    impl QuizGenerator for CannedGenerator {
        async fn generate(&self, _prompt: StructuredPrompt) -> AppResult<Value> {
            Ok(self.0.clone())
        }
    }

    /// Treats the authorization code itself as the verified email.
    pub struct EchoIdentityProvider;

    #[async_trait]
    impl IdentityProvider for EchoIdentityProvider {
        fn authorize_url(&self, state: &str) -> AppResult<String> {
            Ok(format!("https://idp.test/authorize?client_id=test&state={}", state))
        }

        async fn verify(
            &self,
            code: &str,
            _redirect_uri: Option<&str>,
        ) -> AppResult<VerifiedIdentity> {
            if code == "bad" {
                return Err(AppError::Unauthenticated("Code rejected".to_string()));
            }
            Ok(VerifiedIdentity {
                email: code.to_string(),
                login: "tester".to_string(),
            })
        }
    }

    pub struct TestContext {
        pub state: AppState,
        pub allow_list: Arc<InMemoryAllowListRepository>,
        pub settings: Arc<InMemoryAccessSettingsRepository>,
    }

    pub fn test_context_with_generator(generator: Arc<dyn QuizGenerator>) -> TestContext {
        let allow_list = Arc::new(InMemoryAllowListRepository::default());
        let settings = Arc::new(InMemoryAccessSettingsRepository::default());
        let state = AppState::from_parts(
            Config::test_config(),
            allow_list.clone(),
            settings.clone(),
            generator,
            Arc::new(EchoIdentityProvider),
        );
        TestContext {
            state,
            allow_list,
            settings,
        }
    }

    /// Admin is `admin@x.com`; the allow-list starts empty and allowAll off.
    pub fn test_context() -> TestContext {
        test_context_with_generator(Arc::new(CannedGenerator(Value::Null)))
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_are_well_formed() {
        assert!(sample_mcq_quiz().check_shape().is_ok());
        assert!(sample_tf_quiz().check_shape().is_ok());
        assert_eq!(sample_tf_quiz().len(), 3);
    }
}
