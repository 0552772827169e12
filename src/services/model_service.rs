use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use schemars::{schema_for, JsonSchema};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    config::Config,
    constants::quiz_prompt::QUIZ_SYSTEM_PROMPT,
    errors::{AppError, AppResult},
    models::domain::quiz::{MultipleChoiceOutput, TrueFalseOutput},
};

pub static MULTIPLE_CHOICE_SCHEMA: Lazy<Value> = Lazy::new(output_schema::<MultipleChoiceOutput>);
pub static TRUE_FALSE_SCHEMA: Lazy<Value> = Lazy::new(output_schema::<TrueFalseOutput>);

fn output_schema<T: JsonSchema>() -> Value {
    let mut schema = serde_json::to_value(schema_for!(T)).unwrap_or_else(|_| json!({}));
    if let Some(object) = schema.as_object_mut() {
        object.remove("$schema");
    }
    schema
}

/// An instruction plus the JSON schema the answer must follow.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredPrompt {
    pub name: String,
    pub instruction: String,
    pub schema: Value,
}

/// Text in, structured JSON out. Implementations do not repair output.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate(&self, prompt: StructuredPrompt) -> AppResult<Value>;
}

pub struct OpenAiQuizGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

impl OpenAiQuizGenerator {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.openai_api_key.expose_secret())
            .with_api_base(config.openai_api_base.as_str());

        Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
        }
    }

    fn request_body(&self, prompt: &StructuredPrompt) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": QUIZ_SYSTEM_PROMPT },
                { "role": "user", "content": prompt.instruction },
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": prompt.name,
                    "strict": true,
                    "schema": prompt.schema,
                },
            },
        })
    }
}

fn extract_content(completion: ChatCompletion) -> AppResult<Value> {
    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AppError::GenerationFailed("Model returned no choices".to_string()))?;

    if let Some(refusal) = choice.message.refusal {
        return Err(AppError::GenerationFailed(format!("Model refused: {}", refusal)));
    }
    if choice.finish_reason.as_deref() == Some("length") {
        return Err(AppError::GenerationFailed(
            "Model output was truncated".to_string(),
        ));
    }

    let content = choice
        .message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::GenerationFailed("Model returned no content".to_string()))?;

    serde_json::from_str(&content)
        .map_err(|e| AppError::GenerationFailed(format!("Model output is not JSON: {}", e)))
}

#[async_trait]
impl QuizGenerator for OpenAiQuizGenerator {
    async fn generate(&self, prompt: StructuredPrompt) -> AppResult<Value> {
        log::debug!("Requesting '{}' from model {}", prompt.name, self.model);

        let completion: ChatCompletion = self
            .client
            .chat()
            .create_byot(self.request_body(&prompt))
            .await?;

        extract_content(completion)
    }
}
