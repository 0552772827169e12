use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{
    auth::policy::normalize_identity,
    config::Config,
    errors::{AppError, AppResult},
};

const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: String,
    pub login: String,
}

/// Federated sign-in. Confirms who the visitor is; never decides access.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn authorize_url(&self, state: &str) -> AppResult<String>;
    async fn verify(&self, code: &str, redirect_uri: Option<&str>) -> AppResult<VerifiedIdentity>;
}

pub struct GitHubIdentityProvider {
    client_id: String,
    client_secret: SecretString,
    redirect_uri: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

impl GitHubIdentityProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            client_id: config.gh_client_id.clone(),
            client_secret: config.gh_client_secret.clone(),
            redirect_uri: config.gh_redirect_uri.clone(),
            http: reqwest::Client::new(),
        }
    }

    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> AppResult<String> {
        let response = self
            .http
            .post(GITHUB_TOKEN_URL)
            .header("accept", "application/json")
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret()),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await
            .map_err(|e| {
                log::error!("Failed to reach GitHub token endpoint: {}", e);
                AppError::InternalError(format!("Failed to exchange OAuth code: {}", e))
            })?;

        let status = response.status();
        let token: TokenResponse = response.json().await.map_err(|e| {
            log::error!("Unreadable GitHub token response ({}): {}", status, e);
            AppError::InternalError(format!("Failed to parse token response: {}", e))
        })?;

        if let Some(error) = token.error {
            let description = token.error_description.unwrap_or_default();
            log::warn!("GitHub OAuth error: {} - {}", error, description);
            return Err(AppError::Unauthenticated(format!(
                "GitHub OAuth error: {} - {}",
                error, description
            )));
        }

        token.access_token.ok_or_else(|| {
            AppError::Unauthenticated("No access_token in GitHub response".to_string())
        })
    }
}

/// The primary verified address, falling back to any verified one.
fn pick_verified_email(emails: &[GitHubEmail]) -> Option<String> {
    emails
        .iter()
        .find(|e| e.primary && e.verified)
        .or_else(|| emails.iter().find(|e| e.verified))
        .map(|e| normalize_identity(&e.email))
        .filter(|e| !e.is_empty())
}

#[async_trait]
impl IdentityProvider for GitHubIdentityProvider {
    fn authorize_url(&self, state: &str) -> AppResult<String> {
        let url = Url::parse_with_params(
            GITHUB_AUTHORIZE_URL,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", "read:user user:email"),
                ("state", state),
            ],
        )
        .map_err(|e| AppError::InternalError(format!("Invalid authorize URL: {}", e)))?;
        Ok(url.to_string())
    }

    async fn verify(&self, code: &str, redirect_uri: Option<&str>) -> AppResult<VerifiedIdentity> {
        let redirect_uri = redirect_uri.unwrap_or(self.redirect_uri.as_str());
        let access_token = self.exchange_code(code, redirect_uri).await?;

        let gh_client = Octocrab::builder()
            .user_access_token(access_token)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build GitHub client: {}", e)))?;

        let gh_user = gh_client
            .current()
            .user()
            .await
            .map_err(|e| AppError::Unauthenticated(format!("Failed to fetch GitHub user: {}", e)))?;

        let emails: Vec<GitHubEmail> = gh_client
            .get("/user/emails", None::<&()>)
            .await
            .map_err(|e| {
                AppError::Unauthenticated(format!("Failed to fetch GitHub emails: {}", e))
            })?;

        let email = pick_verified_email(&emails).ok_or_else(|| {
            AppError::Unauthenticated(format!(
                "GitHub account '{}' has no verified email address",
                gh_user.login
            ))
        })?;

        log::info!("GitHub sign-in verified for '{}' ({})", email, gh_user.login);

        Ok(VerifiedIdentity {
            email,
            login: gh_user.login,
        })
    }
}
