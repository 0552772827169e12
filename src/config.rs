use secrecy::SecretString;
use std::env;

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";
const DEFAULT_PUBLIC_PREFIXES: &str = "/login,/auth,/health,/api/public";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub authorized_users_collection: String,
    pub settings_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub admin_email: String,
    pub jwt_secret: SecretString,
    pub session_ttl_seconds: i64,
    pub session_cookie_secure: bool,
    pub login_path: String,
    pub public_path_prefixes: Vec<String>,
    pub gh_client_id: String,
    pub gh_client_secret: SecretString,
    pub gh_redirect_uri: String,
    pub openai_api_key: SecretString,
    pub openai_api_base: String,
    pub openai_model: String,
    pub cors_allowed_origin: String,
    pub app_env: String,
}

impl Config {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "quizify-local".to_string()),
            authorized_users_collection: env::var("AUTHORIZED_USERS_COLLECTION")
                .unwrap_or_else(|_| "authorizedUsers".to_string()),
            settings_collection: env::var("SETTINGS_COLLECTION")
                .unwrap_or_else(|_| "settings".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            admin_email: env::var("ADMIN_EMAIL").unwrap_or_default(),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
            session_ttl_seconds: env::var("SESSION_TTL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|s: &i64| *s > 0)
                .unwrap_or(3600),
            session_cookie_secure: parse_cookie_secure(
                env::var("SESSION_COOKIE_SECURE").ok().as_deref(),
                production,
            ),
            login_path: env::var("LOGIN_PATH").unwrap_or_else(|_| "/login".to_string()),
            public_path_prefixes: parse_prefixes(
                &env::var("PUBLIC_PATH_PREFIXES")
                    .unwrap_or_else(|_| DEFAULT_PUBLIC_PREFIXES.to_string()),
            ),
            gh_client_id: env::var("GH_CLIENT_ID").unwrap_or_else(|_| "gh_client_id".to_string()),
            gh_client_secret: SecretString::from(
                env::var("GH_CLIENT_SECRET").unwrap_or_else(|_| "gh_client_secret".to_string()),
            ),
            gh_redirect_uri: env::var("GH_REDIRECT_URI")
                .unwrap_or_else(|_| "http://localhost:8080/auth/github/callback".to_string()),
            openai_api_key: SecretString::from(env::var("OPENAI_API_KEY").unwrap_or_default()),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            app_env,
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            panic!(
                "FATAL: JWT_SECRET is using default value! \
                 Set JWT_SECRET environment variable to a secure random string."
            );
        }

        if jwt_secret.len() < 32 {
            panic!(
                "FATAL: JWT_SECRET is too short ({}). Must be at least 32 characters for security.",
                jwt_secret.len()
            );
        }

        if self.admin_email.trim().is_empty() {
            panic!(
                "FATAL: ADMIN_EMAIL is not set! \
                 The allow-list cannot be managed without an admin."
            );
        }

        if self.gh_client_secret.expose_secret() == "gh_client_secret" {
            panic!(
                "FATAL: GH_CLIENT_SECRET is using default value! \
                 Set GH_CLIENT_SECRET environment variable."
            );
        }

        if self.gh_client_id == "gh_client_id" {
            panic!(
                "FATAL: GH_CLIENT_ID is using default value! Set GH_CLIENT_ID environment variable."
            );
        }

        if self.openai_api_key.expose_secret().is_empty() {
            panic!("FATAL: OPENAI_API_KEY is not set!");
        }

        if !self.session_cookie_secure {
            log::warn!("SESSION_COOKIE_SECURE=false overrides the production default");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quizify-test".to_string(),
            authorized_users_collection: "authorizedUsers".to_string(),
            settings_collection: "settings".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            admin_email: "admin@x.com".to_string(),
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            session_ttl_seconds: 3600,
            session_cookie_secure: false,
            login_path: "/login".to_string(),
            public_path_prefixes: parse_prefixes(DEFAULT_PUBLIC_PREFIXES),
            gh_client_id: "id string".to_string(),
            gh_client_secret: SecretString::from("secret string".to_string()),
            gh_redirect_uri: "http://127.0.0.1:8080/auth/github/callback".to_string(),
            openai_api_key: SecretString::from("sk-test".to_string()),
            openai_api_base: "http://127.0.0.1:9/v1".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            cors_allowed_origin: "http://localhost:5173".to_string(),
            app_env: "test".to_string(),
        }
    }
}

/// Unset means Secure in production and plain elsewhere.
fn parse_cookie_secure(raw: Option<&str>, production: bool) -> bool {
    match raw.map(str::trim) {
        Some(v) => v.eq_ignore_ascii_case("true") || v == "1",
        None => production,
    }
}

fn parse_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| p.starts_with('/'))
        .map(str::to_string)
        .collect()
}
