use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use chrono::{DateTime, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::{claims::SessionClaims, policy::normalize_identity},
    config::Config,
    errors::{AppError, AppResult},
};

pub const SESSION_COOKIE: &str = "session";

/// Issues and verifies signed, time-bounded session credentials.
/// Holds no per-session state: a credential is valid iff its signature
/// checks out and it has not expired.
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
    secure_cookie: bool,
}

impl SessionService {
    pub fn new(secret: &SecretString, ttl_seconds: i64, secure_cookie: bool) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation,
            ttl_seconds,
            secure_cookie,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_secret,
            config.session_ttl_seconds,
            config.session_cookie_secure,
        )
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    pub fn issue(&self, identity: &str) -> AppResult<String> {
        self.issue_at(identity, Utc::now())
    }

    pub fn issue_at(&self, identity: &str, issued_at: DateTime<Utc>) -> AppResult<String> {
        let identity = normalize_identity(identity);
        if identity.is_empty() {
            return Err(AppError::InvalidInput(
                "Cannot issue a session for an empty identity".to_string(),
            ));
        }

        let claims = SessionClaims::new(&identity, issued_at, self.ttl_seconds);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to sign session: {}", e)))
    }

    pub fn verify(&self, token: &str) -> AppResult<SessionClaims> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::Unauthenticated("Session has expired".to_string())
                }
                ErrorKind::InvalidSignature => {
                    AppError::Unauthenticated("Session signature is invalid".to_string())
                }
                _ => AppError::Unauthenticated(format!("Invalid session: {}", e)),
            },
        )?;

        if normalize_identity(&data.claims.sub).is_empty() {
            return Err(AppError::Unauthenticated(
                "Session has no subject".to_string(),
            ));
        }

        Ok(data.claims)
    }

    /// HTTP-only cookie carrying a freshly issued credential.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .secure(self.secure_cookie)
            .same_site(SameSite::Lax)
            .max_age(CookieDuration::seconds(self.ttl_seconds))
            .finish()
    }

    /// Cookie instructing the browser to drop the credential.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(true)
            .secure(self.secure_cookie)
            .same_site(SameSite::Lax)
            .finish();
        cookie.make_removal();
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn service() -> SessionService {
        SessionService::from_config(&Config::test_config())
    }

    #[test]
    fn test_issue_and_verify() {
        let sessions = service();
        let token = sessions.issue("A@B.com").unwrap();

        let claims = sessions.verify(&token).unwrap();
        assert_eq!(claims.sub, "a@b.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_session_is_rejected() {
        let sessions = service();
        let token = sessions
            .issue_at("a@b.com", Utc::now() - Duration::seconds(3601))
            .unwrap();

        match sessions.verify(&token) {
            Err(AppError::Unauthenticated(msg)) => assert!(msg.contains("expired")),
            other => panic!("Expected expired session error, got {:?}", other),
        }
    }

    #[test]
    fn test_tampered_session_is_rejected() {
        let sessions = service();
        let token = sessions.issue("a@b.com").unwrap();

        let other_secret = SecretString::from("another secret".to_string());
        let other = SessionService::new(&other_secret, 3600, false);
        let forged = other.issue("admin@x.com").unwrap();

        assert!(sessions.verify(&forged).is_err());
        assert!(sessions.verify(&format!("{}x", token)).is_err());
        assert!(sessions.verify("not.a.token").is_err());
    }

    #[test]
    fn test_empty_identity_cannot_be_issued() {
        assert!(matches!(
            service().issue("  "),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_cookies_are_http_only() {
        let sessions = service();
        let cookie = sessions.session_cookie("token".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(CookieDuration::seconds(3600)));

        let removal = sessions.removal_cookie();
        assert_eq!(removal.value(), "");
        assert_eq!(removal.max_age(), Some(CookieDuration::ZERO));
    }
}
