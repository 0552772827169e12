use crate::{
    auth::{claims::SessionClaims, session::SessionService},
    services::access_service::AccessService,
};

/// Where a visitor stands with respect to the protected routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    AuthenticatedUnauthorized(SessionClaims),
    AuthenticatedAuthorized(SessionClaims),
}

impl SessionState {
    pub fn claims(&self) -> Option<&SessionClaims> {
        match self {
            SessionState::Anonymous => None,
            SessionState::AuthenticatedUnauthorized(claims)
            | SessionState::AuthenticatedAuthorized(claims) => Some(claims),
        }
    }
}

/// Verifies the presented credential, then asks the access policy about the
/// identity it names. Missing, tampered and expired credentials all resolve
/// to `Anonymous`.
pub async fn resolve_session_state(
    sessions: &SessionService,
    access: &AccessService,
    token: Option<&str>,
) -> SessionState {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return SessionState::Anonymous;
    };

    let claims = match sessions.verify(token) {
        Ok(claims) => claims,
        Err(e) => {
            log::debug!("Rejected session credential: {}", e);
            return SessionState::Anonymous;
        }
    };

    let decision = access.check_access(claims.identity()).await;
    if decision.is_granted() {
        log::debug!(
            "Session for '{}' authorized ({})",
            claims.identity(),
            decision.reason_label()
        );
        SessionState::AuthenticatedAuthorized(claims)
    } else {
        log::info!("Session for '{}' is not authorized", claims.identity());
        SessionState::AuthenticatedUnauthorized(claims)
    }
}

/// Whether a path bypasses the session gate.
pub fn is_exempt_path(path: &str, exempt_prefixes: &[String]) -> bool {
    exempt_prefixes.iter().any(|prefix| {
        path == prefix
            || path
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| prefix.ends_with('/') || rest.starts_with('/'))
    })
}
