use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::LOCATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures::future::LocalBoxFuture;

use crate::{
    app_state::AppState,
    auth::{
        claims::SessionClaims,
        gate::{is_exempt_path, resolve_session_state, SessionState},
        session::SESSION_COOKIE,
    },
    config::Config,
    errors::AppError,
    handlers::views,
};

/// Guards every route except the exempt prefixes. Visitors without a valid
/// session are redirected to the login path; authenticated visitors the
/// access policy rejects get the fixed denial view.
pub struct SessionGate {
    exempt_prefixes: Rc<Vec<String>>,
    login_path: Rc<String>,
}

/// Sign-in callbacks live under this prefix and can never require a session.
pub const AUTH_PREFIX: &str = "/auth";

impl SessionGate {
    /// The login path and [`AUTH_PREFIX`] are exempt whatever else is listed.
    pub fn new(exempt_prefixes: Vec<String>, login_path: impl Into<String>) -> Self {
        let login_path = login_path.into();
        let mut exempt_prefixes = exempt_prefixes;
        for required in [login_path.as_str(), AUTH_PREFIX] {
            if !exempt_prefixes.iter().any(|p| p == required) {
                exempt_prefixes.push(required.to_string());
            }
        }

        Self {
            exempt_prefixes: Rc::new(exempt_prefixes),
            login_path: Rc::new(login_path),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.public_path_prefixes.clone(), config.login_path.clone())
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateService {
            service: Rc::new(service),
            exempt_prefixes: Rc::clone(&self.exempt_prefixes),
            login_path: Rc::clone(&self.login_path),
        }))
    }
}

pub struct SessionGateService<S> {
    service: Rc<S>,
    exempt_prefixes: Rc<Vec<String>>,
    login_path: Rc<String>,
}

impl<S, B> Service<ServiceRequest> for SessionGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let exempt = is_exempt_path(req.path(), &self.exempt_prefixes);
        let login_path = Rc::clone(&self.login_path);

        Box::pin(async move {
            if exempt {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            let state = match req.app_data::<web::Data<AppState>>().cloned() {
                Some(app_state) => {
                    let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());
                    resolve_session_state(
                        &app_state.sessions,
                        &app_state.access_service,
                        token.as_deref(),
                    )
                    .await
                }
                None => {
                    log::error!("Session gate has no application state; denying request");
                    SessionState::Anonymous
                }
            };

            match state {
                SessionState::Anonymous => {
                    let response = HttpResponse::Found()
                        .insert_header((LOCATION, login_path.as_str()))
                        .finish();
                    Ok(req.into_response(response).map_into_right_body())
                }
                SessionState::AuthenticatedUnauthorized(_) => {
                    Ok(req.into_response(views::access_denied()).map_into_right_body())
                }
                SessionState::AuthenticatedAuthorized(claims) => {
                    req.extensions_mut().insert(claims);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
            }
        })
    }
}

/// Extractor for the verified identity behind a gated request.
pub struct AuthenticatedUser(pub SessionClaims);

impl AuthenticatedUser {
    pub fn identity(&self) -> &str {
        self.0.identity()
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = req
            .extensions()
            .get::<SessionClaims>()
            .cloned()
            .ok_or_else(|| AppError::Unauthenticated("Not authenticated".to_string()));

        ready(claims.map(AuthenticatedUser))
    }
}
