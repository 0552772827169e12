use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    get,
    http::header::{ContentType, LOCATION},
    post, web, HttpRequest, HttpResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{app_state::AppState, errors::AppError, handlers::views};

const OAUTH_STATE_COOKIE: &str = "oauth_state";
const OAUTH_STATE_TTL_MINUTES: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: String,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    redirect_uri: Option<String>,
}

/// Served at the configured login path; registered in [`super::configure`].
pub async fn login(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let oauth_state = Uuid::new_v4().simple().to_string();
    let authorize_url = state.identity_provider.authorize_url(&oauth_state)?;

    let state_cookie = Cookie::build(OAUTH_STATE_COOKIE, oauth_state)
        .path("/auth")
        .http_only(true)
        .secure(state.config.session_cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::minutes(OAUTH_STATE_TTL_MINUTES))
        .finish();

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .cookie(state_cookie)
        .body(views::login_page(&authorize_url)))
}

#[get("/auth/github/callback")]
pub async fn auth_github_callback(
    state: web::Data<AppState>,
    req: HttpRequest,
    web::Query(params): web::Query<CallbackParams>,
) -> Result<HttpResponse, AppError> {
    let expected_state = req.cookie(OAUTH_STATE_COOKIE).map(|c| c.value().to_string());
    if expected_state.is_none() || expected_state != params.state {
        log::warn!("OAuth callback state mismatch");
        return Err(AppError::Unauthenticated(
            "Sign-in state did not match; start again from the login page".to_string(),
        ));
    }

    let identity = state
        .identity_provider
        .verify(&params.code, params.redirect_uri.as_deref())
        .await?;

    let token = state.sessions.issue(&identity.email)?;

    let mut clear_state = Cookie::build(OAUTH_STATE_COOKIE, "").path("/auth").finish();
    clear_state.make_removal();

    log::info!("Session started for '{}'", identity.email);

    Ok(HttpResponse::Found()
        .insert_header((LOCATION, "/"))
        .cookie(state.sessions.session_cookie(token))
        .cookie(clear_state)
        .finish())
}

/// Drops the client-held credential. Copies of the token stay valid until
/// they expire; there is no server-side revocation.
#[post("/auth/logout")]
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, state.config.login_path.as_str()))
        .cookie(state.sessions.removal_cookie())
        .finish()
}
