mod common;

use actix_web::{
    cookie::Cookie,
    http::{header, StatusCode},
    test, web, App,
};
use chrono::{Duration, Utc};

use common::{harness, harness_with_config, test_config, Harness, ADMIN};
use quizify_server::{
    app_state::AppState,
    auth::{SessionGate, SESSION_COOKIE},
    graphql::create_schema,
    handlers,
};

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .app_data(web::Data::new(create_schema($state.clone())))
                .wrap(SessionGate::from_config(&$state.config))
                .configure(|cfg| handlers::configure(cfg, &$state.config)),
        )
        .await
    };
}

fn session_cookie(state: &AppState, identity: &str) -> Cookie<'static> {
    let token = state.sessions.issue(identity).unwrap();
    state.sessions.session_cookie(token)
}

fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
}

#[actix_web::test]
async fn anonymous_visitor_is_redirected_to_login() {
    let Harness { state, .. } = harness();
    let app = init_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp).as_deref(), Some("/login"));
}

#[actix_web::test]
async fn expired_session_is_redirected_to_login() {
    let Harness { state, .. } = harness();
    let issued = Utc::now() - Duration::seconds(3601);
    let token = state.sessions.issue_at(ADMIN, issued).unwrap();
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/me")
        .cookie(Cookie::new(SESSION_COOKIE, token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp).as_deref(), Some("/login"));
}

#[actix_web::test]
async fn tampered_session_is_redirected_to_login() {
    let Harness { state, .. } = harness();
    let admin_token = state.sessions.issue(ADMIN).unwrap();
    let other_token = state.sessions.issue("other@b.com").unwrap();
    let (signed_part, _) = admin_token.rsplit_once('.').unwrap();
    let (_, foreign_signature) = other_token.rsplit_once('.').unwrap();
    let token = format!("{}.{}", signed_part, foreign_signature);
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/me")
        .cookie(Cookie::new(SESSION_COOKIE, token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn exempt_paths_skip_the_gate() {
    let Harness { state, .. } = harness();
    let app = init_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn custom_login_path_is_served_and_exempt() {
    let mut config = test_config();
    config.login_path = "/signin".to_string();
    config.public_path_prefixes = vec!["/health".to_string()];
    let Harness { state, .. } = harness_with_config(config);
    let app = init_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp).as_deref(), Some("/signin"));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/signin").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/auth/github/callback?code=a%40b.com&state=forged")
        .cookie(Cookie::new("oauth_state", "expected"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn signed_in_stranger_sees_access_denied() {
    let Harness { state, .. } = harness();
    let cookie = session_cookie(&state, "stranger@b.com");
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("Access Denied"));
}

#[actix_web::test]
async fn access_follows_allow_list_changes_immediately() {
    let Harness { state, .. } = harness();
    let cookie = session_cookie(&state, "a@b.com");
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/me").cookie(cookie.clone()).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    state.access_service.add_user("a@b.com", ADMIN).await.unwrap();
    let req = test::TestRequest::get().uri("/api/me").cookie(cookie.clone()).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    state.access_service.remove_user("a@b.com", ADMIN).await.unwrap();
    let req = test::TestRequest::get().uri("/api/me").cookie(cookie).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn store_outage_denies_allow_listed_visitors() {
    let Harness { state, allow_list } = harness();
    state.access_service.add_user("a@b.com", ADMIN).await.unwrap();
    let cookie = session_cookie(&state, "a@b.com");
    let app = init_app!(state);

    allow_list.go_offline();
    let req = test::TestRequest::get().uri("/api/me").cookie(cookie).to_request();

    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn login_callback_starts_a_session() {
    let Harness { state, .. } = harness();
    let app = init_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
    let oauth_state = resp
        .response()
        .cookies()
        .find(|c| c.name() == "oauth_state")
        .map(|c| c.value().to_string())
        .unwrap();

    let req = test::TestRequest::get()
        .uri(&format!(
            "/auth/github/callback?code=Admin%40X.com&state={}",
            oauth_state
        ))
        .cookie(Cookie::new("oauth_state", oauth_state.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp).as_deref(), Some("/"));

    let session = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/me")
        .cookie(Cookie::new(SESSION_COOKIE, session))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["email"], ADMIN);
    assert_eq!(body["reason"], "admin");
}

#[actix_web::test]
async fn callback_with_mismatched_state_is_rejected() {
    let Harness { state, .. } = harness();
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/auth/github/callback?code=a%40b.com&state=forged")
        .cookie(Cookie::new("oauth_state", "expected"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.response().cookies().all(|c| c.name() != SESSION_COOKIE));
}

#[actix_web::test]
async fn logout_clears_the_session_cookie() {
    let Harness { state, .. } = harness();
    let app = init_app!(state);

    let req = test::TestRequest::post().uri("/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp).as_deref(), Some("/login"));
    let cleared = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .unwrap();
    assert_eq!(cleared.value(), "");
}
