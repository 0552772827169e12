pub mod admin_handler;
pub mod auth_handler;
pub mod graphql_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod views;

use actix_web::web;

use crate::config::Config;

pub use auth_handler::{auth_github_callback, login, logout};

/// Registers every route. The session gate decides which of them need a session.
pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.route(&config.login_path, web::get().to(login))
        .service(auth_github_callback)
        .service(logout)
        .configure(health_handler::configure)
        .configure(admin_handler::configure)
        .configure(quiz_handler::configure)
        .configure(graphql_handler::configure);
}
