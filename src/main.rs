use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use quizify_server::{
    app_state::AppState, auth::SessionGate, config::Config, graphql::create_schema, handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if config.is_production() {
        config.validate_for_production();
    }

    let bind_address = (config.web_server_host.clone(), config.web_server_port);
    let cors_origin = config.cors_allowed_origin.clone();

    let app_state = AppState::new(config).await.map_err(|e| {
        log::error!("Failed to initialize application state: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    let schema = create_schema(app_state.clone());

    log::info!(
        "Starting HTTP server on {}:{}",
        bind_address.0,
        bind_address.1
    );
    log::info!(
        "GraphiQL playground: http://{}:{}/graphiql",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::Data::new(schema.clone()))
            .wrap(SessionGate::from_config(&app_state.config))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(|cfg| handlers::configure(cfg, &app_state.config))
    })
    .bind(bind_address)?
    .run()
    .await
}
