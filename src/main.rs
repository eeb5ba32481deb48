use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use sahayak_server::{
    app_state::AppState, auth::JwtService, config::Config, handlers::configure_routes,
    middleware::RequestIdMiddleware,
};

fn cors(config: &Config) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .max_age(3600);

    match config.cors_allowed_origin.as_deref() {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let jwt = web::Data::new(JwtService::new(
        &config.auth_jwt_secret,
        &config.auth_jwt_audience,
    ));

    let state = AppState::new(config.clone())
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let state = web::Data::new(state);

    let bind = (config.web_server_host.clone(), config.web_server_port);
    log::info!("Starting HTTP server on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(jwt.clone())
            .app_data(web::JsonConfig::default().limit(256 * 1024))
            .wrap(cors(&config))
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .configure(configure_routes)
    })
    .bind(bind)?
    .run()
    .await
}
