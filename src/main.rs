use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use sop_training_server::{
    app_state::AppState,
    auth::{AuthMiddleware, JwtService},
    config::Config,
    handlers,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

    let state = Arc::new(
        AppState::new(config)
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?,
    );

    log::info!("starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&state)))
            .app_data(web::Data::new(jwt_service.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(handlers::health_check)
            .service(handlers::login)
            .service(
                // Handler macros carry full /api/... paths; the empty scope
                // exists to hang the auth middleware on them.
                web::scope("")
                    .wrap(AuthMiddleware)
                    .service(handlers::create_user)
                    .service(handlers::get_all_users)
                    .service(handlers::update_user)
                    .service(handlers::delete_user)
                    .service(handlers::upload_sop)
                    .service(handlers::list_sops)
                    .service(handlers::get_sop)
                    .service(handlers::delete_sop)
                    .service(handlers::start_quiz)
                    .service(handlers::get_active_quiz)
                    .service(handlers::submit_quiz)
                    .service(handlers::get_all_results)
                    .service(handlers::get_user_results),
            )
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
