use actix_web::{web, App, HttpServer};
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recommendation_service::config::Config;
use recommendation_service::db::{PgArticleStore, PgUserStore};
use recommendation_service::engine::SubprocessEngine;
use recommendation_service::handlers::{
    get_recommendations, record_interaction, RecommendationHandlerState,
};
use recommendation_service::jobs::start_profile_refresher;
use recommendation_service::services::RecommendationService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    tracing::info!(
        "Starting recommendation-service v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Environment: {}", config.app.env);

    // Initialize database
    let db_pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to create database pool");

    let articles = Arc::new(PgArticleStore::new(db_pool.clone()));
    let users = Arc::new(PgUserStore::new(db_pool.clone()));

    // External relevance engine, invoked as a subprocess
    let engine = Arc::new(SubprocessEngine::new(config.engine.clone()));
    tracing::info!(
        command = %config.engine.command,
        script = %config.engine.script_path,
        timeout_secs = config.engine.timeout_secs,
        "Relevance engine configured"
    );

    let recommendation_svc = Arc::new(RecommendationService::new(
        engine.clone(),
        articles,
        users,
    ));

    // Fire-and-forget profile rebuild worker
    let refresh_queue =
        start_profile_refresher(engine, config.jobs.profile_refresh_queue_size);

    let handler_state = web::Data::new(RecommendationHandlerState {
        service: recommendation_svc,
        refresh_queue,
        jwt_secret: config.auth.jwt_secret.clone(),
    });

    // Start HTTP server
    let http_server = HttpServer::new(move || {
        App::new()
            .app_data(handler_state.clone())
            .route("/health", web::get().to(|| async { "OK" }))
            .route(
                "/metrics",
                web::get().to(recommendation_service::metrics::serve_metrics),
            )
            .service(get_recommendations)
            .service(record_interaction)
    })
    .bind(format!("0.0.0.0:{}", config.app.port))?
    .run()
    .await;

    http_server
}
