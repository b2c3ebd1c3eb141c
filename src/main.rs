use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod clients;
mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod models;
mod ports;
mod services;

#[cfg(test)]
mod test_support;

use config::Config;
use ports::{DiaryStore, FortuneStore, HealthProbe, PhotoStore, ProfileStore};
use services::fortune::FortuneService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub profiles: Arc<dyn ProfileStore>,
    pub fortunes: Arc<dyn FortuneStore>,
    pub diary: Arc<dyn DiaryStore>,
    pub health: Arc<dyn HealthProbe>,
    pub photos: Arc<dyn PhotoStore>,
    pub fortune_service: FortuneService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fortune_diary_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env()?);

    // Database
    let pool = db::create_pool(&config.database_url)
        .await
        .context("Failed to create database pool")?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");
    }

    let store = Arc::new(db::PgStore::new(pool));
    let generator = Arc::new(
        clients::OpenAiClient::new(&config).context("Failed to build OpenAI client")?,
    );
    let photos = Arc::new(
        clients::SupabaseStorage::new(&config).context("Failed to build storage client")?,
    );

    let state = AppState {
        config: config.clone(),
        profiles: store.clone(),
        fortunes: store.clone(),
        diary: store.clone(),
        health: store.clone(),
        photos,
        fortune_service: FortuneService::new(store.clone(), store, generator),
    };

    let app = app(state).layer(cors_layer(&config));

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn app(state: AppState) -> Router {
    let photo_limit = DefaultBodyLimit::max(state.config.max_photo_bytes);

    let api_routes = Router::new()
        // Fortune
        .route("/api/fortune/today", post(handlers::fortune::today_fortune))
        .route("/api/fortunes", get(handlers::fortune::list_fortunes))
        .route("/api/fortunes/:date", get(handlers::fortune::get_fortune))
        // Profile
        .route(
            "/api/profile",
            get(handlers::profile::get_profile).put(handlers::profile::save_profile),
        )
        // Diary
        .route("/api/diary", get(handlers::diary::list_diary_entries))
        .route(
            "/api/diary/:date",
            get(handlers::diary::get_diary_entry).put(handlers::diary::upsert_diary_entry),
        )
        // Photos
        .route(
            "/api/diary/:date/photo",
            post(handlers::photos::upload_photo).layer(photo_limit),
        )
        .route("/api/photos", delete(handlers::photos::delete_photo))
        // Calendar
        .route("/api/calendar", get(handlers::calendar::get_calendar))
        // Settings
        .route("/api/reset", post(handlers::reset::reset_all));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<axum::http::HeaderValue> = std::iter::once(&config.frontend_url)
        .chain(config.cors_extra_origins.iter())
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
}
