mod adapters;
mod application;
mod domain;
mod services;

use std::sync::Arc;

use adapters::{
    repositories::{InMemoryFileRepository, PgFileRepository},
    routes::create_router,
    state::AppState,
};
use application::{
    repositories::file_repository::FileRepository,
    services::{BlobStore, FileService},
};
use axum::http::{HeaderValue, Method};
use domain::config::app::AppConfig;
use services::LocalBlobStore;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().expect("ERROR: Invalid configuration");

    tracing::info!("Starting filebox-service on port {}", config.port);

    // Configure CORS
    let cors = match &config.cors_allowed_origins {
        Some(allowed_origins) => {
            let origins: Vec<HeaderValue> = allowed_origins
                .iter()
                .map(|s| s.parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_headers(Any)
        }
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers(Any),
    };

    // The upload directory must exist before we accept any request.
    let blob_store = Arc::new(LocalBlobStore::new(config.upload_dir.clone()));
    blob_store
        .init()
        .await
        .expect("ERROR: Could not create upload directory");
    tracing::info!("Storing uploads in {}", blob_store.root().display());

    let file_repository: Arc<dyn FileRepository> = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(std::time::Duration::from_secs(30))
                .connect(database_url)
                .await
                .expect("ERROR: Failed to connect to PostgreSQL database. Check DATABASE_URL and network connectivity.");

            sqlx::migrate!()
                .run(&pool)
                .await
                .expect("ERROR: Failed to run database migrations");
            tracing::info!("Database connection established");

            Arc::new(PgFileRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, file metadata will be kept in memory only");
            Arc::new(InMemoryFileRepository::new())
        }
    };

    let app_state = AppState {
        file_service: Arc::new(FileService::new(file_repository, blob_store)),
        upload_dir: config.upload_dir.clone(),
    };

    let router = create_router(app_state, cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", config.port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
