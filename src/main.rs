mod adapters;
mod application;
mod domain;
mod services;

use std::sync::Arc;

use adapters::{
    repositories::PgFileRecordRepository,
    router::{cors_layer, create_router},
    state::AppState,
};
use application::repositories::file_record_repository::FileRecordRepository;
use domain::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Initialize AWS SDK crypto provider (required for aws-sdk-s3)
    // This must be called before any AWS SDK operations
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    tracing::info!(
        "Starting file-catalog with {} storage",
        config.storage.provider.as_str()
    );

    tracing::info!("Connecting to database...");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(
            config.database.acquire_timeout_secs,
        ))
        .connect(&config.database.url)
        .await
        .expect("ERROR: Failed to connect to PostgreSQL database. Check DATABASE_URL and network connectivity.");
    tracing::info!("Database connection established");

    let file_record_repo = PgFileRecordRepository::new(pool);
    file_record_repo
        .initialize_schema()
        .await
        .expect("Failed to initialize database schema");

    let storage_service = services::create_storage_service(&config.storage)
        .await
        .expect("Failed to create storage service");

    let app_state = AppState {
        file_record_repository: Arc::new(file_record_repo) as Arc<dyn FileRecordRepository>,
        storage_service,
    };

    let router = create_router(
        app_state,
        config.server.max_upload_bytes,
        cors_layer(&config.server.cors_allowed_origins),
    );

    let address = config.server.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on {}", address);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
