mod applications;
mod companies;
mod config;
mod db;
mod errors;
mod models;
mod notes;
mod prep;
mod routes;
mod state;
mod stats;
mod tutorials;
mod users;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, init_schema, seed_tutorials};
use crate::routes::build_router;
use crate::state::AppState;
use crate::stats::source::PgRecordSource;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_name = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", crate_name, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobTrail API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and ensure the schema and seed content exist
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;
    seed_tutorials(&db).await?;

    // Initialize S3 / MinIO for application attachments
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // The stats and list endpoints read records through this seam
    let records = Arc::new(PgRecordSource::new(db.clone()));

    // Build app state
    let state = AppState {
        db,
        s3,
        config: config.clone(),
        records,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "jobtrail-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
