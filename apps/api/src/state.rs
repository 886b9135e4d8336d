use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::stats::source::RecordSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub config: Config,
    /// Record source behind the application list and stats endpoints.
    /// Default: Postgres. A trait object so alternate stores can swap in
    /// without touching the handlers.
    pub records: Arc<dyn RecordSource>,
}
