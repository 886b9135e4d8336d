//! Record source: the seam between storage and the pure aggregation.
//!
//! `AppState` holds an `Arc<dyn RecordSource>`, so the aggregation and its
//! callers never name a concrete store. Default: `PgRecordSource`.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::ApplicationRow;

/// Yields the full set of application records belonging to one user, in no
/// particular order as far as aggregation is concerned; newest-first is what
/// the list views want, so that is what implementations return.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_all(&self, user_id: Uuid) -> Result<Vec<ApplicationRow>, AppError>;
}

/// Postgres-backed record source, wired into `AppState` at startup.
pub struct PgRecordSource {
    pool: PgPool,
}

impl PgRecordSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordSource for PgRecordSource {
    async fn fetch_all(&self, user_id: Uuid) -> Result<Vec<ApplicationRow>, AppError> {
        Ok(sqlx::query_as::<_, ApplicationRow>(
            "SELECT * FROM applications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
