use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Interview-prep question set. `questions` is a JSON array of
/// `{question, answer}` objects, stored as jsonb and passed through opaquely.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PrepSetRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub questions: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
