use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Curated tutorial content, seeded at startup. Read-only over the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TutorialRow {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub category: String,
    pub summary: String,
    pub position: i32,
}
