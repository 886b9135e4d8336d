use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::tutorial::TutorialRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TutorialQuery {
    pub category: Option<String>,
}

/// GET /api/v1/tutorials
///
/// Read-only curated catalog, seeded at startup; `category` narrows the list.
pub async fn handle_list_tutorials(
    State(state): State<AppState>,
    Query(params): Query<TutorialQuery>,
) -> Result<Json<Vec<TutorialRow>>, AppError> {
    let rows = match params.category.as_deref() {
        Some(category) => {
            sqlx::query_as::<_, TutorialRow>(
                "SELECT * FROM tutorials WHERE category = $1 ORDER BY position ASC",
            )
            .bind(category)
            .fetch_all(&state.db)
            .await?
        }
        None => {
            sqlx::query_as::<_, TutorialRow>("SELECT * FROM tutorials ORDER BY position ASC")
                .fetch_all(&state.db)
                .await?
        }
    };

    Ok(Json(rows))
}
