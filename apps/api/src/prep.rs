//! Interview-prep question sets. Question content is an opaque JSON array
//! owned by the client; the server only insists it is an array.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::prep::PrepSetRow;
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePrepSetRequest {
    pub user_id: Uuid,
    pub title: String,
    pub questions: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePrepSetRequest {
    pub user_id: Uuid,
    pub title: Option<String>,
    pub questions: Option<Value>,
}

fn require_array(questions: &Value) -> Result<(), AppError> {
    if !questions.is_array() {
        return Err(AppError::Validation(
            "questions must be a JSON array".to_string(),
        ));
    }
    Ok(())
}

/// GET /api/v1/prep-sets
pub async fn handle_list_prep_sets(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<PrepSetRow>>, AppError> {
    let rows = sqlx::query_as::<_, PrepSetRow>(
        "SELECT * FROM prep_sets WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows))
}

/// POST /api/v1/prep-sets
pub async fn handle_create_prep_set(
    State(state): State<AppState>,
    Json(request): Json<CreatePrepSetRequest>,
) -> Result<Json<PrepSetRow>, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    let questions = request.questions.unwrap_or_else(|| Value::Array(vec![]));
    require_array(&questions)?;

    let row = sqlx::query_as::<_, PrepSetRow>(
        r#"
        INSERT INTO prep_sets (id, user_id, title, questions)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.user_id)
    .bind(&request.title)
    .bind(&questions)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// GET /api/v1/prep-sets/:id
pub async fn handle_get_prep_set(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<PrepSetRow>, AppError> {
    let row = sqlx::query_as::<_, PrepSetRow>(
        "SELECT * FROM prep_sets WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(params.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Prep set {id} not found")))?;

    Ok(Json(row))
}

/// PATCH /api/v1/prep-sets/:id
pub async fn handle_update_prep_set(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePrepSetRequest>,
) -> Result<Json<PrepSetRow>, AppError> {
    if matches!(&request.title, Some(t) if t.trim().is_empty()) {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if let Some(questions) = &request.questions {
        require_array(questions)?;
    }

    let row = sqlx::query_as::<_, PrepSetRow>(
        r#"
        UPDATE prep_sets SET
            title = COALESCE($1, title),
            questions = COALESCE($2, questions),
            updated_at = $3
        WHERE id = $4 AND user_id = $5
        RETURNING *
        "#,
    )
    .bind(request.title.as_deref())
    .bind(&request.questions)
    .bind(Utc::now())
    .bind(id)
    .bind(request.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Prep set {id} not found")))?;

    Ok(Json(row))
}

/// DELETE /api/v1/prep-sets/:id
pub async fn handle_delete_prep_set(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM prep_sets WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Prep set {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
