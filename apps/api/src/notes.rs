use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::note::NoteRow;
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub user_id: Uuid,
    pub application_id: Option<Uuid>,
    pub title: Option<String>,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub user_id: Uuid,
    pub title: Option<String>,
    pub body: Option<String>,
}

/// GET /api/v1/notes
pub async fn handle_list_notes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<NoteRow>>, AppError> {
    let rows = sqlx::query_as::<_, NoteRow>(
        "SELECT * FROM notes WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows))
}

/// POST /api/v1/notes
pub async fn handle_create_note(
    State(state): State<AppState>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<Json<NoteRow>, AppError> {
    if request.body.trim().is_empty() {
        return Err(AppError::Validation("body cannot be empty".to_string()));
    }

    let row = sqlx::query_as::<_, NoteRow>(
        r#"
        INSERT INTO notes (id, user_id, application_id, title, body)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.user_id)
    .bind(request.application_id)
    .bind(request.title.as_deref())
    .bind(&request.body)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// PATCH /api/v1/notes/:id
pub async fn handle_update_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateNoteRequest>,
) -> Result<Json<NoteRow>, AppError> {
    if matches!(&request.body, Some(b) if b.trim().is_empty()) {
        return Err(AppError::Validation("body cannot be empty".to_string()));
    }

    let row = sqlx::query_as::<_, NoteRow>(
        r#"
        UPDATE notes SET
            title = COALESCE($1, title),
            body = COALESCE($2, body),
            updated_at = $3
        WHERE id = $4 AND user_id = $5
        RETURNING *
        "#,
    )
    .bind(request.title.as_deref())
    .bind(request.body.as_deref())
    .bind(Utc::now())
    .bind(id)
    .bind(request.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Note {id} not found")))?;

    Ok(Json(row))
}

/// DELETE /api/v1/notes/:id
pub async fn handle_delete_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Note {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
