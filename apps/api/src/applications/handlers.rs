//! Axum route handlers for application records.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::applications::reminders::due_follow_ups;
use crate::errors::AppError;
use crate::models::application::{ApplicationRow, KNOWN_STATUSES};
use crate::routes::UserIdQuery;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Everything beyond title and company is optional, and status/source/date
/// values are stored exactly as supplied, with no trimming or case folding.
/// The dashboard's tolerance rules depend on that.
#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub user_id: Uuid,
    pub job_title: String,
    pub company: String,
    pub job_status: Option<String>,
    pub job_source: Option<String>,
    pub application_date: Option<String>,
    pub job_link: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub follow_up_date: Option<String>,
    #[serde(default)]
    pub follow_up_completed: bool,
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateApplicationRequest {
    pub user_id: Uuid,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub job_status: Option<String>,
    pub job_source: Option<String>,
    pub application_date: Option<String>,
    pub job_link: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub follow_up_date: Option<String>,
    pub follow_up_completed: Option<bool>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/applications
///
/// Returns every application belonging to the user, newest first.
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    let records = state.records.fetch_all(params.user_id).await?;
    Ok(Json(records))
}

/// POST /api/v1/applications
pub async fn handle_create_application(
    State(state): State<AppState>,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    if request.job_title.trim().is_empty() {
        return Err(AppError::Validation("job_title cannot be empty".to_string()));
    }
    if request.company.trim().is_empty() {
        return Err(AppError::Validation("company cannot be empty".to_string()));
    }
    // Nonstandard statuses are stored as-is; they just never reach a
    // dashboard bucket. Worth a trace when it happens.
    if let Some(status) = request.job_status.as_deref() {
        if !KNOWN_STATUSES.contains(&status) {
            debug!("Storing nonstandard job_status {status:?}");
        }
    }

    let row = sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications
            (id, user_id, job_title, company, job_status, job_source, application_date,
             job_link, location, notes, follow_up_date, follow_up_completed)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.user_id)
    .bind(&request.job_title)
    .bind(&request.company)
    .bind(request.job_status.as_deref())
    .bind(request.job_source.as_deref())
    .bind(request.application_date.as_deref())
    .bind(request.job_link.as_deref())
    .bind(request.location.as_deref())
    .bind(request.notes.as_deref())
    .bind(request.follow_up_date.as_deref())
    .bind(request.follow_up_completed)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ApplicationRow>, AppError> {
    let row = sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(params.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    Ok(Json(row))
}

/// PATCH /api/v1/applications/:id
pub async fn handle_update_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateApplicationRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    if matches!(&request.job_title, Some(t) if t.trim().is_empty()) {
        return Err(AppError::Validation("job_title cannot be empty".to_string()));
    }
    if matches!(&request.company, Some(c) if c.trim().is_empty()) {
        return Err(AppError::Validation("company cannot be empty".to_string()));
    }

    let row = sqlx::query_as::<_, ApplicationRow>(
        r#"
        UPDATE applications SET
            job_title = COALESCE($1, job_title),
            company = COALESCE($2, company),
            job_status = COALESCE($3, job_status),
            job_source = COALESCE($4, job_source),
            application_date = COALESCE($5, application_date),
            job_link = COALESCE($6, job_link),
            location = COALESCE($7, location),
            notes = COALESCE($8, notes),
            follow_up_date = COALESCE($9, follow_up_date),
            follow_up_completed = COALESCE($10, follow_up_completed),
            updated_at = $11
        WHERE id = $12 AND user_id = $13
        RETURNING *
        "#,
    )
    .bind(request.job_title.as_deref())
    .bind(request.company.as_deref())
    .bind(request.job_status.as_deref())
    .bind(request.job_source.as_deref())
    .bind(request.application_date.as_deref())
    .bind(request.job_link.as_deref())
    .bind(request.location.as_deref())
    .bind(request.notes.as_deref())
    .bind(request.follow_up_date.as_deref())
    .bind(request.follow_up_completed)
    .bind(Utc::now())
    .bind(id)
    .bind(request.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    Ok(Json(row))
}

/// DELETE /api/v1/applications/:id
pub async fn handle_delete_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM applications WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Application {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/applications/reminders
///
/// Returns the records whose follow-up is due, soonest first, for the
/// reminder banner. The clock is read once here, same as the stats endpoint.
pub async fn handle_list_reminders(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    let records = state.records.fetch_all(params.user_id).await?;
    let today = Utc::now().date_naive();
    Ok(Json(due_follow_ups(&records, today)))
}
