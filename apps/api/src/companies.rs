use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::{is_unique_violation, AppError};
use crate::models::company::CompanyRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompanySearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub notes: Option<String>,
}

/// GET /api/v1/companies
///
/// The directory is shared across users; `q` filters by name,
/// case-insensitively.
pub async fn handle_list_companies(
    State(state): State<AppState>,
    Query(params): Query<CompanySearchQuery>,
) -> Result<Json<Vec<CompanyRow>>, AppError> {
    let rows = match params.q.as_deref().filter(|q| !q.trim().is_empty()) {
        Some(q) => {
            sqlx::query_as::<_, CompanyRow>(
                "SELECT * FROM companies WHERE name ILIKE '%' || $1 || '%' ORDER BY name ASC",
            )
            .bind(q.trim())
            .fetch_all(&state.db)
            .await?
        }
        None => {
            sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies ORDER BY name ASC")
                .fetch_all(&state.db)
                .await?
        }
    };

    Ok(Json(rows))
}

/// POST /api/v1/companies
pub async fn handle_create_company(
    State(state): State<AppState>,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<Json<CompanyRow>, AppError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }

    let result = sqlx::query_as::<_, CompanyRow>(
        r#"
        INSERT INTO companies (id, name, website, industry, notes)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(request.website.as_deref())
    .bind(request.industry.as_deref())
    .bind(request.notes.as_deref())
    .fetch_one(&state.db)
    .await;

    match result {
        Ok(row) => Ok(Json(row)),
        Err(e) if is_unique_violation(&e) => Err(AppError::Conflict(format!(
            "Company '{name}' already exists"
        ))),
        Err(e) => Err(e.into()),
    }
}

/// GET /api/v1/companies/:id
pub async fn handle_get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyRow>, AppError> {
    let row = sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {id} not found")))?;

    Ok(Json(row))
}

/// DELETE /api/v1/companies/:id
pub async fn handle_delete_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM companies WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Company {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
