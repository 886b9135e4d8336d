//! Attachment uploads (resumes, cover letters, offer PDFs), stored in the
//! object store and indexed in Postgres.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::attachment::AttachmentRow;
use crate::routes::UserIdQuery;
use crate::state::AppState;

/// POST /api/v1/applications/:id/attachments
///
/// Accepts a single multipart `file` field. The body goes to the object
/// store first; the index row is only inserted once the upload succeeded.
pub async fn handle_upload_attachment(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
    mut multipart: Multipart,
) -> Result<Json<AttachmentRow>, AppError> {
    ensure_owned_application(&state, application_id, params.user_id).await?;

    let mut upload: Option<(String, String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.bin").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some((file_name, content_type, data));
        break;
    }

    let (file_name, content_type, data) =
        upload.ok_or_else(|| AppError::Validation("Missing multipart field 'file'".to_string()))?;
    if data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    let attachment_id = Uuid::new_v4();
    let s3_key = format!(
        "attachments/{}/{}/{}/{}",
        params.user_id, application_id, attachment_id, file_name
    );
    let size_bytes = data.len() as i64;

    state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(&s3_key)
        .body(ByteStream::from(data))
        .content_type(&content_type)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

    info!(
        "Uploaded attachment to s3://{}/{}",
        state.config.s3_bucket, s3_key
    );

    let row = sqlx::query_as::<_, AttachmentRow>(
        r#"
        INSERT INTO attachments
            (id, application_id, user_id, file_name, s3_key, content_type, size_bytes)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(attachment_id)
    .bind(application_id)
    .bind(params.user_id)
    .bind(&file_name)
    .bind(&s3_key)
    .bind(&content_type)
    .bind(size_bytes)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// GET /api/v1/applications/:id/attachments
pub async fn handle_list_attachments(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<AttachmentRow>>, AppError> {
    ensure_owned_application(&state, application_id, params.user_id).await?;

    let rows = sqlx::query_as::<_, AttachmentRow>(
        r#"
        SELECT * FROM attachments
        WHERE application_id = $1 AND user_id = $2
        ORDER BY created_at DESC
        "#,
    )
    .bind(application_id)
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows))
}

async fn ensure_owned_application(
    state: &AppState,
    application_id: Uuid,
    user_id: Uuid,
) -> Result<(), AppError> {
    let exists: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM applications WHERE id = $1 AND user_id = $2")
            .bind(application_id)
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?;

    exists
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))
}
