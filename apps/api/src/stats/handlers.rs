use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;

use crate::errors::AppError;
use crate::routes::UserIdQuery;
use crate::state::AppState;
use crate::stats::aggregate::{aggregate, StatsSummary};

/// GET /api/v1/stats
///
/// Recomputes the dashboard summary from the user's full record set on every
/// call. The clock is read exactly once here and injected, so the
/// aggregation itself stays pure and testable.
pub async fn handle_get_stats(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<StatsSummary>, AppError> {
    let records = state.records.fetch_all(params.user_id).await?;
    let today = Utc::now().date_naive();
    Ok(Json(aggregate(&records, today)))
}
