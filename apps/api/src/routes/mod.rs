pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::state::AppState;
use crate::{applications, companies, notes, prep, stats, tutorials, users};

/// Caller-scoped endpoints take the acting user as an explicit query
/// parameter. Session handling lives outside this service, so the `user_id`
/// presented here is trusted as-is.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Users
        .route("/api/v1/users", post(users::handle_create_user))
        .route("/api/v1/users/:id", get(users::handle_get_user))
        // Applications
        .route(
            "/api/v1/applications",
            get(applications::handlers::handle_list_applications)
                .post(applications::handlers::handle_create_application),
        )
        .route(
            "/api/v1/applications/reminders",
            get(applications::handlers::handle_list_reminders),
        )
        .route(
            "/api/v1/applications/:id",
            get(applications::handlers::handle_get_application)
                .patch(applications::handlers::handle_update_application)
                .delete(applications::handlers::handle_delete_application),
        )
        .route(
            "/api/v1/applications/:id/attachments",
            get(applications::attachments::handle_list_attachments)
                .post(applications::attachments::handle_upload_attachment),
        )
        // Dashboard statistics
        .route("/api/v1/stats", get(stats::handlers::handle_get_stats))
        // Notes
        .route(
            "/api/v1/notes",
            get(notes::handle_list_notes).post(notes::handle_create_note),
        )
        .route(
            "/api/v1/notes/:id",
            patch(notes::handle_update_note).delete(notes::handle_delete_note),
        )
        // Interview-prep question sets
        .route(
            "/api/v1/prep-sets",
            get(prep::handle_list_prep_sets).post(prep::handle_create_prep_set),
        )
        .route(
            "/api/v1/prep-sets/:id",
            get(prep::handle_get_prep_set)
                .patch(prep::handle_update_prep_set)
                .delete(prep::handle_delete_prep_set),
        )
        // Company directory
        .route(
            "/api/v1/companies",
            get(companies::handle_list_companies).post(companies::handle_create_company),
        )
        .route(
            "/api/v1/companies/:id",
            get(companies::handle_get_company).delete(companies::handle_delete_company),
        )
        // Tutorials
        .route("/api/v1/tutorials", get(tutorials::handle_list_tutorials))
        .with_state(state)
}
