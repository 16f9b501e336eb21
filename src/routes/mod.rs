pub mod audit_logs;
pub mod auth;
pub mod invites;
pub mod projects;
pub mod users;

use axum::Router;
use axum::routing::{get, post};
use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        // Profile
        .route(
            "/api/users/profile",
            get(users::get_profile).put(users::update_profile),
        )
        // Projects
        .route("/api/projects", get(projects::list).post(projects::create))
        .route(
            "/api/projects/{id}",
            get(projects::get).put(projects::update),
        )
        .route("/api/projects/{id}/members", get(projects::members))
        // Invites
        .route("/api/projects/{id}/invites", post(invites::send))
        .route("/api/invites/received", get(invites::received))
        .route("/api/invites/sent", get(invites::sent))
        .route("/api/invites/{id}/approve", post(invites::approve))
        .route("/api/invites/{id}/reject", post(invites::reject))
        // Audit
        .route("/api/audit-logs", get(audit_logs::list))
}

/// Success envelope: `{ success: true, data }`.
pub(crate) fn ok<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

/// Success envelope with a human-readable message.
pub(crate) fn ok_with_message<T: Serialize>(data: T, message: &str) -> Json<Value> {
    Json(json!({ "success": true, "data": data, "message": message }))
}
