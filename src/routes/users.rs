use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::middleware::client_info::ClientInfo;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct UpdateProfile {
    #[serde(alias = "fullName")]
    pub full_name: Option<String>,
    pub email: Option<String>,
}

pub async fn get_profile(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Value>, AppError> {
    let profile = db::profiles::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    Ok(super::ok(profile))
}

pub async fn update_profile(
    auth: AuthUser,
    client: ClientInfo,
    State(state): State<SharedState>,
    Json(req): Json<UpdateProfile>,
) -> Result<Json<Value>, AppError> {
    if req.full_name.is_none() && req.email.is_none() {
        return Err(AppError::BadRequest("Nothing to update".to_string()));
    }
    if req.full_name.as_deref().is_some_and(|s| s.trim().is_empty()) {
        return Err(AppError::BadRequest("Full name cannot be blank".to_string()));
    }
    if req.email.as_deref().is_some_and(|s| s.trim().is_empty()) {
        return Err(AppError::BadRequest("Email cannot be blank".to_string()));
    }

    // Ensure the profile still exists before attempting the update
    db::profiles::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    let email = req.email.as_deref().map(|s| s.trim().to_lowercase());

    let profile = db::profiles::update(
        &state.pool,
        auth.user_id,
        req.full_name.as_deref().map(str::trim),
        email.as_deref(),
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("A profile with this email already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    audit::record(
        &state.pool,
        auth.user_id,
        &client,
        "updated",
        "profile",
        Some(profile.id),
        None,
    )
    .await;

    Ok(super::ok(profile))
}
