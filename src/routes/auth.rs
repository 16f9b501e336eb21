use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::jwt::{Claims, encode_token};
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::middleware::client_info::ClientInfo;
use crate::models::Profile;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(alias = "fullName")]
    pub full_name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn auth_payload(profile: &Profile, access_token: String) -> Value {
    serde_json::json!({
        "access_token": access_token,
        "profile": profile,
    })
}

pub async fn register(
    State(state): State<SharedState>,
    client: ClientInfo,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<Value>, AppError> {
    if req.email.trim().is_empty() || req.password.is_empty() || req.full_name.trim().is_empty() {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }

    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    // Stored lowercase; the unique index is on lower(email)
    let email = req.email.trim().to_lowercase();

    let profile = db::profiles::create(&state.pool, &email, &pw_hash, req.full_name.trim())
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("A profile with this email already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

    let claims = Claims::new(profile.id, profile.role.clone());
    let access_token = encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    audit::record(
        &state.pool,
        profile.id,
        &client,
        "created",
        "profile",
        Some(profile.id),
        None,
    )
    .await;

    Ok(super::ok(auth_payload(&profile, access_token)))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    if let Err(retry_after) = state.login_limiter.check(&req.email) {
        return Err(AppError::RateLimited(format!(
            "Too many failed attempts, try again in {retry_after} seconds"
        )));
    }

    let profile = db::profiles::find_by_email(&state.pool, &req.email).await?;

    let Some(profile) = profile else {
        state.login_limiter.record_failure(&req.email);
        return Err(AppError::Unauthorized("Invalid email or password".to_string()));
    };

    let valid = password::verify(&req.password, &profile.password_hash)
        .map_err(AppError::Internal)?;
    if !valid {
        state.login_limiter.record_failure(&req.email);
        return Err(AppError::Unauthorized("Invalid email or password".to_string()));
    }

    let claims = Claims::new(profile.id, profile.role.clone());
    let access_token = encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    Ok(super::ok(auth_payload(&profile, access_token)))
}
