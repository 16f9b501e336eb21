use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::middleware::client_info::ClientInfo;
use crate::models::{InviteStatus, ProjectInvite};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SendInvite {
    #[serde(alias = "toUserId")]
    pub to_user_id: Option<Uuid>,
    pub message: Option<String>,
}

pub async fn send(
    auth: AuthUser,
    client: ClientInfo,
    State(state): State<SharedState>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<SendInvite>,
) -> Result<Json<Value>, AppError> {
    let to_user_id = req
        .to_user_id
        .ok_or_else(|| AppError::BadRequest("toUserId is required".to_string()))?;

    let project = db::projects::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    // Invites come from the owner or a member of the project
    if project.owner_id != auth.user_id {
        let profile = db::profiles::find_by_id(&state.pool, auth.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Unknown caller".to_string()))?;
        if profile.project_id != Some(project.id) {
            return Err(AppError::Forbidden(
                "Only project members can send invites".to_string(),
            ));
        }
    }

    if to_user_id == auth.user_id {
        return Err(AppError::BadRequest("Cannot invite yourself".to_string()));
    }

    db::profiles::find_by_id(&state.pool, to_user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipient not found".to_string()))?;

    let invite = db::invites::create(
        &state.pool,
        project.id,
        auth.user_id,
        to_user_id,
        req.message.as_deref(),
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("An invite for this user is already pending".to_string())
        }
        _ => AppError::Database(e),
    })?;

    audit::record(
        &state.pool,
        auth.user_id,
        &client,
        "created",
        "invite",
        Some(invite.id),
        Some(serde_json::json!({
            "project_id": invite.project_id,
            "to_user_id": invite.to_user_id,
        })),
    )
    .await;

    Ok(super::ok(invite))
}

pub async fn received(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Value>, AppError> {
    let invites = db::invites::list_received(&state.pool, auth.user_id).await?;
    Ok(super::ok(invites))
}

pub async fn sent(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Value>, AppError> {
    let invites = db::invites::list_sent(&state.pool, auth.user_id).await?;
    Ok(super::ok(invites))
}

pub async fn approve(
    auth: AuthUser,
    client: ClientInfo,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let invite = load_for_response(&state, &auth, id).await?;

    // One transaction covers both the invite resolution and the membership
    // assignment. The conditional update arbitrates concurrent approvals:
    // the loser sees no row and maps to Conflict.
    let mut tx = state.pool.begin().await?;

    let resolved = db::invites::resolve(&mut *tx, invite.id, InviteStatus::Approved)
        .await?
        .ok_or_else(|| AppError::Conflict("Invite has already been resolved".to_string()))?;

    db::profiles::set_project(&mut *tx, resolved.to_user_id, Some(resolved.project_id)).await?;

    tx.commit().await?;

    audit::record(
        &state.pool,
        auth.user_id,
        &client,
        "approved",
        "invite",
        Some(resolved.id),
        Some(serde_json::json!({ "project_id": resolved.project_id })),
    )
    .await;

    Ok(super::ok_with_message(resolved, "Invite approved"))
}

pub async fn reject(
    auth: AuthUser,
    client: ClientInfo,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let invite = load_for_response(&state, &auth, id).await?;

    let resolved = db::invites::resolve(&state.pool, invite.id, InviteStatus::Rejected)
        .await?
        .ok_or_else(|| AppError::Conflict("Invite has already been resolved".to_string()))?;

    audit::record(
        &state.pool,
        auth.user_id,
        &client,
        "rejected",
        "invite",
        Some(resolved.id),
        Some(serde_json::json!({ "project_id": resolved.project_id })),
    )
    .await;

    Ok(super::ok_with_message(resolved, "Invite rejected"))
}

/// Only the invited profile may resolve an invite.
async fn load_for_response(
    state: &SharedState,
    auth: &AuthUser,
    id: Uuid,
) -> Result<ProjectInvite, AppError> {
    let invite = db::invites::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Invite not found".to_string()))?;

    if invite.to_user_id != auth.user_id {
        return Err(AppError::Forbidden(
            "Only the invited user can respond to this invite".to_string(),
        ));
    }

    Ok(invite)
}
