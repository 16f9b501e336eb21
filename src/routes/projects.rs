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
use crate::models::Project;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub settings: Option<Value>,
}

#[derive(Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub settings: Option<Value>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Value>, AppError> {
    let projects = db::projects::list_for_user(&state.pool, auth.user_id).await?;
    Ok(super::ok(projects))
}

pub async fn create(
    auth: AuthUser,
    client: ClientInfo,
    State(state): State<SharedState>,
    Json(req): Json<CreateProject>,
) -> Result<Json<Value>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Project name is required".to_string()));
    }

    let project = db::projects::create(
        &state.pool,
        auth.user_id,
        req.name.trim(),
        req.description.as_deref(),
        req.settings.as_ref(),
    )
    .await?;

    audit::record(
        &state.pool,
        auth.user_id,
        &client,
        "created",
        "project",
        Some(project.id),
        Some(serde_json::json!({ "name": project.name })),
    )
    .await;

    Ok(super::ok(project))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let project = find_visible(&state, &auth, id).await?;
    Ok(super::ok(project))
}

pub async fn update(
    auth: AuthUser,
    client: ClientInfo,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProject>,
) -> Result<Json<Value>, AppError> {
    if req.name.as_deref().is_some_and(|s| s.trim().is_empty()) {
        return Err(AppError::BadRequest("Project name cannot be blank".to_string()));
    }

    let project = db::projects::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    // Only the owner mutates a project
    if project.owner_id != auth.user_id {
        return Err(AppError::Forbidden(
            "Only the project owner can update it".to_string(),
        ));
    }

    let project = db::projects::update(
        &state.pool,
        id,
        req.name.as_deref().map(str::trim),
        req.description.as_deref(),
        req.settings.as_ref(),
    )
    .await?;

    audit::record(
        &state.pool,
        auth.user_id,
        &client,
        "updated",
        "project",
        Some(project.id),
        None,
    )
    .await;

    Ok(super::ok(project))
}

pub async fn members(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    find_visible(&state, &auth, id).await?;

    let members = db::profiles::list_by_project(&state.pool, id).await?;
    Ok(super::ok(members))
}

/// Resolve a project the caller may see: owned, or joined as a member.
/// Anything else reads as not found.
async fn find_visible(
    state: &SharedState,
    auth: &AuthUser,
    id: Uuid,
) -> Result<Project, AppError> {
    let project = db::projects::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    if project.owner_id == auth.user_id {
        return Ok(project);
    }

    let profile = db::profiles::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    if profile.project_id == Some(project.id) {
        Ok(project)
    } else {
        Err(AppError::NotFound("Project not found".to_string()))
    }
}
