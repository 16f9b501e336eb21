use axum::Json;
use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::audit::ListFilters;
use crate::error::AppError;
use crate::state::SharedState;

const DEFAULT_LIMIT: i64 = 50;

#[derive(Deserialize)]
pub struct AuditLogQuery {
    pub action: Option<String>,
    pub entity_type: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<AuditLogQuery>,
) -> Result<Json<Value>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if limit <= 0 {
        return Err(AppError::BadRequest("limit must be positive".to_string()));
    }

    let filters = ListFilters {
        action: query.action.filter(|s| !s.is_empty()),
        entity_type: query.entity_type.filter(|s| !s.is_empty()),
        start_date: query.start_date,
        end_date: query.end_date,
        limit: limit.min(state.config.audit_page_max),
    };

    let entries = db::audit::list(&state.pool, auth.user_id, &filters).await?;
    Ok(super::ok(entries))
}
