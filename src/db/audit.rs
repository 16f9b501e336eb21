use chrono::{DateTime, Utc};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::models::AuditLogEntry;

#[allow(clippy::too_many_arguments)]
pub async fn append(
    pool: &PgPool,
    user_id: Option<Uuid>,
    action: &str,
    entity_type: &str,
    entity_id: Option<Uuid>,
    details: Option<serde_json::Value>,
    ip_address: Option<&str>,
    user_agent: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO audit_logs (user_id, action, entity_type, entity_id, details, ip_address, user_agent)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(user_id)
    .bind(action)
    .bind(entity_type)
    .bind(entity_id)
    .bind(details)
    .bind(ip_address)
    .bind(user_agent)
    .execute(pool)
    .await?;
    Ok(())
}

#[derive(Debug, Default)]
pub struct ListFilters {
    pub action: Option<String>,
    pub entity_type: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub limit: i64,
}

/// Filtered read of a user's own audit trail, newest first.
pub async fn list(
    pool: &PgPool,
    user_id: Uuid,
    filters: &ListFilters,
) -> Result<Vec<AuditLogEntry>, sqlx::Error> {
    let mut qb = QueryBuilder::new("SELECT * FROM audit_logs WHERE user_id = ");
    qb.push_bind(user_id);

    if let Some(action) = &filters.action {
        qb.push(" AND action = ").push_bind(action);
    }
    if let Some(entity_type) = &filters.entity_type {
        qb.push(" AND entity_type = ").push_bind(entity_type);
    }
    if let Some(start) = filters.start_date {
        qb.push(" AND created_at >= ").push_bind(start);
    }
    if let Some(end) = filters.end_date {
        qb.push(" AND created_at <= ").push_bind(end);
    }

    qb.push(" ORDER BY created_at DESC LIMIT ").push_bind(filters.limit);

    qb.build_query_as::<AuditLogEntry>().fetch_all(pool).await
}
