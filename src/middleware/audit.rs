use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::client_info::ClientInfo;

/// Append an audit entry. Called explicitly in handlers after mutations.
/// Best effort: a failed write is logged and never fails the caller.
#[allow(clippy::too_many_arguments)]
pub async fn record(
    pool: &PgPool,
    user_id: Uuid,
    client: &ClientInfo,
    action: &str,
    entity_type: &str,
    entity_id: Option<Uuid>,
    details: Option<serde_json::Value>,
) {
    if let Err(e) = crate::db::audit::append(
        pool,
        Some(user_id),
        action,
        entity_type,
        entity_id,
        details,
        client.ip_address.as_deref(),
        client.user_agent.as_deref(),
    )
    .await
    {
        tracing::error!("Failed to write audit entry: {e}");
    }
}
