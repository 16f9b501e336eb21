use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{InviteStatus, ProjectInvite};

pub async fn create(
    pool: &PgPool,
    project_id: Uuid,
    from_user_id: Uuid,
    to_user_id: Uuid,
    message: Option<&str>,
) -> Result<ProjectInvite, sqlx::Error> {
    sqlx::query_as::<_, ProjectInvite>(
        "INSERT INTO project_invites (project_id, from_user_id, to_user_id, message)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(project_id)
    .bind(from_user_id)
    .bind(to_user_id)
    .bind(message)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ProjectInvite>, sqlx::Error> {
    sqlx::query_as::<_, ProjectInvite>("SELECT * FROM project_invites WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_received(pool: &PgPool, user_id: Uuid) -> Result<Vec<ProjectInvite>, sqlx::Error> {
    sqlx::query_as::<_, ProjectInvite>(
        "SELECT * FROM project_invites WHERE to_user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn list_sent(pool: &PgPool, user_id: Uuid) -> Result<Vec<ProjectInvite>, sqlx::Error> {
    sqlx::query_as::<_, ProjectInvite>(
        "SELECT * FROM project_invites WHERE from_user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Conditional resolution keyed on the current status being `pending`.
/// Returns `None` when the invite is already resolved (or was resolved by a
/// concurrent caller) — the row update is the race arbiter.
pub async fn resolve<'e, E>(
    executor: E,
    id: Uuid,
    status: InviteStatus,
) -> Result<Option<ProjectInvite>, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_as::<_, ProjectInvite>(
        "UPDATE project_invites SET status = $2, responded_at = now()
         WHERE id = $1 AND status = 'pending' RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_optional(executor)
    .await
}
