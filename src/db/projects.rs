use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Project;

pub async fn create(
    pool: &PgPool,
    owner_id: Uuid,
    name: &str,
    description: Option<&str>,
    settings: Option<&serde_json::Value>,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "INSERT INTO projects (owner_id, name, description, settings)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(owner_id)
    .bind(name)
    .bind(description)
    .bind(settings)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Projects visible to a user: owned, plus the one joined via profile.project_id.
pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT * FROM projects
         WHERE owner_id = $1
            OR id = (SELECT project_id FROM profiles WHERE id = $1)
         ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    name: Option<&str>,
    description: Option<&str>,
    settings: Option<&serde_json::Value>,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "UPDATE projects SET name = COALESCE($2, name),
                             description = COALESCE($3, description),
                             settings = COALESCE($4, settings),
                             updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(settings)
    .fetch_one(pool)
    .await
}
