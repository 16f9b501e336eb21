use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Profile;

pub async fn create(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    full_name: &str,
) -> Result<Profile, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        "INSERT INTO profiles (email, password_hash, full_name) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(email)
    .bind(password_hash)
    .bind(full_name)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE lower(email) = lower($1)")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    full_name: Option<&str>,
    email: Option<&str>,
) -> Result<Profile, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        "UPDATE profiles SET full_name = COALESCE($2, full_name),
                             email = COALESCE($3, email),
                             updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(full_name)
    .bind(email)
    .fetch_one(pool)
    .await
}

/// Attach (or detach) a profile to a project. Runs inside the invite-approval
/// transaction, so it takes any executor.
pub async fn set_project<'e, E>(
    executor: E,
    id: Uuid,
    project_id: Option<Uuid>,
) -> Result<(), sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query("UPDATE profiles SET project_id = $2, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(project_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn list_by_project(pool: &PgPool, project_id: Uuid) -> Result<Vec<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        "SELECT * FROM profiles WHERE project_id = $1 ORDER BY created_at ASC",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}
