//! Database operations for the `profiles` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `profiles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRow {
    pub id: i64,
    pub platform: String,
    pub username_or_url: String,
    pub display_name: Option<String>,
    /// Watermark of the last completed (non-skipped) analysis run.
    pub last_analyzed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

const PROFILE_COLUMNS: &str =
    "id, platform, username_or_url, display_name, last_analyzed, created_at";

/// Returns all monitored profiles, ordered by platform then username.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_profiles(pool: &PgPool) -> Result<Vec<ProfileRow>, DbError> {
    let rows = sqlx::query_as::<_, ProfileRow>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY platform, username_or_url"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns a single profile by id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_profile(pool: &PgPool, profile_id: i64) -> Result<Option<ProfileRow>, DbError> {
    let row = sqlx::query_as::<_, ProfileRow>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
    ))
    .bind(profile_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Adds a profile, tolerating duplicates: if `(platform, username_or_url)`
/// already exists, returns the existing row's id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if either query fails, or [`DbError::NotFound`]
/// in the (unreachable in practice) case where the conflict row has vanished
/// between the two statements.
pub async fn add_profile(
    pool: &PgPool,
    platform: &str,
    username_or_url: &str,
    display_name: Option<&str>,
) -> Result<i64, DbError> {
    let inserted: Option<i64> = sqlx::query_scalar::<_, i64>(
        "INSERT INTO profiles (platform, username_or_url, display_name) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (platform, username_or_url) DO NOTHING \
         RETURNING id",
    )
    .bind(platform)
    .bind(username_or_url)
    .bind(display_name.unwrap_or(username_or_url))
    .fetch_optional(pool)
    .await?;

    if let Some(id) = inserted {
        return Ok(id);
    }

    let existing: Option<i64> = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM profiles WHERE platform = $1 AND username_or_url = $2",
    )
    .bind(platform)
    .bind(username_or_url)
    .fetch_optional(pool)
    .await?;

    existing.ok_or(DbError::NotFound)
}

/// Deletes a profile; its posts and comments cascade.
///
/// Returns `true` if a row was deleted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn delete_profile(pool: &PgPool, profile_id: i64) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(profile_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Advances the profile's `last_analyzed` watermark.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn touch_last_analyzed(
    pool: &PgPool,
    profile_id: i64,
    at: DateTime<Utc>,
) -> Result<(), DbError> {
    sqlx::query("UPDATE profiles SET last_analyzed = $1 WHERE id = $2")
        .bind(at)
        .bind(profile_id)
        .execute(pool)
        .await?;
    Ok(())
}
