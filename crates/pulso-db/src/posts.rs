//! Database operations for the `posts` table.

use chrono::{DateTime, Utc};
use pulso_core::{NormalizedPost, Platform};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `posts` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    pub id: i64,
    pub profile_id: i64,
    pub platform: String,
    pub external_post_id: String,
    pub url: Option<String>,
    pub text: Option<String>,
    pub likes: i64,
    pub comments_count: i64,
    pub shares: i64,
    pub views: i64,
    pub interactions_total: i64,
    pub posted_at: Option<DateTime<Utc>>,
    pub scraped_at: DateTime<Utc>,
}

/// Upserts a post row.
///
/// Conflicts on `(platform, external_post_id)` update the owning profile,
/// url, text, all metrics, `posted_at`, and refresh `scraped_at` in place.
/// `interactions_total` is recomputed from the post's components on every
/// write, never taken from storage.
///
/// Returns the internal `id` of the upserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_post(
    pool: &PgPool,
    profile_id: i64,
    platform: Platform,
    post: &NormalizedPost,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO posts \
             (profile_id, platform, external_post_id, url, text, likes, comments_count, \
              shares, views, interactions_total, posted_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         ON CONFLICT (platform, external_post_id) DO UPDATE SET \
             profile_id         = EXCLUDED.profile_id, \
             url                = EXCLUDED.url, \
             text               = EXCLUDED.text, \
             likes              = EXCLUDED.likes, \
             comments_count     = EXCLUDED.comments_count, \
             shares             = EXCLUDED.shares, \
             views              = EXCLUDED.views, \
             interactions_total = EXCLUDED.interactions_total, \
             posted_at          = EXCLUDED.posted_at, \
             scraped_at         = NOW() \
         RETURNING id",
    )
    .bind(profile_id)
    .bind(platform.as_str())
    .bind(&post.external_id)
    .bind(&post.url)
    .bind(&post.text)
    .bind(post.likes)
    .bind(post.comments_count)
    .bind(post.shares)
    .bind(post.views)
    .bind(post.interactions_total())
    .bind(post.posted_at)
    .fetch_one(pool)
    .await?;

    Ok(id)
}
