//! Database operations for the `comments` table.

use pulso_core::{NormalizedComment, Sentiment};
use sqlx::PgPool;

use crate::DbError;

/// Upserts a comment row with its sentiment classification.
///
/// Conflicts on `(post_id, external_comment_id)` update text, author, likes,
/// the sentiment columns, and `posted_at`, and refresh `scraped_at`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_comment(
    pool: &PgPool,
    post_id: i64,
    comment: &NormalizedComment,
    sentiment: &Sentiment,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO comments \
             (post_id, external_comment_id, text, author, likes, sentiment_label, \
              sentiment_score, sentiment_method, posted_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         ON CONFLICT (post_id, external_comment_id) DO UPDATE SET \
             text             = EXCLUDED.text, \
             author           = EXCLUDED.author, \
             likes            = EXCLUDED.likes, \
             sentiment_label  = EXCLUDED.sentiment_label, \
             sentiment_score  = EXCLUDED.sentiment_score, \
             sentiment_method = EXCLUDED.sentiment_method, \
             posted_at        = EXCLUDED.posted_at, \
             scraped_at       = NOW()",
    )
    .bind(post_id)
    .bind(&comment.external_id)
    .bind(&comment.text)
    .bind(&comment.author)
    .bind(comment.likes)
    .bind(sentiment.label.as_str())
    .bind(sentiment.score)
    .bind(sentiment.method.as_str())
    .bind(comment.posted_at)
    .execute(pool)
    .await?;

    Ok(())
}
