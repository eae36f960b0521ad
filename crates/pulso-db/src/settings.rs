//! Key-value settings store backing [`pulso_core::AnalysisSettings`].
//!
//! Scalar values are stored as plain strings, list values as JSON arrays.
//! Malformed stored values fall back to the defaults with a warning rather
//! than failing a run.

use chrono::NaiveDate;
use pulso_core::AnalysisSettings;
use sqlx::PgPool;

use crate::DbError;

/// Returns the raw value for a settings key, or `None` if unset.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_setting(pool: &PgPool, key: &str) -> Result<Option<String>, DbError> {
    let value: Option<String> =
        sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = $1")
            .bind(key)
            .fetch_optional(pool)
            .await?;
    Ok(value)
}

/// Sets a settings key, overwriting any existing value.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn set_setting(pool: &PgPool, key: &str, value: &str) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO settings (key, value) VALUES ($1, $2) \
         ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;
    Ok(())
}

/// Returns all settings as `(key, value)` pairs, ordered by key.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn all_settings(pool: &PgPool) -> Result<Vec<(String, String)>, DbError> {
    let rows = sqlx::query_as::<_, (String, String)>(
        "SELECT key, value FROM settings ORDER BY key",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Writes default values for any settings key that is not yet present.
///
/// Existing values are never overwritten; safe to call on every startup.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert fails.
pub async fn seed_default_settings(pool: &PgPool) -> Result<(), DbError> {
    let defaults = AnalysisSettings::default();
    let keyword_list = |words: &[String]| serde_json::to_string(words).unwrap_or_default();

    let entries: Vec<(&str, String)> = vec![
        ("auto_skip_recent", defaults.auto_skip_recent.to_string()),
        ("last_days", defaults.last_days.to_string()),
        ("date_from", String::new()),
        ("date_to", String::new()),
        (
            "default_limit_posts",
            defaults.default_limit_posts.to_string(),
        ),
        (
            "default_limit_comments",
            defaults.default_limit_comments.to_string(),
        ),
        (
            "comment_scrape_threshold",
            defaults.comment_scrape_threshold.to_string(),
        ),
        ("actor_instagram_posts", defaults.actor_instagram_posts),
        ("actor_instagram_comments", defaults.actor_instagram_comments),
        ("actor_tiktok_posts", defaults.actor_tiktok_posts),
        ("actor_tiktok_comments", defaults.actor_tiktok_comments),
        ("actor_facebook_posts", defaults.actor_facebook_posts),
        ("actor_facebook_comments", defaults.actor_facebook_comments),
        ("sentiment_model", defaults.sentiment_model),
        ("keywords_positive", keyword_list(&defaults.keywords_positive)),
        ("keywords_negative", keyword_list(&defaults.keywords_negative)),
    ];

    for (key, value) in entries {
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO NOTHING",
        )
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
    }

    Ok(())
}

/// Loads the full [`AnalysisSettings`] from the settings table, applying
/// defaults for missing keys and warning on malformed values.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the settings query fails.
pub async fn load_analysis_settings(pool: &PgPool) -> Result<AnalysisSettings, DbError> {
    let stored = all_settings(pool).await?;
    let mut settings = AnalysisSettings::default();

    for (key, value) in stored {
        apply_setting(&mut settings, &key, &value);
    }

    Ok(settings)
}

fn apply_setting(settings: &mut AnalysisSettings, key: &str, value: &str) {
    match key {
        "auto_skip_recent" => {
            if let Some(v) = parse_bool(key, value) {
                settings.auto_skip_recent = v;
            }
        }
        "last_days" => {
            if let Some(v) = parse_u32(key, value) {
                settings.last_days = v;
            }
        }
        "date_from" => settings.date_from = parse_date(key, value),
        "date_to" => settings.date_to = parse_date(key, value),
        "default_limit_posts" => {
            if let Some(v) = parse_u32(key, value) {
                settings.default_limit_posts = v;
            }
        }
        "default_limit_comments" => {
            if let Some(v) = parse_u32(key, value) {
                settings.default_limit_comments = v;
            }
        }
        "comment_scrape_threshold" => {
            if let Some(v) = parse_u32(key, value) {
                settings.comment_scrape_threshold = v as usize;
            }
        }
        "actor_instagram_posts" => settings.actor_instagram_posts = value.to_string(),
        "actor_instagram_comments" => settings.actor_instagram_comments = value.to_string(),
        "actor_tiktok_posts" => settings.actor_tiktok_posts = value.to_string(),
        "actor_tiktok_comments" => settings.actor_tiktok_comments = value.to_string(),
        "actor_facebook_posts" => settings.actor_facebook_posts = value.to_string(),
        "actor_facebook_comments" => settings.actor_facebook_comments = value.to_string(),
        "sentiment_model" => settings.sentiment_model = value.to_string(),
        "keywords_positive" => {
            if let Some(v) = parse_keywords(key, value) {
                settings.keywords_positive = v;
            }
        }
        "keywords_negative" => {
            if let Some(v) = parse_keywords(key, value) {
                settings.keywords_negative = v;
            }
        }
        other => {
            tracing::debug!(key = other, "ignoring unknown settings key");
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => {
            tracing::warn!(key, value, "malformed boolean setting, using default");
            None
        }
    }
}

fn parse_u32(key: &str, value: &str) -> Option<u32> {
    match value.parse::<u32>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value, "malformed numeric setting, using default");
            None
        }
    }
}

fn parse_date(key: &str, value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            tracing::warn!(key, value, "malformed date setting (expected YYYY-MM-DD)");
            None
        }
    }
}

fn parse_keywords(key: &str, value: &str) -> Option<Vec<String>> {
    match serde_json::from_str::<Vec<String>>(value) {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, "malformed keyword list setting, using default");
            None
        }
    }
}
