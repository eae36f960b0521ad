//! Per-profile analysis: skip decision, post scrape, comment resolution,
//! sentiment tagging, persistence, watermark.

use chrono::{DateTime, Duration, Utc};
use pulso_core::{ActorKind, AnalysisResult, AnalysisSettings, DateWindow, Platform};
use pulso_db::ProfileRow;
use pulso_scraper::{
    comments_input, extract_comment, extract_post, filter_by_window, posts_input, ApifyClient,
};
use pulso_sentiment::SentimentAnalyzer;
use serde_json::Value;
use sqlx::PgPool;

use crate::error::RunError;

/// Age below which a profile's watermark counts as "analyzed recently".
const RECENT_ANALYSIS_DAYS: i64 = 7;

/// Raw payload fields that may carry an embedded comment list.
const EMBEDDED_COMMENT_FIELDS: &[&str] =
    &["comments", "commentsData", "topComments", "commentsList"];

/// Raw payload fields that may advertise a secondary comment dataset URL.
const COMMENT_DATASET_FIELDS: &[&str] =
    &["commentsDatasetUrl", "commentsDatasetURL", "commentsUrl"];

/// The skip decision, separated out for unit testing.
///
/// A profile is skipped iff it is not forced, auto-skip is enabled, no date
/// window is configured, and the watermark is younger than
/// [`RECENT_ANALYSIS_DAYS`]. A configured date window always overrides
/// auto-skip: the operator's explicit date intent outranks the recency
/// heuristic.
#[must_use]
pub fn should_skip(
    force: bool,
    auto_skip: bool,
    has_date_window: bool,
    last_analyzed: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    if force || !auto_skip || has_date_window {
        return false;
    }
    last_analyzed.is_some_and(|ts| now - ts < Duration::days(RECENT_ANALYSIS_DAYS))
}

/// Runs the full analysis pipeline for single profiles.
///
/// Holds every collaborator it needs; constructed once per batch and shared
/// across the fan-out. `analyze_profile` never returns an error — any
/// failure escaping the inner run is converted into an error-shaped
/// [`AnalysisResult`] at this boundary.
pub struct ProfileAnalyzer {
    pool: PgPool,
    client: ApifyClient,
    analyzer: SentimentAnalyzer,
    settings: AnalysisSettings,
}

impl ProfileAnalyzer {
    #[must_use]
    pub fn new(
        pool: PgPool,
        client: ApifyClient,
        analyzer: SentimentAnalyzer,
        settings: AnalysisSettings,
    ) -> Self {
        Self {
            pool,
            client,
            analyzer,
            settings,
        }
    }

    pub async fn analyze_profile(&self, profile: &ProfileRow, force: bool) -> AnalysisResult {
        let now = Utc::now();
        let window = self.settings.date_window(now.date_naive());

        if should_skip(
            force,
            self.settings.auto_skip_recent,
            self.settings.has_date_window(),
            profile.last_analyzed,
            now,
        ) {
            tracing::info!(
                profile_id = profile.id,
                username = %profile.username_or_url,
                "profile analyzed recently, skipping"
            );
            return AnalysisResult::skipped("analyzed recently");
        }

        match self.run(profile, window.as_ref()).await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(
                    profile_id = profile.id,
                    username = %profile.username_or_url,
                    error = %err,
                    "profile analysis failed"
                );
                AnalysisResult::failed(err.to_string())
            }
        }
    }

    async fn run(
        &self,
        profile: &ProfileRow,
        window: Option<&DateWindow>,
    ) -> Result<AnalysisResult, RunError> {
        let platform: Platform = profile.platform.parse()?;
        let actor_id = self
            .settings
            .actor_id(platform, ActorKind::Posts)
            .ok_or(RunError::NoPostsActor(platform))?;

        let input = posts_input(platform, &profile.username_or_url, &self.settings, window);
        let run = self.client.run_actor(actor_id, &input).await?;
        let items = self.client.fetch_dataset(&run).await?;
        let items = filter_by_window(items, platform, window);

        tracing::info!(
            profile_id = profile.id,
            username = %profile.username_or_url,
            posts = items.len(),
            "scraped posts, processing"
        );

        let mut result = AnalysisResult::default();
        for item in &items {
            self.process_post(profile, platform, item, &mut result)
                .await?;
        }

        pulso_db::touch_last_analyzed(&self.pool, profile.id, Utc::now()).await?;
        Ok(result)
    }

    /// One post: extract, upsert, resolve and persist its comments.
    ///
    /// Extraction and comment failures are recorded in `result` and never
    /// abort the batch; only storage errors propagate.
    async fn process_post(
        &self,
        profile: &ProfileRow,
        platform: Platform,
        item: &Value,
        result: &mut AnalysisResult,
    ) -> Result<(), RunError> {
        let post = match extract_post(item, platform) {
            Ok(post) => post,
            Err(err) => {
                tracing::warn!(profile_id = profile.id, error = %err, "skipping raw post item");
                result.errors.push(format!("post extraction: {err}"));
                return Ok(());
            }
        };

        let post_db_id = pulso_db::upsert_post(&self.pool, profile.id, platform, &post).await?;
        result.posts_scraped += 1;

        let raw_comments = self.resolve_comments(platform, item, post.url.as_deref(), result).await;
        for raw in &raw_comments {
            let comment = match extract_comment(raw) {
                Ok(comment) => comment,
                Err(err) => {
                    result.errors.push(format!("comment extraction: {err}"));
                    continue;
                }
            };
            let sentiment = self.analyzer.analyze(comment.text.as_deref()).await;
            pulso_db::upsert_comment(&self.pool, post_db_id, &comment, &sentiment).await?;
            result.comments_scraped += 1;
        }

        Ok(())
    }

    /// Resolves the comment list for one post, trying in order: embedded
    /// arrays in the raw payload, a payload-advertised secondary dataset
    /// (TikTok only), and finally a separate comment-scrape call when the
    /// post has a URL and fewer than the configured threshold were found.
    /// All failures here are non-fatal; the post itself is already
    /// persisted.
    async fn resolve_comments(
        &self,
        platform: Platform,
        item: &Value,
        post_url: Option<&str>,
        result: &mut AnalysisResult,
    ) -> Vec<Value> {
        let mut comments = embedded_comments(item);

        if comments.is_empty() {
            if let Some(url) = secondary_dataset_url(platform, item) {
                match self.client.fetch_dataset_url(url).await {
                    Ok(items) => comments = items,
                    Err(err) => {
                        tracing::warn!(error = %err, "secondary comment dataset fetch failed");
                        result.errors.push(format!("comment dataset: {err}"));
                    }
                }
            }
        }

        if comments.len() < self.settings.comment_scrape_threshold {
            if let Some(url) = post_url {
                match self.scrape_comments(platform, url).await {
                    Ok(items) => comments.extend(items),
                    Err(err) => {
                        tracing::warn!(error = %err, post_url = url, "comment scrape failed");
                        result.errors.push(format!("comment scrape: {err}"));
                    }
                }
            }
        }

        comments
    }

    async fn scrape_comments(
        &self,
        platform: Platform,
        post_url: &str,
    ) -> Result<Vec<Value>, RunError> {
        // Instagram comments are scraped by re-running the posts actor in
        // comments mode; the other platforms have dedicated actors.
        let kind = match platform {
            Platform::Instagram => ActorKind::Posts,
            Platform::Tiktok | Platform::Facebook => ActorKind::Comments,
        };
        let Some(actor_id) = self.settings.actor_id(platform, kind) else {
            tracing::debug!(%platform, "no comments actor configured, skipping scrape");
            return Ok(Vec::new());
        };

        let input = comments_input(platform, post_url, self.settings.default_limit_comments);
        let run = self.client.run_actor(actor_id, &input).await?;
        Ok(self.client.fetch_dataset(&run).await?)
    }
}

/// First non-empty embedded comment array in the payload. A non-array value
/// under these names (e.g. a `comments` count) is not a list and is ignored.
fn embedded_comments(item: &Value) -> Vec<Value> {
    EMBEDDED_COMMENT_FIELDS
        .iter()
        .filter_map(|name| item.get(name))
        .filter_map(Value::as_array)
        .find(|list| !list.is_empty())
        .cloned()
        .unwrap_or_default()
}

/// TikTok's posts actor advertises per-post comment datasets by URL; the
/// other platforms never emit these fields, so they are only trusted on
/// TikTok payloads.
fn secondary_dataset_url(platform: Platform, item: &Value) -> Option<&str> {
    if platform != Platform::Tiktok {
        return None;
    }
    COMMENT_DATASET_FIELDS
        .iter()
        .filter_map(|name| item.get(name))
        .find_map(Value::as_str)
        .filter(|url| !url.is_empty())
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
