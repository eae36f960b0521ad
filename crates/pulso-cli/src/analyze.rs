//! The `analyze` command: build the collaborators, fan out the batch,
//! report per-profile results.

use pulso_analysis::{run_batch, ProfileAnalyzer};
use pulso_core::AppConfig;
use pulso_scraper::ApifyClient;
use pulso_sentiment::{ModelClient, SentimentAnalyzer};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

pub(crate) async fn run(
    pool: &PgPool,
    config: &AppConfig,
    profile_ids: Option<&[i64]>,
    force: bool,
) -> anyhow::Result<()> {
    let settings = pulso_db::load_analysis_settings(pool).await?;

    let token = config
        .apify_token
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("APIFY_TOKEN is not set"))?;
    let client = ApifyClient::new(
        &config.apify_base_url,
        token,
        config.scraper_request_timeout_secs,
        config.scraper_max_retries,
        config.scraper_retry_backoff_base_secs,
    )?;

    let model = if settings.sentiment_model.is_empty() {
        tracing::warn!("no sentiment model configured, keyword/fallback scoring only");
        None
    } else {
        Some(ModelClient::new(
            &config.sentiment_api_url,
            &settings.sentiment_model,
            config.sentiment_api_token.as_deref(),
            config.scraper_request_timeout_secs,
        )?)
    };
    let sentiment = SentimentAnalyzer::new(
        model,
        settings.keywords_positive.clone(),
        settings.keywords_negative.clone(),
    );

    let analyzer = ProfileAnalyzer::new(pool.clone(), client, sentiment, settings);

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received; in-flight profiles will finish");
                cancel.cancel();
            }
        });
    }

    let results = run_batch(
        pool,
        &analyzer,
        profile_ids,
        force,
        config.scraper_max_concurrent_profiles,
        &cancel,
    )
    .await?;

    let mut ids: Vec<i64> = results.keys().copied().collect();
    ids.sort_unstable();

    println!(
        "{:>5}  {:<8}  {:>6}  {:>9}  detail",
        "id", "status", "posts", "comments"
    );
    for id in ids {
        let r = &results[&id];
        let status = if r.skipped {
            "skipped"
        } else if r.posts_scraped == 0 && !r.errors.is_empty() {
            "failed"
        } else {
            "done"
        };
        let detail = r
            .reason
            .clone()
            .unwrap_or_else(|| r.errors.join("; "));
        println!(
            "{id:>5}  {status:<8}  {:>6}  {:>9}  {detail}",
            r.posts_scraped, r.comments_scraped
        );
    }

    Ok(())
}
