//! Batch fan-out of profile analysis.

use std::collections::HashMap;

use futures::{stream, StreamExt};
use pulso_core::AnalysisResult;
use pulso_db::ProfileRow;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::error::AnalysisError;
use crate::orchestrator::ProfileAnalyzer;

/// Analyzes a set of profiles and returns one result per requested profile.
///
/// `profile_ids = None` means every known profile. Requested ids that match
/// no profile yield an error-shaped result rather than failing the batch —
/// callers always get a complete result map. Profiles run independently
/// with at most `max_concurrent` in flight toward the scraping service.
///
/// Cancellation is cooperative: profiles already running complete normally,
/// profiles not yet started return a skipped result with reason `cancelled`.
///
/// # Errors
///
/// Only listing the profiles can fail here; per-profile failures are folded
/// into that profile's [`AnalysisResult`].
pub async fn run_batch(
    pool: &PgPool,
    analyzer: &ProfileAnalyzer,
    profile_ids: Option<&[i64]>,
    force: bool,
    max_concurrent: usize,
    cancel: &CancellationToken,
) -> Result<HashMap<i64, AnalysisResult>, AnalysisError> {
    let all = pulso_db::list_profiles(pool).await?;
    let (targets, unknown) = resolve_targets(all, profile_ids);

    let mut results: HashMap<i64, AnalysisResult> = unknown
        .into_iter()
        .map(|id| (id, AnalysisResult::failed(format!("unknown profile id {id}"))))
        .collect();

    let analyzed: Vec<(i64, AnalysisResult)> = stream::iter(targets)
        .map(|profile| async move {
            if cancel.is_cancelled() {
                return (profile.id, AnalysisResult::skipped("cancelled"));
            }
            (profile.id, analyzer.analyze_profile(&profile, force).await)
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    results.extend(analyzed);
    Ok(results)
}

/// Splits the known profiles into the requested targets and the requested
/// ids that match nothing.
fn resolve_targets(
    all: Vec<ProfileRow>,
    requested: Option<&[i64]>,
) -> (Vec<ProfileRow>, Vec<i64>) {
    let Some(requested) = requested else {
        return (all, Vec::new());
    };

    let mut targets = Vec::with_capacity(requested.len());
    let mut unknown = Vec::new();
    for &id in requested {
        match all.iter().find(|p| p.id == id) {
            Some(profile) => targets.push(profile.clone()),
            None => unknown.push(id),
        }
    }
    (targets, unknown)
}
