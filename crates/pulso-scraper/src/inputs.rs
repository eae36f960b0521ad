//! Per-platform actor input payloads.
//!
//! Each platform's actor expects a different input shape; these builders
//! encode the divergence in one place. Date hints are passed to the actors
//! where supported so they stop paginating into old history, but the actors
//! do not apply them reliably — [`crate::filter_by_window`] re-checks every
//! returned item.

use pulso_core::{AnalysisSettings, DateWindow, Platform};
use serde_json::{json, Value};

/// Extracts a bare username from a stored `username_or_url` value.
///
/// Accepts `user`, `@user`, or a profile URL; for URLs the last non-empty
/// path segment (minus any `@` prefix) is taken.
#[must_use]
pub fn normalize_username(input: &str) -> String {
    let trimmed = input.trim().trim_start_matches('@');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        let path = trimmed
            .splitn(2, "//")
            .nth(1)
            .and_then(|rest| rest.split_once('/').map(|(_, p)| p))
            .unwrap_or("");
        let path = path.split(['?', '#']).next().unwrap_or("");
        if let Some(segment) = path.split('/').filter(|s| !s.is_empty()).next_back() {
            return segment.trim_start_matches('@').to_owned();
        }
    }
    trimmed.to_owned()
}

fn fmt_date(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Builds the posts-actor input for a profile.
///
/// `window` is the already-resolved date window; when present it is passed
/// as the actor's native date hint (`onlyPostsNewerThan` for Instagram,
/// `oldestPostDateUnified`/`newestPostDate` for TikTok; the Facebook actor
/// has no date parameter).
#[must_use]
pub fn posts_input(
    platform: Platform,
    username_or_url: &str,
    settings: &AnalysisSettings,
    window: Option<&DateWindow>,
) -> Value {
    let username = normalize_username(username_or_url);
    let limit = settings.default_limit_posts;

    match platform {
        Platform::Instagram => {
            // This actor expects directUrls as an array of URL strings, not
            // {url: ...} objects.
            let mut input = json!({
                "directUrls": [format!("https://www.instagram.com/{username}/")],
                "resultsType": "posts",
                "resultsLimit": limit,
            });
            if let Some(from) = window.and_then(|w| w.from) {
                input["onlyPostsNewerThan"] = Value::String(fmt_date(from));
            }
            input
        }
        Platform::Tiktok => {
            let mut input = json!({
                "profiles": [format!("@{username}")],
                "profileScrapeSections": ["videos"],
                "profileSorting": "latest",
                "resultsPerPage": limit,
                "commentsPerPost": settings.default_limit_comments,
                "maxRepliesPerComment": 10,
                "excludePinnedPosts": false,
                "maxFollowersPerProfile": 0,
                "maxFollowingPerProfile": 0,
                "scrapeRelatedVideos": false,
                "shouldDownloadAvatars": false,
                "shouldDownloadCovers": false,
                "shouldDownloadMusicCovers": false,
                "shouldDownloadSlideshowImages": false,
                "shouldDownloadSubtitles": false,
                "shouldDownloadVideos": false,
                "proxyCountryCode": "None",
            });
            if let Some(window) = window {
                if let Some(from) = window.from {
                    input["oldestPostDateUnified"] = Value::String(fmt_date(from));
                }
                if let Some(to) = window.to {
                    input["newestPostDate"] = Value::String(fmt_date(to));
                }
            }
            input
        }
        Platform::Facebook => json!({
            "startUrls": [{"url": format!("https://facebook.com/{username}")}],
            "resultsLimit": limit,
        }),
    }
}

/// Builds the comments-actor input for one post URL.
///
/// Instagram has no standalone comments actor worth using; its posts actor
/// is re-run in `resultsType: "comments"` mode against the post URL, so the
/// caller must resolve the *posts* actor id for Instagram comment scrapes.
#[must_use]
pub fn comments_input(platform: Platform, post_url: &str, limit: u32) -> Value {
    match platform {
        Platform::Instagram => json!({
            "directUrls": [post_url],
            "resultsType": "comments",
            "resultsLimit": limit,
        }),
        Platform::Tiktok => json!({
            "urls": [post_url],
            "maxComments": limit,
        }),
        Platform::Facebook => json!({
            "startUrls": [{"url": post_url}],
            "resultsLimit": limit,
            "includeNestedComments": false,
            "viewOption": "RANKED_UNFILTERED",
        }),
    }
}
