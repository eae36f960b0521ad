//! Field extraction from raw scraped items.
//!
//! Actor output has no fixed schema; the same logical attribute arrives
//! under different names depending on platform and actor version. Each
//! attribute resolves through an ordered candidate list: the first present,
//! type-coercible field wins. Only a missing identity key fails the
//! extraction; every other per-field failure degrades to the default.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use pulso_core::{NormalizedComment, NormalizedPost, Platform};
use serde_json::Value;

use crate::error::ExtractError;

/// Candidate field names per logical post attribute, ordered by priority.
struct PostChains {
    id: &'static [&'static str],
    url: &'static [&'static str],
    text: &'static [&'static str],
    likes: &'static [&'static str],
    comments_count: &'static [&'static str],
    shares: &'static [&'static str],
    views: &'static [&'static str],
    timestamp: &'static [&'static str],
}

const TIKTOK_POST: PostChains = PostChains {
    id: &["id", "awemeId", "videoId", "videoWebUrl", "url"],
    url: &["videoWebUrl", "webVideoUrl", "url"],
    text: &["text", "desc", "description"],
    likes: &["diggCount", "likesCount", "likes"],
    // "comments" can also hold an embedded list; the count coercion rejects
    // arrays so a list-valued field falls through harmlessly.
    comments_count: &["commentCount", "commentsCount", "comments"],
    shares: &["shareCount", "sharesCount", "shares"],
    views: &["playCount", "viewsCount", "views", "viewCount"],
    timestamp: &["createTime", "createTimeISO", "timestamp"],
};

const GENERIC_POST: PostChains = PostChains {
    id: &["id", "postId", "shortCode", "url"],
    url: &["url", "postUrl", "webVideoUrl"],
    text: &["text", "caption", "description"],
    likes: &["likesCount", "likes", "diggCount", "reactionsCount"],
    comments_count: &["commentsCount", "comments", "commentCount"],
    shares: &["sharesCount", "shares", "shareCount"],
    views: &["viewsCount", "views", "playCount", "viewCount"],
    timestamp: &["timestamp", "createdAt"],
};

const fn post_chains(platform: Platform) -> &'static PostChains {
    match platform {
        Platform::Tiktok => &TIKTOK_POST,
        Platform::Instagram | Platform::Facebook => &GENERIC_POST,
    }
}

const COMMENT_ID: &[&str] = &["id", "commentId", "cid"];
const COMMENT_TEXT: &[&str] = &["text", "comment", "content"];
const COMMENT_AUTHOR: &[&str] = &["ownerUsername", "author", "username", "uniqueId"];
const COMMENT_LIKES: &[&str] = &["likesCount", "likes", "diggCount"];
const COMMENT_TIMESTAMP: &[&str] = &["timestamp", "createTime", "createTimeISO", "createdAt"];

/// Extracts a normalized post from one raw item.
///
/// # Errors
///
/// [`ExtractError::MissingPostId`] when no identity candidate yields a
/// non-empty value. Every other field failure degrades to default/`None`.
pub fn extract_post(item: &Value, platform: Platform) -> Result<NormalizedPost, ExtractError> {
    let chains = post_chains(platform);

    let external_id =
        first_string(item, chains.id).ok_or(ExtractError::MissingPostId)?;

    Ok(NormalizedPost {
        external_id,
        url: first_string(item, chains.url),
        text: first_string(item, chains.text).and_then(|t| clean_text(&t)),
        likes: first_count(item, chains.likes),
        comments_count: first_count(item, chains.comments_count),
        shares: first_count(item, chains.shares),
        views: first_count(item, chains.views),
        posted_at: first_timestamp(item, chains.timestamp),
    })
}

/// Extracts a normalized comment from one raw item. Comment shapes converge
/// enough across platforms that a single candidate table covers all three.
///
/// # Errors
///
/// [`ExtractError::MissingCommentId`] when no identity candidate is present.
pub fn extract_comment(item: &Value) -> Result<NormalizedComment, ExtractError> {
    let external_id =
        first_string(item, COMMENT_ID).ok_or(ExtractError::MissingCommentId)?;

    // TikTok nests the author under authorMeta.name.
    let author = first_string(item, COMMENT_AUTHOR)
        .or_else(|| item.pointer("/authorMeta/name").and_then(coerce_string));

    Ok(NormalizedComment {
        external_id,
        text: first_string(item, COMMENT_TEXT).and_then(|t| clean_text(&t)),
        author,
        likes: first_count(item, COMMENT_LIKES),
        posted_at: first_timestamp(item, COMMENT_TIMESTAMP),
    })
}

/// Resolves the posting date of a raw item through the platform's timestamp
/// chain. Used by the date-window filter; `None` when nothing parses.
#[must_use]
pub fn post_date(item: &Value, platform: Platform) -> Option<NaiveDate> {
    first_timestamp(item, post_chains(platform).timestamp).map(|ts| ts.date_naive())
}

fn first_string(item: &Value, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|name| item.get(name))
        .find_map(coerce_string)
}

fn first_count(item: &Value, candidates: &[&str]) -> i64 {
    candidates
        .iter()
        .filter_map(|name| item.get(name))
        .find_map(coerce_count)
        .unwrap_or(0)
}

fn first_timestamp(item: &Value, candidates: &[&str]) -> Option<DateTime<Utc>> {
    candidates
        .iter()
        .filter_map(|name| item.get(name))
        .find_map(parse_timestamp)
}

/// A non-empty string, or a number rendered as its string form (some actors
/// emit numeric ids).
fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Accepts integers, floats, and numeric strings. Arrays, objects, and
/// non-numeric strings are rejected so the chain can fall through.
#[allow(clippy::cast_possible_truncation)]
fn coerce_count(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

/// Parses a timestamp value in any of the encodings the actors emit:
/// Unix epoch seconds (integer or float), ISO-8601 with `Z` or an explicit
/// offset, and naive ISO datetimes (assumed UTC).
#[allow(clippy::cast_possible_truncation)]
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let secs = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp(secs, 0)
        }
        Value::String(s) => parse_timestamp_str(s.trim()),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(secs) = s.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// Collapses runs of whitespace to single spaces; empty-after-trim → `None`.
fn clean_text(text: &str) -> Option<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
