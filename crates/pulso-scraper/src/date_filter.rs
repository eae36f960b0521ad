//! Post-hoc date-window filtering of raw post batches.
//!
//! The actors accept date hints but apply them inconsistently (or not at
//! all, per platform), so the configured window is re-checked against every
//! returned item before anything is persisted.

use pulso_core::{DateWindow, Platform};
use serde_json::Value;

use crate::extract::post_date;

/// Keeps the items whose resolved post date falls inside `window`.
///
/// `None` window → identity. Items whose date cannot be resolved under any
/// supported encoding are kept, with a warning, on the grounds that a false
/// positive is recoverable and a silently dropped post is not. Both window
/// bounds are inclusive.
#[must_use]
pub fn filter_by_window(
    items: Vec<Value>,
    platform: Platform,
    window: Option<&DateWindow>,
) -> Vec<Value> {
    let Some(window) = window else {
        return items;
    };

    let total = items.len();
    let filtered: Vec<Value> = items
        .into_iter()
        .filter(|item| match post_date(item, platform) {
            Some(date) => window.contains(date),
            None => {
                tracing::warn!(
                    %platform,
                    "post date unresolvable, keeping item despite date window"
                );
                true
            }
        })
        .collect();

    tracing::debug!(
        %platform,
        total,
        kept = filtered.len(),
        "applied date window to scraped posts"
    );
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn window(from: (i32, u32, u32), to: (i32, u32, u32)) -> DateWindow {
        DateWindow {
            from: NaiveDate::from_ymd_opt(from.0, from.1, from.2),
            to: NaiveDate::from_ymd_opt(to.0, to.1, to.2),
        }
    }

    fn ig_post(id: &str, timestamp: &str) -> Value {
        json!({"id": id, "timestamp": timestamp})
    }

    #[test]
    fn no_window_is_identity() {
        let items = vec![ig_post("p1", "2019-01-01T00:00:00Z")];
        let kept = filter_by_window(items.clone(), Platform::Instagram, None);
        assert_eq!(kept, items);
    }

    #[test]
    fn last_seven_days_window_is_boundary_inclusive() {
        // today = 2024-06-15, last 7 days -> [2024-06-08, 2024-06-15]
        let w = window((2024, 6, 8), (2024, 6, 15));
        let items = vec![
            ig_post("lower-bound", "2024-06-08T00:00:00Z"),
            ig_post("too-old", "2024-06-07T23:59:59Z"),
            ig_post("upper-bound", "2024-06-15T12:00:00Z"),
            ig_post("too-new", "2024-06-16T00:00:00Z"),
        ];
        let kept = filter_by_window(items, Platform::Instagram, Some(&w));
        let ids: Vec<&str> = kept.iter().map(|i| i["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["lower-bound", "upper-bound"]);
    }

    #[test]
    fn unresolvable_dates_are_kept() {
        let w = window((2024, 6, 8), (2024, 6, 15));
        let items = vec![
            json!({"id": "no-timestamp"}),
            ig_post("garbled", "not a date"),
            ig_post("too-old", "2020-01-01T00:00:00Z"),
        ];
        let kept = filter_by_window(items, Platform::Instagram, Some(&w));
        let ids: Vec<&str> = kept.iter().map(|i| i["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["no-timestamp", "garbled"]);
    }

    #[test]
    fn tiktok_dates_resolve_through_epoch_fields() {
        let w = window((2024, 6, 8), (2024, 6, 15));
        let items = vec![
            json!({"id": "in", "createTime": 1_718_409_600}),   // 2024-06-15
            json!({"id": "out", "createTime": 1_700_000_000}),  // 2023-11-14
        ];
        let kept = filter_by_window(items, Platform::Tiktok, Some(&w));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0]["id"], "in");
    }
}
