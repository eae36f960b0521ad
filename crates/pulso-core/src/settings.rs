//! Runtime-tunable analysis settings.
//!
//! Unlike [`crate::AppConfig`] (process-level, from env), these values are
//! operator-editable at runtime and persisted in the `settings` table. The
//! `pulso-db` crate loads them into this struct; missing keys take the
//! defaults below.

use chrono::NaiveDate;

use crate::types::Platform;

/// Which actor variant to resolve for a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    Posts,
    Comments,
}

/// An inclusive date range for post filtering. At least one bound is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    /// Both bounds are inclusive; a missing bound is open.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        true
    }
}

/// Operator-tunable knobs for analysis runs.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    /// Skip profiles analyzed within the last 7 days (unless forced or a
    /// date window is configured).
    pub auto_skip_recent: bool,
    /// Filter to the last N days; `0` disables. Overrides the explicit
    /// from/to dates when positive.
    pub last_days: u32,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub default_limit_posts: u32,
    pub default_limit_comments: u32,
    /// Trigger a separate comment-scrape call when a post yielded fewer
    /// embedded/dataset comments than this.
    pub comment_scrape_threshold: usize,
    pub actor_instagram_posts: String,
    pub actor_instagram_comments: String,
    pub actor_tiktok_posts: String,
    pub actor_tiktok_comments: String,
    pub actor_facebook_posts: String,
    pub actor_facebook_comments: String,
    /// Sentiment model name passed to the inference endpoint.
    pub sentiment_model: String,
    pub keywords_positive: Vec<String>,
    pub keywords_negative: Vec<String>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            auto_skip_recent: true,
            last_days: 7,
            date_from: None,
            date_to: None,
            default_limit_posts: 50,
            default_limit_comments: 200,
            comment_scrape_threshold: 5,
            actor_instagram_posts: "shu8hvrXbJbY3Eb9W".to_string(),
            actor_instagram_comments: "instagram-comment-scraper".to_string(),
            actor_tiktok_posts: "GdWCkxBtKWOsKjdch".to_string(),
            actor_tiktok_comments: "tiktok-comments-scraper".to_string(),
            actor_facebook_posts: "apify/facebook-posts-scraper".to_string(),
            actor_facebook_comments: "us5srxAYnsrkgUv2v".to_string(),
            sentiment_model: "cardiffnlp/twitter-xlm-roberta-base-sentiment".to_string(),
            keywords_positive: [
                "excelente",
                "recomiendo",
                "genial",
                "perfecto",
                "amazing",
                "great",
                "love",
                "best",
            ]
            .map(str::to_string)
            .to_vec(),
            keywords_negative: [
                "malo",
                "horrible",
                "terrible",
                "pésimo",
                "bad",
                "worst",
                "hate",
                "disappointed",
            ]
            .map(str::to_string)
            .to_vec(),
        }
    }
}

impl AnalysisSettings {
    /// Resolve the configured date window relative to `today`.
    ///
    /// A positive `last_days` wins over explicit dates and yields the
    /// inclusive range `[today - (N-1) days, today]`, so `last_days = 1`
    /// means "today only". With no window configured, returns `None`.
    #[must_use]
    pub fn date_window(&self, today: NaiveDate) -> Option<DateWindow> {
        if self.last_days > 0 {
            let from = today - chrono::Days::new(u64::from(self.last_days) - 1);
            return Some(DateWindow {
                from: Some(from),
                to: Some(today),
            });
        }
        if self.date_from.is_none() && self.date_to.is_none() {
            return None;
        }
        Some(DateWindow {
            from: self.date_from,
            to: self.date_to,
        })
    }

    /// True when any date filtering is configured. Used by the skip check:
    /// an explicit window always overrides the auto-skip heuristic.
    #[must_use]
    pub const fn has_date_window(&self) -> bool {
        self.last_days > 0 || self.date_from.is_some() || self.date_to.is_some()
    }

    /// The configured actor ID for a platform/kind pair, or `None` when the
    /// operator has cleared it.
    #[must_use]
    pub fn actor_id(&self, platform: Platform, kind: ActorKind) -> Option<&str> {
        let id = match (platform, kind) {
            (Platform::Instagram, ActorKind::Posts) => &self.actor_instagram_posts,
            // Instagram comments are scraped with the posts actor in
            // comments mode; the dedicated comments actor is a fallback.
            (Platform::Instagram, ActorKind::Comments) => &self.actor_instagram_comments,
            (Platform::Tiktok, ActorKind::Posts) => &self.actor_tiktok_posts,
            (Platform::Tiktok, ActorKind::Comments) => &self.actor_tiktok_comments,
            (Platform::Facebook, ActorKind::Posts) => &self.actor_facebook_posts,
            (Platform::Facebook, ActorKind::Comments) => &self.actor_facebook_comments,
        };
        if id.is_empty() {
            None
        } else {
            Some(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn no_window() -> AnalysisSettings {
        AnalysisSettings {
            last_days: 0,
            date_from: None,
            date_to: None,
            ..AnalysisSettings::default()
        }
    }

    #[test]
    fn no_configuration_yields_no_window() {
        assert!(no_window().date_window(date(2024, 6, 15)).is_none());
        assert!(!no_window().has_date_window());
    }

    #[test]
    fn last_days_window_is_inclusive_of_today() {
        let settings = AnalysisSettings {
            last_days: 7,
            ..no_window()
        };
        let window = settings.date_window(date(2024, 6, 15)).unwrap();
        assert_eq!(window.from, Some(date(2024, 6, 9)));
        assert_eq!(window.to, Some(date(2024, 6, 15)));
    }

    #[test]
    fn last_days_one_means_today_only() {
        let settings = AnalysisSettings {
            last_days: 1,
            ..no_window()
        };
        let window = settings.date_window(date(2024, 6, 15)).unwrap();
        assert_eq!(window.from, Some(date(2024, 6, 15)));
        assert_eq!(window.to, Some(date(2024, 6, 15)));
    }

    #[test]
    fn last_days_overrides_explicit_dates() {
        let settings = AnalysisSettings {
            last_days: 3,
            date_from: Some(date(2020, 1, 1)),
            date_to: Some(date(2020, 12, 31)),
            ..AnalysisSettings::default()
        };
        let window = settings.date_window(date(2024, 6, 15)).unwrap();
        assert_eq!(window.from, Some(date(2024, 6, 13)));
        assert_eq!(window.to, Some(date(2024, 6, 15)));
    }

    #[test]
    fn explicit_dates_used_when_last_days_zero() {
        let settings = AnalysisSettings {
            last_days: 0,
            date_from: Some(date(2024, 1, 1)),
            date_to: None,
            ..AnalysisSettings::default()
        };
        let window = settings.date_window(date(2024, 6, 15)).unwrap();
        assert_eq!(window.from, Some(date(2024, 1, 1)));
        assert_eq!(window.to, None);
    }

    #[test]
    fn window_contains_is_inclusive_on_both_bounds() {
        let window = DateWindow {
            from: Some(date(2024, 6, 8)),
            to: Some(date(2024, 6, 15)),
        };
        assert!(window.contains(date(2024, 6, 8)));
        assert!(window.contains(date(2024, 6, 15)));
        assert!(!window.contains(date(2024, 6, 7)));
        assert!(!window.contains(date(2024, 6, 16)));
    }

    #[test]
    fn open_bounds_accept_everything_on_that_side() {
        let window = DateWindow {
            from: None,
            to: Some(date(2024, 6, 15)),
        };
        assert!(window.contains(date(1990, 1, 1)));
        assert!(!window.contains(date(2024, 6, 16)));
    }

    #[test]
    fn empty_actor_id_resolves_to_none() {
        let settings = AnalysisSettings {
            actor_tiktok_comments: String::new(),
            ..AnalysisSettings::default()
        };
        assert!(settings
            .actor_id(Platform::Tiktok, ActorKind::Comments)
            .is_none());
        assert!(settings
            .actor_id(Platform::Tiktok, ActorKind::Posts)
            .is_some());
    }
}
