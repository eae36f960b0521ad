//! Scraping layer for Pulso.
//!
//! Talks to an Apify-style actor service (one actor per platform/task),
//! builds the divergent per-platform input payloads, extracts normalized
//! posts and comments out of the inconsistently-shaped raw items each actor
//! returns, and re-applies the configured date window that the upstream
//! actors do not reliably honor.

pub mod client;
pub mod date_filter;
pub mod error;
pub mod extract;
pub mod inputs;

mod retry;

pub use client::{ActorRun, ApifyClient};
pub use date_filter::filter_by_window;
pub use error::{ExtractError, ScrapeError};
pub use extract::{extract_comment, extract_post, post_date};
pub use inputs::{comments_input, normalize_username, posts_input};
