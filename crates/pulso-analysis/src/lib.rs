//! Profile analysis orchestration for Pulso.
//!
//! Drives one profile end to end (skip check, post scrape, comment
//! resolution, sentiment tagging, persistence, watermark) and fans the
//! orchestrator out across a profile set with bounded concurrency and
//! cooperative cancellation.

pub mod error;
pub mod orchestrator;
pub mod runner;

pub use error::AnalysisError;
pub use orchestrator::{should_skip, ProfileAnalyzer};
pub use runner::run_batch;
