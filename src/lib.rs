//! Summaries, profiles and dashboards for server log CSV files.
//!
//! Five fixed log schemas are supported (login, session, authentication,
//! security events and service subscriptions). Files are loaded into
//! in-memory [`Dataset`]s through a caller-owned [`DatasetCache`] and
//! summarized by [`Summarizer`] into [`MetricReport`]s.

pub mod batch;
pub mod config;
pub mod core;
pub mod data;
pub mod reporting;
pub mod summary;
pub mod ui;

// Re-export commonly used items
pub use batch::{BatchOutcome, BatchRunner, Job, JobFailure, SummaryOptions};
pub use config::Config;
pub use crate::core::{LogPulseError, Result};
pub use data::{Dataset, DatasetCache, LogKind};
pub use summary::{MetricReport, MetricValue, RowFilter, Summarizer};
