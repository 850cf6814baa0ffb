//! Reporting
//!
//! This module handles the HTML dashboard, the per-log profiling reports,
//! and structured logging for the application.

pub mod dashboard;
pub mod logging;
pub mod profile_report;

// Re-export commonly used items
pub use dashboard::{DashboardData, DashboardError, HtmlDashboard};
pub use profile_report::ProfileReport;
