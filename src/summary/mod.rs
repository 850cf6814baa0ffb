//! Summary statistics over loaded logs
//!
//! The [`Summarizer`] computes counts, rates, frequency tables, grouped sums
//! and correlations over a [`Dataset`](crate::data::Dataset). Per-kind
//! analyses and dataset profiles are built on top of it.

pub mod analyses;
pub mod correlation;
pub mod filter;
pub mod frequency;
pub mod numeric;
pub mod profile;
pub mod report;
pub mod summarizer;

// Re-export commonly used items
pub use analyses::analyze;
pub use correlation::CorrelationMatrix;
pub use filter::RowFilter;
pub use frequency::{FrequencyEntry, FrequencyTable};
pub use numeric::NumericSummary;
pub use profile::DatasetProfile;
pub use report::{GroupedRow, GroupedTable, Metric, MetricReport, MetricValue};
pub use summarizer::Summarizer;
