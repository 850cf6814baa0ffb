//! Log data loading
//!
//! This module reads CSV log files into immutable in-memory datasets,
//! caches them by file content, and describes the five log schemas.

pub mod cache;
pub mod dataset;
pub mod loader;
pub mod schema;

// Re-export commonly used items
pub use cache::DatasetCache;
pub use dataset::{Column, Dataset};
pub use loader::load_csv;
pub use schema::{ColumnRoles, LogKind};
