//! Common infrastructure shared by the aggregation engine and its consumers
//!
//! This module provides reusable infrastructure for:
//! - Rating buckets and per-bucket counters
//! - The aggregate word frequency structure
//! - ASCII table reports
//! - Plotting per-word bar charts

pub mod buckets;
pub mod constants;
pub mod data_structures;
#[cfg(feature = "plots")]
pub mod plots;
pub mod report;

// Re-export commonly used items
pub use buckets::{FrequencyVector, RatingBucket};
pub use data_structures::{AggregateStructure, WordEntry};
#[cfg(feature = "plots")]
pub use plots::PlotError;
