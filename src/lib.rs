//! # review-word-stats
//! Counts how often each word appears in low, medium and high rated reviews,
//! split by the category label attached to every review.
//!
//! ```no_run
//! use review_word_stats::aggregation::aggregate;
//! use review_word_stats::parsing::load_table;
//! use std::path::Path;
//!
//! let table = load_table(Path::new("reviews.csv"))?;
//! let structure = aggregate(&table)?;
//! println!("{:?}", structure.counts("great", "W").counts());
//! # Ok::<(), review_word_stats::AnalysisError>(())
//! ```

use thiserror::Error;

/// Word frequency aggregation over loaded review tables.
pub mod aggregation;

/// Data model, reports and charts.
pub mod common;

/// Loading of delimited review files.
pub mod parsing;

pub mod utilities {
    pub mod system_info;
}

pub use aggregation::{aggregate, AggregationError};
pub use common::{AggregateStructure, FrequencyVector, RatingBucket, WordEntry};
pub use parsing::{load_table, ParsingError, ReviewTable};

/// Errors that can occur during analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Parsing error: {0}")]
    Parsing(#[from] ParsingError),

    #[error("Aggregation error: {0}")]
    Aggregation(#[from] AggregationError),

    #[cfg(feature = "plots")]
    #[error("Plot error: {0}")]
    Plot(#[from] common::PlotError),
}
