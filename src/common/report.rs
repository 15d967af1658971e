//! ASCII table reports over an [`AggregateStructure`]
//!
//! This module provides:
//! - [`BucketEntry`] rows describing how a category's tokens spread over the rating buckets
//! - [`WordSummaryEntry`] rows listing the most used words per category
//! - ASCII table formatting using the [`tabled`] crate

use crate::common::buckets::RatingBucket;
use crate::common::data_structures::AggregateStructure;
use tabled::{Table, Tabled};

/// Represents a single bucket with its label, count, and percentage
#[derive(Debug, Clone, Tabled)]
pub struct BucketEntry {
    /// Bucket label (e.g., "Low Reviews")
    #[tabled(rename = "Range")]
    pub range: String,
    /// Number of tokens in this bucket
    #[tabled(rename = "Count")]
    pub count: u64,
    /// Percentage of the category's tokens in this bucket
    #[tabled(rename = "Percentage")]
    pub percentage: String,
}

impl BucketEntry {
    /// Creates a new bucket entry with formatted percentage
    pub fn new(range: String, count: u64, total: u64) -> Self {
        let percentage = if total == 0 {
            "0.00%".to_string()
        } else {
            format!("{:.2}%", (count as f64 / total as f64) * 100.0)
        };

        Self {
            range,
            count,
            percentage,
        }
    }
}

/// Usage of one word within one category.
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct WordSummaryEntry {
    #[tabled(rename = "Word")]
    pub word: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Low")]
    pub low: u64,
    #[tabled(rename = "Medium")]
    pub medium: u64,
    #[tabled(rename = "High")]
    pub high: u64,
    #[tabled(rename = "Total")]
    pub total: u64,
}

/// One [`BucketEntry`] per rating bucket for `category`, summed over all words.
pub fn category_bucket_entries(structure: &AggregateStructure, category: &str) -> Vec<BucketEntry> {
    let totals = structure.category_totals(category);
    let total = totals.total();

    RatingBucket::ALL
        .iter()
        .map(|&bucket| BucketEntry::new(bucket.label().to_string(), totals[bucket], total))
        .collect()
}

/// The `limit` most used words, one row per category the word was seen with.
///
/// Words are ordered by total count (descending), ties broken alphabetically.
/// Categories of a word are listed in sorted order.
pub fn top_words(structure: &AggregateStructure, limit: usize) -> Vec<WordSummaryEntry> {
    let mut words: Vec<_> = structure.iter().collect();
    words.sort_by(|(word_a, entry_a), (word_b, entry_b)| {
        entry_b
            .total()
            .cmp(&entry_a.total())
            .then_with(|| word_a.cmp(word_b))
    });

    words
        .into_iter()
        .take(limit)
        .flat_map(|(word, entry)| {
            entry.iter().map(move |(category, counts)| WordSummaryEntry {
                word: word.to_string(),
                category: category.to_string(),
                low: counts[RatingBucket::Low],
                medium: counts[RatingBucket::Medium],
                high: counts[RatingBucket::High],
                total: counts.total(),
            })
        })
        .collect()
}

/// Formats bucket entries as an ASCII table using the [`tabled`] crate
///
/// # Arguments
/// * `buckets` - A slice of [`BucketEntry`] to format
/// * `title` - Optional title for the table
///
/// # Returns
/// A formatted ASCII table as a [`String`]
pub fn format_bucket_table(buckets: &[BucketEntry], title: Option<&str>) -> String {
    if buckets.is_empty() {
        return "No data available for bucketing".to_string();
    }

    with_title(Table::new(buckets).to_string(), title)
}

/// Formats word summaries as an ASCII table, see [`format_bucket_table`].
pub fn format_word_table(words: &[WordSummaryEntry], title: Option<&str>) -> String {
    if words.is_empty() {
        return "No words found".to_string();
    }

    with_title(Table::new(words).to_string(), title)
}

fn with_title(table: String, title: Option<&str>) -> String {
    if let Some(title) = title {
        format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
    } else {
        table
    }
}
