//! Rating buckets and the per-bucket counters built from them
//!
//! This module provides:
//! - [`RatingBucket`], the three ordinal rating tiers
//! - [`FrequencyVector`], a counter triple indexed by [`RatingBucket`]

use crate::common::constants::{
    BUCKET_COUNT, BUCKET_LABELS, HIGH_RATING_THRESHOLD, LOW_RATING_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// One of the three rating tiers a review falls into.
///
/// Both boundaries belong to [`RatingBucket::Medium`], i.e. `2.5` and `3.5` are medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RatingBucket {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl RatingBucket {
    /// All buckets in ordinal order.
    pub const ALL: [RatingBucket; BUCKET_COUNT] =
        [RatingBucket::Low, RatingBucket::Medium, RatingBucket::High];

    /// Assigns a numeric rating to its bucket.
    ///
    /// A NaN rating fails both comparisons and therefore lands in [`RatingBucket::High`].
    pub fn from_rating(rating: f64) -> Self {
        if rating < LOW_RATING_THRESHOLD {
            RatingBucket::Low
        } else if rating <= HIGH_RATING_THRESHOLD {
            RatingBucket::Medium
        } else {
            RatingBucket::High
        }
    }

    /// Position of this bucket inside a [`FrequencyVector`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human readable label used on chart axes and in reports.
    pub fn label(self) -> &'static str {
        BUCKET_LABELS[self.index()]
    }
}

/// Counts of a word's occurrences in low, medium and high rated reviews.
///
/// Serializes as a plain `[low, medium, high]` array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyVector([u64; BUCKET_COUNT]);

impl FrequencyVector {
    /// Creates a vector from raw `[low, medium, high]` counts.
    pub const fn from_counts(counts: [u64; BUCKET_COUNT]) -> Self {
        Self(counts)
    }

    /// Adds one occurrence to the given bucket.
    pub fn increment(&mut self, bucket: RatingBucket) {
        self.0[bucket.index()] += 1;
    }

    /// Count for a single bucket.
    pub fn get(&self, bucket: RatingBucket) -> u64 {
        self.0[bucket.index()]
    }

    /// Raw counts in bucket order.
    pub fn counts(&self) -> [u64; BUCKET_COUNT] {
        self.0
    }

    /// Sum over all buckets.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// Largest single bucket count.
    pub fn max(&self) -> u64 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Adds another vector into this one, element by element.
    pub fn merge(&mut self, other: &FrequencyVector) {
        for (mine, theirs) in self.0.iter_mut().zip(other.0.iter()) {
            *mine += theirs;
        }
    }
}

impl Index<RatingBucket> for FrequencyVector {
    type Output = u64;

    fn index(&self, bucket: RatingBucket) -> &u64 {
        &self.0[bucket.index()]
    }
}

impl From<[u64; BUCKET_COUNT]> for FrequencyVector {
    fn from(counts: [u64; BUCKET_COUNT]) -> Self {
        Self(counts)
    }
}
