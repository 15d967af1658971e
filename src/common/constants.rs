//! Constants shared by the table reader, the aggregation engine and the renderers
//!
//! Column names match the header row of the review exports; bucket thresholds and
//! labels are part of the observable output and must stay in sync with each other.

/// Header of the free-text comment column.
pub const COMMENT_TEXT_COLUMN: &str = "Comment Text";

/// Header of the categorical label column.
pub const PROFESSOR_GENDER_COLUMN: &str = "Professor Gender";

/// Header of the numeric rating column.
pub const RATING_COLUMN: &str = "Rating";

/// Ratings strictly below this value are [`Low`](crate::common::buckets::RatingBucket::Low).
pub const LOW_RATING_THRESHOLD: f64 = 2.5;

/// Ratings strictly above this value are [`High`](crate::common::buckets::RatingBucket::High).
pub const HIGH_RATING_THRESHOLD: f64 = 3.5;

/// Number of rating buckets in a [`FrequencyVector`](crate::common::buckets::FrequencyVector).
pub const BUCKET_COUNT: usize = 3;

/// Display labels for the buckets, in bucket order.
pub const BUCKET_LABELS: [&str; BUCKET_COUNT] = ["Low Reviews", "Medium Reviews", "High Reviews"];
