//! Word frequency aggregation over review tables
//!
//! Every whitespace separated token of every comment is counted once per occurrence,
//! keyed by the token, the row's category label and the bucket of the row's rating.
//!
//! [`aggregate`] is the reference single pass fold. [`aggregate_partitioned`] splits the
//! rows into contiguous partitions, folds each one on the rayon pool into its own
//! [`AggregateStructure`] and sums them, producing the same result.

use crate::common::buckets::RatingBucket;
use crate::common::data_structures::AggregateStructure;
use crate::parsing::{ReviewRow, ReviewTable};
use crate::utilities::system_info::get_num_cores;
use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during aggregation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregationError {
    #[error("Invalid rating '{value}' in row {row}")]
    InvalidRating { row: usize, value: String },
}

type Result<T> = core::result::Result<T, AggregationError>;

/// Splits a comment into words on runs of whitespace.
///
/// Leading, trailing and repeated whitespace never yields empty tokens. The ASCII
/// information separators (`\x1c` to `\x1f`) also count as whitespace, so exports that
/// use them as field or record breaks inside a comment still split there.
pub fn tokenize(comment: &str) -> impl Iterator<Item = &str> {
    comment
        .split(is_separator)
        .filter(|token| !token.is_empty())
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Parses a raw rating value.
///
/// Surrounding whitespace is ignored. Anything the standard float grammar accepts,
/// including exponent notation, `inf` and `nan`, is a valid rating.
pub fn parse_rating(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

/// Builds the word frequency structure for every row of `table`, in row order.
///
/// # Arguments
/// * `table` - The review rows to aggregate
///
/// # Returns
/// * `Ok(AggregateStructure)` - Counts for every token seen
/// * `Err(AggregationError)` - If a row with at least one token has an unparseable rating.
///   No partial structure is returned.
pub fn aggregate(table: &ReviewTable) -> Result<AggregateStructure> {
    let mut structure = AggregateStructure::new();
    for row in table.rows() {
        add_row(&mut structure, &row)?;
    }
    Ok(structure)
}

/// Same as [`aggregate`], spread over `partitions` contiguous chunks of rows.
///
/// If several rows have invalid ratings, the one with the lowest index is reported,
/// matching the sequential pass.
pub fn aggregate_partitioned(table: &ReviewTable, partitions: usize) -> Result<AggregateStructure> {
    let partitions = partitions.clamp(1, table.len().max(1));
    if partitions == 1 {
        return aggregate(table);
    }

    let chunk_size = table.len().div_ceil(partitions);
    let partials: Vec<Result<AggregateStructure>> = (0..partitions)
        .into_par_iter()
        .map(|partition| -> Result<AggregateStructure> {
            let start = partition * chunk_size;
            let mut structure = AggregateStructure::new();
            for row in table.rows_in(start..start + chunk_size) {
                add_row(&mut structure, &row)?;
            }
            Ok(structure)
        })
        .collect();

    // Partials are in row order, so the first error is the earliest row.
    let mut merged = AggregateStructure::new();
    for partial in partials {
        merged.merge(partial?);
    }
    Ok(merged)
}

/// [`aggregate_partitioned`] with one partition per detected core.
pub fn aggregate_parallel(table: &ReviewTable) -> Result<AggregateStructure> {
    aggregate_partitioned(table, get_num_cores().get() as usize)
}

fn add_row(structure: &mut AggregateStructure, row: &ReviewRow<'_>) -> Result<()> {
    // Rating is only looked at once the row has produced a token.
    let mut row_bucket = None;
    for word in tokenize(row.comment) {
        let bucket = match row_bucket {
            Some(bucket) => bucket,
            None => *row_bucket.insert(bucket_for(row)?),
        };

        structure
            .word_entry_mut(word)
            .entry_mut(row.category)
            .increment(bucket);
    }
    Ok(())
}

fn bucket_for(row: &ReviewRow<'_>) -> Result<RatingBucket> {
    parse_rating(row.rating)
        .map(RatingBucket::from_rating)
        .ok_or_else(|| AggregationError::InvalidRating {
            row: row.index,
            value: row.rating.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn table(rows: &[(&str, &str, &str)]) -> ReviewTable {
        let mut table = ReviewTable::new();
        for (comment, category, rating) in rows {
            table.push_row(*comment, *category, *rating);
        }
        table
    }

    #[test]
    fn single_word_single_category() {
        let result = aggregate(&table(&[("great", "W", "4.0")])).unwrap();

        assert!(result.contains_word("great"));
        assert_eq!(result.counts("great", "W").counts(), [0, 0, 1]);
        assert_eq!(result.counts("great", "M").counts(), [0, 0, 0]);
        // Unobserved categories are not materialized.
        assert!(result.get("great").unwrap().get("M").is_none());
    }

    #[test]
    fn repeated_word_counts_every_occurrence() {
        let result = aggregate(&table(&[("great great great", "M", "4.0")])).unwrap();
        assert_eq!(result.counts("great", "M").counts(), [0, 0, 3]);
    }

    #[test]
    fn multiple_words_share_the_row_bucket() {
        let result = aggregate(&table(&[("great teacher", "M", "3.0")])).unwrap();
        assert_eq!(result.counts("great", "M").counts(), [0, 1, 0]);
        assert_eq!(result.counts("teacher", "M").counts(), [0, 1, 0]);
    }

    #[test]
    fn bucket_boundaries_are_medium() {
        let result = aggregate(&table(&[
            ("word1", "W", "2.5"),
            ("word2", "M", "3.5"),
            ("word3", "W", "3.6"),
        ]))
        .unwrap();

        assert_eq!(result.counts("word1", "W").counts(), [0, 1, 0]);
        assert_eq!(result.counts("word2", "M").counts(), [0, 1, 0]);
        assert_eq!(result.counts("word3", "W").counts(), [0, 0, 1]);
    }

    #[rstest(rating, expected,
        case("2.0", [1, 0, 0]),
        case("2.49999", [1, 0, 0]),
        case("3.0", [0, 1, 0]),
        case("3.50001", [0, 0, 1]),
        case("5", [0, 0, 1]),
        case(" 4.0 ", [0, 0, 1]),  // Surrounding whitespace is tolerated
        case("2.5e0", [0, 1, 0]),  // Exponent notation
        case("1E0", [1, 0, 0])
    )]
    fn rating_strings_bucket(rating: &str, expected: [u64; 3]) {
        let result = aggregate(&table(&[("word", "W", rating)])).unwrap();
        assert_eq!(result.counts("word", "W").counts(), expected);
    }

    #[rstest(rating,
        case("abc"),
        case(""),
        case("3,5"),  // Comma decimal separators are not numbers
        case("4 stars")
    )]
    fn invalid_rating_aborts(rating: &str) {
        let result = aggregate(&table(&[("fine", "W", "4.0"), ("great", "W", rating)]));
        assert_eq!(
            result,
            Err(AggregationError::InvalidRating {
                row: 1,
                value: rating.to_string()
            })
        );
    }

    #[test]
    fn invalid_rating_without_tokens_is_ignored() {
        let result = aggregate(&table(&[("   ", "W", "abc"), ("good", "M", "4")])).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.counts("good", "M").counts(), [0, 0, 1]);
    }

    #[test]
    fn empty_inputs_give_empty_structure() {
        assert!(aggregate(&ReviewTable::new()).unwrap().is_empty());
        assert!(aggregate(&table(&[("", "W", "4.0")])).unwrap().is_empty());
        assert!(aggregate(&table(&[(" \t\n ", "M", "1.0")]))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn whitespace_runs_do_not_create_empty_tokens() {
        let tokens: Vec<_> = tokenize("  great  teacher \t\n excellent ").collect();
        assert_eq!(tokens, ["great", "teacher", "excellent"]);

        let result = aggregate(&table(&[("great  teacher   excellent", "M", "4.0")])).unwrap();
        assert_eq!(result.len(), 3);
        assert!(!result.contains_word(""));
    }

    #[rstest(comment, expected,
        case("a\x1cb", vec!["a", "b"]),
        case("a\x1f\x1e b", vec!["a", "b"]),
        case("\x1d", vec![]),
        case("no\u{a0}break\u{2003}em", vec!["no", "break", "em"])
    )]
    fn information_separators_split_tokens(comment: &str, expected: Vec<&str>) {
        let tokens: Vec<_> = tokenize(comment).collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn tokens_are_case_sensitive_and_keep_punctuation() {
        let result = aggregate(&table(&[("Great great great!", "W", "4.0")])).unwrap();
        let words: Vec<_> = result.words().collect();
        assert_eq!(words, ["Great", "great", "great!"]);
    }

    #[test]
    fn categories_are_open_strings() {
        let result = aggregate(&table(&[
            ("nice", "W", "4"),
            ("nice", "X", "1"),
            ("nice", "", "3"),
        ]))
        .unwrap();

        let entry = result.get("nice").unwrap();
        let categories: Vec<_> = entry.categories().collect();
        assert_eq!(categories, ["", "W", "X"]);
        assert_eq!(entry.counts("X").counts(), [1, 0, 0]);
    }

    #[test]
    fn category_sum_equals_token_count() {
        let rows = [
            ("a b c", "W", "1"),
            ("a a", "M", "3"),
            ("", "W", "5"),
            ("c  d", "W", "4.5"),
        ];
        let result = aggregate(&table(&rows)).unwrap();

        for category in ["W", "M"] {
            let expected: usize = rows
                .iter()
                .filter(|(_, row_category, _)| *row_category == category)
                .map(|(comment, _, _)| tokenize(comment).count())
                .sum();
            assert_eq!(result.category_totals(category).total(), expected as u64);
        }
    }

    #[test]
    fn aggregation_is_deterministic() {
        let input = table(&[("b a c", "W", "1"), ("c b", "M", "4")]);
        let first = serde_json::to_string(&aggregate(&input).unwrap()).unwrap();
        let second = serde_json::to_string(&aggregate(&input).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[rstest(partitions, case(0), case(1), case(2), case(3), case(7), case(100))]
    fn partitioned_matches_sequential(partitions: usize) {
        let input = table(&[
            ("great teacher", "W", "4.0"),
            ("boring boring", "M", "2.0"),
            ("fair", "W", "3.0"),
            ("great", "M", "3.5"),
            ("", "W", "nope"),
            ("teacher great", "X", "2.5"),
            ("boring", "W", "1"),
        ]);

        let sequential = aggregate(&input).unwrap();
        let partitioned = aggregate_partitioned(&input, partitions).unwrap();
        assert_eq!(partitioned, sequential);
    }

    #[test]
    fn partitioned_reports_earliest_invalid_rating() {
        let input = table(&[
            ("a", "W", "1"),
            ("b", "W", "bad1"),
            ("c", "W", "2"),
            ("d", "W", "3"),
            ("e", "W", "bad4"),
        ]);

        let result = aggregate_partitioned(&input, 3);
        assert_eq!(
            result,
            Err(AggregationError::InvalidRating {
                row: 1,
                value: "bad1".to_string()
            })
        );
    }

    #[test]
    fn parallel_on_empty_table() {
        assert!(aggregate_parallel(&ReviewTable::new()).unwrap().is_empty());
    }
}
