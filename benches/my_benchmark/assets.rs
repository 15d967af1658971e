use fake::faker::lorem::en::Words;
use fake::rand::rngs::StdRng;
use fake::rand::{Rng, SeedableRng};
use fake::Fake;
use review_word_stats::parsing::ReviewTable;

const CATEGORIES: [&str; 2] = ["W", "M"];

/// Builds a table of `row_count` random reviews.
///
/// Seeded, so every run benchmarks the same data.
pub fn generate_review_table(row_count: usize) -> ReviewTable {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut table = ReviewTable::new();

    for _ in 0..row_count {
        let words: Vec<String> = Words(3..40).fake_with_rng(&mut rng);
        let category = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];
        let rating = rng.gen_range(2..=10) as f64 / 2.0;
        table.push_row(words.join(" "), category, format!("{:.1}", rating));
    }

    table
}
