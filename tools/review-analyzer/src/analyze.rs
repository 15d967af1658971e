use crate::Args;
use bytesize::ByteSize;
use indicatif::{ProgressBar, ProgressStyle};
use review_word_stats::{
    aggregation::{aggregate, aggregate_parallel},
    common::{
        plots::{create_word_comparison_plot, create_word_plot, CategoryPlotter},
        report::{category_bucket_entries, format_bucket_table, format_word_table, top_words},
        AggregateStructure,
    },
    parsing::{load_table_with_schema, TableSchema},
    AnalysisError,
};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Instant;

type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>;

// Status lines go to stderr so that `--json` output can be piped.
pub fn analyze_reviews(args: &Args) -> Result<()> {
    let schema = schema_from_args(args);

    let started = Instant::now();
    let table = load_table_with_schema(&args.input, &schema).map_err(AnalysisError::from)?;
    let input_size = fs::metadata(&args.input).map(|m| m.len()).unwrap_or(0);
    eprintln!(
        "📥 Loaded {} rows ({}) from {} in {:.2?}",
        table.len(),
        ByteSize(input_size),
        args.input.display(),
        started.elapsed()
    );

    let started = Instant::now();
    let structure = if args.parallel {
        aggregate_parallel(&table)
    } else {
        aggregate(&table)
    }
    .map_err(AnalysisError::from)?;
    eprintln!(
        "📊 Aggregated {} distinct words in {:.2?}",
        structure.len(),
        started.elapsed()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&structure)?);
    } else {
        println!("{}", build_report(&structure, args.top));
    }

    if !args.words.is_empty() {
        plot_words(&structure, &args.words, &args.output)?;
    }

    Ok(())
}

fn schema_from_args(args: &Args) -> TableSchema {
    let mut schema = TableSchema::default();
    if let Some(column) = &args.comment_column {
        schema.comment_column = column.clone();
    }
    if let Some(column) = &args.category_column {
        schema.category_column = column.clone();
    }
    if let Some(column) = &args.rating_column {
        schema.rating_column = column.clone();
    }
    schema
}

/// Per-category bucket tables followed by the most used words.
fn build_report(structure: &AggregateStructure, top: usize) -> String {
    let mut sections: Vec<String> = structure
        .categories()
        .into_iter()
        .map(|category| {
            format_bucket_table(
                &category_bucket_entries(structure, category),
                Some(format!("Tokens by Rating ({})", category).as_str()),
            )
        })
        .collect();

    sections.push(format_word_table(
        &top_words(structure, top),
        Some(format!("Top {} Words", top).as_str()),
    ));

    sections.join("\n\n")
}

/// Writes one chart per category and a side by side comparison for every word.
fn plot_words(structure: &AggregateStructure, words: &[String], output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    let plotters = CategoryPlotter::for_structure(structure);
    let categories: Vec<&str> = plotters.iter().map(|p| p.category.as_str()).collect();

    let mut names = ChartNames::default();
    let progress = ProgressBar::new(words.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("🎨 [{bar:40}] {pos}/{len} {msg}")?.progress_chars("##-"),
    );

    for word in words {
        progress.set_message(word.clone());

        if !structure.contains_word(word) {
            progress.println(format!("⚠️  Skipping '{}': not found in the data", word));
            progress.inc(1);
            continue;
        }

        let max_frequency = structure.max_frequency(&[word.as_str()], categories.as_slice());
        for plotter in &plotters {
            let stem = format!("{}_{}", file_stem(word), file_stem(&plotter.category));
            let path = output_dir.join(names.claim(&stem, &progress));
            create_word_plot(structure, word, plotter, max_frequency, &path)
                .map_err(AnalysisError::from)?;
        }

        let stem = format!("{}_comparison", file_stem(word));
        let comparison = output_dir.join(names.claim(&stem, &progress));
        create_word_comparison_plot(structure, word, &plotters, &comparison)
            .map_err(AnalysisError::from)?;

        progress.inc(1);
    }

    progress.finish_with_message(format!("charts written to {}", output_dir.display()));
    Ok(())
}

/// Chart file names handed out during one run.
///
/// Different words can share a stem (`don't` and `don_t`); later charts get a numeric
/// suffix instead of overwriting earlier ones.
#[derive(Debug, Default)]
struct ChartNames {
    used: HashSet<String>,
}

impl ChartNames {
    fn claim(&mut self, stem: &str, progress: &ProgressBar) -> String {
        let mut name = format!("{}.png", stem);
        let mut suffix = 2;
        while !self.used.insert(name.clone()) {
            name = format!("{}_{}.png", stem, suffix);
            suffix += 1;
        }

        if suffix > 2 {
            progress.println(format!("⚠️  {}.png already written, using {}", stem, name));
        }
        name
    }
}

/// Makes a token safe to use as part of a file name.
fn file_stem(value: &str) -> String {
    let stem: String = value
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() {
        "_".to_string()
    } else {
        stem
    }
}
