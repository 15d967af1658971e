//! File parsing functionality for review exports
//!
//! This module handles loading a comma separated review file into a [`ReviewTable`],
//! keeping only the comment, category and rating columns. Values are kept as raw strings;
//! ratings are validated later by the aggregation engine.

use crate::common::constants::{COMMENT_TEXT_COLUMN, PROFESSOR_GENDER_COLUMN, RATING_COLUMN};
use csv::{ReaderBuilder, StringRecord};
use derive_new::new;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file parsing
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("Failed to open input file {}: {source}", .path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Required column '{column}' is missing from the header")]
    Schema { column: String },

    #[error("Failed to read delimited data: {0}")]
    Csv(#[from] csv::Error),
}

type Result<T> = core::result::Result<T, ParsingError>;

/// Names of the three columns the aggregation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub comment_column: String,
    pub category_column: String,
    pub rating_column: String,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            comment_column: COMMENT_TEXT_COLUMN.to_string(),
            category_column: PROFESSOR_GENDER_COLUMN.to_string(),
            rating_column: RATING_COLUMN.to_string(),
        }
    }
}

/// A single row of a [`ReviewTable`], borrowed from the table.
#[derive(new, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewRow<'a> {
    /// Zero based row index (header excluded).
    pub index: usize,
    pub comment: &'a str,
    pub category: &'a str,
    /// Rating exactly as it appeared in the file.
    pub rating: &'a str,
}

/// In-memory review data as three index-aligned columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewTable {
    comments: Vec<String>,
    categories: Vec<String>,
    ratings: Vec<String>,
}

impl ReviewTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from already separated columns.
    ///
    /// Shorter columns are padded with empty strings so that all three stay aligned.
    pub fn from_columns(
        mut comments: Vec<String>,
        mut categories: Vec<String>,
        mut ratings: Vec<String>,
    ) -> Self {
        let rows = comments.len().max(categories.len()).max(ratings.len());
        comments.resize(rows, String::new());
        categories.resize(rows, String::new());
        ratings.resize(rows, String::new());
        Self {
            comments,
            categories,
            ratings,
        }
    }

    /// Parses delimited data from any reader.
    ///
    /// The first record must be a header naming every column in `schema`; other columns are ignored.
    pub fn from_reader<R: Read>(reader: R, schema: &TableSchema) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let comment_idx = column_index(&headers, &schema.comment_column)?;
        let category_idx = column_index(&headers, &schema.category_column)?;
        let rating_idx = column_index(&headers, &schema.rating_column)?;

        let mut table = Self::new();
        for record in reader.records() {
            let record = record?;
            let field = |idx: usize| record.get(idx).unwrap_or_default();
            table.push_row(field(comment_idx), field(category_idx), field(rating_idx));
        }

        Ok(table)
    }

    /// Appends a row to the end of the table.
    pub fn push_row(
        &mut self,
        comment: impl Into<String>,
        category: impl Into<String>,
        rating: impl Into<String>,
    ) {
        self.comments.push(comment.into());
        self.categories.push(category.into());
        self.ratings.push(rating.into());
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn ratings(&self) -> &[String] {
        &self.ratings
    }

    /// Row at `index`, if in range.
    pub fn row(&self, index: usize) -> Option<ReviewRow<'_>> {
        Some(ReviewRow::new(
            index,
            self.comments.get(index)?,
            self.categories.get(index)?,
            self.ratings.get(index)?,
        ))
    }

    /// Rows in file order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = ReviewRow<'_>> {
        self.rows_in(0..self.len())
    }

    /// Rows within `range`, clamped to the table.
    pub fn rows_in(
        &self,
        range: std::ops::Range<usize>,
    ) -> impl ExactSizeIterator<Item = ReviewRow<'_>> {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        (start..end).map(move |index| {
            ReviewRow::new(
                index,
                &self.comments[index],
                &self.categories[index],
                &self.ratings[index],
            )
        })
    }
}

fn column_index(headers: &StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| ParsingError::Schema {
            column: column.to_string(),
        })
}

/// Loads a review file from disk using the default column names.
///
/// # Arguments
/// * `file_path` - Path to the comma separated review export
///
/// # Returns
/// * `Ok(ReviewTable)` - The comment, category and rating columns
/// * `Err(ParsingError)` - If the file is missing, lacks a required column or is malformed
pub fn load_table(file_path: &Path) -> Result<ReviewTable> {
    load_table_with_schema(file_path, &TableSchema::default())
}

/// Loads a review file from disk, looking up columns by the names in `schema`.
pub fn load_table_with_schema(file_path: &Path, schema: &TableSchema) -> Result<ReviewTable> {
    let file = open_regular_file(file_path).map_err(|source| ParsingError::SourceNotFound {
        path: file_path.to_path_buf(),
        source,
    })?;

    ReviewTable::from_reader(file, schema)
}

// Opening a directory succeeds on some platforms; reading it does not.
fn open_regular_file(file_path: &Path) -> io::Result<File> {
    let file = File::open(file_path)?;
    if !file.metadata()?.is_file() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
    }
    Ok(file)
}
