use crate::common::buckets::FrequencyVector;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Per-category counters for a single word.
///
/// Categories only appear once they have been observed alongside the word;
/// a missing category means all of its counts are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordEntry(BTreeMap<String, FrequencyVector>);

impl WordEntry {
    /// Counters for a category, if that category has been seen for this word.
    pub fn get(&self, category: &str) -> Option<&FrequencyVector> {
        self.0.get(category)
    }

    /// Counters for a category, treating an unseen category as all zeros.
    pub fn counts(&self, category: &str) -> FrequencyVector {
        self.0.get(category).copied().unwrap_or_default()
    }

    /// Counters for a category, creating a zeroed vector on first access.
    pub fn entry_mut(&mut self, category: &str) -> &mut FrequencyVector {
        self.0.entry(category.to_owned()).or_default()
    }

    /// Categories observed for this word, in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(category, counters)` pairs in sorted category order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrequencyVector)> {
        self.0.iter().map(|(category, vector)| (category.as_str(), vector))
    }

    /// Total occurrences of the word across all categories and buckets.
    pub fn total(&self) -> u64 {
        self.0.values().map(FrequencyVector::total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Adds every counter of `other` into this entry.
    pub fn merge(&mut self, other: &WordEntry) {
        for (category, vector) in &other.0 {
            self.entry_mut(category).merge(vector);
        }
    }

    pub fn as_map(&self) -> &BTreeMap<String, FrequencyVector> {
        &self.0
    }
}

/// Word usage counts keyed by word, then by category label.
///
/// Produced by [`aggregate`](crate::aggregation::aggregate) and read-only for
/// everything downstream of it. Serializes as the plain nested mapping
/// `{ word: { category: [low, medium, high] } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateStructure(BTreeMap<String, WordEntry>);

impl AggregateStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.0.contains_key(word)
    }

    pub fn get(&self, word: &str) -> Option<&WordEntry> {
        self.0.get(word)
    }

    /// Counters for `word` in `category`; unknown words and categories read as zeros.
    pub fn counts(&self, word: &str, category: &str) -> FrequencyVector {
        self.0
            .get(word)
            .map(|entry| entry.counts(category))
            .unwrap_or_default()
    }

    /// Entry for `word`, inserting an empty one if the word is new.
    pub(crate) fn word_entry_mut(&mut self, word: &str) -> &mut WordEntry {
        self.0.entry(word.to_owned()).or_default()
    }

    /// All words in sorted order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(word, entry)` pairs in sorted word order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WordEntry)> {
        self.0.iter().map(|(word, entry)| (word.as_str(), entry))
    }

    /// Every category label seen anywhere in the structure, sorted.
    pub fn categories(&self) -> BTreeSet<&str> {
        self.0.values().flat_map(WordEntry::categories).collect()
    }

    /// Largest single bucket count among the given words and categories.
    ///
    /// Used to put several charts on a common y axis.
    pub fn max_frequency<W, C>(&self, words: &[W], categories: &[C]) -> u64
    where
        W: AsRef<str>,
        C: AsRef<str>,
    {
        words
            .iter()
            .flat_map(|word| {
                categories
                    .iter()
                    .map(move |category| self.counts(word.as_ref(), category.as_ref()).max())
            })
            .max()
            .unwrap_or(0)
    }

    /// Per-bucket sums of all words for a single category.
    pub fn category_totals(&self, category: &str) -> FrequencyVector {
        let mut totals = FrequencyVector::default();
        for entry in self.0.values() {
            if let Some(vector) = entry.get(category) {
                totals.merge(vector);
            }
        }
        totals
    }

    /// Adds every counter of `other` into this structure.
    pub fn merge(&mut self, other: AggregateStructure) {
        for (word, entry) in other.0 {
            match self.0.get_mut(&word) {
                Some(existing) => existing.merge(&entry),
                None => {
                    self.0.insert(word, entry);
                }
            }
        }
    }

    /// Borrow the plain nested mapping.
    pub fn as_map(&self) -> &BTreeMap<String, WordEntry> {
        &self.0
    }

    /// Take ownership of the plain nested mapping.
    pub fn into_inner(self) -> BTreeMap<String, WordEntry> {
        self.0
    }
}
