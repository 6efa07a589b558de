//! Corpus: category key -> ordered quote sequence

use super::entities::QuoteRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category used when explicit category filtering matches nothing
pub const DEFAULT_CATEGORY: &str = "a";

/// Read-only mapping from category key to its quotes (Value Object)
///
/// A corpus is never mutated once handed out; resolution builds a new one.
/// Keys iterate in sorted order so random category picks are reproducible
/// under a seeded generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    categories: BTreeMap<String, Vec<QuoteRecord>>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a category while building
    pub fn with_category(mut self, key: impl Into<String>, quotes: Vec<QuoteRecord>) -> Self {
        self.categories.insert(key.into(), quotes);
        self
    }

    pub fn get(&self, key: &str) -> Option<&[QuoteRecord]> {
        self.categories.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.categories.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[QuoteRecord])> {
        self.categories
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of quotes across every category
    pub fn quote_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Every quote, categories in key order
    pub fn flatten(&self) -> Vec<&QuoteRecord> {
        self.categories.values().flatten().collect()
    }
}

impl FromIterator<(String, Vec<QuoteRecord>)> for Corpus {
    fn from_iter<I: IntoIterator<Item = (String, Vec<QuoteRecord>)>>(iter: I) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}
