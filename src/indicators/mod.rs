//! Indicator library
//!
//! Thirty pure functions, one per feature column, grouped into nine
//! categories. Each reads an immutable [`AnnotatedDocument`] plus the shared
//! [`IndicatorResources`] and returns one `f64`. Structurally undefined
//! values (a zero denominator) are `NaN`, never an error and never 0.
//!
//! # Schema
//!
//! [`IndicatorRegistry::standard`] lists every indicator in [`SCHEMA`] order.
//! That order is the public column contract of the feature table and is
//! independent of how the category modules are laid out.

mod accuracy;
mod argumentation;
mod clausal;
mod cohesion;
mod lexical;
mod readability;
mod surface;
mod syntactic;
mod variability;

pub use readability::{
    GRADE_EASE_FLOOR, GRADE_EASE_SPAN, NARRATIVITY_WEIGHTS, TEXT_EASE_WEIGHTS,
};
pub use surface::COMPLEX_SENTENCE_WORDS;
pub use syntactic::SIMPLICITY_SCALE;

use crate::document::AnnotatedDocument;
use crate::resources::IndicatorResources;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Indicator columns in schema order
pub const SCHEMA: [&str; 30] = [
    "word_count",
    "avg_sentence_length",
    "num_complex_sentences",
    "lexical_diversity",
    "vocabulary_sophistication",
    "polysemy_word",
    "word_concreteness",
    "bigram_count",
    "bigram_diversity",
    "sentence_type_diversity",
    "syntactic_simplicity",
    "information_density",
    "adj_noun_pairs",
    "error_count",
    "context_sensitive_count",
    "flesch_kincaid_grade_level",
    "text_ease",
    "narrativity_score",
    "referential_cohesion",
    "deep_cohesion",
    "word_length_variance",
    "syllable_variance",
    "num_t_units",
    "mean_length_t_unit",
    "t_units_per_sentence",
    "dependent_clauses_per_t_unit",
    "argumentative_indicators",
    "argumentation_completeness",
    "argumentation_balance",
    "argumentation_score",
];

/// Indicator category, in schema order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Surface,
    Lexical,
    Syntactic,
    Accuracy,
    Readability,
    Cohesion,
    Variability,
    Clausal,
    Argumentation,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Self::Surface,
        Self::Lexical,
        Self::Syntactic,
        Self::Accuracy,
        Self::Readability,
        Self::Cohesion,
        Self::Variability,
        Self::Clausal,
        Self::Argumentation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Surface => "surface",
            Self::Lexical => "lexical",
            Self::Syntactic => "syntactic",
            Self::Accuracy => "accuracy",
            Self::Readability => "readability",
            Self::Cohesion => "cohesion",
            Self::Variability => "variability",
            Self::Clausal => "clausal",
            Self::Argumentation => "argumentation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signature shared by every indicator
pub type ComputeFn = fn(&AnnotatedDocument, &IndicatorResources) -> f64;

/// A named, categorised pure function over a document
#[derive(Clone, Copy)]
pub struct Indicator {
    name: &'static str,
    category: Category,
    compute: ComputeFn,
}

impl Indicator {
    pub const fn new(name: &'static str, category: Category, compute: ComputeFn) -> Self {
        Self {
            name,
            category,
            compute,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn compute(&self, doc: &AnnotatedDocument, resources: &IndicatorResources) -> f64 {
        (self.compute)(doc, resources)
    }
}

impl fmt::Debug for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Indicator")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish()
    }
}

/// Ordered registry of indicators
#[derive(Debug, Clone)]
pub struct IndicatorRegistry {
    indicators: Vec<Indicator>,
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl IndicatorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            indicators: Vec::new(),
        }
    }

    /// Every built-in indicator, in [`SCHEMA`] order
    pub fn standard() -> Self {
        let indicators = surface::INDICATORS
            .iter()
            .chain(lexical::INDICATORS.iter())
            .chain(syntactic::INDICATORS.iter())
            .chain(accuracy::INDICATORS.iter())
            .chain(readability::INDICATORS.iter())
            .chain(cohesion::INDICATORS.iter())
            .chain(variability::INDICATORS.iter())
            .chain(clausal::INDICATORS.iter())
            .chain(argumentation::INDICATORS.iter())
            .copied()
            .collect();
        Self { indicators }
    }

    /// Append an indicator; registration order is column order.
    ///
    /// Returns `false` (and registers nothing) when the name is taken.
    pub fn register(&mut self, indicator: Indicator) -> bool {
        if self.get(indicator.name).is_some() {
            return false;
        }
        self.indicators.push(indicator);
        true
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    /// Column names in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.indicators.iter().map(|i| i.name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Indicator> {
        self.indicators.iter().find(|i| i.name == name)
    }

    pub fn by_category(&self, category: Category) -> Vec<&Indicator> {
        self.indicators
            .iter()
            .filter(|i| i.category == category)
            .collect()
    }

    /// Evaluate every indicator in order
    pub fn evaluate(&self, doc: &AnnotatedDocument, resources: &IndicatorResources) -> Vec<(Indicator, f64)> {
        self.indicators
            .iter()
            .map(|indicator| (*indicator, indicator.compute(doc, resources)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }
}

/// `numerator / denominator`, NaN when the denominator is zero
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        f64::NAN
    } else {
        numerator / denominator
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    ratio(values.iter().sum(), values.len() as f64)
}

/// Population variance; NaN for an empty sample
pub(crate) fn population_variance(values: &[f64]) -> f64 {
    let mu = mean(values);
    ratio(
        values.iter().map(|v| (v - mu).powi(2)).sum(),
        values.len() as f64,
    )
}

/// Estimated syllable count of one word.
///
/// Counts groups of consecutive vowels (`aeiouy`). Words of three letters or
/// fewer have one syllable, a silent trailing `e` is dropped when the word
/// has more than one group, and every word has at least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() <= 3 {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0;
    let mut previous_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }

    if letters.last() == Some(&'e') && count > 1 {
        count -= 1;
    }
    count.max(1)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_matches_schema() {
        let registry = IndicatorRegistry::standard();
        assert_eq!(registry.names(), SCHEMA.to_vec());
        assert_eq!(registry.len(), 30);
    }

    #[test]
    fn test_categories_are_contiguous_and_ordered() {
        let registry = IndicatorRegistry::standard();
        let mut seen: Vec<Category> = Vec::new();
        for indicator in registry.indicators() {
            if seen.last() != Some(&indicator.category()) {
                assert!(!seen.contains(&indicator.category()));
                seen.push(indicator.category());
            }
        }
        assert_eq!(seen, Category::ALL.to_vec());
        assert_eq!(registry.by_category(Category::Clausal).len(), 4);
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = IndicatorRegistry::new();
        let word_count = *IndicatorRegistry::standard().get("word_count").unwrap();
        assert!(registry.register(word_count));
        assert!(!registry.register(word_count));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_ratio_and_variance() {
        assert!(ratio(1.0, 0.0).is_nan());
        assert_eq!(ratio(3.0, 2.0), 1.5);
        assert!(population_variance(&[]).is_nan());
        assert_eq!(population_variance(&[2.0, 4.0]), 1.0);
    }

    #[test]
    fn test_syllables() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("happy"), 2);
        assert_eq!(count_syllables("beautiful"), 3);
        assert_eq!(count_syllables("readability"), 5);
        assert_eq!(count_syllables("free"), 1);
        assert_eq!(count_syllables("agree"), 1);
        assert_eq!(count_syllables("argue"), 1);
    }
}
