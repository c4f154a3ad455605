//! Facts merged into a document from the lexicon and the error checker

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Concreteness class of a word sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concreteness {
    Concrete,
    Abstract,
}

/// What the lexical resource knows about one lemma
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    /// Number of senses listed for the lemma
    pub sense_count: u32,
    /// Normalised hierarchy depth in [0, 1]
    pub hierarchy_depth: f64,
    pub concreteness: Concreteness,
    /// Lemma naming the primary (first) sense
    pub primary_lemma: String,
}

/// Lookup outcome for one content token.
///
/// `Absent` is not an error: absent tokens are left out of lexical averages
/// rather than scored as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "entry", rename_all = "snake_case")]
pub enum LexiconFact {
    Known(LexiconEntry),
    Absent,
}

impl LexiconFact {
    pub fn entry(&self) -> Option<&LexiconEntry> {
        match self {
            Self::Known(entry) => Some(entry),
            Self::Absent => None,
        }
    }
}

impl From<Option<LexiconEntry>> for LexiconFact {
    fn from(value: Option<LexiconEntry>) -> Self {
        value.map_or(Self::Absent, Self::Known)
    }
}

/// Error category reported by an error checker
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Grammar,
    Spelling,
    Punctuation,
    Typography,
    Style,
    Other(String),
}

/// One detected writing error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedError {
    /// Byte offsets into the raw text
    pub span: Range<usize>,
    pub category: ErrorCategory,
    #[serde(default)]
    pub message: String,
}

impl DetectedError {
    pub fn new(span: Range<usize>, category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            span,
            category,
            message: message.into(),
        }
    }
}
