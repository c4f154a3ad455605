//! Annotated document model
//!
//! An [`AnnotatedDocument`] is the read-only view of one text after the
//! annotator, lexicon and error checker have run. It is assembled exactly
//! once per text; derived structures (sentence types, T-units) are computed
//! during assembly and never change afterwards, so indicators can read a
//! document from any number of threads.

mod facts;
mod syntax;
mod token;
mod tunit;


pub use facts::{Concreteness, DetectedError, ErrorCategory, LexiconEntry, LexiconFact};
pub use syntax::{classify_sentence, DepEdge, DepRelation, Sentence, SentenceType};
pub use token::{Pos, Tense, Token};
pub use tunit::{derive_t_units, ClauseKind, TUnit};

use crate::backend::AnnotationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;

/// The unit of analysis: a text that is non-empty after trimming
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawText(String);

impl RawText {
    pub fn new(text: impl Into<String>) -> Result<Self, AnnotationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AnnotationError::EmptyText);
        }
        Ok(Self(text))
    }

    /// Decode UTF-8 bytes; invalid sequences are an encoding failure.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AnnotationError> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            AnnotationError::Encoding(format!("invalid UTF-8 at byte {}", e.valid_up_to()))
        })?;
        Self::new(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RawText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Raw annotator output, before validation and derivation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub tokens: Vec<Token>,
    /// Sentence boundaries as token index ranges
    pub sentences: Vec<Range<usize>>,
    pub edges: Vec<DepEdge>,
}

/// Immutable, fully annotated view of one text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedDocument {
    text: String,
    tokens: Vec<Token>,
    sentences: Vec<Sentence>,
    edges: Vec<DepEdge>,
    t_units: Vec<TUnit>,
    errors: Vec<DetectedError>,
    lexicon_facts: BTreeMap<usize, LexiconFact>,
}

impl AnnotatedDocument {
    /// Validate backend output and derive the cached structures.
    ///
    /// Fails with [`AnnotationError::Malformed`] when sentence ranges or arcs
    /// point outside the token sequence, or sentences overlap.
    pub fn assemble(
        text: &RawText,
        annotation: Annotation,
        lexicon_facts: BTreeMap<usize, LexiconFact>,
        mut errors: Vec<DetectedError>,
    ) -> Result<Self, AnnotationError> {
        let Annotation {
            tokens,
            sentences,
            edges,
        } = annotation;
        let n = tokens.len();

        let mut previous_end = 0;
        for range in &sentences {
            if range.start > range.end || range.end > n {
                return Err(AnnotationError::Malformed(format!(
                    "sentence {:?} outside {} tokens",
                    range, n
                )));
            }
            if range.start < previous_end {
                return Err(AnnotationError::Malformed(format!(
                    "sentence {:?} overlaps previous sentence",
                    range
                )));
            }
            previous_end = range.end;
        }
        if let Some(edge) = edges.iter().find(|e| e.head >= n || e.dependent >= n) {
            return Err(AnnotationError::Malformed(format!(
                "arc {} -> {} outside {} tokens",
                edge.head, edge.dependent, n
            )));
        }
        if let Some(index) = lexicon_facts.keys().find(|&&i| i >= n) {
            return Err(AnnotationError::Malformed(format!(
                "lexicon fact for missing token {}",
                index
            )));
        }

        // Arcs bucketed by the sentence holding their dependent
        let mut sentence_arcs: Vec<Vec<DepEdge>> = vec![Vec::new(); sentences.len()];
        for edge in &edges {
            let s = sentences.partition_point(|r| r.end <= edge.dependent);
            if sentences.get(s).is_some_and(|r| r.contains(&edge.dependent)) {
                sentence_arcs[s].push(edge.clone());
            }
        }
        let sentences: Vec<Sentence> = sentences
            .into_iter()
            .zip(sentence_arcs)
            .map(|(range, arcs)| Sentence {
                kind: classify_sentence(&tokens, &range, &arcs),
                tokens: range,
            })
            .collect();
        let t_units = derive_t_units(&tokens, &sentences, &edges);
        errors.sort_by_key(|e| (e.span.start, e.span.end));

        Ok(Self {
            text: text.as_str().to_string(),
            tokens,
            sentences,
            edges,
            t_units,
            errors,
            lexicon_facts,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn edges(&self) -> &[DepEdge] {
        &self.edges
    }

    pub fn t_units(&self) -> &[TUnit] {
        &self.t_units
    }

    pub fn errors(&self) -> &[DetectedError] {
        &self.errors
    }

    pub fn lexicon_facts(&self) -> &BTreeMap<usize, LexiconFact> {
        &self.lexicon_facts
    }

    /// Alphabetic tokens, in order
    pub fn words(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(|t| t.is_word())
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn sentence_tokens(&self, sentence: &Sentence) -> &[Token] {
        &self.tokens[sentence.tokens.clone()]
    }

    pub fn sentence_word_count(&self, sentence: &Sentence) -> usize {
        self.sentence_tokens(sentence).iter().filter(|t| t.is_word()).count()
    }

    /// Content words with their token index
    pub fn content_tokens(&self) -> impl Iterator<Item = (usize, &Token)> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_content_word())
    }

    /// Content tokens the lexicon knows, with their entry
    pub fn known_entries(&self) -> impl Iterator<Item = (&Token, &LexiconEntry)> + '_ {
        self.lexicon_facts
            .iter()
            .filter_map(|(&i, fact)| fact.entry().map(|entry| (&self.tokens[i], entry)))
    }
}
