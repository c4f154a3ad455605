//! Deterministic test doubles for the backend traits
//!
//! - `ScriptedAnnotator`: returns preconfigured annotations per text
//! - `FailingAnnotator` / `DelayedAnnotator`: failure and timeout paths
//! - `StaticLexicon`: in-memory entries with a lookup counter
//! - `ScriptedErrorChecker`: returns a fixed error list

use super::{AnnotationError, Annotator, ErrorChecker, LexiconLookup};
use crate::document::{
    Annotation, Concreteness, DepEdge, DetectedError, LexiconEntry, Pos, RawText, Tense, Token,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Annotator returning scripted output.
///
/// Texts with a registered script get that annotation; anything else gets
/// the default, or a backend error when no default is set.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAnnotator {
    scripts: HashMap<String, Annotation>,
    default: Option<Annotation>,
}

impl ScriptedAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer with `annotation`
    pub fn always(annotation: Annotation) -> Self {
        Self {
            scripts: HashMap::new(),
            default: Some(annotation),
        }
    }

    /// Build a default annotation from `(surface, POS label)` pairs, one
    /// slice per sentence. A label suffix `:past` marks past tense.
    pub fn from_words(sentences: &[&[(&str, &str)]]) -> Self {
        Self::always(annotation_from_words(sentences, Vec::new()))
    }

    pub fn with_script(mut self, text: impl Into<String>, annotation: Annotation) -> Self {
        self.scripts.insert(text.into(), annotation);
        self
    }
}

/// Lay out `(surface, POS)` pairs as space-separated text and annotate them.
///
/// Lemmas are the lower-cased surface forms. `edges` index into the
/// flattened token sequence.
pub fn annotation_from_words(sentences: &[&[(&str, &str)]], edges: Vec<DepEdge>) -> Annotation {
    let mut tokens = Vec::new();
    let mut ranges = Vec::new();
    let mut offset = 0;

    for sentence in sentences {
        let start = tokens.len();
        for (surface, label) in sentence.iter() {
            let (pos_label, past) = match label.strip_suffix(":past") {
                Some(base) => (base, true),
                None => (*label, false),
            };
            let mut token = Token::new(
                *surface,
                surface.to_lowercase(),
                Pos::from_label(pos_label),
                offset..offset + surface.len(),
            );
            if past {
                token = token.with_tense(Tense::Past);
            }
            tokens.push(token);
            offset += surface.len() + 1;
        }
        ranges.push(start..tokens.len());
    }

    Annotation {
        tokens,
        sentences: ranges,
        edges,
    }
}

#[async_trait]
impl Annotator for ScriptedAnnotator {
    fn id(&self) -> &str {
        "scripted-annotator"
    }

    async fn annotate(&self, text: &RawText) -> Result<Annotation, AnnotationError> {
        self.scripts
            .get(text.as_str())
            .or(self.default.as_ref())
            .cloned()
            .ok_or_else(|| AnnotationError::backend(self.id(), "no script for text"))
    }
}

/// Annotator that always fails
#[derive(Debug, Clone)]
pub struct FailingAnnotator {
    reason: String,
}

impl FailingAnnotator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Annotator for FailingAnnotator {
    fn id(&self) -> &str {
        "failing-annotator"
    }

    async fn annotate(&self, _text: &RawText) -> Result<Annotation, AnnotationError> {
        Err(AnnotationError::backend(self.id(), self.reason.clone()))
    }
}

/// Wraps an annotator and sleeps before answering
pub struct DelayedAnnotator<A> {
    inner: A,
    delay: Duration,
}

impl<A: Annotator> DelayedAnnotator<A> {
    pub fn new(inner: A, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl<A: Annotator> Annotator for DelayedAnnotator<A> {
    fn id(&self) -> &str {
        "delayed-annotator"
    }

    async fn annotate(&self, text: &RawText) -> Result<Annotation, AnnotationError> {
        tokio::time::sleep(self.delay).await;
        self.inner.annotate(text).await
    }
}

/// In-memory lexicon keyed by lemma, counting lookups
#[derive(Debug, Default)]
pub struct StaticLexicon {
    entries: HashMap<String, LexiconEntry>,
    lookups: AtomicUsize,
}

impl StaticLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(
        mut self,
        lemma: &str,
        sense_count: u32,
        hierarchy_depth: f64,
        concreteness: Concreteness,
        primary_lemma: &str,
    ) -> Self {
        self.entries.insert(
            lemma.to_string(),
            LexiconEntry {
                sense_count,
                hierarchy_depth,
                concreteness,
                primary_lemma: primary_lemma.to_string(),
            },
        );
        self
    }

    /// Number of single lookups served so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl LexiconLookup for StaticLexicon {
    fn id(&self) -> &str {
        "static-lexicon"
    }

    async fn lookup(&self, lemma: &str, _pos: Pos) -> Result<Option<LexiconEntry>, AnnotationError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.entries.get(lemma).cloned())
    }
}

/// Error checker returning a fixed list
#[derive(Debug, Clone, Default)]
pub struct ScriptedErrorChecker {
    errors: Vec<DetectedError>,
}

impl ScriptedErrorChecker {
    pub fn new(errors: Vec<DetectedError>) -> Self {
        Self { errors }
    }
}

#[async_trait]
impl ErrorChecker for ScriptedErrorChecker {
    fn id(&self) -> &str {
        "scripted-error-checker"
    }

    async fn check(&self, _text: &RawText) -> Result<Vec<DetectedError>, AnnotationError> {
        Ok(self.errors.clone())
    }
}
