//! Linguistic backends
//!
//! Three collaborator capabilities feed a document: an [`Annotator`]
//! (tokens, sentences, dependency arcs), a [`LexiconLookup`] (sense counts,
//! hierarchy depth, concreteness) and an [`ErrorChecker`] (error spans).
//! Each is a trait with a deterministic built-in implementation and a set of
//! scripted test doubles in [`mock`]. The [`AnnotatorAdapter`] runs all three
//! under a timeout and assembles the immutable
//! [`AnnotatedDocument`](crate::document::AnnotatedDocument).

mod adapter;
mod checker;
mod lexicon;
pub mod mock;
pub mod rules;

pub use adapter::AnnotatorAdapter;
pub use checker::RuleErrorChecker;
pub use lexicon::InMemoryLexicon;
pub use rules::RuleBasedAnnotator;

use crate::document::{Annotation, DetectedError, LexiconEntry, Pos, RawText};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Why a text could not be turned into an annotated document.
///
/// Always scoped to one document: the batch records it on the row and moves on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnnotationError {
    #[error("text is empty after trimming")]
    EmptyText,

    #[error("unprocessable encoding: {0}")]
    Encoding(String),

    #[error("backend '{backend}' failed: {reason}")]
    Backend { backend: String, reason: String },

    #[error("{stage} timed out after {after:?}")]
    Timeout { stage: String, after: Duration },

    #[error("malformed annotation: {0}")]
    Malformed(String),
}

impl AnnotationError {
    pub fn backend(backend: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Backend {
            backend: backend.into(),
            reason: reason.into(),
        }
    }
}

/// Tokenization, sentence segmentation, tagging and dependency parsing
#[async_trait]
pub trait Annotator: Send + Sync {
    /// Identifier used in logs and error messages
    fn id(&self) -> &str;

    /// Annotate one text. Must fail rather than return an empty annotation
    /// for text it cannot process.
    async fn annotate(&self, text: &RawText) -> Result<Annotation, AnnotationError>;
}

/// Word-sense resource lookups
#[async_trait]
pub trait LexiconLookup: Send + Sync {
    fn id(&self) -> &str;

    /// Look up one lemma. `Ok(None)` means the resource does not list it.
    async fn lookup(&self, lemma: &str, pos: Pos) -> Result<Option<LexiconEntry>, AnnotationError>;

    /// Look up many lemmas, preserving order.
    ///
    /// Backends with a cheaper bulk path should override this.
    async fn lookup_many(
        &self,
        queries: &[(String, Pos)],
    ) -> Result<Vec<Option<LexiconEntry>>, AnnotationError> {
        let mut entries = Vec::with_capacity(queries.len());
        for (lemma, pos) in queries {
            entries.push(self.lookup(lemma, *pos).await?);
        }
        Ok(entries)
    }
}

/// Grammar and style checking
#[async_trait]
pub trait ErrorChecker: Send + Sync {
    fn id(&self) -> &str;

    /// Detected errors, ordered by position
    async fn check(&self, text: &RawText) -> Result<Vec<DetectedError>, AnnotationError>;
}

/// Run synchronous backend work on tokio's blocking pool.
///
/// The returned future yields while the work runs, so a surrounding
/// `tokio::time::timeout` can fire. Work abandoned by a timeout finishes in
/// the background and its result is dropped.
pub(crate) async fn run_blocking<T, F>(backend: &str, work: F) -> Result<T, AnnotationError>
where
    F: FnOnce() -> Result<T, AnnotationError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AnnotationError::backend(backend, format!("worker task failed: {}", e)))?
}
