//! Annotator adapter: runs the three backends and assembles a document

use super::{AnnotationError, Annotator, ErrorChecker, LexiconLookup};
use crate::document::{AnnotatedDocument, LexiconFact, Pos, RawText};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Default bound on any single backend call
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Turns a [`RawText`] into an [`AnnotatedDocument`].
///
/// Stateless per call; the backends are shared read-only between concurrent
/// documents. Every backend call is bounded by the configured timeout and a
/// timeout fails only the document being annotated.
#[derive(Clone)]
pub struct AnnotatorAdapter {
    annotator: Arc<dyn Annotator>,
    lexicon: Arc<dyn LexiconLookup>,
    checker: Arc<dyn ErrorChecker>,
    timeout: Duration,
}

impl AnnotatorAdapter {
    pub fn new(
        annotator: Arc<dyn Annotator>,
        lexicon: Arc<dyn LexiconLookup>,
        checker: Arc<dyn ErrorChecker>,
    ) -> Self {
        Self {
            annotator,
            lexicon,
            checker,
            timeout: DEFAULT_BACKEND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Annotate, look up content words, check errors, assemble.
    ///
    /// Annotation plus lexicon lookup runs alongside error checking.
    pub async fn annotate(&self, text: &RawText) -> Result<AnnotatedDocument, AnnotationError> {
        let structure = async {
            let annotation = bounded(
                self.annotator.id(),
                self.timeout,
                self.annotator.annotate(text),
            )
            .await?;
            let facts = self.lexicon_facts(&annotation.tokens).await?;
            Ok::<_, AnnotationError>((annotation, facts))
        };
        let errors = bounded(self.checker.id(), self.timeout, self.checker.check(text));

        let ((annotation, facts), errors) = tokio::try_join!(structure, errors)?;
        AnnotatedDocument::assemble(text, annotation, facts, errors)
    }

    /// One lookup per distinct (lemma, POS) among content words.
    async fn lexicon_facts(
        &self,
        tokens: &[crate::document::Token],
    ) -> Result<BTreeMap<usize, LexiconFact>, AnnotationError> {
        let mut query_index: HashMap<(String, Pos), usize> = HashMap::new();
        let mut queries: Vec<(String, Pos)> = Vec::new();
        let mut token_queries: Vec<(usize, usize)> = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            if !token.is_content_word() {
                continue;
            }
            let key = (token.lemma.clone(), token.pos);
            let q = *query_index.entry(key.clone()).or_insert_with(|| {
                queries.push(key);
                queries.len() - 1
            });
            token_queries.push((i, q));
        }

        if queries.is_empty() {
            return Ok(BTreeMap::new());
        }

        let entries = bounded(
            self.lexicon.id(),
            self.timeout,
            self.lexicon.lookup_many(&queries),
        )
        .await?;
        if entries.len() != queries.len() {
            return Err(AnnotationError::Malformed(format!(
                "lexicon '{}' answered {} of {} queries",
                self.lexicon.id(),
                entries.len(),
                queries.len()
            )));
        }

        Ok(token_queries
            .into_iter()
            .map(|(token, q)| (token, LexiconFact::from(entries[q].clone())))
            .collect())
    }
}

/// Await a backend call, mapping an elapsed timeout to [`AnnotationError::Timeout`].
async fn bounded<T, F>(stage: &str, timeout: Duration, call: F) -> Result<T, AnnotationError>
where
    F: Future<Output = Result<T, AnnotationError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(AnnotationError::Timeout {
            stage: stage.to_string(),
            after: timeout,
        }),
    }
}
