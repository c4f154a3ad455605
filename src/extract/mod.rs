//! Feature extraction
//!
//! [`FeatureExtractor`] turns one text into one [`FeatureRecord`]: annotate,
//! then evaluate every registered indicator in order. It never returns an
//! error. An annotation failure becomes a record flagged as failed, with the
//! reason captured and every indicator missing, so batch callers keep going.
//!
//! [`BatchRunner`] fans a batch out over tokio tasks and collects the rows,
//! in input order, into a [`FeatureTable`].

mod batch;
mod record;

pub use batch::{BatchRunner, FeatureTable};
pub use record::{FeatureRecord, IndicatorResult, FAILED_COLUMN, ID_COLUMN, REASON_FIELD};

use crate::backend::{
    AnnotationError, AnnotatorAdapter, InMemoryLexicon, RuleBasedAnnotator, RuleErrorChecker,
};
use crate::config::{ExtractorConfig, SetupError, SetupResult};
use crate::document::{AnnotatedDocument, RawText};
use crate::indicators::IndicatorRegistry;
use crate::resources::IndicatorResources;
use std::sync::Arc;
use tracing::{debug, warn};

/// Computes feature records; cheap to clone and share between tasks
#[derive(Clone)]
pub struct FeatureExtractor {
    adapter: AnnotatorAdapter,
    registry: Arc<IndicatorRegistry>,
    resources: Arc<IndicatorResources>,
    column_prefix: String,
}

impl FeatureExtractor {
    /// Extractor over the standard indicator registry
    pub fn new(adapter: AnnotatorAdapter, resources: IndicatorResources) -> Self {
        Self {
            adapter,
            registry: Arc::new(IndicatorRegistry::standard()),
            resources: Arc::new(resources),
            column_prefix: String::new(),
        }
    }

    /// Extractor over the built-in backends, with resources and limits from `config`
    pub fn builtin(config: &ExtractorConfig) -> SetupResult<Self> {
        let lexicon = match &config.lexicon_path {
            Some(path) => InMemoryLexicon::from_path(path)?,
            None => InMemoryLexicon::builtin()?,
        };
        let adapter = AnnotatorAdapter::new(
            Arc::new(RuleBasedAnnotator::new()),
            Arc::new(lexicon),
            Arc::new(RuleErrorChecker::new()?),
        )
        .with_timeout(config.timeout());

        let resources = IndicatorResources::from_config(config)?;
        Ok(Self::new(adapter, resources).with_column_prefix(config.column_prefix.clone()))
    }

    /// Replace the indicator registry. An empty registry has no columns to extract.
    pub fn with_registry(mut self, registry: IndicatorRegistry) -> SetupResult<Self> {
        if registry.is_empty() {
            return Err(SetupError::Schema("registry has no indicators".to_string()));
        }
        self.registry = Arc::new(registry);
        Ok(self)
    }

    pub fn with_column_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.column_prefix = prefix.into();
        self
    }

    pub fn registry(&self) -> &IndicatorRegistry {
        &self.registry
    }

    pub fn resources(&self) -> &IndicatorResources {
        &self.resources
    }

    pub fn column_prefix(&self) -> &str {
        &self.column_prefix
    }

    /// Table columns: `P_id`, `extraction_failed`, then the prefixed indicator names
    pub fn columns(&self) -> Vec<String> {
        let mut columns = vec![ID_COLUMN.to_string(), FAILED_COLUMN.to_string()];
        columns.extend(
            self.registry
                .names()
                .into_iter()
                .map(|name| format!("{}{}", self.column_prefix, name)),
        );
        columns
    }

    /// Extract a single text; its row identifier is `1`
    pub async fn extract(&self, text: &str) -> FeatureRecord {
        self.extract_with_id("1", text).await
    }

    pub async fn extract_with_id(&self, p_id: impl Into<String>, text: &str) -> FeatureRecord {
        self.run(p_id.into(), RawText::new(text)).await
    }

    /// Extract from raw bytes; invalid UTF-8 fails this record only
    pub async fn extract_bytes(&self, p_id: impl Into<String>, bytes: &[u8]) -> FeatureRecord {
        self.run(p_id.into(), RawText::from_bytes(bytes)).await
    }

    async fn run(&self, p_id: String, text: Result<RawText, AnnotationError>) -> FeatureRecord {
        let annotated = match text {
            Ok(text) => self.adapter.annotate(&text).await,
            Err(e) => Err(e),
        };
        match annotated {
            Ok(doc) => self.compute(p_id, &doc),
            Err(e) => {
                warn!(p_id = %p_id, error = %e, "extraction failed");
                self.failed(p_id, e.to_string())
            }
        }
    }

    /// Evaluate every registered indicator over an annotated document
    pub fn compute(&self, p_id: impl Into<String>, doc: &AnnotatedDocument) -> FeatureRecord {
        let p_id = p_id.into();
        let results = self
            .registry
            .evaluate(doc, &self.resources)
            .iter()
            .map(|(indicator, value)| IndicatorResult::new(indicator, *value))
            .collect::<Vec<_>>();

        debug!(
            p_id = %p_id,
            words = doc.word_count(),
            sentences = doc.sentence_count(),
            missing = results.iter().filter(|r| r.is_missing()).count(),
            "extracted features"
        );
        FeatureRecord::success(p_id, results).with_column_prefix(self.column_prefix.clone())
    }

    /// A failed row with every indicator missing
    pub fn failed(&self, p_id: impl Into<String>, reason: impl Into<String>) -> FeatureRecord {
        FeatureRecord::failed(p_id, self.registry.indicators(), reason)
            .with_column_prefix(self.column_prefix.clone())
    }
}
