//! Batch runner and feature table

use super::{FeatureExtractor, FeatureRecord};
use serde::{Serialize, Serializer};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Runs a [`FeatureExtractor`] over many texts with bounded concurrency.
///
/// Documents are independent: each task owns its text and its annotated
/// document. Rows come back in input order whatever order tasks finish in.
#[derive(Clone)]
pub struct BatchRunner {
    extractor: FeatureExtractor,
    /// Semaphore size bounding in-flight documents
    max_concurrency: usize,
}

impl BatchRunner {
    pub fn new(extractor: FeatureExtractor) -> Self {
        Self {
            extractor,
            max_concurrency: 4,
        }
    }

    /// Create with a specific document concurrency limit (at least 1)
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = limit.max(1);
        self
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Extract every text; row identifiers are 1-based input positions
    pub async fn extract_batch<I, T>(&self, texts: I) -> FeatureTable
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let rows = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| ((i + 1).to_string(), text));
        self.extract_batch_with_ids(rows).await
    }

    /// Extract `(P_id, text)` pairs
    pub async fn extract_batch_with_ids<I, P, T>(&self, rows: I) -> FeatureTable
    where
        I: IntoIterator<Item = (P, T)>,
        P: Into<String>,
        T: AsRef<[u8]>,
    {
        let started = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();
        let mut ids = Vec::new();

        for (index, (p_id, text)) in rows.into_iter().enumerate() {
            let p_id: String = p_id.into();
            ids.push(p_id.clone());

            let bytes = text.as_ref().to_vec();
            let extractor = self.extractor.clone();
            let semaphore = semaphore.clone();
            tasks.spawn(async move {
                // The semaphore is never closed, so a permit always arrives
                let _permit = semaphore.acquire_owned().await.ok();
                (index, extractor.extract_bytes(p_id, &bytes).await)
            });
        }

        let mut slots: Vec<Option<FeatureRecord>> = vec![None; ids.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, record)) => slots[index] = Some(record),
                Err(e) => warn!(error = %e, "extraction task did not complete"),
            }
        }

        let rows: Vec<FeatureRecord> = slots
            .into_iter()
            .zip(ids)
            .map(|(slot, p_id)| match slot {
                Some(record) => record,
                None => self.extractor.failed(p_id, "extraction task aborted"),
            })
            .collect();

        let table = FeatureTable {
            columns: self.extractor.columns(),
            rows,
        };
        info!(
            rows = table.len(),
            failed = table.failed_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch complete"
        );
        table
    }
}

/// Rows of feature records sharing one column schema
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: Vec<FeatureRecord>,
}

impl FeatureTable {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[FeatureRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.rows.iter().filter(|r| r.extraction_failed()).count()
    }

    /// Values of one indicator column (as named in [`columns`](Self::columns)) across rows
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let position = self.columns.iter().position(|c| c == name)?;
        let index = position.checked_sub(2)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.results().get(index).map_or(f64::NAN, |r| r.value))
                .collect(),
        )
    }

    /// Tab-separated rendering with a header row; missing values are empty cells
    pub fn to_tsv(&self) -> String {
        let mut out = self.columns.join("\t");
        out.push('\n');
        for row in &self.rows {
            out.push_str(&row.to_tsv_row());
            out.push('\n');
        }
        out
    }

    /// Row identifiers in order
    pub fn ids(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.p_id()).collect()
    }
}

impl Serialize for FeatureTable {
    /// An array of records
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.rows)
    }
}

impl IntoIterator for FeatureTable {
    type Item = FeatureRecord;
    type IntoIter = std::vec::IntoIter<FeatureRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{DelayedAnnotator, ScriptedAnnotator, ScriptedErrorChecker, StaticLexicon};
    use crate::backend::AnnotatorAdapter;
    use crate::config::ExtractorConfig;
    use crate::extract::ID_COLUMN;
    use crate::resources::IndicatorResources;
    use std::time::Duration;

    fn runner() -> BatchRunner {
        BatchRunner::new(FeatureExtractor::builtin(&ExtractorConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_rows_keep_input_order() {
        let texts = ["One short line.", "Two lines here. And more.", "", "Last one."];
        let table = runner().with_max_concurrency(2).extract_batch(texts).await;

        assert_eq!(table.ids(), vec!["1", "2", "3", "4"]);
        assert_eq!(table.failed_count(), 1);
        assert!(table.rows()[2].extraction_failed());
        assert_eq!(table.column("word_count").unwrap()[0], 3.0);
    }

    #[tokio::test]
    async fn test_caller_ids_are_kept() {
        let table = runner()
            .extract_batch_with_ids(vec![("a7", "The cat sat."), ("b2", "It rained.")])
            .await;
        assert_eq!(table.ids(), vec!["a7", "b2"]);
    }

    #[tokio::test]
    async fn test_timeout_fails_only_slow_rows() {
        let slow = DelayedAnnotator::new(
            ScriptedAnnotator::from_words(&[&[("Cats", "NOUN"), ("sleep", "VERB")]]),
            Duration::from_millis(200),
        );
        let adapter = AnnotatorAdapter::new(
            Arc::new(slow),
            Arc::new(StaticLexicon::new()),
            Arc::new(ScriptedErrorChecker::default()),
        )
        .with_timeout(Duration::from_millis(20));
        let extractor = FeatureExtractor::new(adapter, IndicatorResources::builtin().unwrap());

        let table = BatchRunner::new(extractor)
            .extract_batch(["Cats sleep", "Cats sleep"])
            .await;
        assert_eq!(table.len(), 2);
        assert_eq!(table.failed_count(), 2);
        assert!(table.rows()[0].failure_reason().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_tsv_has_header_and_rows() {
        let table = runner().extract_batch(["The cat sat.", "  "]).await;
        let tsv = table.to_tsv();
        let lines: Vec<&str> = tsv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("P_id\textraction_failed\tword_count"));
        assert_eq!(lines[0].split('\t').count(), table.columns().len());
        assert!(lines[2].starts_with("2\ttrue\t\t"));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let table = runner().extract_batch(Vec::<String>::new()).await;
        assert!(table.is_empty());
        assert_eq!(table.columns()[0], ID_COLUMN);
        assert_eq!(serde_json::to_string(&table).unwrap(), "[]");
    }

    #[test]
    fn test_column_lookup() {
        let table = FeatureTable {
            columns: runner().extractor().columns(),
            rows: Vec::new(),
        };
        assert!(table.column("P_id").is_none());
        assert!(table.column("no_such_column").is_none());
        assert_eq!(table.column("word_count"), Some(Vec::new()));
    }
}
