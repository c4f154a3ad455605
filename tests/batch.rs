//! Batch extraction: failure isolation, ordering, schema stability
//!
//! Run with: `cargo test --test batch`

mod common;

use common::{builtin_extractor, same_value, slow_extractor, CORPUS};
use ost_writing::{BatchRunner, ExtractorConfig, FeatureExtractor, SCHEMA};
use std::io::Write;
use std::time::Duration;

// ============================================================================
// Failure isolation
// ============================================================================

#[tokio::test]
async fn one_bad_encoding_fails_one_row() {
    let mut inputs: Vec<Vec<u8>> = CORPUS.iter().map(|t| t.as_bytes().to_vec()).collect();
    inputs.insert(2, vec![b'b', b'a', 0xC3, 0x28, b'd']);

    let extractor = builtin_extractor();
    let table = BatchRunner::new(extractor.clone())
        .with_max_concurrency(3)
        .extract_batch(&inputs)
        .await;

    assert_eq!(table.len(), inputs.len());
    assert_eq!(table.failed_count(), 1);
    assert!(table.rows()[2].extraction_failed());

    let texts: Vec<&str> = CORPUS.to_vec();
    let survivors = table.rows().iter().filter(|r| !r.extraction_failed());
    for (row, text) in survivors.zip(texts) {
        let single = extractor.extract(text).await;
        for (a, b) in row.results().iter().zip(single.results()) {
            assert!(same_value(a.value, b.value), "{} differs on {:?}", a.name, text);
        }
    }
}

#[tokio::test]
async fn timeouts_fail_rows_not_the_batch() {
    let extractor = slow_extractor(Duration::from_millis(300), Duration::from_millis(25));
    let table = BatchRunner::new(extractor)
        .extract_batch(["Cats sleep.", "Cats sleep.", "Cats sleep."])
        .await;

    assert_eq!(table.len(), 3);
    assert_eq!(table.failed_count(), 3);
    for row in table.rows() {
        assert!(row.failure_reason().unwrap().contains("timed out"));
    }
}

#[tokio::test]
async fn fast_backends_finish_under_the_same_bound() {
    let extractor = slow_extractor(Duration::from_millis(5), Duration::from_secs(5));
    let table = BatchRunner::new(extractor).extract_batch(["Cats sleep."]).await;
    assert_eq!(table.failed_count(), 0);
    assert_eq!(table.column("word_count"), Some(vec![2.0]));
}

// ============================================================================
// Ordering and schema
// ============================================================================

#[tokio::test]
async fn rows_follow_input_order_at_any_concurrency() {
    let extractor = builtin_extractor();
    let serial = BatchRunner::new(extractor.clone())
        .with_max_concurrency(1)
        .extract_batch(CORPUS)
        .await;
    let parallel = BatchRunner::new(extractor)
        .with_max_concurrency(8)
        .extract_batch(CORPUS)
        .await;

    assert_eq!(serial.ids(), vec!["1", "2", "3", "4", "5"]);
    assert_eq!(
        serde_json::to_string(&serial).unwrap(),
        serde_json::to_string(&parallel).unwrap()
    );
}

#[tokio::test]
async fn columns_do_not_depend_on_content_or_size() {
    let runner = BatchRunner::new(builtin_extractor());
    let small = runner.extract_batch(["Hi."]).await;
    let large = runner.extract_batch(CORPUS).await;
    let failed = runner.extract_batch(["", "   "]).await;

    assert_eq!(small.columns(), large.columns());
    assert_eq!(small.columns(), failed.columns());
    assert_eq!(&small.columns()[2..], SCHEMA.map(String::from).as_slice());
}

#[test]
fn batch_runs_outside_an_async_test() {
    let runner = BatchRunner::new(builtin_extractor());
    let table = tokio_test::block_on(runner.extract_batch(["The cat sat. The cat slept."]));
    assert_eq!(table.column("avg_sentence_length"), Some(vec![3.0]));
}

// ============================================================================
// Configuration
// ============================================================================

#[tokio::test]
async fn config_file_sets_prefix_and_limits() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "column_prefix: OST_\nmax_concurrency: 2\ncollaborator_timeout_secs: 5").unwrap();

    let config = ExtractorConfig::load(file.path()).unwrap();
    let extractor = FeatureExtractor::builtin(&config).unwrap();
    let table = BatchRunner::new(extractor)
        .with_max_concurrency(config.max_concurrency)
        .extract_batch(["The cat sat. The cat slept."])
        .await;

    assert_eq!(table.columns()[0], "P_id");
    assert_eq!(table.columns()[2], "OST_word_count");
    assert_eq!(table.column("OST_word_count"), Some(vec![6.0]));

    let tsv = table.to_tsv();
    assert!(tsv.starts_with("P_id\textraction_failed\tOST_word_count\t"));
    assert!(tsv.lines().nth(1).unwrap().starts_with("1\tfalse\t6\t3\t"));
}
