//! ost-writing: Linguistic Feature Engine for Writing Quality
//!
//! Turns raw learner texts into a fixed table of thirty numeric writing
//! indicators grouped into nine categories (surface, lexical, syntactic,
//! accuracy, readability, cohesion, variability, clausal, argumentation).
//!
//! # Core Concepts
//!
//! - **Annotated document**: tokens, sentences, dependency arcs, T-units,
//!   lexicon facts and detected errors for one text, built once and read-only
//! - **Indicators**: pure functions from a document to one `f64`; undefined
//!   ratios are `NaN`, never an error
//! - **Feature table**: one row per text in a stable column order; a text
//!   that cannot be annotated yields a failed row, never an aborted batch
//!
//! # Example
//!
//! ```no_run
//! use ost_writing::{BatchRunner, ExtractorConfig, FeatureExtractor};
//!
//! # async fn run() -> ost_writing::SetupResult<()> {
//! let extractor = FeatureExtractor::builtin(&ExtractorConfig::default())?;
//! let table = BatchRunner::new(extractor)
//!     .extract_batch(["The cat sat. The cat slept."])
//!     .await;
//! assert_eq!(table.rows()[0].get("word_count"), Some(6.0));
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod document;
pub mod extract;
pub mod indicators;
pub mod resources;

pub use backend::{AnnotationError, AnnotatorAdapter, Annotator, ErrorChecker, LexiconLookup};
pub use config::{default_config_path, ExtractorConfig, SetupError, SetupResult};
pub use document::{AnnotatedDocument, RawText};
pub use extract::{BatchRunner, FeatureExtractor, FeatureRecord, FeatureTable, IndicatorResult};
pub use indicators::{Category, Indicator, IndicatorRegistry, SCHEMA};
pub use resources::IndicatorResources;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
