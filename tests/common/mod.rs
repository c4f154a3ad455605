//! Shared fixtures for integration tests
//!
//! A small corpus of learner-style texts and extractor builders over the
//! built-in and scripted backends.

#![allow(dead_code)]

use ost_writing::backend::mock::{DelayedAnnotator, ScriptedAnnotator, ScriptedErrorChecker, StaticLexicon};
use ost_writing::{AnnotatorAdapter, ExtractorConfig, FeatureExtractor, IndicatorResources};
use std::sync::Arc;
use std::time::Duration;

/// Short essays covering narrative, argumentative and question-heavy writing
pub const CORPUS: [&str; 5] = [
    "The cat sat. The cat slept.",
    "Yesterday I walked to the old market with my sister. We bought fresh bread \
     and a small basket of apples. It was raining, so we hurried home.",
    "I think schools should start later. For example, many students are tired in \
     the morning. This matters because tired students learn less. However, some \
     parents disagree.",
    "Why do people travel? Some want adventure. Others want rest! Travel is \
     expensive, but it teaches us about the world.",
    "my freind go to school every day and he like it very much",
];

/// Extractor over the built-in backends and resources
pub fn builtin_extractor() -> FeatureExtractor {
    FeatureExtractor::builtin(&ExtractorConfig::default()).expect("built-in resources load")
}

/// Extractor whose annotator sleeps for `delay` under a `timeout` bound
pub fn slow_extractor(delay: Duration, timeout: Duration) -> FeatureExtractor {
    let annotator = DelayedAnnotator::new(
        ScriptedAnnotator::from_words(&[&[("Cats", "NOUN"), ("sleep", "VERB"), (".", "PUNCT")]]),
        delay,
    );
    let adapter = AnnotatorAdapter::new(
        Arc::new(annotator),
        Arc::new(StaticLexicon::new()),
        Arc::new(ScriptedErrorChecker::default()),
    )
    .with_timeout(timeout);
    FeatureExtractor::new(adapter, IndicatorResources::builtin().expect("built-in resources load"))
}

/// NaN-aware equality for feature values
pub fn same_value(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}
