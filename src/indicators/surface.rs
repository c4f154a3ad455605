//! Surface counts

use super::{ratio, Category, Indicator};
use crate::document::AnnotatedDocument;
use crate::resources::IndicatorResources;

/// A sentence with more words than this is complex
pub const COMPLEX_SENTENCE_WORDS: usize = 15;

pub(super) const INDICATORS: [Indicator; 3] = [
    Indicator::new("word_count", Category::Surface, word_count),
    Indicator::new("avg_sentence_length", Category::Surface, avg_sentence_length),
    Indicator::new("num_complex_sentences", Category::Surface, num_complex_sentences),
];

pub(super) fn word_count(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    doc.word_count() as f64
}

pub(super) fn avg_sentence_length(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    ratio(doc.word_count() as f64, doc.sentence_count() as f64)
}

fn num_complex_sentences(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    doc.sentences()
        .iter()
        .filter(|s| doc.sentence_word_count(s) > COMPLEX_SENTENCE_WORDS)
        .count() as f64
}
