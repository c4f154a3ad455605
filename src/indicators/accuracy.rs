//! Accuracy: detected errors and context-sensitive word use

use super::{Category, Indicator};
use crate::document::AnnotatedDocument;
use crate::resources::IndicatorResources;

pub(super) const INDICATORS: [Indicator; 2] = [
    Indicator::new("error_count", Category::Accuracy, error_count),
    Indicator::new("context_sensitive_count", Category::Accuracy, context_sensitive_count),
];

fn error_count(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    doc.errors().len() as f64
}

/// Known content words whose lemma is not the lemma of their primary sense
fn context_sensitive_count(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    doc.known_entries()
        .filter(|(token, entry)| token.lemma != entry.primary_lemma)
        .count() as f64
}

#[cfg(test)]
mod tests {
    use super::super::testing::{doc_with, resources};
    use super::*;
    use crate::document::Concreteness::Abstract;
    use crate::document::{DetectedError, ErrorCategory};

    #[test]
    fn counts_every_error_span() {
        let d = doc_with(
            &[&[("teh", "NOUN"), ("cat", "NOUN")]],
            vec![],
            &[],
            vec![
                DetectedError::new(0..3, ErrorCategory::Spelling, "typo"),
                DetectedError::new(4..7, ErrorCategory::Grammar, ""),
            ],
        );
        assert_eq!(error_count(&d, &resources()), 2.0);
    }

    #[test]
    fn counts_words_used_outside_their_primary_sense() {
        let d = doc_with(
            &[&[("world", "NOUN"), ("idea", "NOUN"), ("unknown", "ADJ")]],
            vec![],
            &[("world", 9, 0.5, Abstract, "universe"), ("idea", 5, 0.6, Abstract, "idea")],
            vec![],
        );
        assert_eq!(context_sensitive_count(&d, &resources()), 1.0);
    }
}
