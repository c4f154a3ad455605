//! Cohesion: lemma overlap between neighbouring sentences and connective density

use super::{mean, ratio, Category, Indicator};
use crate::document::AnnotatedDocument;
use crate::resources::IndicatorResources;
use std::collections::BTreeSet;

pub(super) const INDICATORS: [Indicator; 2] = [
    Indicator::new("referential_cohesion", Category::Cohesion, referential_cohesion),
    Indicator::new("deep_cohesion", Category::Cohesion, deep_cohesion),
];

/// Mean Jaccard similarity of content lemmas over adjacent sentence pairs.
///
/// Pairs where either sentence has no content word are skipped.
pub(super) fn referential_cohesion(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    let lemma_sets: Vec<BTreeSet<&str>> = doc
        .sentences()
        .iter()
        .map(|s| {
            doc.sentence_tokens(s)
                .iter()
                .filter(|t| t.is_content_word())
                .map(|t| t.lemma.as_str())
                .collect()
        })
        .collect();

    let similarities: Vec<f64> = lemma_sets
        .windows(2)
        .filter(|pair| !pair[0].is_empty() && !pair[1].is_empty())
        .map(|pair| {
            let shared = pair[0].intersection(&pair[1]).count();
            let union = pair[0].union(&pair[1]).count();
            shared as f64 / union as f64
        })
        .collect();
    mean(&similarities)
}

/// Connective occurrences per word
pub(super) fn deep_cohesion(doc: &AnnotatedDocument, resources: &IndicatorResources) -> f64 {
    let connectives = resources.connectives.find(doc.tokens()).len();
    ratio(connectives as f64, doc.word_count() as f64)
}

#[cfg(test)]
mod tests {
    use super::super::testing::{approx, doc, resources};
    use super::*;

    #[test]
    fn jaccard_of_adjacent_sentences() {
        let d = doc(&[
            &[("The", "DET"), ("cat", "NOUN"), ("sat", "VERB"), (".", "PUNCT")],
            &[("The", "DET"), ("cat", "NOUN"), ("slept", "VERB"), (".", "PUNCT")],
        ]);
        assert!(approx(referential_cohesion(&d, &resources()), 1.0 / 3.0));
    }

    #[test]
    fn single_sentence_is_undefined() {
        let d = doc(&[&[("The", "DET"), ("cat", "NOUN"), ("sat", "VERB")]]);
        assert!(referential_cohesion(&d, &resources()).is_nan());
    }

    #[test]
    fn sentences_without_content_words_are_skipped() {
        let d = doc(&[
            &[("cats", "NOUN"), ("sleep", "VERB")],
            &[("oh", "INTJ")],
            &[("cats", "NOUN"), ("eat", "VERB")],
        ]);
        assert!(referential_cohesion(&d, &resources()).is_nan());

        let d = doc(&[
            &[("cats", "NOUN"), ("sleep", "VERB")],
            &[("cats", "NOUN"), ("sleep", "VERB")],
            &[("oh", "INTJ")],
        ]);
        assert_eq!(referential_cohesion(&d, &resources()), 1.0);
    }

    #[test]
    fn connectives_per_word() {
        // "because" and "as a result" are connectives: 2 over 8 words
        let d = doc(&[
            &[("It", "PRON"), ("rained", "VERB"), ("because", "SCONJ"), ("clouds", "NOUN"), (".", "PUNCT")],
            &[("As", "ADP"), ("a", "DET"), ("result", "NOUN"), ("floods", "NOUN"), (".", "PUNCT")],
        ]);
        assert!(approx(deep_cohesion(&d, &resources()), 2.0 / 8.0));
    }
}
