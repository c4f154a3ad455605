//! Syntactic variety and density

use super::surface::avg_sentence_length;
use super::{ratio, Category, Indicator};
use crate::document::{AnnotatedDocument, DepRelation, SentenceType};
use crate::resources::IndicatorResources;

/// Average sentence length at which simplicity is one half
pub const SIMPLICITY_SCALE: f64 = 15.0;

pub(super) const INDICATORS: [Indicator; 4] = [
    Indicator::new("sentence_type_diversity", Category::Syntactic, sentence_type_diversity),
    Indicator::new("syntactic_simplicity", Category::Syntactic, syntactic_simplicity),
    Indicator::new("information_density", Category::Syntactic, information_density),
    Indicator::new("adj_noun_pairs", Category::Syntactic, adj_noun_pairs),
];

/// Shannon entropy of the sentence-type distribution, normalised by the
/// maximum entropy for the number of types present
fn sentence_type_diversity(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    let total = doc.sentence_count();
    if total == 0 {
        return f64::NAN;
    }

    let counts: Vec<usize> = SentenceType::ALL
        .iter()
        .map(|kind| doc.sentences().iter().filter(|s| s.kind == *kind).count())
        .filter(|&n| n > 0)
        .collect();
    if counts.len() <= 1 {
        return 0.0;
    }

    let entropy: f64 = counts
        .iter()
        .map(|&n| {
            let p = n as f64 / total as f64;
            -p * p.ln()
        })
        .sum();
    entropy / (counts.len() as f64).ln()
}

/// `1 / (1 + avg_sentence_length / 15)`
pub(super) fn syntactic_simplicity(doc: &AnnotatedDocument, resources: &IndicatorResources) -> f64 {
    1.0 / (1.0 + avg_sentence_length(doc, resources) / SIMPLICITY_SCALE)
}

/// Content words per word
fn information_density(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    ratio(doc.content_tokens().count() as f64, doc.word_count() as f64)
}

fn adj_noun_pairs(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    let tokens = doc.tokens();
    doc.edges()
        .iter()
        .filter(|e| e.relation == DepRelation::Amod && tokens[e.head].pos.is_nominal())
        .count() as f64
}

#[cfg(test)]
mod tests {
    use super::super::testing::{approx, doc, doc_with, resources};
    use super::*;
    use crate::document::DepEdge;

    #[test]
    fn one_sentence_type_has_no_diversity() {
        let d = doc(&[
            &[("Cats", "NOUN"), ("sleep", "VERB"), (".", "PUNCT")],
            &[("Dogs", "NOUN"), ("bark", "VERB"), (".", "PUNCT")],
        ]);
        assert_eq!(sentence_type_diversity(&d, &resources()), 0.0);
    }

    #[test]
    fn two_even_types_have_full_diversity() {
        let d = doc(&[
            &[("Cats", "NOUN"), ("sleep", "VERB"), (".", "PUNCT")],
            &[("Why", "ADV"), ("?", "PUNCT")],
        ]);
        assert!(approx(sentence_type_diversity(&d, &resources()), 1.0));
    }

    #[test]
    fn uneven_types_are_between_zero_and_one() {
        let d = doc(&[
            &[("Cats", "NOUN"), ("sleep", "VERB"), (".", "PUNCT")],
            &[("Dogs", "NOUN"), ("bark", "VERB"), (".", "PUNCT")],
            &[("Stop", "VERB"), ("!", "PUNCT")],
        ]);
        let diversity = sentence_type_diversity(&d, &resources());
        assert!(diversity > 0.0 && diversity < 1.0);
    }

    #[test]
    fn simplicity_decreases_with_sentence_length() {
        let short = doc(&[&[("Cats", "NOUN"), ("sleep", "VERB")]]);
        let words: Vec<(&str, &str)> = std::iter::repeat(("word", "NOUN")).take(15).collect();
        let long = doc(&[words.as_slice()]);
        let r = resources();
        assert!(approx(syntactic_simplicity(&long, &r), 0.5));
        assert!(syntactic_simplicity(&short, &r) > syntactic_simplicity(&long, &r));
    }

    #[test]
    fn density_counts_content_words() {
        let d = doc(&[&[("The", "DET"), ("cat", "NOUN"), ("sat", "VERB"), ("on", "ADP"), ("it", "PRON")]]);
        assert!(approx(information_density(&d, &resources()), 0.4));
    }

    #[test]
    fn amod_into_nouns_only() {
        // big cat ; happy she
        let d = doc_with(
            &[&[("big", "ADJ"), ("cat", "NOUN"), ("happy", "ADJ"), ("she", "PRON")]],
            vec![
                DepEdge::new(1, 0, DepRelation::Amod),
                DepEdge::new(3, 2, DepRelation::Amod),
                DepEdge::root(1),
            ],
            &[],
            vec![],
        );
        assert_eq!(adj_noun_pairs(&d, &resources()), 1.0);
    }
}
