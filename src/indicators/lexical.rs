//! Lexical richness: diversity, sophistication, polysemy, concreteness
//! and collocations

use super::{mean, ratio, Category, Indicator};
use crate::document::{AnnotatedDocument, Concreteness};
use crate::resources::IndicatorResources;
use std::collections::HashSet;

pub(super) const INDICATORS: [Indicator; 6] = [
    Indicator::new("lexical_diversity", Category::Lexical, lexical_diversity),
    Indicator::new("vocabulary_sophistication", Category::Lexical, vocabulary_sophistication),
    Indicator::new("polysemy_word", Category::Lexical, polysemy_word),
    Indicator::new("word_concreteness", Category::Lexical, word_concreteness),
    Indicator::new("bigram_count", Category::Lexical, bigram_count),
    Indicator::new("bigram_diversity", Category::Lexical, bigram_diversity),
];

/// Unique content lemmas over content tokens
fn lexical_diversity(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    let mut lemmas = HashSet::new();
    let mut total = 0usize;
    for (_, token) in doc.content_tokens() {
        lemmas.insert(token.lemma.as_str());
        total += 1;
    }
    ratio(lemmas.len() as f64, total as f64)
}

/// Mean normalised hierarchy depth of the content words the lexicon knows
fn vocabulary_sophistication(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    let depths: Vec<f64> = doc.known_entries().map(|(_, e)| e.hierarchy_depth).collect();
    mean(&depths)
}

fn polysemy_word(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    doc.known_entries().filter(|(_, e)| e.sense_count > 1).count() as f64
}

/// Share of known content words whose sense is concrete
pub(super) fn word_concreteness(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    let mut known = 0usize;
    let mut concrete = 0usize;
    for (_, entry) in doc.known_entries() {
        known += 1;
        if entry.concreteness == Concreteness::Concrete {
            concrete += 1;
        }
    }
    ratio(concrete as f64, known as f64)
}

/// Qualifying adjacent word pairs, in order of occurrence
fn qualifying_bigrams(doc: &AnnotatedDocument, resources: &IndicatorResources) -> Vec<(String, String)> {
    let mut bigrams = Vec::new();
    for sentence in doc.sentences() {
        for pair in doc.sentence_tokens(sentence).windows(2) {
            if !(pair[0].is_word() && pair[1].is_word()) {
                continue;
            }
            let (first, second) = (pair[0].lower(), pair[1].lower());
            if resources.reference.qualifies(&first, &second) {
                bigrams.push((first, second));
            }
        }
    }
    bigrams
}

fn bigram_count(doc: &AnnotatedDocument, resources: &IndicatorResources) -> f64 {
    qualifying_bigrams(doc, resources).len() as f64
}

fn bigram_diversity(doc: &AnnotatedDocument, resources: &IndicatorResources) -> f64 {
    let unique: HashSet<(String, String)> = qualifying_bigrams(doc, resources).into_iter().collect();
    ratio(unique.len() as f64, doc.word_count() as f64)
}

#[cfg(test)]
mod tests {
    use super::super::testing::{approx, doc, doc_with, resources};
    use super::*;
    use crate::document::Concreteness::{Abstract, Concrete};

    #[test]
    fn diversity_is_one_for_unique_lemmas() {
        let d = doc(&[&[("Dogs", "NOUN"), ("bark", "VERB"), ("loudly", "ADV"), (".", "PUNCT")]]);
        assert_eq!(lexical_diversity(&d, &resources()), 1.0);
    }

    #[test]
    fn diversity_drops_with_repetition() {
        let d = doc(&[&[("go", "VERB"), ("go", "VERB"), ("go", "VERB"), ("go", "VERB")]]);
        assert_eq!(lexical_diversity(&d, &resources()), 0.25);
    }

    #[test]
    fn diversity_without_content_words_is_undefined() {
        let d = doc(&[&[("it", "PRON"), ("is", "AUX"), (".", "PUNCT")]]);
        assert!(lexical_diversity(&d, &resources()).is_nan());
    }

    #[test]
    fn lexicon_indicators_skip_absent_words() {
        let d = doc_with(
            &[&[("cat", "NOUN"), ("idea", "NOUN"), ("zyzzyva", "NOUN")]],
            vec![],
            &[("cat", 8, 0.9, Concrete, "cat"), ("idea", 1, 0.5, Abstract, "idea")],
            vec![],
        );
        let r = resources();
        assert!(approx(vocabulary_sophistication(&d, &r), 0.7));
        assert_eq!(polysemy_word(&d, &r), 1.0);
        assert_eq!(word_concreteness(&d, &r), 0.5);
    }

    #[test]
    fn lexicon_indicators_without_known_words() {
        let d = doc(&[&[("zyzzyva", "NOUN")]]);
        let r = resources();
        assert!(vocabulary_sophistication(&d, &r).is_nan());
        assert_eq!(polysemy_word(&d, &r), 0.0);
        assert!(word_concreteness(&d, &r).is_nan());
    }

    #[test]
    fn collocations_are_counted_within_sentences() {
        // "for example" and "of the" qualify in the reference model; "the cat" does not
        let d = doc(&[
            &[("For", "ADP"), ("example", "NOUN"), ("of", "ADP"), ("the", "DET"), ("cat", "NOUN")],
            &[("of", "ADP"), ("the", "DET"), ("end", "NOUN")],
        ]);
        let r = resources();
        assert_eq!(bigram_count(&d, &r), 3.0);
        assert!(approx(bigram_diversity(&d, &r), 2.0 / 8.0));
    }

    #[test]
    fn pairs_across_punctuation_do_not_count() {
        let d = doc(&[&[("of", "ADP"), (",", "PUNCT"), ("the", "DET")]]);
        assert_eq!(bigram_count(&d, &resources()), 0.0);
    }
}
