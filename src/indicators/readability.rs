//! Readability: grade level, text ease and narrativity

use super::cohesion::{deep_cohesion, referential_cohesion};
use super::lexical::word_concreteness;
use super::syntactic::syntactic_simplicity;
use super::{count_syllables, ratio, Category, Indicator};
use crate::document::{AnnotatedDocument, Concreteness};
use crate::resources::IndicatorResources;

/// Weights of grade ease, simplicity, concreteness, referential cohesion
/// and (capped) deep cohesion in `text_ease`
pub const TEXT_EASE_WEIGHTS: [f64; 5] = [0.25, 0.25, 0.20, 0.15, 0.15];

/// Grade level at or below which grade ease is 1
pub const GRADE_EASE_FLOOR: f64 = 3.0;

/// Grade levels over which grade ease falls from 1 to 0
pub const GRADE_EASE_SPAN: f64 = 15.0;

/// Weights of personal pronouns, past-tense verbs and concrete nouns
/// (each per word) in `narrativity_score`
pub const NARRATIVITY_WEIGHTS: [f64; 3] = [0.4, 0.4, 0.2];

const PERSONAL_PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves",
];

pub(super) const INDICATORS: [Indicator; 3] = [
    Indicator::new("flesch_kincaid_grade_level", Category::Readability, flesch_kincaid_grade_level),
    Indicator::new("text_ease", Category::Readability, text_ease),
    Indicator::new("narrativity_score", Category::Readability, narrativity_score),
];

/// `0.39 * words/sentences + 11.8 * syllables/words - 15.59`
fn flesch_kincaid_grade_level(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    let sentences = doc.sentence_count();
    let words = doc.word_count();
    if sentences == 0 || words == 0 {
        return f64::NAN;
    }
    let syllables: usize = doc.words().map(|w| count_syllables(&w.text)).sum();
    0.39 * (words as f64 / sentences as f64) + 11.8 * (syllables as f64 / words as f64) - 15.59
}

/// Weighted mean of the defined ease components, reweighted over those present
fn text_ease(doc: &AnnotatedDocument, resources: &IndicatorResources) -> f64 {
    let grade = flesch_kincaid_grade_level(doc, resources);
    let grade_ease = 1.0 - ((grade - GRADE_EASE_FLOOR) / GRADE_EASE_SPAN).clamp(0.0, 1.0);
    // `f64::min` would turn an undefined density into 1
    let deep = deep_cohesion(doc, resources);
    let components = [
        grade_ease,
        syntactic_simplicity(doc, resources),
        word_concreteness(doc, resources),
        referential_cohesion(doc, resources),
        if deep.is_nan() { deep } else { deep.min(1.0) },
    ];

    let (weighted, weight) = components
        .iter()
        .zip(TEXT_EASE_WEIGHTS)
        .filter(|(value, _)| !value.is_nan())
        .fold((0.0, 0.0), |(sum, total), (value, w)| (sum + value * w, total + w));
    ratio(weighted, weight)
}

fn narrativity_score(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    let words = doc.word_count() as f64;
    if words == 0.0 {
        return f64::NAN;
    }

    let personal = doc
        .words()
        .filter(|w| PERSONAL_PRONOUNS.contains(&w.lower().as_str()))
        .count();
    let past = doc.words().filter(|w| w.is_past_tense_verb()).count();
    let tokens = doc.tokens();
    let concrete_nouns = doc
        .lexicon_facts()
        .iter()
        .filter(|(&i, fact)| {
            tokens[i].pos.is_nominal()
                && fact.entry().is_some_and(|e| e.concreteness == Concreteness::Concrete)
        })
        .count();

    let [w_personal, w_past, w_concrete] = NARRATIVITY_WEIGHTS;
    w_personal * personal as f64 / words + w_past * past as f64 / words + w_concrete * concrete_nouns as f64 / words
}

#[cfg(test)]
mod tests {
    use super::super::testing::{approx, doc, doc_with, resources};
    use super::*;
    use crate::document::{Annotation, Concreteness::Concrete};

    #[test]
    fn grade_level_formula() {
        // 6 words, 2 sentences, 6 syllables: 0.39 * 3 + 11.8 * 1 - 15.59
        let d = doc(&[
            &[("The", "DET"), ("cat", "NOUN"), ("sat", "VERB"), (".", "PUNCT")],
            &[("The", "DET"), ("cat", "NOUN"), ("slept", "VERB"), (".", "PUNCT")],
        ]);
        assert!(approx(flesch_kincaid_grade_level(&d, &resources()), 1.17 + 11.8 - 15.59));
    }

    #[test]
    fn grade_level_needs_words_and_sentences() {
        let r = resources();
        let empty = super::super::testing::assemble(Annotation::default(), &[], vec![]);
        assert!(flesch_kincaid_grade_level(&empty, &r).is_nan());
        let punctuation = doc(&[&[("...", "PUNCT")]]);
        assert!(flesch_kincaid_grade_level(&punctuation, &r).is_nan());
    }

    #[test]
    fn text_ease_reweights_defined_components() {
        // One sentence: referential cohesion and concreteness are undefined
        let d = doc(&[&[("Cats", "NOUN"), ("sleep", "VERB"), (".", "PUNCT")]]);
        let r = resources();
        let simplicity = syntactic_simplicity(&d, &r);
        let grade_ease = 1.0; // grade level is far below 3
        let expected = (0.25 * grade_ease + 0.25 * simplicity) / 0.65;
        assert!(approx(text_ease(&d, &r), expected));
        let ease = text_ease(&d, &r);
        assert!(ease > 0.0 && ease <= 1.0);
    }

    #[test]
    fn text_ease_of_empty_document_is_undefined() {
        let empty = super::super::testing::assemble(Annotation::default(), &[], vec![]);
        assert!(text_ease(&empty, &resources()).is_nan());
    }

    #[test]
    fn narrativity_combines_three_densities() {
        // I saw the dog . -> 1 pronoun, 1 past verb, 1 concrete noun over 4 words
        let d = doc_with(
            &[&[("I", "PRON"), ("saw", "VERB:past"), ("the", "DET"), ("dog", "NOUN"), (".", "PUNCT")]],
            vec![],
            &[("dog", 7, 0.9, Concrete, "dog")],
            vec![],
        );
        assert!(approx(narrativity_score(&d, &resources()), (0.4 + 0.4 + 0.2) / 4.0));
    }

    #[test]
    fn narrativity_without_words_is_undefined() {
        let d = doc(&[&[("42", "NUM")]]);
        assert!(narrativity_score(&d, &resources()).is_nan());
    }
}
