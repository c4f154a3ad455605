//! Variability of word length and syllable count

use super::{count_syllables, population_variance, Category, Indicator};
use crate::document::AnnotatedDocument;
use crate::resources::IndicatorResources;

pub(super) const INDICATORS: [Indicator; 2] = [
    Indicator::new("word_length_variance", Category::Variability, word_length_variance),
    Indicator::new("syllable_variance", Category::Variability, syllable_variance),
];

fn word_length_variance(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    let lengths: Vec<f64> = doc.words().map(|w| w.text.chars().count() as f64).collect();
    population_variance(&lengths)
}

fn syllable_variance(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    let syllables: Vec<f64> = doc.words().map(|w| count_syllables(&w.text) as f64).collect();
    population_variance(&syllables)
}

#[cfg(test)]
mod tests {
    use super::super::testing::{approx, doc, resources};
    use super::*;

    #[test]
    fn variance_over_words_only() {
        // lengths 2 and 6 (the comma is not a word)
        let d = doc(&[&[("an", "DET"), (",", "PUNCT"), ("animal", "NOUN")]]);
        let r = resources();
        assert!(approx(word_length_variance(&d, &r), 4.0));
        // syllables 1 and 3
        assert!(approx(syllable_variance(&d, &r), 1.0));
    }

    #[test]
    fn uniform_words_have_zero_variance() {
        let d = doc(&[&[("cat", "NOUN"), ("dog", "NOUN"), ("owl", "NOUN")]]);
        assert_eq!(word_length_variance(&d, &resources()), 0.0);
    }

    #[test]
    fn no_words_is_undefined() {
        let d = doc(&[&[("?", "PUNCT")]]);
        assert!(word_length_variance(&d, &resources()).is_nan());
        assert!(syllable_variance(&d, &resources()).is_nan());
    }
}
