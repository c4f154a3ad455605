//! Argumentation markers: density, coverage of the four element types
//! and balance between them

use super::{ratio, Category, Indicator};
use crate::document::AnnotatedDocument;
use crate::resources::{ArgumentElement, IndicatorResources};

pub(super) const INDICATORS: [Indicator; 4] = [
    Indicator::new("argumentative_indicators", Category::Argumentation, argumentative_indicators),
    Indicator::new("argumentation_completeness", Category::Argumentation, argumentation_completeness),
    Indicator::new("argumentation_balance", Category::Argumentation, argumentation_balance),
    Indicator::new("argumentation_score", Category::Argumentation, argumentation_score),
];

/// Marker occurrences per element type, in [`ArgumentElement::ALL`] order
fn element_counts(doc: &AnnotatedDocument, resources: &IndicatorResources) -> [usize; 4] {
    let mut counts = [0; 4];
    for found in resources.argument_markers.find(doc.tokens()) {
        if let Some(slot) = ArgumentElement::ALL.iter().position(|e| *e == found.kind) {
            counts[slot] += 1;
        }
    }
    counts
}

fn argumentative_indicators(doc: &AnnotatedDocument, resources: &IndicatorResources) -> f64 {
    let total: usize = element_counts(doc, resources).iter().sum();
    ratio(total as f64, doc.word_count() as f64)
}

/// Fraction of element types present at least once
fn argumentation_completeness(doc: &AnnotatedDocument, resources: &IndicatorResources) -> f64 {
    let present = element_counts(doc, resources).iter().filter(|&&n| n > 0).count();
    present as f64 / ArgumentElement::ALL.len() as f64
}

fn argumentation_balance(doc: &AnnotatedDocument, resources: &IndicatorResources) -> f64 {
    balance(&element_counts(doc, resources))
}

/// `max(0, 1 - CV)` over the element types that occur; 0 without markers
fn balance(counts: &[usize]) -> f64 {
    let present: Vec<f64> = counts.iter().filter(|&&c| c > 0).map(|&c| c as f64).collect();
    if present.is_empty() {
        return 0.0;
    }
    let n = present.len() as f64;
    let mean = present.iter().sum::<f64>() / n;
    let variance = present.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;
    (1.0 - variance.sqrt() / mean).max(0.0)
}

fn argumentation_score(doc: &AnnotatedDocument, resources: &IndicatorResources) -> f64 {
    (argumentation_completeness(doc, resources) + argumentation_balance(doc, resources)) / 2.0
}

#[cfg(test)]
mod tests {
    use super::super::testing::{approx, doc, resources};
    use super::*;

    fn words(sentence: &'static str) -> Vec<(&'static str, &'static str)> {
        sentence
            .split_whitespace()
            .map(|w| if w == "." { (w, "PUNCT") } else { (w, "X") })
            .collect()
    }

    #[test]
    fn all_four_elements() {
        // claim: I think; evidence: for example; reasoning: because; counter: however
        let text = words("I think so . For example this . It works because of it . However no .");
        let d = doc(&[text.as_slice()]);
        let r = resources();
        assert_eq!(element_counts(&d, &r), [1, 1, 1, 1]);
        assert_eq!(argumentation_completeness(&d, &r), 1.0);
        assert_eq!(argumentation_balance(&d, &r), 1.0);
        assert_eq!(argumentation_score(&d, &r), 1.0);
        assert!(approx(argumentative_indicators(&d, &r), 4.0 / 13.0));
    }

    #[test]
    fn no_markers() {
        let d = doc(&[words("The cat sat .").as_slice()]);
        let r = resources();
        assert_eq!(argumentation_completeness(&d, &r), 0.0);
        assert_eq!(argumentation_balance(&d, &r), 0.0);
        assert_eq!(argumentation_score(&d, &r), 0.0);
        assert_eq!(argumentative_indicators(&d, &r), 0.0);
    }

    #[test]
    fn single_marker_is_balanced() {
        let d = doc(&[words("Cats sleep because they can .").as_slice()]);
        let r = resources();
        assert_eq!(argumentation_completeness(&d, &r), 0.25);
        assert_eq!(argumentation_balance(&d, &r), 1.0);
        assert_eq!(argumentation_score(&d, &r), 0.625);
    }

    #[test]
    fn one_element_type_repeated_is_balanced() {
        let d = doc(&[words("Thus cats sleep because they can .").as_slice()]);
        let r = resources();
        assert_eq!(element_counts(&d, &r), [0, 0, 2, 0]);
        assert_eq!(argumentation_balance(&d, &r), 1.0);
    }

    #[test]
    fn balance_ignores_absent_element_types() {
        assert_eq!(balance(&[0, 0, 0, 0]), 0.0);
        assert_eq!(balance(&[1, 1, 0, 0]), 1.0);
        // mean 1.5, sigma 0.5
        assert!(approx(balance(&[2, 1, 0, 0]), 1.0 - 1.0 / 3.0));
        assert!(approx(balance(&[0, 3, 0, 1]), 0.5));
    }

    #[test]
    fn uneven_markers_lower_the_score() {
        // claim: I think (x2); reasoning: because
        let d = doc(&[words("I think so . I think cats sleep because they can .").as_slice()]);
        let r = resources();
        assert_eq!(element_counts(&d, &r), [2, 0, 1, 0]);
        assert!(approx(argumentation_balance(&d, &r), 2.0 / 3.0));
        assert!(approx(argumentation_score(&d, &r), (0.5 + 2.0 / 3.0) / 2.0));
    }

    #[test]
    fn no_words_has_undefined_density() {
        let d = doc(&[&[("42", "NUM")]]);
        assert!(argumentative_indicators(&d, &resources()).is_nan());
    }
}
