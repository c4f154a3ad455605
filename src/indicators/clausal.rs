//! Clausal complexity from the T-units cached on the document

use super::{ratio, Category, Indicator};
use crate::document::AnnotatedDocument;
use crate::resources::IndicatorResources;

pub(super) const INDICATORS: [Indicator; 4] = [
    Indicator::new("num_t_units", Category::Clausal, num_t_units),
    Indicator::new("mean_length_t_unit", Category::Clausal, mean_length_t_unit),
    Indicator::new("t_units_per_sentence", Category::Clausal, t_units_per_sentence),
    Indicator::new("dependent_clauses_per_t_unit", Category::Clausal, dependent_clauses_per_t_unit),
];

fn num_t_units(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    doc.t_units().len() as f64
}

/// Words per T-unit
fn mean_length_t_unit(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    let words: usize = doc.t_units().iter().map(|u| u.word_count).sum();
    ratio(words as f64, doc.t_units().len() as f64)
}

fn t_units_per_sentence(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    ratio(doc.t_units().len() as f64, doc.sentence_count() as f64)
}

fn dependent_clauses_per_t_unit(doc: &AnnotatedDocument, _: &IndicatorResources) -> f64 {
    let clauses: usize = doc.t_units().iter().map(|u| u.dependent_clause_count()).sum();
    ratio(clauses as f64, doc.t_units().len() as f64)
}

#[cfg(test)]
mod tests {
    use super::super::testing::{approx, doc, doc_with, resources};
    use super::*;
    use crate::document::{DepEdge, DepRelation};

    #[test]
    fn compound_and_complex_sentences() {
        // I ran and she walked . I left because it rained .
        let d = doc_with(
            &[
                &[("I", "PRON"), ("ran", "VERB"), ("and", "CCONJ"), ("she", "PRON"), ("walked", "VERB"), (".", "PUNCT")],
                &[("I", "PRON"), ("left", "VERB"), ("because", "SCONJ"), ("it", "PRON"), ("rained", "VERB"), (".", "PUNCT")],
            ],
            vec![
                DepEdge::root(1),
                DepEdge::new(1, 0, DepRelation::Nsubj),
                DepEdge::new(1, 2, DepRelation::Cc),
                DepEdge::new(4, 3, DepRelation::Nsubj),
                DepEdge::new(1, 4, DepRelation::Conj),
                DepEdge::new(1, 5, DepRelation::Punct),
                DepEdge::root(7),
                DepEdge::new(7, 6, DepRelation::Nsubj),
                DepEdge::new(10, 8, DepRelation::Mark),
                DepEdge::new(10, 9, DepRelation::Nsubj),
                DepEdge::new(7, 10, DepRelation::Advcl),
                DepEdge::new(7, 11, DepRelation::Punct),
            ],
            &[],
            vec![],
        );
        let r = resources();
        assert_eq!(num_t_units(&d, &r), 3.0);
        assert!(approx(mean_length_t_unit(&d, &r), 10.0 / 3.0));
        assert_eq!(t_units_per_sentence(&d, &r), 1.5);
        assert!(approx(dependent_clauses_per_t_unit(&d, &r), 1.0 / 3.0));
    }

    #[test]
    fn no_t_units_is_undefined() {
        let d = doc(&[&[("...", "PUNCT")]]);
        let r = resources();
        assert_eq!(num_t_units(&d, &r), 0.0);
        assert!(mean_length_t_unit(&d, &r).is_nan());
        assert_eq!(t_units_per_sentence(&d, &r), 0.0);
        assert!(dependent_clauses_per_t_unit(&d, &r).is_nan());
    }
}
