//! Built-in rule-based annotator
//!
//! A deterministic English pipeline: tokenize, split sentences, tag with
//! word lists and suffix rules, then parse each sentence into dependency
//! arcs with clause heuristics. It needs no model files and produces the
//! same annotation for the same text on every run.

mod parser;
mod tagger;
mod tokenize;

use super::{run_blocking, AnnotationError, Annotator};
use crate::document::{Annotation, RawText, Token};
use async_trait::async_trait;
use std::sync::Arc;
use tagger::Vocabulary;
use tracing::debug;

/// Annotator backed by word lists and heuristics; clones share the word lists
#[derive(Debug, Clone, Default)]
pub struct RuleBasedAnnotator {
    vocabulary: Arc<Vocabulary>,
}

impl RuleBasedAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotate synchronously
    pub fn annotate_str(&self, text: &str) -> Result<Annotation, AnnotationError> {
        if let Some(bad) = text.chars().find(|&c| c == '\0' || c == char::REPLACEMENT_CHARACTER) {
            return Err(AnnotationError::Encoding(format!(
                "unprocessable character U+{:04X}",
                bad as u32
            )));
        }

        let raw = tokenize::tokenize(text);
        if raw.is_empty() {
            return Err(AnnotationError::backend(self.id(), "no tokens found"));
        }
        let sentences = tokenize::split_sentences(text, &raw);

        let mut tokens = Vec::with_capacity(raw.len());
        let mut edges = Vec::with_capacity(raw.len());
        for range in &sentences {
            let sentence = &raw[range.clone()];
            let tags = self.vocabulary.tag_sentence(sentence);
            edges.extend(parser::parse_sentence(&tags, range.start));

            for (token, tag) in sentence.iter().zip(tags) {
                let mut annotated = Token::new(token.text.clone(), tag.lemma, tag.pos, token.span.clone());
                if let Some(tense) = tag.tense {
                    annotated = annotated.with_tense(tense);
                }
                tokens.push(annotated);
            }
        }

        debug!(
            tokens = tokens.len(),
            sentences = sentences.len(),
            edges = edges.len(),
            "rule-based annotation complete"
        );
        Ok(Annotation {
            tokens,
            sentences,
            edges,
        })
    }
}

#[async_trait]
impl Annotator for RuleBasedAnnotator {
    fn id(&self) -> &str {
        "rule-based-annotator"
    }

    async fn annotate(&self, text: &RawText) -> Result<Annotation, AnnotationError> {
        let annotator = self.clone();
        let text = text.as_str().to_string();
        run_blocking(self.id(), move || annotator.annotate_str(&text)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DepRelation, Pos, Tense};
    use std::time::Duration;

    #[test]
    fn test_two_short_sentences() {
        let annotation = RuleBasedAnnotator::new()
            .annotate_str("The cat sat. The cat slept.")
            .unwrap();

        assert_eq!(annotation.tokens.len(), 8);
        assert_eq!(annotation.sentences, vec![0..4, 4..8]);
        assert_eq!(annotation.tokens.iter().filter(|t| t.is_word()).count(), 6);

        let lemmas: Vec<&str> = annotation.tokens.iter().map(|t| t.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["the", "cat", "sit", ".", "the", "cat", "sleep", "."]);
        assert_eq!(annotation.tokens[2].tense, Some(Tense::Past));
    }

    #[test]
    fn test_edges_are_global_and_complete() {
        let annotation = RuleBasedAnnotator::new()
            .annotate_str("I ran home. She stayed because it rained.")
            .unwrap();

        assert_eq!(annotation.edges.len(), annotation.tokens.len());
        let roots: Vec<usize> = annotation
            .edges
            .iter()
            .filter(|e| e.relation == DepRelation::Root)
            .map(|e| e.dependent)
            .collect();
        assert_eq!(roots, vec![1, 5]);
        assert!(annotation
            .edges
            .iter()
            .any(|e| e.relation == DepRelation::Advcl && e.head == 5));
    }

    #[test]
    fn test_tokens_keep_byte_spans() {
        let text = "Caf\u{e9}s opened.";
        let annotation = RuleBasedAnnotator::new().annotate_str(text).unwrap();
        for token in &annotation.tokens {
            assert_eq!(&text[token.span.clone()], token.text);
        }
        assert_eq!(annotation.tokens[0].pos, Pos::Noun);
    }

    #[test]
    fn test_unprocessable_characters_fail() {
        let result = RuleBasedAnnotator::new().annotate_str("bad \u{fffd} text");
        assert!(matches!(result, Err(AnnotationError::Encoding(_))));
    }

    #[tokio::test]
    async fn test_punctuation_only_text_still_annotates() {
        let text = RawText::new("...").unwrap();
        let annotation = RuleBasedAnnotator::new().annotate(&text).await.unwrap();
        assert_eq!(annotation.tokens.len(), 1);
        assert_eq!(annotation.tokens[0].pos, Pos::Punct);
    }

    #[tokio::test]
    async fn test_long_text_can_be_cut_off_by_a_timeout() {
        let text = "the big dog and the small cat ran to the old house near the river ".repeat(2000);
        let text = RawText::new(text).unwrap();
        let annotator = RuleBasedAnnotator::new();

        let bounded = tokio::time::timeout(Duration::from_millis(1), annotator.annotate(&text)).await;
        assert!(bounded.is_err());

        let annotation = annotator.annotate(&text).await.unwrap();
        assert_eq!(annotation.tokens.len(), 15 * 2000);
        assert_eq!(annotation.edges.len(), annotation.tokens.len());
    }
}
