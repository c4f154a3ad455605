//! Token representation

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Coarse part-of-speech tag (universal tag set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pos {
    Noun,
    Propn,
    Verb,
    Aux,
    Adj,
    Adv,
    Pron,
    Det,
    Adp,
    Cconj,
    Sconj,
    Num,
    Part,
    Intj,
    Punct,
    Sym,
    X,
}

impl Pos {
    /// Parse a universal POS label (`NOUN`, `VERB`, ...). Unknown labels map to `X`.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_uppercase().as_str() {
            "NOUN" => Self::Noun,
            "PROPN" => Self::Propn,
            "VERB" => Self::Verb,
            "AUX" => Self::Aux,
            "ADJ" => Self::Adj,
            "ADV" => Self::Adv,
            "PRON" => Self::Pron,
            "DET" => Self::Det,
            "ADP" => Self::Adp,
            "CCONJ" | "CONJ" => Self::Cconj,
            "SCONJ" => Self::Sconj,
            "NUM" => Self::Num,
            "PART" => Self::Part,
            "INTJ" => Self::Intj,
            "PUNCT" => Self::Punct,
            "SYM" => Self::Sym,
            _ => Self::X,
        }
    }

    /// Noun, verb, adjective or adverb
    pub fn is_content(self) -> bool {
        matches!(
            self,
            Self::Noun | Self::Propn | Self::Verb | Self::Adj | Self::Adv
        )
    }

    pub fn is_nominal(self) -> bool {
        matches!(self, Self::Noun | Self::Propn)
    }

    pub fn is_verbal(self) -> bool {
        matches!(self, Self::Verb | Self::Aux)
    }
}

/// Grammatical tense, when the backend reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tense {
    Past,
    Present,
}

/// A single token of an annotated document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form as it appears in the text
    pub text: String,
    /// Lower-cased dictionary form
    pub lemma: String,
    pub pos: Pos,
    #[serde(default)]
    pub tense: Option<Tense>,
    /// Byte offsets into the raw text
    pub span: Range<usize>,
}

impl Token {
    pub fn new(text: impl Into<String>, lemma: impl Into<String>, pos: Pos, span: Range<usize>) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into().to_lowercase(),
            pos,
            tense: None,
            span,
        }
    }

    pub fn with_tense(mut self, tense: Tense) -> Self {
        self.tense = Some(tense);
        self
    }

    /// A word is a token made only of alphabetic characters.
    ///
    /// Numerals, punctuation and clitics such as `n't` are not words.
    pub fn is_word(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_alphabetic)
    }

    /// A content word is a word tagged noun, verb, adjective or adverb.
    pub fn is_content_word(&self) -> bool {
        self.is_word() && self.pos.is_content()
    }

    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn is_past_tense_verb(&self) -> bool {
        self.pos.is_verbal() && self.tense == Some(Tense::Past)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_alphabetic_only() {
        assert!(Token::new("cat", "cat", Pos::Noun, 0..3).is_word());
        assert!(!Token::new("42", "42", Pos::Num, 0..2).is_word());
        assert!(!Token::new(".", ".", Pos::Punct, 0..1).is_word());
        assert!(!Token::new("n't", "not", Pos::Part, 0..3).is_word());
    }

    #[test]
    fn content_words_need_content_pos() {
        assert!(Token::new("quickly", "quickly", Pos::Adv, 0..7).is_content_word());
        assert!(!Token::new("the", "the", Pos::Det, 0..3).is_content_word());
    }

    #[test]
    fn pos_labels_parse_case_insensitively() {
        assert_eq!(Pos::from_label("noun"), Pos::Noun);
        assert_eq!(Pos::from_label("CONJ"), Pos::Cconj);
        assert_eq!(Pos::from_label("???"), Pos::X);
    }

    #[test]
    fn lemma_is_lowercased() {
        let token = Token::new("Running", "Run", Pos::Verb, 0..7);
        assert_eq!(token.lemma, "run");
    }
}
