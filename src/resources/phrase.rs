//! Phrase lexicons: fixed word lists grouped by kind, matched over tokens

use crate::config::{parse_yaml, SetupError, SetupResult};
use crate::document::Token;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Logical relation signalled by a connective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectiveKind {
    Causal,
    Contrastive,
    Temporal,
    Additive,
}

/// The four elements of an argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentElement {
    Claim,
    Evidence,
    Reasoning,
    Counterargument,
}

impl ArgumentElement {
    pub const ALL: [ArgumentElement; 4] = [
        Self::Claim,
        Self::Evidence,
        Self::Reasoning,
        Self::Counterargument,
    ];
}

/// A phrase occurrence in a token slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch<K> {
    /// Index of the first matched token, relative to the slice
    pub start: usize,
    pub len: usize,
    pub kind: K,
}

/// Word phrases tagged with a kind.
///
/// Matching is case-insensitive over consecutive word tokens, greedy
/// left to right, longest phrase first, never overlapping.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseLexicon<K> {
    /// Sorted longest first
    phrases: Vec<(Vec<String>, K)>,
}

impl<K: Copy + Ord + DeserializeOwned> PhraseLexicon<K> {
    pub fn new(entries: impl IntoIterator<Item = (K, Vec<String>)>) -> SetupResult<Self> {
        let mut phrases = Vec::new();
        for (kind, list) in entries {
            for phrase in list {
                let words: Vec<String> = phrase
                    .split_whitespace()
                    .map(|w| w.to_lowercase())
                    .collect();
                if words.is_empty() {
                    return Err(SetupError::Invalid {
                        what: "phrase lexicon".to_string(),
                        reason: "empty phrase".to_string(),
                    });
                }
                phrases.push((words, kind));
            }
        }
        // Stable sort keeps file order among equal lengths
        phrases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Ok(Self { phrases })
    }

    /// Parse `kind: [phrase, ...]` YAML
    pub fn from_yaml(what: &str, yaml: &str) -> SetupResult<Self> {
        let raw: BTreeMap<K, Vec<String>> = parse_yaml(what, yaml)?;
        Self::new(raw)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Find phrase occurrences in one sentence worth of tokens
    pub fn find(&self, tokens: &[Token]) -> Vec<PhraseMatch<K>> {
        let lowered: Vec<Option<String>> = tokens
            .iter()
            .map(|t| t.is_word().then(|| t.lower()))
            .collect();

        let mut matches = Vec::new();
        let mut i = 0;
        while i < lowered.len() {
            let hit = self.phrases.iter().find(|(words, _)| {
                i + words.len() <= lowered.len()
                    && words
                        .iter()
                        .zip(&lowered[i..])
                        .all(|(w, t)| t.as_deref() == Some(w.as_str()))
            });
            match hit {
                Some((words, kind)) => {
                    matches.push(PhraseMatch {
                        start: i,
                        len: words.len(),
                        kind: *kind,
                    });
                    i += words.len();
                }
                None => i += 1,
            }
        }
        matches
    }
}
