//! Reference frequency model for bigram qualification

use crate::config::{parse_yaml, SetupError, SetupResult};
use serde::Deserialize;
use std::collections::HashMap;

/// Minimum reference frequency for a bigram to qualify
pub const MIN_BIGRAM_FREQUENCY: u64 = 2;

/// A bigram qualifies only when its PMI exceeds this
pub const PMI_THRESHOLD: f64 = 0.0;

#[derive(Debug, Deserialize)]
struct RawModel {
    unigram_total: u64,
    bigram_total: u64,
    unigrams: HashMap<String, u64>,
    bigrams: HashMap<String, u64>,
}

/// Unigram and bigram counts of a reference corpus.
///
/// Fixed at load time, so bigram qualification never depends on the text
/// being scored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceModel {
    unigram_total: u64,
    bigram_total: u64,
    unigrams: HashMap<String, u64>,
    bigrams: HashMap<(String, String), u64>,
}

impl ReferenceModel {
    /// Parse the YAML model format (`unigram_total`, `bigram_total`,
    /// `unigrams: {word: count}`, `bigrams: {"w1 w2": count}`)
    pub fn from_yaml(what: &str, yaml: &str) -> SetupResult<Self> {
        let raw: RawModel = parse_yaml(what, yaml)?;
        if raw.unigram_total == 0 || raw.bigram_total == 0 {
            return Err(SetupError::Invalid {
                what: what.to_string(),
                reason: "totals must be positive".to_string(),
            });
        }

        let mut bigrams = HashMap::with_capacity(raw.bigrams.len());
        for (key, count) in raw.bigrams {
            let parts: Vec<&str> = key.split_whitespace().collect();
            match parts.as_slice() {
                [a, b] => {
                    bigrams.insert((a.to_lowercase(), b.to_lowercase()), count);
                }
                _ => {
                    return Err(SetupError::Invalid {
                        what: what.to_string(),
                        reason: format!("bigram key '{}' must be two words", key),
                    })
                }
            }
        }

        Ok(Self {
            unigram_total: raw.unigram_total,
            bigram_total: raw.bigram_total,
            unigrams: raw
                .unigrams
                .into_iter()
                .map(|(w, c)| (w.to_lowercase(), c))
                .collect(),
            bigrams,
        })
    }

    pub fn bigram_frequency(&self, first: &str, second: &str) -> u64 {
        self.bigrams
            .get(&(first.to_string(), second.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// log2( P(a,b) / (P(a) P(b)) ), or `None` when any count is zero
    pub fn pmi(&self, first: &str, second: &str) -> Option<f64> {
        let joint = self.bigram_frequency(first, second);
        let a = self.unigrams.get(first).copied().unwrap_or(0);
        let b = self.unigrams.get(second).copied().unwrap_or(0);
        if joint == 0 || a == 0 || b == 0 {
            return None;
        }
        let p_joint = joint as f64 / self.bigram_total as f64;
        let p_a = a as f64 / self.unigram_total as f64;
        let p_b = b as f64 / self.unigram_total as f64;
        Some((p_joint / (p_a * p_b)).log2())
    }

    /// Frequency of at least [`MIN_BIGRAM_FREQUENCY`] and PMI above [`PMI_THRESHOLD`]
    pub fn qualifies(&self, first: &str, second: &str) -> bool {
        self.bigram_frequency(first, second) >= MIN_BIGRAM_FREQUENCY
            && self.pmi(first, second).is_some_and(|pmi| pmi > PMI_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = r#"
unigram_total: 1000
bigram_total: 1000
unigrams: {the: 100, of: 50, cat: 2, rare: 1, word: 1}
bigrams: {"of the": 20, "the cat": 1, "rare word": 1, "the of": 2}
"#;

    #[test]
    fn collocations_qualify() {
        let model = ReferenceModel::from_yaml("test", MODEL).unwrap();
        // 0.02 / (0.1 * 0.05) = 4 -> PMI 2
        assert!((model.pmi("of", "the").unwrap() - 2.0).abs() < 1e-9);
        assert!(model.qualifies("of", "the"));
    }

    #[test]
    fn infrequent_bigrams_do_not_qualify() {
        let model = ReferenceModel::from_yaml("test", MODEL).unwrap();
        assert!(!model.qualifies("the", "cat"));
        assert!(!model.qualifies("rare", "word"));
    }

    #[test]
    fn negative_pmi_does_not_qualify() {
        let model = ReferenceModel::from_yaml("test", MODEL).unwrap();
        // 0.002 / (0.1 * 0.05) = 0.4 -> negative PMI
        assert!(model.pmi("the", "of").unwrap() < 0.0);
        assert!(!model.qualifies("the", "of"));
    }

    #[test]
    fn unknown_words_have_no_pmi() {
        let model = ReferenceModel::from_yaml("test", MODEL).unwrap();
        assert_eq!(model.pmi("purple", "cat"), None);
    }

    #[test]
    fn malformed_bigram_key_is_rejected() {
        let yaml = "unigram_total: 1\nbigram_total: 1\nunigrams: {}\nbigrams: {\"one two three\": 4}";
        assert!(ReferenceModel::from_yaml("test", yaml).is_err());
    }
}
