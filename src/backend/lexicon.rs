//! In-memory word-sense lexicon loaded from YAML

use super::{AnnotationError, LexiconLookup};
use crate::config::{parse_yaml, read_file, SetupError, SetupResult};
use crate::document::{Concreteness, LexiconEntry, Pos};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const BUILTIN_LEXICON: &str = include_str!("../../resources/lexicon.yaml");

/// Raw hierarchy depth that maps to a normalised depth of 1
pub const MAX_HIERARCHY_DEPTH: f64 = 10.0;

#[derive(Debug, Deserialize)]
struct RawLexicon {
    entries: HashMap<String, RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    senses: u32,
    depth: f64,
    concreteness: Concreteness,
    #[serde(default)]
    primary: Option<String>,
}

/// Lexicon held entirely in memory, keyed by lower-cased lemma.
///
/// Read-only after construction; shared across concurrent documents.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLexicon {
    entries: HashMap<String, LexiconEntry>,
}

impl InMemoryLexicon {
    /// The lexicon shipped in `resources/lexicon.yaml`
    pub fn builtin() -> SetupResult<Self> {
        Self::from_yaml_str("built-in lexicon", BUILTIN_LEXICON)
    }

    pub fn from_path(path: &Path) -> SetupResult<Self> {
        Self::from_yaml_str(&path.display().to_string(), &read_file(path)?)
    }

    /// Parse `entries: {lemma: {senses, depth, concreteness, primary}}`.
    ///
    /// Raw depths are divided by [`MAX_HIERARCHY_DEPTH`] and clamped to 1.
    /// A missing `primary` means the lemma names its own primary sense.
    pub fn from_yaml_str(what: &str, yaml: &str) -> SetupResult<Self> {
        let raw: RawLexicon = parse_yaml(what, yaml)?;
        let mut entries = HashMap::with_capacity(raw.entries.len());

        for (lemma, entry) in raw.entries {
            if entry.senses == 0 || !entry.depth.is_finite() || entry.depth < 0.0 {
                return Err(SetupError::Invalid {
                    what: what.to_string(),
                    reason: format!("entry '{}' needs at least one sense and a non-negative depth", lemma),
                });
            }
            let lemma = lemma.to_lowercase();
            let primary_lemma = entry
                .primary
                .map(|p| p.to_lowercase())
                .unwrap_or_else(|| lemma.clone());
            entries.insert(
                lemma,
                LexiconEntry {
                    sense_count: entry.senses,
                    hierarchy_depth: (entry.depth / MAX_HIERARCHY_DEPTH).min(1.0),
                    concreteness: entry.concreteness,
                    primary_lemma,
                },
            );
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, lemma: &str) -> Option<&LexiconEntry> {
        self.entries.get(lemma)
    }
}

#[async_trait]
impl LexiconLookup for InMemoryLexicon {
    fn id(&self) -> &str {
        "in-memory-lexicon"
    }

    async fn lookup(&self, lemma: &str, _pos: Pos) -> Result<Option<LexiconEntry>, AnnotationError> {
        Ok(self.get(&lemma.to_lowercase()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lexicon_loads() {
        let lexicon = InMemoryLexicon::builtin().unwrap();
        assert!(lexicon.len() > 50);

        let cat = lexicon.get("cat").unwrap();
        assert_eq!(cat.concreteness, Concreteness::Concrete);
        assert_eq!(cat.primary_lemma, "cat");
        assert!(cat.sense_count > 1);
    }

    #[test]
    fn test_depth_is_normalised_and_clamped() {
        let lexicon = InMemoryLexicon::from_yaml_str(
            "test",
            "entries:\n  dog: { senses: 2, depth: 5, concreteness: concrete }\n  entity: { senses: 1, depth: 14, concreteness: abstract }",
        )
        .unwrap();

        assert!((lexicon.get("dog").unwrap().hierarchy_depth - 0.5).abs() < 1e-12);
        assert_eq!(lexicon.get("entity").unwrap().hierarchy_depth, 1.0);
        assert_eq!(lexicon.get("dog").unwrap().primary_lemma, "dog");
    }

    #[test]
    fn test_zero_senses_is_rejected() {
        let result = InMemoryLexicon::from_yaml_str(
            "test",
            "entries:\n  void: { senses: 0, depth: 1, concreteness: abstract }",
        );
        assert!(matches!(result, Err(SetupError::Invalid { .. })));
    }

    #[tokio::test]
    async fn test_lookup_distinguishes_absent_from_shallow() {
        let lexicon = InMemoryLexicon::from_yaml_str(
            "test",
            "entries:\n  thing: { senses: 3, depth: 0, concreteness: abstract }",
        )
        .unwrap();

        let thing = lexicon.lookup("Thing", Pos::Noun).await.unwrap();
        assert_eq!(thing.map(|e| e.hierarchy_depth), Some(0.0));
        assert_eq!(lexicon.lookup("zyzzyva", Pos::Noun).await.unwrap(), None);
    }
}
