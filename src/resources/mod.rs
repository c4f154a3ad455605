//! Read-only resource bundle used by the indicator library
//!
//! Built once at startup (from the files shipped in `resources/` or from
//! paths in [`ExtractorConfig`]) and shared read-only by every extraction.

mod phrase;
mod reference;

pub use phrase::{ArgumentElement, ConnectiveKind, PhraseLexicon, PhraseMatch};
pub use reference::{ReferenceModel, MIN_BIGRAM_FREQUENCY, PMI_THRESHOLD};

use crate::config::{read_file, ExtractorConfig, SetupResult};
use std::path::Path;

const BUILTIN_CONNECTIVES: &str = include_str!("../../resources/connectives.yaml");
const BUILTIN_MARKERS: &str = include_str!("../../resources/argument_markers.yaml");
const BUILTIN_REFERENCE: &str = include_str!("../../resources/reference_bigrams.yaml");

/// Fixed lexicons and reference statistics read by indicators
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorResources {
    pub connectives: PhraseLexicon<ConnectiveKind>,
    pub argument_markers: PhraseLexicon<ArgumentElement>,
    pub reference: ReferenceModel,
}

impl IndicatorResources {
    pub fn new(
        connectives: PhraseLexicon<ConnectiveKind>,
        argument_markers: PhraseLexicon<ArgumentElement>,
        reference: ReferenceModel,
    ) -> Self {
        Self {
            connectives,
            argument_markers,
            reference,
        }
    }

    /// The resources shipped with the crate
    pub fn builtin() -> SetupResult<Self> {
        Ok(Self {
            connectives: PhraseLexicon::from_yaml("built-in connectives", BUILTIN_CONNECTIVES)?,
            argument_markers: PhraseLexicon::from_yaml("built-in argument markers", BUILTIN_MARKERS)?,
            reference: ReferenceModel::from_yaml("built-in reference model", BUILTIN_REFERENCE)?,
        })
    }

    /// Built-in resources, overridden by any paths set in the config
    pub fn from_config(config: &ExtractorConfig) -> SetupResult<Self> {
        let connectives = match &config.connectives_path {
            Some(path) => PhraseLexicon::from_yaml(&describe(path), &read_file(path)?)?,
            None => PhraseLexicon::from_yaml("built-in connectives", BUILTIN_CONNECTIVES)?,
        };
        let argument_markers = match &config.markers_path {
            Some(path) => PhraseLexicon::from_yaml(&describe(path), &read_file(path)?)?,
            None => PhraseLexicon::from_yaml("built-in argument markers", BUILTIN_MARKERS)?,
        };
        let reference = match &config.reference_model_path {
            Some(path) => ReferenceModel::from_yaml(&describe(path), &read_file(path)?)?,
            None => ReferenceModel::from_yaml("built-in reference model", BUILTIN_REFERENCE)?,
        };
        Ok(Self::new(connectives, argument_markers, reference))
    }
}

fn describe(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_resources_load() {
        let resources = IndicatorResources::builtin().unwrap();
        assert!(resources.connectives.len() >= 20);
        assert!(!resources.argument_markers.is_empty());
        assert!(resources.reference.qualifies("of", "the"));
        assert!(resources.reference.qualifies("for", "example"));
    }

    #[test]
    fn config_paths_override_builtins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "causal: [whence]").unwrap();
        let config = ExtractorConfig {
            connectives_path: Some(file.path().to_path_buf()),
            ..ExtractorConfig::default()
        };

        let resources = IndicatorResources::from_config(&config).unwrap();
        assert_eq!(resources.connectives.len(), 1);
        assert_eq!(resources.reference, IndicatorResources::builtin().unwrap().reference);
    }
}
