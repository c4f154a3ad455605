//! Extractor configuration and setup errors
//!
//! Configuration is a YAML file; every field is optional:
//!
//! ```yaml
//! collaborator_timeout_secs: 30   # fractions allowed, e.g. 0.5
//! max_concurrency: 4
//! column_prefix: "OST_"
//! lexicon_path: /data/lexicon.yaml
//! reference_model_path: /data/reference_bigrams.yaml
//! connectives_path: /data/connectives.yaml
//! markers_path: /data/argument_markers.yaml
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Setup failures: bad configuration or unloadable resources.
///
/// These are the only process-fatal errors; per-document problems are
/// [`AnnotationError`](crate::backend::AnnotationError)s.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid resource {what}: {reason}")]
    Invalid { what: String, reason: String },

    #[error("indicator schema: {0}")]
    Schema(String),
}

pub type SetupResult<T> = Result<T, SetupError>;

/// Read a file to a string, tagging I/O errors with the path.
pub(crate) fn read_file(path: &Path) -> SetupResult<String> {
    std::fs::read_to_string(path).map_err(|source| SetupError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse YAML, tagging parse errors with what was being parsed.
pub(crate) fn parse_yaml<T: serde::de::DeserializeOwned>(what: &str, yaml: &str) -> SetupResult<T> {
    serde_yaml::from_str(yaml).map_err(|source| SetupError::Parse {
        what: what.to_string(),
        source,
    })
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the feature extractor and batch runner
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Bound on each backend call, in (possibly fractional) seconds
    pub collaborator_timeout_secs: f64,
    /// Documents processed concurrently by the batch runner
    pub max_concurrency: usize,
    /// Prefix prepended to indicator column names
    pub column_prefix: String,
    pub lexicon_path: Option<PathBuf>,
    pub reference_model_path: Option<PathBuf>,
    pub connectives_path: Option<PathBuf>,
    pub markers_path: Option<PathBuf>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            collaborator_timeout_secs: DEFAULT_TIMEOUT.as_secs_f64(),
            max_concurrency: 4,
            column_prefix: String::new(),
            lexicon_path: None,
            reference_model_path: None,
            connectives_path: None,
            markers_path: None,
        }
    }
}

impl ExtractorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a YAML file
    pub fn load(path: &Path) -> SetupResult<Self> {
        let yaml = read_file(path)?;
        let config: Self = parse_yaml(&path.display().to_string(), &yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file at `path`, else the default location, else defaults
    pub fn load_or_default(path: Option<&Path>) -> SetupResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = default_config_path();
                if default.is_file() {
                    Self::load(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn with_column_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.column_prefix = prefix.into();
        self
    }

    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = limit;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.collaborator_timeout_secs = timeout.as_secs_f64();
        self
    }

    /// Backend call bound; an unrepresentable value falls back to the default
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.collaborator_timeout_secs).unwrap_or(DEFAULT_TIMEOUT)
    }

    fn validate(&self) -> SetupResult<()> {
        if self.max_concurrency == 0 {
            return Err(SetupError::Invalid {
                what: "config".to_string(),
                reason: "max_concurrency must be at least 1".to_string(),
            });
        }
        let secs = self.collaborator_timeout_secs;
        if !secs.is_finite() || secs <= 0.0 {
            return Err(SetupError::Invalid {
                what: "config".to_string(),
                reason: format!("collaborator_timeout_secs must be a positive number, got {}", secs),
            });
        }
        Ok(())
    }
}

/// Default config location (~/.config/ost-writing/config.yaml)
pub fn default_config_path() -> PathBuf {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".config"));
    config_dir.join("ost-writing").join("config.yaml")
}
