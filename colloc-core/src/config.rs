//! Analysis configuration.
//!
//! Loaded from TOML. Every field is optional and falls back to its default:
//!
//! ```toml
//! top_n = 20
//! min_freq = 3
//! network_min_freq = 2
//! export_limit = 100
//! measures = ["pmi", "chi_square", "likelihood_ratio", "student_t", "raw_freq"]
//! stopword_language = "en"
//!
//! [tokenizer]
//! remove_stopwords = true
//! lowercase = true
//! remove_punctuation = true
//! ```

use std::path::Path;

use colloc_types::{AssociationMeasure, TokenizerConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analyzer::stopwords::StopwordFilter;
use crate::analyzer::tokenizer::WordTokenizer;
use crate::collocation::EXPORT_LIMIT;
use crate::error::ConfigError;

/// Tunables for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Collocations returned per measure.
    pub top_n: usize,
    /// Minimum joint frequency for a bigram to be ranked.
    pub min_freq: u64,
    /// Minimum joint frequency for a bigram to enter the network.
    pub network_min_freq: u64,
    /// Rows in the exported table.
    pub export_limit: usize,
    /// Measures to compute, in reporting order.
    pub measures: Vec<AssociationMeasure>,
    /// Stopword list language code.
    pub stopword_language: String,
    /// Options for the reference tokenizer.
    pub tokenizer: TokenizerConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: 20,
            min_freq: 3,
            network_min_freq: 2,
            export_limit: EXPORT_LIMIT,
            measures: AssociationMeasure::ALL.to_vec(),
            stopword_language: "en".to_string(),
            tokenizer: TokenizerConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML or unknown measure
    /// names, `ConfigError::Invalid` for out-of-range values.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read, otherwise as
    /// [`AnalysisConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        match Self::from_toml_str(&content) {
            Ok(config) => {
                debug!("Loaded analysis config from {}", path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                Err(e)
            }
        }
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".into()));
        }
        if self.export_limit == 0 {
            return Err(ConfigError::Invalid("export_limit must be at least 1".into()));
        }
        if self.measures.is_empty() {
            warn!("no association measures configured");
        }
        Ok(())
    }

    /// Serializes the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Propagates `toml` serialization failures.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Builds the word tokenizer this configuration describes.
    pub fn word_tokenizer(&self) -> WordTokenizer {
        let stopwords = if self.tokenizer.remove_stopwords {
            StopwordFilter::new(&self.stopword_language)
        } else {
            StopwordFilter::empty()
        };
        WordTokenizer::with_stopwords(self.tokenizer, stopwords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.top_n, 20);
        assert_eq!(config.min_freq, 3);
        assert_eq!(config.network_min_freq, 2);
        assert_eq!(config.export_limit, 100);
        assert_eq!(config.measures.len(), 5);
        assert!(config.tokenizer.remove_stopwords);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(
            AnalysisConfig::from_toml_str("").unwrap(),
            AnalysisConfig::default()
        );
    }

    #[test]
    fn partial_override() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            top_n = 5
            measures = ["pmi", "chi_sq"]

            [tokenizer]
            remove_stopwords = false
            "#,
        )
        .unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.min_freq, 3);
        assert_eq!(
            config.measures,
            vec![AssociationMeasure::Pmi, AssociationMeasure::ChiSquare]
        );
        assert!(!config.tokenizer.remove_stopwords);
        assert!(config.tokenizer.lowercase);
    }

    #[test]
    fn rejects_zero_limits() {
        assert!(matches!(
            AnalysisConfig::from_toml_str("top_n = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml_str("export_limit = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_unknown_measure() {
        assert!(matches!(
            AnalysisConfig::from_toml_str(r#"measures = ["dice"]"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn toml_round_trip() {
        let config = AnalysisConfig {
            top_n: 7,
            stopword_language: "de".into(),
            ..AnalysisConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(AnalysisConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_freq = 1\nnetwork_min_freq = 4").unwrap();
        let config = AnalysisConfig::load(file.path()).unwrap();
        assert_eq!(config.min_freq, 1);
        assert_eq!(config.network_min_freq, 4);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AnalysisConfig::load(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn word_tokenizer_follows_config() {
        let config = AnalysisConfig {
            tokenizer: TokenizerConfig::keep_stopwords(),
            ..AnalysisConfig::default()
        };
        assert_eq!(
            config.word_tokenizer().tokenize("In everything, give thanks"),
            vec!["in", "everything", "give", "thanks"]
        );

        let filtered = AnalysisConfig::default().word_tokenizer();
        assert!(!filtered.tokenize("the machine").contains(&"the".to_string()));
    }
}
