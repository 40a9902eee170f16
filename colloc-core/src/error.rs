//! Error types for colloc-core.

use std::path::PathBuf;

use colloc_types::MeasureError;
use thiserror::Error;

/// Result type for colloc-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while writing or reading exported collocation tables.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExportError {
    /// Malformed row or serialization failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading analysis configuration.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for this schema.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of its accepted range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Error type for colloc-core operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Unknown association measure (invalid argument).
    #[error(transparent)]
    Measure(#[from] MeasureError),

    /// Export failure.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns `true` for errors caused by an invalid caller-supplied argument.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::Measure(_) | Error::Config(ConfigError::Invalid(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_error_is_invalid_argument() {
        let err: Error = MeasureError::Unknown {
            name: "dice".into(),
        }
        .into();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("dice"));
    }

    #[test]
    fn io_error_is_not_invalid_argument() {
        let err: Error = ExportError::from(std::io::Error::other("disk full")).into();
        assert!(!err.is_invalid_argument());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn config_read_error_names_path() {
        let err = ConfigError::Read {
            path: PathBuf::from("/missing/colloc.toml"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("/missing/colloc.toml"));
    }
}
