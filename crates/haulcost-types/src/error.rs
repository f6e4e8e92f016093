//! Error types for haulcost

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("CSV loader error: {0}")]
    CsvLoader(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: &'static str, id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation produced a non-finite value: {0}")]
    NonFiniteResult(String),

    #[error("Estimation failed: {0}")]
    EstimationFailed(String),
}

impl Error {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Error::RecordNotFound {
            kind,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = Error::not_found("Vehicle", "v-9");
        assert_eq!(err.to_string(), "Vehicle not found: v-9");
    }

    #[test]
    fn test_config_error_converts() {
        let err: Error = ConfigError::ParseError("bad value".to_string()).into();
        assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
        assert!(err.to_string().contains("bad value"));
    }
}
