use thiserror::Error;

/// Errors from parsing the string forms of presentation selectors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown placement: {0}")]
    UnknownPlacement(String),
    #[error("Unknown size: {0}")]
    UnknownSize(String),
    #[error("Unknown variant: {0}")]
    UnknownVariant(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid offset {0}: must be finite and non-negative")]
    InvalidOffset(f64),
    #[error("Invalid viewport margin {0}: must be finite and non-negative")]
    InvalidMargin(f64),
}
