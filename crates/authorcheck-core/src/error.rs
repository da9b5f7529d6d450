//! Error types for AuthorCheck

/// Result type alias using AuthorCheck's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for AuthorCheck operations
///
/// The scoring engine itself has no runtime failure modes: under-length
/// content is a "no evidence" signal, not an error. These variants cover
/// construction (config loading, pattern compilation) and the request
/// validation done by the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid detection configuration (thresholds, weights, rule tables)
    #[error("configuration error: {0}")]
    Config(String),

    /// Detector construction errors
    #[error("detector error: {0}")]
    Detector(String),

    /// Request validation errors
    #[error("validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new detector error
    pub fn detector(msg: impl Into<String>) -> Self {
        Self::Detector(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Short machine-readable name of the error class
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Detector(_) => "detector",
            Self::Validation(_) => "validation",
            Self::Io(_) => "io",
            Self::Yaml(_) => "yaml",
        }
    }
}
