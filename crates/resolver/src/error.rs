use metalabel_model::ModelError;
use thiserror::Error;

/// Result type for resolver operations
pub type Result<T> = std::result::Result<T, ResolverError>;

/// Errors surfaced before a resolution starts
///
/// Resolution itself never fails: missing label data is an empty expansion.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Element identity is empty, incomplete or of the wrong kind
    #[error("Invalid element: {0}")]
    InvalidElement(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file is not valid TOML for `ResolverConfig`
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Label model error
    #[error("Label model error: {0}")]
    Model(#[source] ModelError),
}

impl ResolverError {
    pub fn invalid_element(msg: impl Into<String>) -> Self {
        Self::InvalidElement(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

impl From<ModelError> for ResolverError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvalidElement(msg) => Self::InvalidElement(msg),
            other => Self::Model(other),
        }
    }
}
