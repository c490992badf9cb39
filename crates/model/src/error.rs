use thiserror::Error;

/// Result type for label model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while building or loading a label graph
#[derive(Error, Debug)]
pub enum ModelError {
    /// The same label type was attached twice to one element
    #[error("Duplicate label {label_type} on {element}")]
    DuplicateLabel { element: String, label_type: String },

    /// Element identity is empty or incomplete
    #[error("Invalid element: {0}")]
    InvalidElement(String),

    /// Manifest could not be parsed
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl ModelError {
    /// Create an invalid element error
    pub fn invalid_element(msg: impl Into<String>) -> Self {
        Self::InvalidElement(msg.into())
    }
}
