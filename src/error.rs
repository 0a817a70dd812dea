use std::path::PathBuf;

/// All errors that can occur while building or emitting a workspace.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The context document parsed but breaks a schema rule.
    #[error("Invalid context: {field}: {message}")]
    Invalid { field: String, message: String },

    #[error("Context file not found: {} (create it from company-context.json.example)", .0.display())]
    ContextMissing(PathBuf),

    #[error("{0}")]
    Custom(String),
}

impl GeneratorError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
