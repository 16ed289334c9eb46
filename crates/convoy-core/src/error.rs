use thiserror::Error;

/// Custom result type for Convoy operations
pub type ConvoyResult<T> = Result<T, ConvoyError>;

/// Custom error type for Convoy operations
#[derive(Debug, Error)]
pub enum ConvoyError {
    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Environment '{0}' not found")]
    EnvironmentNotFound(String),

    #[error("Environment '{0}' already exists")]
    DuplicateEnvironment(String),

    #[error("Invalid pipeline name '{0}'")]
    InvalidPipelineName(String),

    #[error("Invalid agent uuid '{0}'")]
    InvalidAgentUuid(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ConvoyError {
    /// Create a new environment error
    pub fn environment<S: Into<String>>(msg: S) -> Self {
        ConvoyError::Environment(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ConvoyError::Config(msg.into())
    }
}

impl From<serde_json::Error> for ConvoyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
