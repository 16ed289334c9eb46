use convoy_core::ConvoyError;

/// Result type for update command execution
pub type UpdateResult<T> = Result<T, UpdateError>;

/// Update command error types
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// The mutation target disappeared between validation and apply
    #[error("Environment '{0}' not found")]
    EnvironmentNotFound(String),

    /// A phase was invoked out of contract order
    #[error("Precondition error: {0}")]
    Precondition(String),

    /// Underlying collection rejected an apply-time operation
    #[error("Config error: {0}")]
    Config(String),
}

impl From<ConvoyError> for UpdateError {
    fn from(error: ConvoyError) -> Self {
        match error {
            ConvoyError::EnvironmentNotFound(name) => UpdateError::EnvironmentNotFound(name),
            other => UpdateError::Config(other.to_string()),
        }
    }
}
