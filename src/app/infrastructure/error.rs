use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("project name cannot be empty")]
    InvalidName,

    #[error("no saved project with id {0}")]
    NotFound(Uuid),

    #[error("an AI operation is already in progress")]
    AiBusy,

    #[error("no AI credential is configured")]
    ConfigurationRequired,

    #[error("the configured AI credential is no longer valid")]
    CredentialInvalid,

    #[error("AI request failed: {0}")]
    AiRequestFailed(String),

    #[error("credential selection failed: {0}")]
    CredentialSelection(String),
}

impl AppError {
    /// Whether this failure should route the user to credential setup
    /// instead of a plain retry message.
    pub fn requires_credential_setup(&self) -> bool {
        matches!(self, Self::ConfigurationRequired | Self::CredentialInvalid)
    }
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;
