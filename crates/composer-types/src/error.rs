use thiserror::Error;

use crate::modality::ModalityKind;

/// Errors from repository operations (used by trait definitions in composer-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage unavailable: {0}")]
    Io(String),

    #[error("malformed stored data: {0}")]
    Malformed(String),

    #[error("entity not found")]
    NotFound,

    #[error("project '{0}' not found")]
    ProjectNotFound(String),
}

/// Errors from the remote build service.
#[derive(Debug, Error)]
pub enum BuildServiceError {
    /// The request never produced an HTTP response.
    #[error("build service unreachable: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("build service returned HTTP {status}")]
    Remote {
        status: u16,
        /// `message` field of the failure payload, when the service sent one.
        server_message: Option<String>,
    },
}

impl BuildServiceError {
    /// Message shown to the author: the server's own message when present,
    /// otherwise the local error text.
    pub fn user_message(&self) -> String {
        match self {
            BuildServiceError::Remote {
                server_message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Errors from the modality editing session.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("modality '{0}' is not active")]
    NotActive(ModalityKind),

    #[error("modality '{0}' cannot be edited as a tab")]
    NotEditable(ModalityKind),

    #[error("template '{0}' not found")]
    TemplateNotFound(String),

    /// The template holds free-form text the structured editor would lose.
    #[error("template '{0}' is not a structured response")]
    NotStructured(String),

    #[error("template store error: {0}")]
    Store(#[from] RepositoryError),
}

/// Errors from wiring a skill into a root bot.
#[derive(Debug, Error)]
pub enum SkillLinkError {
    #[error("project '{0}' has no root dialog")]
    MissingRootDialog(String),

    #[error("root dialog content is not an object")]
    MalformedDialog,

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
