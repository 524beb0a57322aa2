use crate::notify::{Notification, Severity};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A form-level check failed. Nothing was constructed or persisted.
    #[error("{title}: {message}")]
    Validation { title: String, message: String },

    #[error("No CEO profile found")]
    MissingProfile,

    #[error("No game data found")]
    MissingGameRecord,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GameError {
    pub fn validation(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            title: title.into(),
            message: message.into(),
        }
    }

    /// The user-facing notification for this error.
    pub fn notification(&self) -> Notification {
        match self {
            Self::Validation { title, message } => {
                Notification::destructive(title.clone(), message.clone())
            }
            Self::MissingProfile => Notification::destructive(
                "No CEO Profile Found",
                "Please create your CEO profile first.",
            ),
            Self::MissingGameRecord => Notification::destructive(
                "No Game Data Found",
                "Please complete the startup setup first.",
            ),
            other => Notification {
                title: "Something went wrong".into(),
                description: other.to_string(),
                severity: Severity::Destructive,
            },
        }
    }
}

pub type GameResult<T> = Result<T, GameError>;
