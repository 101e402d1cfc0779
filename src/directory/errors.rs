use serde::Deserialize;
use thiserror::Error;

/// JSON body the directory attaches to non-2xx replies.
///
/// Validation failures carry `message`, missing records carry `error`; either
/// may be absent.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ErrorPayload {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Directory rejected the request with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("Connection error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Decode(String),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

impl DirectoryError {
    /// Builds a rejection from a parsed error body; only `message` is kept.
    pub fn rejected(status: u16, payload: ErrorPayload) -> Self {
        DirectoryError::Rejected {
            status,
            message: payload.message,
        }
    }

    /// Whether the rejection concerns the email address.
    ///
    /// The directory does not send a machine-readable code for uniqueness
    /// clashes, so any rejection whose message mentions "email" (in any case)
    /// counts as one.
    pub fn is_email_conflict(&self) -> bool {
        match self {
            DirectoryError::Rejected {
                message: Some(message),
                ..
            } => message.to_lowercase().contains("email"),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DirectoryError::Decode(err.to_string())
        } else {
            DirectoryError::Transport(err.to_string())
        }
    }
}
