use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NO_IMAGE_MESSAGE: &str = "No image returned from AI";
pub const RETRY_MESSAGE: &str = "Please try again";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Generation,
    Transport,
    Busy,
}

/// Terminal outcome of a submission that did not produce a design.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", content = "message", rename_all = "snake_case")]
pub enum SubmissionError {
    #[error("empty prompt")]
    EmptyPrompt,
    #[error("a design is already being generated")]
    InFlight,
    #[error("{0}")]
    Generation(String),
    #[error("{0}")]
    Transport(String),
}

impl SubmissionError {
    /// Builds a generation failure, falling back to the missing-image message.
    pub fn generation(message: Option<&str>) -> Self {
        match message.map(str::trim).filter(|m| !m.is_empty()) {
            Some(message) => Self::Generation(message.to_string()),
            None => Self::Generation(NO_IMAGE_MESSAGE.to_string()),
        }
    }

    /// Builds a transport failure, falling back to a retry suggestion.
    pub fn transport(message: impl AsRef<str>) -> Self {
        let message = message.as_ref().trim();
        if message.is_empty() {
            Self::Transport(RETRY_MESSAGE.to_string())
        } else {
            Self::Transport(message.to_string())
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyPrompt => ErrorCode::Validation,
            Self::InFlight => ErrorCode::Busy,
            Self::Generation(_) => ErrorCode::Generation,
            Self::Transport(_) => ErrorCode::Transport,
        }
    }
}
