use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    MissingCredential,
    Transport,
    Upstream,
    NoResults,
    InvalidInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum MapsError {
    #[error("missing credential: {0} is not set")]
    MissingCredential(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("maps service answered {status}: {message}")]
    Upstream { status: String, message: String },
    #[error("no results for {0}")]
    NoResults(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl MapsError {
    pub fn code(&self) -> ErrorCode {
        match self {
            MapsError::MissingCredential(_) => ErrorCode::MissingCredential,
            MapsError::Transport(_) => ErrorCode::Transport,
            MapsError::Upstream { .. } => ErrorCode::Upstream,
            MapsError::NoResults(_) => ErrorCode::NoResults,
            MapsError::InvalidInput(_) => ErrorCode::InvalidInput,
        }
    }
}

impl From<MapsError> for ApiError {
    fn from(value: MapsError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
