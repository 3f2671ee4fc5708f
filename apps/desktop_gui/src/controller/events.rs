//! UI/backend events and error modeling for desktop GUI controller.

use map_core::DirectionsCompletion;
use shared::{
    domain::{Coordinate, RequestId},
    error::{ApiError, ErrorCode},
    protocol::PlaceSuggestion,
};

pub enum UiEvent {
    ServicesReady,
    ServicesFailed(UiError),
    Suggestions {
        query: String,
        suggestions: Vec<PlaceSuggestion>,
    },
    PlaceResolved {
        id: RequestId,
        description: String,
        position: Coordinate,
    },
    DirectionsFinished(DirectionsCompletion),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Credential,
    Transport,
    Upstream,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Search,
    Directions,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_api(context: UiErrorContext, error: ApiError) -> Self {
        let category = match error.code {
            ErrorCode::MissingCredential => UiErrorCategory::Credential,
            ErrorCode::Transport => UiErrorCategory::Transport,
            ErrorCode::Upstream => UiErrorCategory::Upstream,
            ErrorCode::NoResults | ErrorCode::InvalidInput => UiErrorCategory::Validation,
        };
        Self {
            category,
            context,
            message: error.message,
        }
    }

    /// Classifies errors that lost their type on the way, e.g. across a task boundary.
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("missing credential")
            || lower.contains("request_denied")
            || lower.contains("api key")
        {
            UiErrorCategory::Credential
        } else if lower.contains("transport")
            || lower.contains("timed out")
            || lower.contains("connection")
            || lower.contains("dns")
        {
            UiErrorCategory::Transport
        } else if lower.contains("maps service answered") {
            UiErrorCategory::Upstream
        } else if lower.contains("invalid") || lower.contains("no results") {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_anyhow(context: UiErrorContext, err: &anyhow::Error) -> Self {
        match err.downcast_ref::<shared::error::MapsError>() {
            Some(maps) => Self::from_api(
                context,
                ApiError::new(maps.code(), maps.to_string()),
            ),
            None => Self::from_message(context, format!("{err:#}")),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_line(&self) -> String {
        let label = match self.category {
            UiErrorCategory::Credential => "Credential",
            UiErrorCategory::Transport => "Network",
            UiErrorCategory::Upstream => "Maps service",
            UiErrorCategory::Validation => "Input",
            UiErrorCategory::Unknown => "Error",
        };
        let during = match self.context {
            UiErrorContext::BackendStartup => "startup",
            UiErrorContext::Search => "place search",
            UiErrorContext::Directions => "directions",
        };
        format!("{label} error during {during}: {}", self.message)
    }
}
