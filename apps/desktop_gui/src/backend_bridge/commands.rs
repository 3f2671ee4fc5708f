//! Backend commands queued from UI to backend worker.

use shared::{
    domain::RequestId,
    protocol::{PlaceSuggestion, TaggedDirectionsRequest},
};

#[derive(Debug, Clone)]
pub enum BackendCommand {
    Suggest { query: String },
    ResolvePlace {
        id: RequestId,
        suggestion: PlaceSuggestion,
    },
    FetchDirections { tagged: TaggedDirectionsRequest },
    CancelDirections,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Suggest { .. } => "suggest",
            BackendCommand::ResolvePlace { .. } => "resolve_place",
            BackendCommand::FetchDirections { .. } => "fetch_directions",
            BackendCommand::CancelDirections => "cancel_directions",
        }
    }
}
