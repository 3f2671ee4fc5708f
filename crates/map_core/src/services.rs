//! Capabilities the canvas needs from an external mapping service.

use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::Coordinate,
    protocol::{DirectionsRequest, DirectionsResponse, PlaceSuggestion},
};

/// Answers travel routes between two coordinates.
///
/// Transport problems are errors. A service-level refusal (`ZERO_RESULTS`,
/// `REQUEST_DENIED`, ...) is an `Ok` response carrying that status.
#[async_trait]
pub trait RoutingService: Send + Sync {
    async fn route(&self, request: &DirectionsRequest) -> Result<DirectionsResponse>;
}

#[async_trait]
pub trait AutocompleteSource: Send + Sync {
    async fn suggest(&self, query: &str) -> Result<Vec<PlaceSuggestion>>;
    async fn resolve(&self, suggestion: &PlaceSuggestion) -> Result<Coordinate>;
}

/// Programmatic control over the visible map.
pub trait ViewportControl {
    fn pan_to(&mut self, position: Coordinate);
    fn set_zoom(&mut self, zoom: f64);
    fn center(&self) -> Coordinate;
    fn zoom(&self) -> f64;
}
