//! Headless engine of the commute map: houses, directions, canvas state,
//! marker clustering and the Google Maps Platform client.

pub mod canvas;
pub mod clusters;
pub mod config;
pub mod directions;
pub mod distance;
pub mod google;
pub mod houses;
pub mod loader;
pub mod overlays;
pub mod services;

pub use canvas::{CanvasOptions, CanvasState, MapCanvas, OfficeChange};
pub use clusters::{cluster_markers, MarkerCluster};
pub use directions::{fetch_route, DirectionsCompletion, DirectionsFetcher};
pub use distance::{render_distance, DistanceSummary};
pub use google::GoogleMapsClient;
pub use houses::{generate_houses, HouseGenerator, HOUSE_COUNT};
pub use loader::{load_services, LoadState, MapsServices};
pub use services::{AutocompleteSource, RoutingService, ViewportControl};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
