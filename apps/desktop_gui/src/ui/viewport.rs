//! Map handle over the slippy map memory.

use map_core::ViewportControl;
use shared::domain::Coordinate;
use walkers::{lon_lat, MapMemory, Position};

pub const DEFAULT_CENTER: Coordinate = Coordinate::new(39.920673, 32.845841);
pub const DEFAULT_ZOOM: f64 = 11.0;
pub const MIN_ZOOM: f64 = 2.0;
/// Deepest level the OpenStreetMap tile servers render.
pub const MAX_ZOOM: f64 = 19.0;

/// Owned handle to the visible map; replaces a global map reference.
pub struct MapHandle {
    pub memory: MapMemory,
    /// Where the map snaps back to when it is not detached by a drag.
    pub center: Position,
}

impl Default for MapHandle {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER, DEFAULT_ZOOM)
    }
}

impl MapHandle {
    pub fn new(center: Coordinate, zoom: f64) -> Self {
        let mut handle = Self {
            memory: MapMemory::default(),
            center: to_position(center),
        };
        handle.set_zoom(zoom);
        handle
    }
}

impl ViewportControl for MapHandle {
    fn pan_to(&mut self, position: Coordinate) {
        self.center = to_position(position);
        self.memory.follow_my_position();
    }

    fn set_zoom(&mut self, zoom: f64) {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if self.memory.set_zoom(zoom).is_err() {
            tracing::debug!(zoom, "map rejected zoom level");
        }
    }

    fn center(&self) -> Coordinate {
        to_coordinate(self.memory.detached().unwrap_or(self.center))
    }

    fn zoom(&self) -> f64 {
        self.memory.zoom()
    }
}

pub fn to_position(position: Coordinate) -> Position {
    lon_lat(position.lng, position.lat)
}

pub fn to_coordinate(position: Position) -> Coordinate {
    Coordinate::new(position.y(), position.x())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_default_view() {
        let handle = MapHandle::default();
        assert_eq!(handle.center(), DEFAULT_CENTER);
        assert_eq!(handle.zoom(), DEFAULT_ZOOM);
    }

    #[test]
    fn pan_to_moves_center_without_changing_zoom() {
        let mut handle = MapHandle::default();
        handle.pan_to(Coordinate::new(41.01, 28.97));
        assert_eq!(handle.center(), Coordinate::new(41.01, 28.97));
        assert_eq!(handle.zoom(), DEFAULT_ZOOM);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut handle = MapHandle::default();
        handle.set_zoom(40.0);
        assert_eq!(handle.zoom(), MAX_ZOOM);
        handle.set_zoom(-3.0);
        assert_eq!(handle.zoom(), MIN_ZOOM);
    }

    #[test]
    fn position_keeps_lat_lng_order() {
        let office = Coordinate::new(39.92, 32.85);
        let position = to_position(office);
        assert_eq!(position.x(), 32.85);
        assert_eq!(position.y(), 39.92);
        assert_eq!(to_coordinate(position), office);
    }
}
