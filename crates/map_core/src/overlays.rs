//! Circles, route styling and polyline decoding for the canvas overlays.

use geo::{Distance, Haversine, Point};
use shared::{domain::Coordinate, protocol::RouteResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleStyle {
    pub stroke_rgb: [u8; 3],
    pub stroke_opacity: f32,
    pub stroke_weight: f32,
    pub fill_opacity: f32,
    pub z_index: i32,
    pub clickable: bool,
    pub draggable: bool,
    pub editable: bool,
    pub visible: bool,
}

const BASE_CIRCLE: CircleStyle = CircleStyle {
    stroke_rgb: [0, 0, 0],
    stroke_opacity: 0.5,
    stroke_weight: 2.0,
    fill_opacity: 0.0,
    z_index: 0,
    clickable: false,
    draggable: false,
    editable: false,
    visible: true,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusRing {
    pub label: &'static str,
    pub radius_meters: f64,
    pub style: CircleStyle,
}

pub const CLOSE_RING: RadiusRing = RadiusRing {
    label: "close",
    radius_meters: 3_000.0,
    style: CircleStyle {
        stroke_rgb: [173, 216, 230],
        fill_opacity: 0.15,
        z_index: 3,
        ..BASE_CIRCLE
    },
};

pub const MIDDLE_RING: RadiusRing = RadiusRing {
    label: "middle",
    radius_meters: 6_000.0,
    style: CircleStyle {
        stroke_rgb: [255, 165, 0],
        fill_opacity: 0.15,
        z_index: 2,
        ..BASE_CIRCLE
    },
};

pub const FAR_RING: RadiusRing = RadiusRing {
    label: "far",
    radius_meters: 10_000.0,
    style: CircleStyle {
        stroke_rgb: [255, 0, 0],
        fill_opacity: 0.2,
        z_index: 1,
        ..BASE_CIRCLE
    },
};

/// Rings around the office, lowest z-index first so callers can paint in order.
pub fn radius_rings() -> [RadiusRing; 3] {
    [FAR_RING, MIDDLE_RING, CLOSE_RING]
}

/// Which ring, if any, a point at `distance_meters` from the office falls into.
pub fn ring_for_distance(distance_meters: f64) -> Option<RadiusRing> {
    [CLOSE_RING, MIDDLE_RING, FAR_RING]
        .into_iter()
        .find(|ring| distance_meters <= ring.radius_meters)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStyle {
    pub stroke_rgb: [u8; 3],
    pub stroke_weight: f32,
    pub z_index: i32,
}

pub const ROUTE_STYLE: RouteStyle = RouteStyle {
    stroke_rgb: [0x19, 0x76, 0xD2],
    stroke_weight: 4.0,
    z_index: 50,
};

/// Path of the first route, falling back to the leg endpoints when the
/// overview polyline is missing or malformed.
pub fn route_path(result: &RouteResult) -> Vec<Coordinate> {
    let Some(route) = result.routes.first() else {
        return Vec::new();
    };

    match decode_polyline(&route.overview_polyline.points) {
        Some(path) if path.len() >= 2 => path,
        _ => route
            .legs
            .iter()
            .flat_map(|leg| [leg.start_location, leg.end_location])
            .flatten()
            .collect(),
    }
}

/// Decodes an encoded polyline (precision 1e5). `None` on truncated input.
pub fn decode_polyline(encoded: &str) -> Option<Vec<Coordinate>> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut path = Vec::new();

    while index < bytes.len() {
        lat += next_delta(bytes, &mut index)?;
        lng += next_delta(bytes, &mut index)?;
        path.push(Coordinate {
            lat: lat as f64 / 1e5,
            lng: lng as f64 / 1e5,
        });
    }

    Some(path)
}

fn next_delta(bytes: &[u8], index: &mut usize) -> Option<i64> {
    let mut result: i64 = 0;
    let mut shift = 0;
    loop {
        let byte = i64::from(*bytes.get(*index)?) - 63;
        *index += 1;
        if !(0..64).contains(&byte) || shift > 60 {
            return None;
        }
        result |= (byte & 0x1f) << shift;
        shift += 5;
        if byte < 0x20 {
            break;
        }
    }
    Some(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

/// Great-circle distance in meters.
pub fn haversine_meters(a: Coordinate, b: Coordinate) -> f64 {
    Haversine::distance(to_point(a), to_point(b))
}

fn to_point(position: Coordinate) -> Point<f64> {
    Point::new(position.lng, position.lat)
}
