//! UI layer for the desktop app: app shell, search box, map canvas, viewport and distance panel.

pub mod app;
pub mod distance;
pub mod map_canvas;
pub mod places;
pub mod viewport;

pub use app::CommuteApp;
