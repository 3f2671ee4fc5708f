//! Bridge between the UI thread and the async maps backend.

pub mod commands;
pub mod runtime;
