//! Research backend communication

pub mod api;
pub mod sidecar;
pub mod types;
