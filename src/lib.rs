//! geofence - Track vehicle location pings against named polygon zones

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod geometry;
pub mod replay;
pub mod store;
