//! Top-level fog field: configuration and the manager that drives it

pub mod config;
pub mod manager;

pub use config::FogConfig;
pub use manager::{FogManager, GeneratedTerrain};
