//! Fogtile - tiled fog-of-war ground mesh
//!
//! Terrain corners carry an unlock flag. Cells are classified by how many of
//! their corners are unlocked, each tile of cells is meshed with holes where
//! the ground has been revealed, and tiles outside the camera's ground
//! footprint are deactivated.

pub mod core;
pub mod math;
pub mod terrain;
pub mod classify;
pub mod mesh;
pub mod tiles;
pub mod culling;
pub mod scene;
