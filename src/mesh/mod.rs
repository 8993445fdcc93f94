//! Tile mesh generation
//!
//! Each tile owns a [`TileMesh`] covering its window of cells. Fully unlocked
//! cells become holes, partially unlocked ones may be cut along a diagonal and
//! cells next to unlocked ground can be subdivided for smoother fade-out.

pub mod triangulate;
pub mod tile_mesh;
pub mod builder;

pub use triangulate::{CutPolicy, Corner, CellPlan, Neighbors, plan_cell, triangulate};
pub use tile_mesh::{TileMesh, TileVertex, UNLOCKED_ENCODING, LOCKED_ENCODING, unlock_encoding};
pub use builder::TileMeshBuilder;
