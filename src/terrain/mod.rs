//! Terrain data sources: corner heights and unlock state

pub mod source;
pub use source::{TerrainSource, CornerSample, CellCorners, GridDims};

pub mod grid;
pub use grid::{TerrainGrid, TerrainSample, TerrainCategory};

pub mod display;
pub use display::DisplayGrid;

pub mod generator;
pub use generator::{TerrainGenerator, TerrainParams};
