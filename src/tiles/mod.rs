//! Tiling of the fog mesh
//!
//! The map is cut into fixed-footprint tiles, each owning its own mesh and
//! activation flag. Tiles are created once and rebuilt in place.

pub mod layout;
pub mod tile;
pub mod field;

pub use layout::{TileCoord, TileLayout, TileRange};
pub use tile::Tile;
pub use field::{FieldStats, TileField, REGION_REACH_CELLS};
