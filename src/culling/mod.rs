//! Camera-driven tile activation
//!
//! The frustum's far-plane corners are projected onto a horizontal ground
//! plane, the resulting rectangle is mapped to a tile range and only tiles
//! whose membership changed are toggled.

pub mod footprint;
pub mod visibility;

pub use footprint::{ground_points, ground_rect};
pub use visibility::{CullReport, VisibilityCuller};
