//! Mathematical utilities and data structures

pub mod aabb;
pub mod ray;
pub mod rect;
pub mod frustum;

pub use aabb::Aabb;
pub use ray::Ray;
pub use rect::Rect;
pub use frustum::{Plane, FAR_CORNERS_NDC, far_corners};
