//! Planes and far-plane corner extraction for ground projection

use crate::core::types::{Vec3, Mat4};

/// A plane defined by normal and distance from origin
#[derive(Clone, Copy, Debug)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Horizontal plane `y = height` facing up
    pub fn horizontal(height: f32) -> Self {
        Self::new(Vec3::Y, -height)
    }

    /// Signed distance from point to plane (positive = in front)
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// Far-plane corners in normalized device coordinates.
///
/// Order is fixed: bottom-left, bottom-right, top-right, top-left. Depth 1.0 is
/// the far plane under glam's `perspective_rh` (0..1 depth range).
pub const FAR_CORNERS_NDC: [Vec3; 4] = [
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
];

/// World-space far-plane corners, in [`FAR_CORNERS_NDC`] order
pub fn far_corners(view_projection_inverse: &Mat4) -> [Vec3; 4] {
    FAR_CORNERS_NDC.map(|ndc| view_projection_inverse.project_point3(ndc))
}
