//! Projection of the view frustum onto the ground plane

use crate::core::Camera;
use crate::core::types::Vec2;
use crate::math::{far_corners, Plane, Ray, Rect};

/// Where the four far-plane corner rays meet the ground plane.
///
/// Rays run from the eye to the world-space far-plane corners (bottom-left,
/// bottom-right, top-right, top-left). A ray that is parallel to the plane or
/// points away from it contributes its far corner instead, so a camera looking
/// at the horizon still yields a bounded footprint.
pub fn ground_points(camera: &Camera, ground: &Plane) -> [Vec2; 4] {
    let eye = camera.position;
    far_corners(&camera.view_projection_inverse()).map(|corner| {
        let ray = Ray::between(eye, corner);
        let hit = match ray.intersect_plane(ground) {
            Some(t) => ray.at(t),
            None => ray.at(1.0),
        };
        Vec2::new(hit.x, hit.z)
    })
}

/// Bounding rectangle of [`ground_points`], grown by `margin`
pub fn ground_rect(camera: &Camera, ground: &Plane, margin: f32) -> Rect {
    let points = ground_points(camera, ground);
    let rect = Rect::from_points(&points).unwrap_or_default();
    rect.expanded(margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;

    fn top_down(x: f32, height: f32, z: f32) -> Camera {
        let mut camera = Camera::new(Vec3::new(x, height, z), 90.0, 1.0);
        camera.far = 100.0;
        camera.point_at(Vec3::new(x, 0.0, z), Vec3::Y);
        camera
    }

    #[test]
    fn test_top_down_square() {
        let camera = top_down(125.0, 30.0, 125.0);
        let rect = ground_rect(&camera, &Plane::horizontal(0.0), 0.0);
        assert!(rect.min.abs_diff_eq(Vec2::splat(95.0), 1e-2), "{:?}", rect);
        assert!(rect.max.abs_diff_eq(Vec2::splat(155.0), 1e-2), "{:?}", rect);

        let grown = ground_rect(&camera, &Plane::horizontal(0.0), 10.0);
        assert!(grown.min.abs_diff_eq(Vec2::splat(85.0), 1e-2));
        assert!(grown.max.abs_diff_eq(Vec2::splat(165.0), 1e-2));
    }

    #[test]
    fn test_raised_ground_shrinks_footprint() {
        let camera = top_down(0.0, 30.0, 0.0);
        let rect = ground_rect(&camera, &Plane::horizontal(10.0), 0.0);
        assert!((rect.max - rect.min).abs_diff_eq(Vec2::splat(40.0), 1e-2), "{:?}", rect);
    }

    #[test]
    fn test_horizon_falls_back_to_far_extent() {
        let mut camera = Camera::new(Vec3::new(0.0, 10.0, 0.0), 60.0, 1.0);
        camera.far = 200.0;
        camera.point_at(Vec3::new(0.0, 10.0, -100.0), Vec3::Y);

        let points = ground_points(&camera, &Plane::horizontal(0.0));
        for p in points {
            assert!(p.is_finite());
            assert!(p.length() <= 250.0, "{:?}", p);
        }
        // Upper rays miss the ground and stop at the far plane
        assert!(points[2].y < -150.0 && points[3].y < -150.0);
        // Lower rays hit the ground in front of the camera
        assert!(points[0].y < 0.0 && points[0].y > -50.0);
    }
}
