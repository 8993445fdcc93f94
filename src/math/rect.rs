//! Axis-aligned rectangle on the XZ ground plane

use crate::core::types::Vec2;

/// Ground-plane rectangle; `x` maps to world X and `y` to world Z
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Bounding rectangle of a set of points, or `None` for an empty slice
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut rect = Rect::new(*first, *first);
        for &p in rest {
            rect.min = rect.min.min(p);
            rect.max = rect.max.max(p);
        }
        Some(rect)
    }

    /// Grow by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Rect {
        Rect {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    /// Closed-interval overlap test (touching edges count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let rect = Rect::from_points(&[
            Vec2::new(3.0, 1.0),
            Vec2::new(-2.0, 4.0),
            Vec2::new(0.0, -1.0),
        ]).unwrap();
        assert_eq!(rect.min, Vec2::new(-2.0, -1.0));
        assert_eq!(rect.max, Vec2::new(3.0, 4.0));
        assert!(Rect::from_points(&[]).is_none());
    }

    #[test]
    fn test_expanded() {
        let rect = Rect::new(Vec2::ZERO, Vec2::splat(10.0)).expanded(2.5);
        assert_eq!(rect.min, Vec2::splat(-2.5));
        assert_eq!(rect.max, Vec2::splat(12.5));
    }

    #[test]
    fn test_intersects_touching() {
        let a = Rect::new(Vec2::ZERO, Vec2::ONE);
        let b = Rect::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        let c = Rect::new(Vec2::new(1.5, 0.0), Vec2::new(2.0, 1.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }
}
