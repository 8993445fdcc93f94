//! Dense terrain grid at the native data resolution
//!
//! Holds height, terrain category and the explicit unlock flag for every
//! corner. A corner counts as unlocked when its flag is set or when it belongs
//! to the already-revealed category; nothing else (height in particular) is
//! consulted.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;
use crate::math::Rect;
use super::source::{CornerSample, GridDims, TerrainSource};

/// Terrain category of a corner
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainCategory {
    /// Unexplored ground, hidden unless explicitly unlocked
    #[default]
    Wild,
    /// Ground that starts out revealed
    Revealed,
}

/// Stored data for one corner
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TerrainSample {
    pub height: f32,
    pub category: TerrainCategory,
    /// Explicitly unlocked by exploration
    pub unlocked: bool,
}

impl TerrainSample {
    pub fn is_unlocked(&self) -> bool {
        self.unlocked || self.category == TerrainCategory::Revealed
    }
}

/// Row-major (z outer, x inner) corner grid
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    dims: GridDims,
    samples: Vec<TerrainSample>,
}

impl TerrainGrid {
    /// Flat, fully locked grid
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            samples: vec![TerrainSample::default(); dims.corner_count()],
        }
    }

    /// Build a grid by evaluating `f` at every corner
    pub fn from_fn(dims: GridDims, mut f: impl FnMut(u32, u32) -> TerrainSample) -> Self {
        let mut samples = Vec::with_capacity(dims.corner_count());
        for z in 0..dims.corners_z() {
            for x in 0..dims.corners_x() {
                samples.push(f(x, z));
            }
        }
        Self { dims, samples }
    }

    fn index(&self, x: i32, z: i32) -> Option<usize> {
        if !self.dims.contains_corner(x, z) {
            return None;
        }
        Some(z as usize * self.dims.corners_x() as usize + x as usize)
    }

    pub fn sample(&self, x: i32, z: i32) -> Option<&TerrainSample> {
        self.index(x, z).map(|i| &self.samples[i])
    }

    fn sample_mut(&mut self, x: i32, z: i32) -> Option<&mut TerrainSample> {
        let i = self.index(x, z)?;
        Some(&mut self.samples[i])
    }

    /// Returns false when the corner is outside the grid
    pub fn set_height(&mut self, x: i32, z: i32, height: f32) -> bool {
        match self.sample_mut(x, z) {
            Some(s) => {
                s.height = height;
                true
            }
            None => false,
        }
    }

    /// Returns true when the corner's effective unlock state changed
    pub fn set_category(&mut self, x: i32, z: i32, category: TerrainCategory) -> bool {
        let Some(s) = self.sample_mut(x, z) else {
            return false;
        };
        let before = s.is_unlocked();
        s.category = category;
        before != s.is_unlocked()
    }

    /// Returns true when the corner's effective unlock state changed
    pub fn set_unlocked(&mut self, x: i32, z: i32, unlocked: bool) -> bool {
        let Some(s) = self.sample_mut(x, z) else {
            return false;
        };
        let before = s.is_unlocked();
        s.unlocked = unlocked;
        before != s.is_unlocked()
    }

    /// Unlock every corner within `radius` world units of `center`.
    ///
    /// Returns the world-space rectangle spanning the corners whose state
    /// changed, or `None` when nothing changed.
    pub fn unlock_circle(&mut self, center: Vec2, radius: f32) -> Option<Rect> {
        let cell = self.dims.cell_size;
        let min_x = ((center.x - radius) / cell).floor().max(0.0) as i32;
        let min_z = ((center.y - radius) / cell).floor().max(0.0) as i32;
        let max_x = ((center.x + radius) / cell).ceil().min(self.dims.cells_x as f32) as i32;
        let max_z = ((center.y + radius) / cell).ceil().min(self.dims.cells_z as f32) as i32;

        let radius_sq = radius * radius;
        let mut changed: Option<Rect> = None;
        for z in min_z..=max_z {
            for x in min_x..=max_x {
                let world = Vec2::new(x as f32, z as f32) * cell;
                if world.distance_squared(center) > radius_sq {
                    continue;
                }
                if self.set_unlocked(x, z, true) {
                    changed = Some(match changed {
                        Some(r) => Rect::new(r.min.min(world), r.max.max(world)),
                        None => Rect::new(world, world),
                    });
                }
            }
        }
        changed
    }

    /// Unlock the inclusive corner rectangle `[x0, x1] x [z0, z1]`.
    ///
    /// Returns how many corners changed state.
    pub fn unlock_corners(&mut self, x0: i32, z0: i32, x1: i32, z1: i32) -> usize {
        let mut changed = 0;
        for z in z0..=z1 {
            for x in x0..=x1 {
                if self.set_unlocked(x, z, true) {
                    changed += 1;
                }
            }
        }
        changed
    }

    pub fn unlocked_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_unlocked()).count()
    }
}

impl TerrainSource for TerrainGrid {
    fn dims(&self) -> GridDims {
        self.dims
    }

    fn vertex_at(&self, x: i32, z: i32) -> CornerSample {
        match self.sample(x, z) {
            Some(s) => CornerSample::new(s.height, s.is_unlocked()),
            None => CornerSample::default(),
        }
    }
}
