//! Per-frame tile activation from the camera's ground footprint

use crate::core::Camera;
use crate::math::{Plane, Rect};
use crate::tiles::{TileField, TileRange};
use super::footprint::ground_rect;

/// Tiles switched by one culling pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CullReport {
    pub activated: usize,
    pub deactivated: usize,
}

impl CullReport {
    pub fn changed(&self) -> bool {
        self.activated + self.deactivated > 0
    }
}

/// Keeps exactly the tiles under the camera's ground footprint active
#[derive(Clone, Debug)]
pub struct VisibilityCuller {
    enabled: bool,
    ground: Plane,
    margin: f32,
    /// Range applied by the last pass; `None` inside means nothing was visible
    last_range: Option<Option<TileRange>>,
}

impl VisibilityCuller {
    pub fn new(enabled: bool, ground_height: f32, margin: f32) -> Self {
        Self {
            enabled,
            ground: Plane::horizontal(ground_height),
            margin,
            last_range: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn ground(&self) -> &Plane {
        &self.ground
    }

    /// Range applied by the most recent pass, if any pass has run
    pub fn last_range(&self) -> Option<Option<TileRange>> {
        self.last_range
    }

    /// Ground-plane rectangle the camera currently covers, margin included
    pub fn footprint(&self, camera: &Camera) -> Rect {
        ground_rect(camera, &self.ground, self.margin)
    }

    /// Tiles that should be active for `camera`
    pub fn visible_range(&self, camera: &Camera, field: &TileField) -> Option<TileRange> {
        if !self.enabled {
            return field.layout().full_range();
        }
        field.layout().tiles_overlapping(&self.footprint(camera))
    }

    /// Recompute the visible range and toggle tiles whose membership changed.
    ///
    /// Nothing is touched when the range matches the previous pass. With
    /// culling disabled the first pass activates every tile and later passes
    /// are no-ops.
    pub fn update(&mut self, camera: &Camera, field: &mut TileField) -> CullReport {
        if !self.enabled && self.last_range.is_some() {
            return CullReport::default();
        }

        let range = self.visible_range(camera, field);
        if self.last_range == Some(range) {
            return CullReport::default();
        }

        let (activated, deactivated) = field.apply_active_range(range);
        self.last_range = Some(range);

        let report = CullReport { activated, deactivated };
        if report.changed() {
            log::debug!(
                "Culling: range {:?}, +{} -{} tiles ({} active)",
                range, activated, deactivated, field.active_tile_count()
            );
        }
        report
    }

    /// Forget the previous range and run a full pass
    pub fn force_update(&mut self, camera: &Camera, field: &mut TileField) -> CullReport {
        self.last_range = None;
        self.update(camera, field)
    }
}
