//! Fog manager: owns the terrain source, the tile field and the culler

use crate::core::{Camera, Result};
use crate::culling::{CullReport, VisibilityCuller};
use crate::math::Rect;
use crate::terrain::{DisplayGrid, TerrainGenerator, TerrainGrid, TerrainSource};
use crate::tiles::{FieldStats, TileCoord, TileField};
use super::config::FogConfig;

/// Terrain source used when the manager generates its own terrain
pub type GeneratedTerrain = DisplayGrid<TerrainGrid>;

/// Drives a fog field: one-time build, per-frame culling, edits on unlock.
pub struct FogManager<S: TerrainSource> {
    source: S,
    field: TileField,
    culler: VisibilityCuller,
    last_camera: Option<Camera>,
}

impl FogManager<GeneratedTerrain> {
    /// Generate terrain from `config.terrain` and build the field on the
    /// display grid
    pub fn generate(config: &FogConfig) -> Result<Self> {
        config.validate()?;
        let data = TerrainGenerator::new(config.terrain.clone()).generate(config.data_dims());
        Self::new(config, DisplayGrid::new(data, config.display_cell_size))
    }
}

impl<S: TerrainSource> FogManager<S> {
    /// Build every tile from `source`. Tiles start active until the first
    /// culling pass.
    pub fn new(config: &FogConfig, source: S) -> Result<Self> {
        config.validate()?;
        let dims = source.dims();
        let layout = config.tile_layout(dims);
        let mut field = TileField::new(layout, config.mesh_builder(), config.classify_policy);
        field.regenerate_all(&source);

        log::info!(
            "Fog field ready: {}x{} cells, {}x{} tiles of {}x{} cells, culling {}",
            dims.cells_x, dims.cells_z,
            layout.tiles_x(), layout.tiles_z(),
            layout.cells_per_tile().0, layout.cells_per_tile().1,
            if config.culling_enabled { "on" } else { "off" }
        );

        Ok(Self {
            source,
            field,
            culler: config.culler(),
            last_camera: None,
        })
    }

    /// Per-frame tick
    pub fn update(&mut self, camera: &Camera) -> CullReport {
        self.last_camera = Some(camera.clone());
        self.culler.update(camera, &mut self.field)
    }

    /// Recompute activation from the last camera seen by [`update`](Self::update)
    pub fn force_cull(&mut self) -> CullReport {
        match &self.last_camera {
            Some(camera) => self.culler.force_update(camera, &mut self.field),
            None => {
                log::debug!("force_cull: no camera yet");
                CullReport::default()
            }
        }
    }

    pub fn is_tile_active(&self, x: u32, z: u32) -> bool {
        self.field.is_tile_active(TileCoord::new(x, z))
    }

    pub fn active_tile_count(&self) -> usize {
        self.field.active_tile_count()
    }

    pub fn regenerate_tile(&mut self, x: u32, z: u32) -> bool {
        self.field.regenerate_tile(&self.source, TileCoord::new(x, z))
    }

    pub fn regenerate_all(&mut self) {
        self.field.regenerate_all(&self.source);
    }

    /// Apply a terrain edit and rebuild the tiles it can reach.
    ///
    /// `edit` returns the world rectangle it changed, or `None` for no change.
    /// Returns the number of tiles rebuilt.
    pub fn edit_terrain<F>(&mut self, edit: F) -> usize
    where
        F: FnOnce(&mut S) -> Option<Rect>,
    {
        match edit(&mut self.source) {
            Some(changed) => self.field.regenerate_region(&self.source, &changed),
            None => 0,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn field(&self) -> &TileField {
        &self.field
    }

    pub fn culler(&self) -> &VisibilityCuller {
        &self.culler
    }

    pub fn stats(&self) -> FieldStats {
        self.field.stats()
    }
}
