//! Fog field preview: builds a field, culls it from one camera and reports.
//!
//! Usage: cargo run --release --bin fog_preview -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>       Load a FogConfig JSON (defaults otherwise)
//!   --save-config <PATH>  Write the effective config and continue
//!   --seed <SEED>         Terrain seed override
//!   --cam-x <X>           Camera X (default: map center)
//!   --cam-z <Z>           Camera Z (default: map center + 40)
//!   --cam-height <H>      Camera height (default: 40)
//!   --fov <DEGREES>       Vertical field of view (default: 60)
//!   --unlock <X,Z,R>      Unlock a circle before culling
//!   --png <PATH>          Write a per-cell classification image

use std::path::PathBuf;
use std::time::Instant;

use glam::{Vec2, Vec3};
use image::{Rgb, RgbImage};

use fogtile::classify::{CellClass, CellClassifier, CellWindow};
use fogtile::core::{logging, Camera, Error, Result};
use fogtile::scene::{FogConfig, FogManager, GeneratedTerrain};
use fogtile::terrain::TerrainSource;
use fogtile::tiles::TileCoord;

fn main() {
    logging::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_path_arg(&args, "--config") {
        Some(path) => FogConfig::load(&path)?,
        None => FogConfig::default(),
    };
    if let Some(seed) = parse_u32_arg(&args, "--seed") {
        config.terrain.seed = seed;
    }
    config.validate()?;
    if let Some(path) = parse_path_arg(&args, "--save-config") {
        config.save(&path)?;
        log::info!("Saved config to {}", path.display());
    }

    let center = Vec2::new(config.map_width, config.map_height) * 0.5;
    let cam_x = parse_f32_arg(&args, "--cam-x").unwrap_or(center.x);
    let cam_z = parse_f32_arg(&args, "--cam-z").unwrap_or(center.y + 40.0);
    let cam_height = parse_f32_arg(&args, "--cam-height").unwrap_or(40.0);
    let fov = parse_f32_arg(&args, "--fov").unwrap_or(60.0);

    let start = Instant::now();
    let mut manager = FogManager::generate(&config)?;
    log::info!("Built field in {:.1} ms", start.elapsed().as_secs_f64() * 1000.0);

    if let Some(unlock) = parse_str_arg(&args, "--unlock") {
        let [x, z, r] = parse_triple(&unlock)?;
        let start = Instant::now();
        let rebuilt = manager.edit_terrain(|terrain| terrain.inner_mut().unlock_circle(Vec2::new(x, z), r));
        log::info!(
            "Unlocked circle ({}, {}) r={}: {} tiles rebuilt in {:.1} ms",
            x, z, r, rebuilt, start.elapsed().as_secs_f64() * 1000.0
        );
    }

    let mut camera = Camera::new(Vec3::new(cam_x, cam_height, cam_z), fov, 16.0 / 9.0);
    camera.point_at(Vec3::new(cam_x, config.ground_height, cam_z - cam_height), Vec3::Y);
    let report = manager.update(&camera);

    let stats = manager.stats();
    println!("=== Fog Preview ===");
    println!("Map:       {}m x {}m", config.map_width, config.map_height);
    println!("Tiles:     {} ({} active, +{} -{})", stats.tiles, stats.active, report.activated, report.deactivated);
    println!("Mesh:      {} vertices, {} triangles", stats.vertices, stats.triangles);
    println!("Holes:     {} cells", stats.holes);
    println!("Camera:    ({:.1}, {:.1}, {:.1}) fov {}", cam_x, cam_height, cam_z, fov);

    if let Some(path) = parse_path_arg(&args, "--png") {
        let image = classification_image(&manager, &config);
        image.save(&path).map_err(|e| Error::Io(std::io::Error::other(e)))?;
        println!("Image:     {}", path.display());
    }

    Ok(())
}

/// One pixel per display cell, +Z up; cells of inactive tiles are dimmed
fn classification_image(manager: &FogManager<GeneratedTerrain>, config: &FogConfig) -> RgbImage {
    let source = manager.source();
    let dims = source.dims();
    let classified = CellClassifier::new(source, config.classify_policy).classify_window(CellWindow::whole_map(dims));
    let (tile_cells_x, tile_cells_z) = manager.field().layout().cells_per_tile();

    RgbImage::from_fn(dims.cells_x, dims.cells_z, |x, y| {
        let z = dims.cells_z - 1 - y;
        let class = classified.get(x, z).map_or(CellClass::FullLocked, |c| c.class);
        let Rgb([r, g, b]) = class_color(class);
        let active = manager.field().is_tile_active(TileCoord::new(x / tile_cells_x, z / tile_cells_z));
        if active { Rgb([r, g, b]) } else { Rgb([r / 3, g / 3, b / 3]) }
    })
}

fn class_color(class: CellClass) -> Rgb<u8> {
    match class {
        CellClass::FullLocked => Rgb([40, 40, 48]),
        CellClass::AdjacentUnlocked => Rgb([96, 80, 160]),
        CellClass::PartialUnlocked => Rgb([200, 150, 60]),
        CellClass::FullUnlocked => Rgb([90, 200, 90]),
    }
}

fn parse_triple(s: &str) -> Result<[f32; 3]> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| Error::Parse(format!("{:?}: {}", s, e))))
        .collect::<Result<_>>()?;
    match parts[..] {
        [a, b, c] => Ok([a, b, c]),
        _ => Err(Error::Parse(format!("expected X,Z,R, got {:?}", s))),
    }
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_path_arg(args: &[String], flag: &str) -> Option<PathBuf> {
    parse_str_arg(args, flag).map(PathBuf::from)
}
