use criterion::{criterion_group, criterion_main, Criterion, black_box};

use fogtile::classify::{CellClassifier, CellWindow, ClassifyPolicy};
use fogtile::core::Camera;
use fogtile::mesh::{CutPolicy, TileMesh, TileMeshBuilder};
use fogtile::scene::{FogConfig, FogManager};
use fogtile::terrain::{GridDims, TerrainGrid};

use glam::{Vec2, Vec3};

fn unlocked_grid() -> TerrainGrid {
    let mut grid = TerrainGrid::new(GridDims::new(200, 200, 1.0));
    grid.unlock_circle(Vec2::new(60.0, 60.0), 30.0);
    grid.unlock_circle(Vec2::new(130.0, 110.0), 45.0);
    grid
}

fn bench_classify_window(c: &mut Criterion) {
    let grid = unlocked_grid();
    let classifier = CellClassifier::new(&grid, ClassifyPolicy::Ringed);

    c.bench_function("classify_window_50", |b| {
        b.iter(|| classifier.classify_window(black_box(CellWindow::new(40, 40, 50, 50))));
    });
}

fn bench_tile_build(c: &mut Criterion) {
    let grid = unlocked_grid();
    let classifier = CellClassifier::new(&grid, ClassifyPolicy::Ringed);
    let window = CellWindow::new(40, 40, 50, 50);

    for (name, builder) in [
        ("tile_build_50", TileMeshBuilder::new(CutPolicy::NeighborDiagonal, false)),
        ("tile_build_50_subdivided", TileMeshBuilder::new(CutPolicy::NeighborDiagonal, true)),
    ] {
        let mut mesh = TileMesh::default();
        c.bench_function(name, |b| {
            b.iter(|| {
                builder.build_into(&classifier, black_box(window), &mut mesh);
            });
        });
    }
}

fn bench_culling_update(c: &mut Criterion) {
    let config = FogConfig::default();
    let Ok(mut manager) = FogManager::generate(&config) else {
        return;
    };

    c.bench_function("culling_update_orbit", |b| {
        let mut frame = 0u32;
        b.iter(|| {
            frame += 1;
            let angle = frame as f32 * 0.05;
            let pos = Vec3::new(250.0 + angle.sin() * 150.0, 40.0, 250.0 + angle.cos() * 150.0);
            let mut camera = Camera::new(pos, 60.0, 16.0 / 9.0);
            camera.point_at(Vec3::new(250.0, 0.0, 250.0), Vec3::Y);
            manager.update(black_box(&camera))
        });
    });
}

criterion_group!(benches, bench_classify_window, bench_tile_build, bench_culling_update);
criterion_main!(benches);
