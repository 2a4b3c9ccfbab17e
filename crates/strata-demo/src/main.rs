//! Strata demo: culls seeded synthetic models along a camera fly-through.

mod synthetic;

use std::path::Path;

use clap::Parser;
use glam::Vec3;
use strata_config::{AppDirs, CameraConfig, CliArgs, Config};
use strata_culling::{
    CullingError, DetermineSectorsInput, ProjectedAreaRanker, SectorBudget,
    VisibilityBudgetCuller,
};
use strata_scene::ModelMetadata;
use strata_view::{Camera, ClipMode, ClippingPlanes, Plane, Projection};
use tracing::info;

/// Camera positions along the fly-through.
const FRAMES: usize = 8;

fn main() {
    let args = CliArgs::parse();

    // Resolve config and log directories
    let dirs = match &args.config {
        Some(dir) => AppDirs {
            config_dir: dir.clone(),
            log_dir: dir.join("logs"),
        },
        None => AppDirs::resolve().unwrap_or_else(|e| {
            eprintln!("{e}, using the working directory");
            AppDirs::resolve_with_root(Path::new("."))
        }),
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    strata_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = run(&config) {
        tracing::error!("Sector culling failed: {e}");
        std::process::exit(1);
    }
}

/// Cull every fly-through frame, then one frame with a section plane.
fn run(config: &Config) -> Result<(), CullingError> {
    let models = synthetic::generate_models(&config.scene);
    let budget = SectorBudget::from(&config.budget);
    let sector_count: usize = models.iter().map(ModelMetadata::sector_count).sum();
    info!(
        "Generated {} models with {} sectors, budget {:.1} MiB / {} draw calls",
        models.len(),
        sector_count,
        budget.geometry_download_size_bytes as f64 / (1024.0 * 1024.0),
        budget.max_draw_calls
    );

    let mut culler = VisibilityBudgetCuller::new(ProjectedAreaRanker);
    let cameras = fly_through(&config.camera, &models, config.scene.extent);

    for (frame, camera) in cameras.iter().enumerate() {
        cull_frame(&mut culler, frame, camera, &models, &ClippingPlanes::none(), &budget)?;
    }

    // Cut every model in half along z.
    let section = ClippingPlanes::new(
        vec![Plane::from_normal_and_point(
            Vec3::NEG_Z,
            Vec3::splat(config.scene.extent * 0.5),
        )],
        ClipMode::Intersection,
    );
    if let Some(camera) = cameras.first() {
        cull_frame(&mut culler, FRAMES, camera, &models, &section, &budget)?;
    }

    info!("Sector culling demonstration completed successfully");
    Ok(())
}

fn cull_frame(
    culler: &mut VisibilityBudgetCuller<ProjectedAreaRanker>,
    frame: usize,
    camera: &Camera,
    models: &[ModelMetadata],
    clipping: &ClippingPlanes,
    budget: &SectorBudget,
) -> Result<(), CullingError> {
    let determined = culler.determine_sectors(&DetermineSectorsInput {
        camera,
        models,
        clipping,
        budget,
    })?;
    let to_load =
        pollster::block_on(culler.filter_sectors_to_load(camera, determined.wanted_sectors))?;

    let spendage = determined.spendage;
    info!(
        "Frame {frame}: {} to load ({} detailed, {} simple, {} forced), {:.2} MiB, {} draw calls",
        to_load.iter().filter(|w| w.is_shown()).count(),
        spendage.detailed_sector_count,
        spendage.simple_sector_count,
        spendage.forced_detailed_sector_count,
        spendage.download_size as f64 / (1024.0 * 1024.0),
        spendage.draw_calls,
    );
    Ok(())
}

/// Cameras sweeping along the row of models, ending inside the last one.
fn fly_through(config: &CameraConfig, models: &[ModelMetadata], extent: f32) -> Vec<Camera> {
    let Some(row) = models
        .iter()
        .map(ModelMetadata::world_bounds)
        .reduce(|a, b| a.union(&b))
    else {
        return Vec::new();
    };

    let start = Vec3::new(row.min.x, extent * 0.5, extent * 2.5);
    let end = Vec3::new(row.max.x - extent * 0.5, extent * 0.5, extent * 0.5);
    (0..FRAMES)
        .map(|i| {
            let t = i as f32 / (FRAMES - 1) as f32;
            let eye = start.lerp(end, t);
            camera_at(config, eye, eye - Vec3::new(0.0, 0.0, extent))
        })
        .collect()
}

fn camera_at(config: &CameraConfig, eye: Vec3, target: Vec3) -> Camera {
    Camera {
        projection: Projection::Perspective {
            fov_y: config.fov_y_degrees.to_radians(),
            aspect_ratio: config.aspect_ratio,
        },
        near: config.near,
        far: config.far,
        ..Camera::looking_at(eye, target, Vec3::Y)
    }
}
