//! Seeded synthetic models standing in for streamed CAD models.

use glam::{Mat4, Vec3};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use strata_config::SceneConfig;
use strata_scene::testkit::{GeneratedPayloads, generate_sector_tree_with};
use strata_scene::{DetailedPayload, ModelMetadata, SectorId, SimplePayload};
use strata_view::Aabb;

/// Distance between model origins along x, in model extents.
pub const MODEL_SPACING: f32 = 1.5;

/// `config.model_count` models in a row along +x, each a full sector tree
/// with random payload sizes.
pub fn generate_models(config: &SceneConfig) -> Vec<ModelMetadata> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(config.seed);
    let bounds = Aabb::new(Vec3::ZERO, Vec3::splat(config.extent));

    (0..config.model_count)
        .map(|i| {
            let scene = generate_sector_tree_with(
                bounds,
                config.depth,
                config.children_per_sector,
                |id, depth| random_payloads(&mut rng, id, depth),
            );
            let offset = Vec3::new(i as f32 * config.extent * MODEL_SPACING, 0.0, 0.0);
            ModelMetadata::new(format!("model-{i}"), scene)
                .with_transform(Mat4::from_translation(offset))
        })
        .collect()
}

/// Deeper sectors hold less geometry; one in ten has no simple payload.
fn random_payloads(rng: &mut Xoshiro256StarStar, id: SectorId, depth: u32) -> GeneratedPayloads {
    let download_size = rng.gen_range(64_000..512_000_u64) >> depth.min(4);
    let detailed = DetailedPayload {
        file_name: format!("{id}.i3d"),
        download_size,
        estimated_draw_calls: rng.gen_range(4..48),
    };
    let simple = rng.gen_bool(0.9).then(|| SimplePayload {
        file_name: format!("{id}.f3d"),
        download_size: download_size / 8,
    });
    (Some(detailed), simple)
}
