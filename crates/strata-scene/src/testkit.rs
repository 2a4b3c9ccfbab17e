//! Synthetic sector trees for tests and demos.

use glam::Vec3;
use strata_view::Aabb;

use crate::{
    DetailedPayload, SectorDescriptor, SectorId, SectorScene, SectorSceneBuilder, SimplePayload,
};

/// Payloads chosen for a generated sector, given its id and depth.
pub type GeneratedPayloads = (Option<DetailedPayload>, Option<SimplePayload>);

/// Full tree with `levels` levels (1 = root only) where every inner sector
/// has `children_per_sector` children, inside the unit cube.
///
/// Ids are assigned in depth-first pre-order starting at 0 for the root.
/// Every sector carries a 1000 byte / 10 draw call detailed payload and a
/// 100 byte simple payload.
pub fn generate_sector_tree(levels: u32, children_per_sector: u32) -> SectorScene {
    generate_sector_tree_with(
        Aabb::new(Vec3::ZERO, Vec3::ONE),
        levels,
        children_per_sector,
        |id, _| default_payloads(id),
    )
}

/// Like [`generate_sector_tree`] with custom bounds and payloads.
///
/// Each sector's box is split into `children_per_sector` equal slabs along
/// its longest axis to give the children's boxes.
pub fn generate_sector_tree_with<F>(
    bounds: Aabb,
    levels: u32,
    children_per_sector: u32,
    mut payloads: F,
) -> SectorScene
where
    F: FnMut(SectorId, u32) -> GeneratedPayloads,
{
    let mut next_id: SectorId = 0;
    let root = describe(next_id, bounds, 0, &mut payloads);
    let mut builder = SectorSceneBuilder::new(root);
    grow(
        &mut builder,
        0,
        bounds,
        1,
        levels,
        children_per_sector,
        &mut next_id,
        &mut payloads,
    );
    builder.build()
}

/// Payloads used by [`generate_sector_tree`].
pub fn default_payloads(id: SectorId) -> GeneratedPayloads {
    (
        Some(DetailedPayload {
            file_name: format!("sector_{id}.i3d"),
            download_size: 1000,
            estimated_draw_calls: 10,
        }),
        Some(SimplePayload {
            file_name: format!("sector_{id}.f3d"),
            download_size: 100,
        }),
    )
}

/// Id of the sector with the given hierarchy path, e.g. `"0/1/"`.
pub fn find_sector_id_by_path(scene: &SectorScene, path: &str) -> Option<SectorId> {
    scene.sectors().iter().find(|s| s.path == path).map(|s| s.id)
}

fn describe<F>(id: SectorId, bounds: Aabb, depth: u32, payloads: &mut F) -> SectorDescriptor
where
    F: FnMut(SectorId, u32) -> GeneratedPayloads,
{
    let (detailed, simple) = payloads(id, depth);
    SectorDescriptor {
        id,
        bounds,
        detailed,
        simple,
    }
}

#[allow(clippy::too_many_arguments)]
fn grow<F>(
    builder: &mut SectorSceneBuilder,
    parent_index: usize,
    parent_bounds: Aabb,
    depth: u32,
    levels: u32,
    children_per_sector: u32,
    next_id: &mut SectorId,
    payloads: &mut F,
) where
    F: FnMut(SectorId, u32) -> GeneratedPayloads,
{
    if depth >= levels {
        return;
    }
    for bounds in split_longest_axis(&parent_bounds, children_per_sector) {
        *next_id += 1;
        let child = describe(*next_id, bounds, depth, payloads);
        let index = builder.attach(parent_index, child);
        grow(
            builder,
            index,
            bounds,
            depth + 1,
            levels,
            children_per_sector,
            next_id,
            payloads,
        );
    }
}

fn split_longest_axis(bounds: &Aabb, parts: u32) -> Vec<Aabb> {
    let size = bounds.max - bounds.min;
    let axis = if size.x >= size.y && size.x >= size.z {
        0
    } else if size.y >= size.z {
        1
    } else {
        2
    };
    let step = size[axis] / parts.max(1) as f32;
    (0..parts)
        .map(|i| {
            let mut min = bounds.min;
            let mut max = bounds.max;
            min[axis] = bounds.min[axis] + step * i as f32;
            max[axis] = if i + 1 == parts {
                bounds.max[axis]
            } else {
                bounds.min[axis] + step * (i + 1) as f32
            };
            Aabb { min, max }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_count_of_full_tree() {
        assert_eq!(generate_sector_tree(1, 4).sector_count(), 1);
        assert_eq!(generate_sector_tree(3, 2).sector_count(), 7);
        assert_eq!(generate_sector_tree(3, 4).sector_count(), 21);
    }

    #[test]
    fn test_ids_are_depth_first() {
        let scene = generate_sector_tree(3, 2);
        let ids: Vec<_> = scene.depth_first().map(|s| s.id).collect();
        assert_eq!(ids, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_children_are_inside_parent() {
        let scene = generate_sector_tree(4, 3);
        for sector in scene.sectors() {
            for child in scene.children(sector) {
                assert!(sector.bounds.contains_point(child.bounds.min));
                assert!(sector.bounds.contains_point(child.bounds.max));
            }
        }
    }

    #[test]
    fn test_split_covers_parent() {
        let bounds = Aabb::new(Vec3::ZERO, Vec3::new(3.0, 1.0, 1.0));
        let parts = split_longest_axis(&bounds, 3);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].min, Vec3::ZERO);
        assert_eq!(parts[2].max, bounds.max);
        assert_eq!(parts[1].min.x, parts[0].max.x);
    }

    #[test]
    fn test_custom_payloads() {
        let scene = generate_sector_tree_with(
            Aabb::new(Vec3::ZERO, Vec3::ONE),
            2,
            2,
            |id, depth| {
                let (detailed, simple) = default_payloads(id);
                (detailed, if depth == 0 { None } else { simple })
            },
        );
        assert!(!scene.root().has_simple());
        assert!(scene.sectors()[1..].iter().all(|s| s.has_simple()));
    }
}
