//! Screen-space coverage estimate of a bounding box.

use glam::Vec2;

use crate::{Aabb, Camera, Frustum};

/// Full normalized-device-coordinate screen area (`[-1, 1]²`).
const FULL_SCREEN_AREA: f32 = 4.0;

/// Area of the box's projection in normalized device coordinates, in
/// `[0, 4]`.
///
/// Returns 0 when the box misses the view frustum and the full screen area
/// when a corner lies on or behind the camera plane (the projection of such
/// a box is unbounded). Otherwise the projected corners' bounding rectangle
/// is clamped to the screen and its area returned.
pub fn ndc_area_of_box(camera: &Camera, aabb: &Aabb) -> f32 {
    let view_projection = camera.view_projection_matrix();
    if !Frustum::from_view_projection(&view_projection).intersects_aabb(aabb) {
        return 0.0;
    }

    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    for corner in aabb.corners() {
        let clip = view_projection * corner.extend(1.0);
        if clip.w <= f32::EPSILON {
            return FULL_SCREEN_AREA;
        }
        let ndc = Vec2::new(clip.x, clip.y) / clip.w;
        min = min.min(ndc);
        max = max.max(ndc);
    }

    let min = min.clamp(Vec2::NEG_ONE, Vec2::ONE);
    let max = max.clamp(Vec2::NEG_ONE, Vec2::ONE);
    let size = (max - min).max(Vec2::ZERO);
    size.x * size.y
}
