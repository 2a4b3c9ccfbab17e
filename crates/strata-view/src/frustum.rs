//! View frustum extracted from a view-projection matrix, with AABB tests.

use glam::{Mat4, Vec3, Vec4};

use crate::Aabb;

/// Plane indices into the frustum planes array.
const LEFT: usize = 0;
const RIGHT: usize = 1;
const BOTTOM: usize = 2;
const TOP: usize = 3;
const NEAR: usize = 4;
const FAR: usize = 5;

/// A view frustum defined by six inward-pointing planes.
#[derive(Clone, Debug, PartialEq)]
pub struct Frustum {
    /// Six planes: left, right, bottom, top, near, far.
    /// Each `Vec4(a, b, c, d)` where `(a,b,c)` is the normalized inward
    /// normal and `d` is the signed distance term.
    planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from a combined view-projection matrix
    /// (Gribb-Hartmann) for a `[0, 1]` clip depth range.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let rows = [vp.row(0), vp.row(1), vp.row(2), vp.row(3)];

        let mut planes = [Vec4::ZERO; 6];
        planes[LEFT] = rows[3] + rows[0];
        planes[RIGHT] = rows[3] - rows[0];
        planes[BOTTOM] = rows[3] + rows[1];
        planes[TOP] = rows[3] - rows[1];
        planes[NEAR] = rows[2];
        planes[FAR] = rows[3] - rows[2];

        for plane in &mut planes {
            let len = plane.truncate().length();
            if len > 0.0 {
                *plane /= len;
            }
        }

        Self { planes }
    }

    /// Frustum of `projection * view`, with both matrices given separately.
    ///
    /// `view` may already include a model transform, in which case the test
    /// operates on model-space boxes.
    pub fn from_projection_and_view(projection: &Mat4, view: &Mat4) -> Self {
        Self::from_view_projection(&(*projection * *view))
    }

    /// Test whether an AABB is at least partially inside the frustum.
    ///
    /// Uses the positive-vertex method: for each plane, the corner furthest
    /// along the plane normal must be in front of it. Conservative near the
    /// frustum edges (may accept boxes just outside a corner), never rejects
    /// a visible box.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.planes.iter().all(|plane| {
            let normal = plane.truncate();
            let p = Vec3::select(normal.cmpge(Vec3::ZERO), aabb.max, aabb.min);
            normal.dot(p) + plane.w >= 0.0
        })
    }

    /// Whether the point is inside or on the frustum.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.truncate().dot(point) + plane.w >= 0.0)
    }
}
