//! User clipping planes and the rule combining them.

use glam::Vec3;

/// A plane `normal · p + constant = 0`. Points on the side the normal
/// points to (non-negative distance) are kept by the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Unit normal pointing into the kept half-space.
    pub normal: Vec3,
    /// Signed offset along the normal.
    pub constant: f32,
}

impl Plane {
    /// Create a plane from a normal and constant. The normal is normalized.
    pub fn new(normal: Vec3, constant: f32) -> Self {
        let length = normal.length();
        if length > 0.0 {
            Self {
                normal: normal / length,
                constant: constant / length,
            }
        } else {
            Self { normal, constant }
        }
    }

    /// Plane through `point` keeping the half-space `normal` points into.
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            constant: -normal.dot(point),
        }
    }

    /// Signed distance from the plane; non-negative on the kept side.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }

    /// Whether `point` lies on the kept side of the plane (or on it).
    pub fn accepts(&self, point: Vec3) -> bool {
        self.distance_to_point(point) >= 0.0
    }
}

/// How several clipping planes combine into the visible region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClipMode {
    /// Visible region is the union of the kept half-spaces: geometry is
    /// shown if any plane keeps it.
    Union,
    /// Visible region is the intersection of the kept half-spaces: geometry
    /// is shown only if every plane keeps it.
    #[default]
    Intersection,
}

/// A set of clipping planes together with their [`ClipMode`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClippingPlanes {
    /// The active planes. Empty means no clipping.
    pub planes: Vec<Plane>,
    /// How the planes combine.
    pub mode: ClipMode,
}

impl ClippingPlanes {
    pub fn new(planes: Vec<Plane>, mode: ClipMode) -> Self {
        Self { planes, mode }
    }

    /// No clipping at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether any clipping plane is active.
    pub fn is_active(&self) -> bool {
        !self.planes.is_empty()
    }

    /// Conservative visibility test of a convex volume given by its corner
    /// points: a plane keeps the volume if it keeps at least one corner.
    ///
    /// In [`ClipMode::Union`] the volume passes if any plane keeps it, in
    /// [`ClipMode::Intersection`] only if every plane keeps it. Without
    /// active planes everything passes.
    pub fn accepts_corners(&self, corners: &[Vec3]) -> bool {
        if !self.is_active() {
            return true;
        }
        let plane_keeps = |plane: &Plane| corners.iter().any(|&c| plane.accepts(c));
        match self.mode {
            ClipMode::Union => self.planes.iter().any(plane_keeps),
            ClipMode::Intersection => self.planes.iter().all(plane_keeps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_corners(min: f32, max: f32) -> Vec<Vec3> {
        crate::Aabb::new(Vec3::splat(min), Vec3::splat(max))
            .corners()
            .to_vec()
    }

    #[test]
    fn test_plane_is_normalized() {
        let plane = Plane::new(Vec3::new(0.0, 2.0, 0.0), -4.0);
        assert_eq!(plane.normal, Vec3::Y);
        assert_eq!(plane.distance_to_point(Vec3::new(0.0, 3.0, 0.0)), 1.0);
    }

    #[test]
    fn test_from_normal_and_point() {
        let plane = Plane::from_normal_and_point(Vec3::X, Vec3::new(5.0, 0.0, 0.0));
        assert!(plane.accepts(Vec3::new(6.0, 0.0, 0.0)));
        assert!(plane.accepts(Vec3::new(5.0, 100.0, 0.0)));
        assert!(!plane.accepts(Vec3::new(4.0, 0.0, 0.0)));
    }

    #[test]
    fn test_no_planes_accepts_everything() {
        let clipping = ClippingPlanes::none();
        assert!(!clipping.is_active());
        assert!(clipping.accepts_corners(&cube_corners(-1.0, 1.0)));
    }

    /// Box straddling x = 0 is kept by `x >= 0`.
    #[test]
    fn test_partially_kept_box_passes() {
        let clipping = ClippingPlanes::new(
            vec![Plane::from_normal_and_point(Vec3::X, Vec3::ZERO)],
            ClipMode::Intersection,
        );
        assert!(clipping.accepts_corners(&cube_corners(-1.0, 1.0)));
        assert!(!clipping.accepts_corners(&cube_corners(-3.0, -2.0)));
    }

    #[test]
    fn test_union_versus_intersection() {
        // Keeps x >= 0 and y >= 0 respectively.
        let planes = vec![
            Plane::from_normal_and_point(Vec3::X, Vec3::ZERO),
            Plane::from_normal_and_point(Vec3::Y, Vec3::ZERO),
        ];
        // Positive x, negative y: only the first plane keeps it.
        let corners = crate::Aabb::new(Vec3::new(1.0, -3.0, 0.0), Vec3::new(2.0, -2.0, 1.0))
            .corners()
            .to_vec();

        let union = ClippingPlanes::new(planes.clone(), ClipMode::Union);
        let intersection = ClippingPlanes::new(planes, ClipMode::Intersection);
        assert!(union.accepts_corners(&corners));
        assert!(!intersection.accepts_corners(&corners));
    }

    #[test]
    fn test_union_rejects_when_no_plane_keeps() {
        let clipping = ClippingPlanes::new(
            vec![
                Plane::from_normal_and_point(Vec3::X, Vec3::ZERO),
                Plane::from_normal_and_point(Vec3::Y, Vec3::ZERO),
            ],
            ClipMode::Union,
        );
        assert!(!clipping.accepts_corners(&cube_corners(-3.0, -2.0)));
    }
}
