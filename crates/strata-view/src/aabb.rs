//! Axis-aligned bounding boxes in `f32` model or world space.

use glam::{Mat4, Vec3};

/// An axis-aligned bounding box.
///
/// Invariant: `min <= max` on every axis. [`Aabb::new`] sorts the
/// components of the two corners so that it holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Vec3,
    /// Maximum corner of the bounding box.
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB from two opposite corners.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Returns the center point of the AABB.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the half-extents (half-size along each axis).
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// The eight corner points, in binary order of `(x, y, z)` choosing max.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Returns true if the point lies inside or on the boundary.
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Returns true if the boxes overlap, including touching faces.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Smallest box enclosing both.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Bounding box of this box after an affine transform.
    pub fn transformed(&self, matrix: &Mat4) -> Aabb {
        let corners = self.corners().map(|c| matrix.transform_point3(c));
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min = min.min(*c);
            max = max.max(*c);
        }
        Aabb { min, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_corners() {
        let aabb = Aabb::new(Vec3::new(1.0, -1.0, 5.0), Vec3::new(-1.0, 1.0, 2.0));
        assert_eq!(aabb.min, Vec3::new(-1.0, -1.0, 2.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 1.0, 5.0));
    }

    #[test]
    fn test_center_and_extents() {
        let aabb = Aabb::new(Vec3::new(-2.0, -3.0, -4.0), Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(aabb.center(), Vec3::ZERO);
        assert_eq!(aabb.extents(), Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_corners_are_distinct_and_on_box() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
        let corners = aabb.corners();
        for (i, a) in corners.iter().enumerate() {
            assert!(aabb.contains_point(*a));
            for b in &corners[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_intersects_touching() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::ONE, Vec3::splat(2.0));
        let c = Aabb::new(Vec3::splat(1.5), Vec3::splat(2.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_transformed_translation_and_rotation() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0));
        let moved = aabb.transformed(&Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(moved.min, Vec3::new(10.0, 0.0, 0.0));

        let rotated = aabb.transformed(&Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2));
        assert!((rotated.extents() - Vec3::new(0.5, 1.0, 0.5)).length() < 1e-5);
    }

    #[test]
    fn test_union() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::splat(-1.0), Vec3::splat(0.5));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::splat(-1.0));
        assert_eq!(u.max, Vec3::ONE);
    }
}
