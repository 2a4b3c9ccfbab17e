//! Camera model producing view and projection matrices for culling.

use glam::{Mat4, Quat, Vec3};

/// A camera looking down its local -Z axis.
///
/// Projection uses a `[0, 1]` depth range: the near plane maps to depth 0
/// and the far plane to depth 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Position in world space.
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Projection parameters.
    pub projection: Projection,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
}

/// Projection type for the camera.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Perspective projection.
    Perspective {
        /// Vertical field of view in radians.
        fov_y: f32,
        /// Width / height.
        aspect_ratio: f32,
    },
    /// Orthographic projection.
    Orthographic {
        /// Half-width of the view volume in world units.
        half_width: f32,
        /// Half-height of the view volume in world units.
        half_height: f32,
    },
}

impl Camera {
    /// Perspective camera at `eye` looking at `target`.
    pub fn looking_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let view = Mat4::look_at_rh(eye, target, up);
        let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
        Self {
            position: eye,
            rotation,
            ..Self::default()
        }
    }

    /// Compute the view matrix (inverse of camera transform).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    /// Compute the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        match &self.projection {
            Projection::Perspective {
                fov_y,
                aspect_ratio,
            } => Mat4::perspective_rh(*fov_y, *aspect_ratio, self.near, self.far),
            Projection::Orthographic {
                half_width,
                half_height,
            } => Mat4::orthographic_rh(
                -*half_width,
                *half_width,
                -*half_height,
                *half_height,
                self.near,
                self.far,
            ),
        }
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// A copy of this camera with a different far plane.
    ///
    /// The far plane is kept strictly beyond the near plane.
    pub fn with_far(&self, far: f32) -> Self {
        Self {
            far: far.max(self.near + f32::EPSILON),
            ..self.clone()
        }
    }

    /// The forward direction vector (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// The up direction vector (+Y in camera space).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// The right direction vector (+X in camera space).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Update the aspect ratio for perspective projection.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if let Projection::Perspective { aspect_ratio, .. } = &mut self.projection {
            *aspect_ratio = width / height;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            projection: Projection::Perspective {
                fov_y: std::f32::consts::FRAC_PI_4,
                aspect_ratio: 16.0 / 9.0,
            },
            near: 0.1,
            far: 10000.0,
        }
    }
}
