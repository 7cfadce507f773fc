//! Perspective camera and its GPU-facing uniform.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Perspective camera defined by a world position, a YXZ Euler orientation,
/// and projection parameters.
///
/// The camera looks down its local −Z axis. Orientation is stored as Euler
/// angles (`rotation.x` = pitch, `rotation.y` = yaw, `rotation.z` = roll) so
/// a pose can be saved and restored component-wise.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    /// Euler orientation (pitch, yaw, roll) in radians, applied YXZ.
    pub rotation: Vec3,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Create a camera at `position`, looking straight down −Z.
    #[must_use]
    pub fn new(position: Vec3, fovy: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            fovy,
            aspect,
            znear,
            zfar,
        }
    }

    /// Orientation quaternion derived from the Euler angles.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y,
            self.rotation.x,
            self.rotation.z,
        )
    }

    /// World-space forward direction (local −Z).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// Re-orient the camera so its forward axis points at `target`.
    ///
    /// Full re-orientation: pitch and yaw are recomputed from scratch and
    /// roll is zeroed. A target coincident with the eye is ignored.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = target - self.position;
        if dir.length_squared() <= f32::EPSILON {
            return;
        }
        let dir = dir.normalize();
        let yaw = (-dir.x).atan2(-dir.z);
        let pitch = dir.y.asin();
        self.rotation = Vec3::new(pitch, yaw, 0.0);
    }

    /// View matrix (inverse of the camera's world transform).
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position).inverse()
    }

    /// Projection matrix.
    ///
    /// `perspective_rh` already uses the [0,1] depth range (wgpu/Vulkan
    /// convention).
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.view_matrix()
    }
}

/// GPU uniform buffer holding the view-projection matrix and camera
/// metadata. The backend uploads this verbatim.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction for lighting.
    pub forward: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.6,
            forward: [0.0, 0.0, -1.0],
            fovy: 45.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.position.to_array();
        self.aspect = camera.aspect;
        self.forward = camera.forward().to_array();
        self.fovy = camera.fovy;
    }
}
