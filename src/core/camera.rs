//! Perspective camera and scan-ray generation

use crate::controls::Pose;
use crate::core::config::CameraConfig;
use crate::core::types::{Vec3, Mat4, Quat};
use crate::math::Ray;

/// Camera with position, rotation, and projection parameters
#[derive(Clone, Debug)]
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Rotation as quaternion
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near: 0.1,
            far: 5000.0,
        }
    }

    /// Create from configuration
    pub fn from_config(position: Vec3, config: &CameraConfig) -> Self {
        Self {
            near: config.near,
            far: config.far,
            ..Self::new(position, config.fov_y_degrees, config.aspect)
        }
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-self.position);
        rotation_matrix * translation_matrix
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get inverse view-projection matrix (for ray generation)
    pub fn view_projection_inverse(&self) -> Mat4 {
        self.view_projection().inverse()
    }

    /// Get forward direction (negative Z in camera space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Convert a normalized screen offset into a world-space ray.
    ///
    /// `(0, 0)` is the screen centre and `(±1, ±1)` the corners. The ray starts
    /// at the camera and passes through the unprojected mid-depth point.
    /// For batches, build one [`RayProjector`] with [`Camera::projector`].
    pub fn project(&self, offset_x: f32, offset_y: f32) -> Ray {
        self.projector().project(offset_x, offset_y)
    }

    /// Snapshot of the current pose and projection for casting many rays
    pub fn projector(&self) -> RayProjector {
        RayProjector {
            origin: self.position,
            forward: self.forward(),
            inverse: self.view_projection_inverse(),
        }
    }

    /// Copy position and yaw/pitch orientation from a controller pose
    pub fn set_pose(&mut self, pose: &Pose) {
        self.position = pose.position;
        self.rotation = pose.rotation();
    }

    /// Update aspect ratio (call on window resize)
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }
}

/// Screen offset to world ray conversion with the inverse view-projection
/// computed once
#[derive(Clone, Copy, Debug)]
pub struct RayProjector {
    origin: Vec3,
    forward: Vec3,
    inverse: Mat4,
}

impl RayProjector {
    pub fn project(&self, offset_x: f32, offset_y: f32) -> Ray {
        let target = self.inverse.project_point3(Vec3::new(offset_x, offset_y, 0.5));
        let direction = (target - self.origin).try_normalize().unwrap_or(self.forward);
        Ray::new(self.origin, direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(Vec3::ZERO, &CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_default() {
        let camera = Camera::default();
        let forward = camera.forward();
        assert!((forward.z - (-1.0)).abs() < 0.001);
    }

    #[test]
    fn test_projection_inverse() {
        let camera = Camera::default();
        let vp = camera.view_projection();
        let vp_inv = camera.view_projection_inverse();

        // VP * VP^-1 should be identity
        let identity = vp * vp_inv;
        assert!((identity.w_axis.w - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_project_center_follows_forward() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(3.0, 1.0, -2.0);
        camera.set_pose(&Pose::new(camera.position, std::f32::consts::FRAC_PI_2, 0.0));

        let ray = camera.project(0.0, 0.0);
        assert!((ray.origin - camera.position).length() < 1e-5);
        assert!((ray.direction - camera.forward()).length() < 1e-3);
        // Yawing left by 90 degrees looks down -X
        assert!((ray.direction - Vec3::NEG_X).length() < 1e-3);
    }

    #[test]
    fn test_project_offsets_spread_out() {
        let camera = Camera::default();
        let right = camera.project(0.5, 0.0);
        let up = camera.project(0.0, 0.5);
        assert!(right.direction.x > 0.0);
        assert!(up.direction.y > 0.0);
        assert!((right.direction.length() - 1.0).abs() < 1e-5);

        // Screen corner direction matches the frustum half angle
        let top = camera.project(0.0, 1.0);
        let angle = top.direction.angle_between(Vec3::NEG_Z);
        assert!((angle - camera.fov_y * 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_set_aspect_ignores_degenerate() {
        let mut camera = Camera::default();
        camera.set_aspect(800.0, 400.0);
        assert_eq!(camera.aspect, 2.0);
        camera.set_aspect(800.0, 0.0);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn test_projector_matches_project() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(3.0, 1.0, -2.0);
        camera.rotation = Quat::from_euler(glam::EulerRot::YXZ, 0.7, -0.2, 0.0);
        let projector = camera.projector();

        for (x, y) in [(0.0, 0.0), (0.3, -0.1), (-0.9, 0.9)] {
            let a = camera.project(x, y);
            let b = projector.project(x, y);
            assert_eq!(a.origin, b.origin);
            assert!((a.direction - b.direction).length() < 1e-6);
        }
    }
}
