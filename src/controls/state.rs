//! Input intent and player pose

use crate::core::types::{Quat, Vec2, Vec3};

/// Per-axis movement intent written by the input layer.
///
/// Direction fields are held values (1 while a key is down). The yaw/pitch
/// fields are one-shot deltas: they are consumed and zeroed by the next
/// controller update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveState {
    pub left: f32,
    pub right: f32,
    pub forward: f32,
    pub back: f32,
    pub up: f32,
    pub down: f32,
    pub pitch_up: f32,
    pub pitch_down: f32,
    pub yaw_left: f32,
    pub yaw_right: f32,
}

impl MoveState {
    /// Camera-space translation intent (x right, y up, z back), not normalized
    pub fn translation(&self) -> Vec3 {
        Vec3::new(
            self.right - self.left,
            self.up - self.down,
            self.back - self.forward,
        )
    }

    /// Read and clear the rotation deltas.
    /// Returns (pitch, yaw) with positive pitch looking up and positive yaw turning left.
    pub fn take_rotation(&mut self) -> Vec2 {
        let rotation = Vec2::new(
            self.pitch_up - self.pitch_down,
            self.yaw_left - self.yaw_right,
        );
        self.pitch_up = 0.0;
        self.pitch_down = 0.0;
        self.yaw_left = 0.0;
        self.yaw_right = 0.0;
        rotation
    }
}

/// Player position and yaw/pitch orientation (roll is always zero)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    /// Rotation about +Y in radians, positive turns left
    pub yaw: f32,
    /// Rotation about the local X axis in radians, clamped to [-π/2, π/2]
    pub pitch: f32,
}

impl Pose {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self { position, yaw, pitch }
    }

    /// Yaw-then-pitch rotation
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(glam::EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Rotation with pitch stripped, used for walking on the ground plane
    pub fn heading(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0, 0.0)
    }
}
