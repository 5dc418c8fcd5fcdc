//! First-person movement controller.
//!
//! One controller owns the player [`Pose`] and integrates it from a
//! [`MoveState`] every tick. Two modes share the orientation handling:
//!
//! - [`ControlMode::Walk`]: wall sliding and snap-to-ground against the
//!   collidable geometry (see [`walk`])
//! - [`ControlMode::Fly`]: free debug flight (see [`fly`])

pub mod fly;
pub mod state;
pub mod walk;

use std::f32::consts::FRAC_PI_2;

use crate::core::config::MovementConfig;
use crate::core::error::Error;
use crate::core::types::{Quat, Result, Vec3};
use crate::scene::{ObjectId, SpatialQuery};

pub use state::{MoveState, Pose};

/// Threshold for the pose change notification
const CHANGE_EPSILON: f32 = 0.000001;

/// Movement mode, switchable at any time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlMode {
    #[default]
    Walk,
    Fly,
}

/// Yaw/pitch integrator with collision-aware walking
pub struct MovementController {
    /// Tuning shared by both modes
    pub config: MovementConfig,
    /// Intent written by the input layer
    pub move_state: MoveState,
    mode: ControlMode,
    pose: Pose,
    /// Move vector after wall correction in the last walk tick
    move_vector: Vec3,
    last_position: Vec3,
    last_rotation: Quat,
}

impl MovementController {
    /// Create a controller standing at `position`, looking down -Z
    pub fn new(position: Vec3, config: MovementConfig) -> Self {
        let pose = Pose::new(position, 0.0, 0.0);
        Self {
            config,
            move_state: MoveState::default(),
            mode: ControlMode::Walk,
            pose,
            move_vector: Vec3::ZERO,
            last_position: pose.position,
            last_rotation: pose.rotation(),
        }
    }

    /// Advance one tick.
    ///
    /// Returns `true` when position or orientation moved by more than a small
    /// epsilon since the last notification, so idle frames skip downstream work.
    pub fn update(
        &mut self,
        query: &impl SpatialQuery,
        collidables: &[ObjectId],
        dt: f32,
    ) -> Result<bool> {
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(Error::invalid(format!("delta time must be positive and finite, got {dt}")));
        }

        // One-shot rotation deltas
        let rotation = self.move_state.take_rotation();
        let yaw = self.pose.yaw + rotation.y * self.config.rotation_speed;
        let pitch = (self.pose.pitch + rotation.x * self.config.rotation_speed)
            .clamp(-FRAC_PI_2, FRAC_PI_2);
        let oriented = Pose::new(self.pose.position, yaw, pitch);

        let move_scale = dt * self.config.movement_speed;
        let translation = self.move_state.translation();

        match self.mode {
            ControlMode::Walk => {
                let desired = (oriented.heading() * translation).normalize_or_zero();
                let position = self.pose.position;

                self.move_vector = walk::resolve_walls(query, collidables, position, desired, &self.config);
                let dy = walk::ground_step(query, collidables, position, move_scale, &self.config);

                self.pose.position.y += dy;
                self.pose.position += self.move_vector * move_scale;
            }
            ControlMode::Fly => {
                self.move_vector = Vec3::ZERO;
                self.pose.position += fly::fly_step(
                    oriented.rotation(),
                    translation,
                    self.config.movement_speed,
                    dt,
                );
            }
        }

        self.pose.yaw = yaw;
        self.pose.pitch = pitch;

        Ok(self.check_changed())
    }

    fn check_changed(&mut self) -> bool {
        let rotation = self.pose.rotation();
        let moved = self.last_position.distance_squared(self.pose.position) > CHANGE_EPSILON;
        let turned = 8.0 * (1.0 - self.last_rotation.dot(rotation)) > CHANGE_EPSILON;

        if moved || turned {
            log::trace!(
                "pose changed: pos={:?} yaw={:.3} pitch={:.3}",
                self.pose.position, self.pose.yaw, self.pose.pitch
            );
            self.last_position = self.pose.position;
            self.last_rotation = rotation;
            true
        } else {
            false
        }
    }

    /// Current pose
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Teleport, e.g. to a spawn point
    pub fn set_position(&mut self, position: Vec3) {
        self.pose.position = position;
    }

    /// Set orientation from angles (in radians)
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.pose.yaw = yaw;
        self.pose.pitch = pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Wall-corrected move vector of the last walk tick
    pub fn move_vector(&self) -> Vec3 {
        self.move_vector
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ControlMode) {
        if mode != self.mode {
            log::info!("Control mode: {:?}", mode);
            self.mode = mode;
        }
    }
}

impl Default for MovementController {
    fn default() -> Self {
        Self::new(Vec3::ZERO, MovementConfig::default())
    }
}
