//! Simulation configuration, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// Which demo scene the session builds at startup
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Procedural maze walked in collision-aware mode
    #[default]
    Maze,
    /// Open field with scattered obstacles, flown in debug-fly mode
    Field,
}

/// Full simulation configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// RNG seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
    pub scene: SceneKind,
    pub maze: MazeConfig,
    pub buffer: BufferConfig,
    pub movement: MovementConfig,
    pub camera: CameraConfig,
    pub field: FieldConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Grid side length, odd and >= 3
    pub size: usize,
    /// Wall quad height in maze units
    pub wall_height: f32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            size: 21,
            wall_height: 10.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Number of point slots in the ring buffer
    pub capacity: usize,
    /// Per-channel multiplicative colour jitter amplitude
    pub jitter: f32,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: 1_000_000,
            jitter: 0.1,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Units per second at full input
    pub movement_speed: f32,
    /// Gravity acceleration, scaled by delta time and movement speed
    pub gravity: f32,
    /// Radians per unit of one-shot rotation input
    pub rotation_speed: f32,
    /// Distance below which a wall probe triggers sliding
    pub wall_probe_distance: f32,
    /// Resting height above the ground
    pub eye_height: f32,
    /// Wall correction passes per tick
    pub wall_passes: usize,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            movement_speed: 10.0,
            gravity: -0.981,
            rotation_speed: 0.01,
            wall_probe_distance: 0.5,
            eye_height: 1.0,
            wall_passes: 2,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 70.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 5000.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of scattered obstacles
    pub object_count: usize,
    /// Side length of the cube the obstacles are scattered in
    pub spread: f32,
    pub floor_y: f32,
    pub floor_size: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            object_count: 10,
            spread: 100.0,
            floor_y: -100.0,
            floor_size: 1000.0,
        }
    }
}

impl SimulationConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<()> {
        if self.maze.size < 3 || self.maze.size % 2 == 0 {
            return Err(Error::invalid(format!(
                "maze size must be odd and >= 3, got {}",
                self.maze.size
            )));
        }
        if self.buffer.capacity == 0 {
            return Err(Error::invalid("point buffer capacity must be non-zero"));
        }
        if !(self.camera.aspect > 0.0) {
            return Err(Error::invalid(format!(
                "camera aspect must be positive, got {}",
                self.camera.aspect
            )));
        }
        if !(self.movement.movement_speed >= 0.0) {
            return Err(Error::invalid("movement speed must be non-negative"));
        }
        if self.movement.wall_passes == 0 {
            return Err(Error::invalid("wall_passes must be at least 1"));
        }
        if !is_positive(self.movement.wall_probe_distance) {
            return Err(Error::invalid(format!(
                "wall probe distance must be positive, got {}",
                self.movement.wall_probe_distance
            )));
        }
        if !is_positive(self.movement.eye_height) {
            return Err(Error::invalid(format!(
                "eye height must be positive, got {}",
                self.movement.eye_height
            )));
        }
        if !is_positive(self.field.spread) || !is_positive(self.field.floor_size) {
            return Err(Error::invalid(format!(
                "field spread and floor size must be positive, got {} and {}",
                self.field.spread, self.field.floor_size
            )));
        }
        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value > 0.0 && value.is_finite()
}
