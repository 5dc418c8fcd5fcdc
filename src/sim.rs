//! Simulation context and tick driver.
//!
//! [`Simulation`] owns everything a session needs: the scene and its
//! collidable handles, the optional maze, the player controller, the camera,
//! the scanner and the point buffer. A host (window loop or the headless
//! runner) feeds input through it and calls [`Simulation::tick`] once per frame.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use winit::event::{DeviceEvent, WindowEvent};
use winit::keyboard::KeyCode;

use crate::controls::{ControlMode, MovementController, Pose};
use crate::core::camera::Camera;
use crate::core::config::{SceneKind, SimulationConfig};
use crate::core::input::{InputMapper, ScanCommand};
use crate::core::types::{Result, Vec3};
use crate::maze::Maze;
use crate::scan::{PatternContext, PointCloudBuffer, ScanStats, Scanner};
use crate::scene::{ObjectId, Scene};

/// Where the field scene starts the player
const FIELD_START: Vec3 = Vec3::new(0.0, 0.0, 37.0);

/// What happened during one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Pose moved past the change epsilon; the host should redraw
    pub pose_changed: bool,
    /// Present when the scanner fired this tick
    pub scan: Option<ScanStats>,
}

pub struct Simulation {
    config: SimulationConfig,
    rng: SmallRng,
    camera: Camera,
    controller: MovementController,
    input: InputMapper,
    scanner: Scanner,
    buffer: PointCloudBuffer,
    maze: Option<Maze>,
    scene: Scene,
    collidables: Vec<ObjectId>,
}

impl Simulation {
    /// Build the configured scene and place the player in it
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let buffer = PointCloudBuffer::with_jitter(config.buffer.capacity, config.buffer.jitter)?;
        let mut scene = Scene::new();

        let (maze, collidables, controller) = match config.scene {
            SceneKind::Maze => {
                let maze = Maze::generate(&config.maze, Vec3::ZERO, &mut rng)?;
                let collidables = maze.add_to_scene(&mut scene);
                let spawn = maze.spawn_point(config.movement.eye_height);
                let controller = MovementController::new(spawn, config.movement.clone());
                (Some(maze), collidables, controller)
            }
            SceneKind::Field => {
                scene = Scene::field(&config.field, &mut rng);
                let mut controller = MovementController::new(FIELD_START, config.movement.clone());
                controller.set_mode(ControlMode::Fly);
                (None, scene.ids(), controller)
            }
        };

        let mut camera = Camera::from_config(controller.pose().position, &config.camera);
        camera.set_pose(controller.pose());

        log::info!(
            "Simulation ready: {:?} scene, {} collidables, player at {:?}",
            config.scene,
            collidables.len(),
            controller.pose().position
        );

        Ok(Self {
            config,
            rng,
            camera,
            controller,
            input: InputMapper::new(),
            scanner: Scanner::default(),
            buffer,
            maze,
            scene,
            collidables,
        })
    }

    /// Advance movement, sync the camera and fire the scanner if active
    pub fn tick(&mut self, dt: f32) -> Result<TickReport> {
        let pose_changed = self.controller.update(&self.scene, &self.collidables, dt)?;
        self.camera.set_pose(self.controller.pose());

        let scan = if self.scanner.active {
            let mut ctx = PatternContext::new(self.camera.aspect);
            if let Some(maze) = &self.maze {
                ctx = ctx.with_maze(&maze.grid, maze.world_to_cell(self.controller.pose().position));
            }
            Some(self.scanner.fire(
                &self.camera,
                &ctx,
                &self.scene,
                &self.collidables,
                &mut self.buffer,
                &mut self.rng,
            )?)
        } else {
            None
        };

        Ok(TickReport { pose_changed, scan })
    }

    /// Feed a window event to the input mapper
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Result<()> {
        if let WindowEvent::Resized(size) = event {
            self.camera.set_aspect(size.width as f32, size.height as f32);
        }
        self.input.process_event(event, &mut self.controller.move_state);
        self.apply_commands()
    }

    /// Feed a device event (raw mouse motion) to the input mapper
    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        self.input.process_device_event(event, &mut self.controller.move_state);
    }

    /// Press a key directly, bypassing winit
    pub fn key_down(&mut self, key: KeyCode) -> Result<()> {
        self.input.key_down(key, &mut self.controller.move_state);
        self.apply_commands()
    }

    /// Release a key directly, bypassing winit
    pub fn key_up(&mut self, key: KeyCode) -> Result<()> {
        self.input.key_up(key, &mut self.controller.move_state);
        self.apply_commands()
    }

    pub fn set_pointer_captured(&mut self, captured: bool) {
        self.input.set_pointer_captured(captured, &mut self.controller.move_state);
    }

    fn apply_commands(&mut self) -> Result<()> {
        for command in self.input.drain_commands() {
            match command {
                ScanCommand::SetActive(active) => self.scanner.active = active,
                ScanCommand::SelectPattern(id) => self.scanner.select(id)?,
            }
        }
        Ok(())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn pose(&self) -> &Pose {
        self.controller.pose()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controller_mut(&mut self) -> &mut MovementController {
        &mut self.controller
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn scanner_mut(&mut self) -> &mut Scanner {
        &mut self.scanner
    }

    pub fn buffer(&self) -> &PointCloudBuffer {
        &self.buffer
    }

    /// Mutable buffer access, for clearing the dirty flag after upload
    pub fn buffer_mut(&mut self) -> &mut PointCloudBuffer {
        &mut self.buffer
    }

    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}
