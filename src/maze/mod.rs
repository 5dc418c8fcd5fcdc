//! Procedural maze: grid carving, wall derivation and world placement

pub mod grid;
pub mod walls;

use rand::Rng;

use crate::core::config::MazeConfig;
use crate::core::types::{Result, Vec2, Vec3};
use crate::scene::{ObjectId, Scene, Shape};

pub use grid::MazeGrid;
pub use walls::{MazeGeometry, WallSegment};

/// A generated maze placed in the world at `origin`.
///
/// Maze units map 1:1 to world units; cell `(x, y)` is centred at
/// `origin + (x, 0, y)`.
pub struct Maze {
    pub grid: MazeGrid,
    pub geometry: MazeGeometry,
    pub origin: Vec3,
}

impl Maze {
    /// Generate grid and geometry. Runs once per scene load.
    pub fn generate(config: &MazeConfig, origin: Vec3, rng: &mut impl Rng) -> Result<Self> {
        let grid = MazeGrid::generate(config.size, rng)?;
        let geometry = MazeGeometry::from_grid(&grid, config.wall_height);
        Ok(Self { grid, geometry, origin })
    }

    /// Add walls and floor to the scene as untagged quads, returning their ids
    pub fn add_to_scene(&self, scene: &mut Scene) -> Vec<ObjectId> {
        let ids: Vec<ObjectId> = self
            .geometry
            .segments()
            .map(|segment| {
                let corners = segment.corners.map(|c| c + self.origin);
                scene.add(Shape::Quad(corners), None)
            })
            .collect();
        log::info!("Maze placed at {:?}: {} collidable quads", self.origin, ids.len());
        ids
    }

    /// World position of a cell centre at floor level
    pub fn cell_to_world(&self, x: usize, y: usize) -> Vec3 {
        self.origin + Vec3::new(x as f32, 0.0, y as f32)
    }

    /// Fractional cell coordinates of a world position
    pub fn world_to_cell(&self, position: Vec3) -> Vec2 {
        let local = position - self.origin;
        Vec2::new(local.x, local.z)
    }

    /// Where the player starts: the carve's start room, `eye_height` above the floor
    pub fn spawn_point(&self, eye_height: f32) -> Vec3 {
        let (x, y) = self.grid.start();
        self.cell_to_world(x, y) + Vec3::Y * eye_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Ray;
    use crate::scene::SpatialQuery;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn maze(size: usize) -> Maze {
        let config = MazeConfig { size, ..Default::default() };
        Maze::generate(&config, Vec3::new(-5.0, 0.0, 3.0), &mut SmallRng::seed_from_u64(21)).unwrap()
    }

    #[test]
    fn test_cell_world_round_trip() {
        let maze = maze(9);
        let world = maze.cell_to_world(3, 5);
        assert_eq!(world, Vec3::new(-2.0, 0.0, 8.0));
        assert_eq!(maze.world_to_cell(world), Vec2::new(3.0, 5.0));
    }

    #[test]
    fn test_spawn_stands_on_floor() {
        let maze = maze(9);
        let mut scene = Scene::new();
        let ids = maze.add_to_scene(&mut scene);
        assert_eq!(ids.len(), maze.geometry.walls.len() + 1);

        let spawn = maze.spawn_point(1.0);
        let hit = scene.intersect(&Ray::new(spawn, Vec3::NEG_Y), &ids).unwrap();
        assert!((hit.distance - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_spawn_is_enclosed() {
        // Walking in any horizontal direction from spawn eventually hits a wall
        let maze = maze(11);
        let mut scene = Scene::new();
        let ids = maze.add_to_scene(&mut scene);
        let spawn = maze.spawn_point(1.0);

        for dir in [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z] {
            let hit = scene.intersect(&Ray::new(spawn, dir), &ids);
            assert!(hit.is_some(), "{dir:?}");
        }
    }

    #[test]
    fn test_invalid_size_propagates() {
        let config = MazeConfig { size: 8, ..Default::default() };
        assert!(Maze::generate(&config, Vec3::ZERO, &mut SmallRng::seed_from_u64(0)).is_err());
    }
}
