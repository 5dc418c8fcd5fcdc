//! Wall quads derived from a carved grid

use crate::core::types::Vec3;

use super::grid::MazeGrid;

/// One vertical wall face or the floor, as four corners in winding order
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSegment {
    pub corners: [Vec3; 4],
}

impl WallSegment {
    /// Vertical quad standing on the segment `from → to`
    pub fn vertical(from: Vec3, to: Vec3, height: f32) -> Self {
        let up = Vec3::Y * height;
        Self {
            corners: [from, to, to + up, from + up],
        }
    }

    /// Two triangles, for rendering
    pub fn triangles(&self) -> [[Vec3; 3]; 2] {
        let [a, b, c, d] = self.corners;
        [[a, b, c], [a, c, d]]
    }
}

/// All wall faces of a maze plus its floor, in maze-local units
/// (cell `(x, y)` is centred at `(x, 0, y)`)
#[derive(Clone, Debug)]
pub struct MazeGeometry {
    pub walls: Vec<WallSegment>,
    pub floor: WallSegment,
}

impl MazeGeometry {
    /// Derive geometry from a grid.
    ///
    /// Each closed cell emits, for every closed in-bounds axis neighbour, a
    /// wall from its own centre to the shared edge midpoint. The neighbour
    /// emits the matching half, so walls run between closed cell centres and
    /// open corridors stay unwalled.
    pub fn from_grid(grid: &MazeGrid, wall_height: f32) -> Self {
        let size = grid.size();
        let mut walls = Vec::new();

        for (x, y) in grid.closed_cells() {
            let center = Vec3::new(x as f32, 0.0, y as f32);
            let neighbours = [
                (x + 1 < size).then(|| (x + 1, y)),
                x.checked_sub(1).map(|nx| (nx, y)),
                (y + 1 < size).then(|| (x, y + 1)),
                y.checked_sub(1).map(|ny| (x, ny)),
            ];

            for (nx, ny) in neighbours.into_iter().flatten() {
                if grid.is_open(nx, ny) {
                    continue;
                }
                let midpoint = (center + Vec3::new(nx as f32, 0.0, ny as f32)) * 0.5;
                walls.push(WallSegment::vertical(center, midpoint, wall_height));
            }
        }

        let extent = (size - 1) as f32;
        let floor = WallSegment {
            corners: [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(extent, 0.0, 0.0),
                Vec3::new(extent, 0.0, extent),
                Vec3::new(0.0, 0.0, extent),
            ],
        };

        log::debug!("Maze geometry: {} wall faces", walls.len());
        Self { walls, floor }
    }

    /// Walls followed by the floor
    pub fn segments(&self) -> impl Iterator<Item = &WallSegment> {
        self.walls.iter().chain(std::iter::once(&self.floor))
    }

    /// Flat triangle list (three vertices per triangle) for a vertex buffer,
    /// translated by `origin`
    pub fn triangles(&self, origin: Vec3) -> Vec<[f32; 3]> {
        self.segments()
            .flat_map(|segment| segment.triangles())
            .flatten()
            .map(|v| (v + origin).to_array())
            .collect()
    }
}
