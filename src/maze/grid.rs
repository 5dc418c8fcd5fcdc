//! Randomized depth-first maze carving on an odd-sized grid

use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::error::Error;
use crate::core::types::Result;

/// Axis steps between neighbouring rooms
const DIRECTIONS: [(isize, isize); 4] = [(2, 0), (-2, 0), (0, 2), (0, -2)];

/// Square grid of open (walkable) and closed cells.
///
/// Rooms sit on odd coordinates `1, 3, …, size-2`; the cells between two
/// rooms are wall cells, opened only where the carve connected those rooms.
/// The outer border is always closed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    size: usize,
    /// Row-major, index `y * size + x`
    open: Vec<bool>,
}

/// One level of the explicit DFS stack
struct Frame {
    cell: (usize, usize),
    directions: Vec<(isize, isize)>,
    next: usize,
}

impl MazeGrid {
    /// Carve a perfect maze (a spanning tree over all rooms).
    ///
    /// Starts at room `(size-2, size-2)`. `size` must be odd and at least 3.
    pub fn generate(size: usize, rng: &mut impl Rng) -> Result<Self> {
        if size < 3 || size % 2 == 0 {
            return Err(Error::invalid(format!("maze size must be odd and >= 3, got {size}")));
        }

        let mut grid = Self {
            size,
            open: vec![false; size * size],
        };
        let mut visited = vec![false; size * size];

        let start = grid.start();
        visited[grid.index(start)] = true;
        grid.set_open(start);
        let mut stack = vec![Frame {
            cell: start,
            directions: grid.candidate_directions(start, &visited, rng),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(&(dx, dy)) = frame.directions.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            let (x, y) = frame.cell;

            // A sibling branch may have reached this room since the directions were picked
            let target = (x.wrapping_add_signed(dx), y.wrapping_add_signed(dy));
            if visited[grid.index(target)] {
                continue;
            }

            let wall = (x.wrapping_add_signed(dx / 2), y.wrapping_add_signed(dy / 2));
            grid.set_open(wall);
            grid.set_open(target);
            visited[grid.index(target)] = true;

            let directions = grid.candidate_directions(target, &visited, rng);
            stack.push(Frame {
                cell: target,
                directions,
                next: 0,
            });
        }

        log::info!(
            "Generated {}x{} maze: {} rooms, {} open cells",
            size, size, grid.room_count(), grid.open_count()
        );
        Ok(grid)
    }

    /// Shuffled directions whose target room is interior and unvisited
    fn candidate_directions(
        &self,
        (x, y): (usize, usize),
        visited: &[bool],
        rng: &mut impl Rng,
    ) -> Vec<(isize, isize)> {
        let mut directions: Vec<(isize, isize)> = DIRECTIONS
            .iter()
            .copied()
            .filter(|&(dx, dy)| {
                let tx = x as isize + dx;
                let ty = y as isize + dy;
                self.is_interior(tx, ty)
                    && self.is_interior(x as isize + dx / 2, y as isize + dy / 2)
                    && !visited[ty as usize * self.size + tx as usize]
            })
            .collect();
        directions.shuffle(rng);
        directions
    }

    fn is_interior(&self, x: isize, y: isize) -> bool {
        let max = self.size as isize - 2;
        (1..=max).contains(&x) && (1..=max).contains(&y)
    }

    fn index(&self, (x, y): (usize, usize)) -> usize {
        y * self.size + x
    }

    fn set_open(&mut self, cell: (usize, usize)) {
        let i = self.index(cell);
        self.open[i] = true;
    }

    /// Grid side length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Room the carve starts from
    pub fn start(&self) -> (usize, usize) {
        (self.size - 2, self.size - 2)
    }

    /// Whether `(x, y)` is walkable. Out-of-bounds cells count as closed.
    pub fn is_open(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.open[y * self.size + x]
    }

    /// Every closed cell as `(x, y)`, row by row
    pub fn closed_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size)
            .flat_map(move |y| (0..self.size).map(move |x| (x, y)))
            .filter(move |&(x, y)| !self.is_open(x, y))
    }

    /// Number of room cells
    pub fn room_count(&self) -> usize {
        let per_side = (self.size - 1) / 2;
        per_side * per_side
    }

    /// Number of open cells
    pub fn open_count(&self) -> usize {
        self.open.iter().filter(|&&o| o).count()
    }

    /// Number of wall cells opened to connect two rooms
    pub fn carved_connections(&self) -> usize {
        (0..self.size)
            .flat_map(|y| (0..self.size).map(move |x| (x, y)))
            .filter(|&(x, y)| (x % 2 == 0) != (y % 2 == 0) && self.is_open(x, y))
            .count()
    }
}
