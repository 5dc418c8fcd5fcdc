//! Scan patterns: batches of normalized screen offsets.
//!
//! Every pattern is a pure function of the viewport aspect ratio and a random
//! source. Offset values change between calls; offset counts never do.

use std::f32::consts::PI;

use rand::Rng;

use crate::core::error::Error;
use crate::core::types::{Result, Vec2};
use crate::maze::MazeGrid;

/// Side length of the screen patch the maze overlay is drawn into
const OVERLAY_PATCH: f32 = 0.2;
/// Rays fired around the player marker in the maze overlay
const OVERLAY_MARKER_RAYS: usize = 5;
const OVERLAY_MARKER_JITTER: f32 = 0.005;

const SPIRAL_POINTS: usize = 200;

/// Selectable scan pattern, keyed by digit 0-9
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScanPattern {
    /// Minimap of the maze's closed cells plus a player marker
    MazeOverlay,
    /// Golden-angle sunflower spiral, 200 rays
    #[default]
    Spiral,
    /// 9×9 jittered grid, spacing 0.04
    Grid,
    /// 9×9 grid squashed into a horizontal band
    HorizontalBand,
    /// 9×9 grid squashed into a vertical band
    VerticalBand,
    /// One ray through the screen centre
    Dot,
    /// 3×21 grid, a denser vertical band
    DenseVerticalBand,
    /// 21×21 grid over the whole screen, not aspect-corrected
    Screen,
    /// Slot 8, fires nothing
    Blank8,
    /// Slot 9, fires nothing
    Blank9,
}

/// Per-call inputs besides the random source
#[derive(Clone, Copy, Debug)]
pub struct PatternContext<'a> {
    /// Viewport width / height
    pub aspect: f32,
    /// Loaded maze, if any
    pub maze: Option<&'a MazeGrid>,
    /// Player position in fractional maze cell coordinates (x, z)
    pub player_cell: Option<Vec2>,
}

impl<'a> PatternContext<'a> {
    pub fn new(aspect: f32) -> Self {
        Self {
            aspect,
            maze: None,
            player_cell: None,
        }
    }

    pub fn with_maze(mut self, maze: &'a MazeGrid, player_cell: Vec2) -> Self {
        self.maze = Some(maze);
        self.player_cell = Some(player_cell);
        self
    }
}

impl ScanPattern {
    pub const ALL: [ScanPattern; 10] = [
        ScanPattern::MazeOverlay,
        ScanPattern::Spiral,
        ScanPattern::Grid,
        ScanPattern::HorizontalBand,
        ScanPattern::VerticalBand,
        ScanPattern::Dot,
        ScanPattern::DenseVerticalBand,
        ScanPattern::Screen,
        ScanPattern::Blank8,
        ScanPattern::Blank9,
    ];

    /// Look up a pattern by its digit
    pub fn from_id(id: u32) -> Result<Self> {
        Self::ALL
            .get(id as usize)
            .copied()
            .ok_or(Error::UnknownPattern(id))
    }

    /// Digit this pattern is bound to
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Produce this call's batch of offsets
    pub fn generate(self, ctx: &PatternContext, rng: &mut impl Rng) -> Result<Vec<Vec2>> {
        if !(ctx.aspect > 0.0) || !ctx.aspect.is_finite() {
            return Err(Error::invalid(format!("aspect ratio must be positive, got {}", ctx.aspect)));
        }
        let aspect = ctx.aspect;

        let offsets = match self {
            ScanPattern::MazeOverlay => match (ctx.maze, ctx.player_cell) {
                (Some(maze), Some(player)) => maze_overlay(maze, player, aspect, rng),
                _ => spiral(aspect, rng),
            },
            ScanPattern::Spiral => spiral(aspect, rng),
            ScanPattern::Grid => jittered_grid(4, 4, Vec2::splat(0.04), aspect, rng),
            ScanPattern::HorizontalBand => jittered_grid(4, 4, Vec2::new(0.1, 0.004), aspect, rng),
            ScanPattern::VerticalBand => jittered_grid(4, 4, Vec2::new(0.004, 0.1), aspect, rng),
            ScanPattern::Dot => vec![Vec2::ZERO],
            ScanPattern::DenseVerticalBand => jittered_grid(1, 10, Vec2::new(0.004, 0.1), aspect, rng),
            ScanPattern::Screen => jittered_grid(10, 10, Vec2::splat(0.1), 1.0, rng),
            ScanPattern::Blank8 | ScanPattern::Blank9 => Vec::new(),
        };
        Ok(offsets)
    }
}

impl TryFrom<u32> for ScanPattern {
    type Error = Error;

    fn try_from(id: u32) -> Result<Self> {
        Self::from_id(id)
    }
}

/// Sunflower spiral: golden-angle steps, radius growing with sqrt(i)
pub fn spiral(aspect: f32, rng: &mut impl Rng) -> Vec<Vec2> {
    let golden_angle = PI * (3.0 - 5.0_f32.sqrt());
    let start: f32 = rng.random();

    (0..SPIRAL_POINTS)
        .map(|i| {
            let angle = i as f32 * golden_angle + start;
            let radius = 0.01 * (i as f32).sqrt();
            let x = radius * angle.cos() + rng.random::<f32>() * 0.02;
            let y = radius * angle.sin() + rng.random::<f32>() * 0.02;
            Vec2::new(x / aspect, y)
        })
        .collect()
}

/// Grid of `(2*half_x + 1) × (2*half_y + 1)` cells, one ray jittered inside each
pub fn jittered_grid(
    half_x: i32,
    half_y: i32,
    spacing: Vec2,
    aspect: f32,
    rng: &mut impl Rng,
) -> Vec<Vec2> {
    let mut offsets = Vec::with_capacity(((2 * half_x + 1) * (2 * half_y + 1)) as usize);
    for i in -half_x..=half_x {
        for j in -half_y..=half_y {
            let x = (rng.random::<f32>() + i as f32) * spacing.x;
            let y = (rng.random::<f32>() + j as f32) * spacing.y;
            offsets.push(Vec2::new(x / aspect, y));
        }
    }
    offsets
}

/// One ray per closed cell mapped into a small centred patch, plus a cluster
/// around the player's cell
pub fn maze_overlay(maze: &MazeGrid, player_cell: Vec2, aspect: f32, rng: &mut impl Rng) -> Vec<Vec2> {
    let span = (maze.size() - 1) as f32;
    let to_patch = |cell: Vec2| {
        Vec2::new(
            (cell.x / span - 0.5) * OVERLAY_PATCH / aspect,
            (0.5 - cell.y / span) * OVERLAY_PATCH,
        )
    };

    let mut offsets: Vec<Vec2> = maze
        .closed_cells()
        .map(|(x, y)| to_patch(Vec2::new(x as f32, y as f32)))
        .collect();

    let marker = to_patch(player_cell);
    let j = OVERLAY_MARKER_JITTER;
    for _ in 0..OVERLAY_MARKER_RAYS {
        offsets.push(marker + Vec2::new(rng.random_range(-j..j) / aspect, rng.random_range(-j..j)));
    }
    offsets
}
