//! Frame timing utilities

use std::time::{Duration, Instant};

/// Where frame deltas come from
#[derive(Clone, Copy, Debug)]
enum Source {
    /// Measured between `tick` calls
    WallClock { last_frame: Instant },
    /// Constant step, for headless runs and tests
    Fixed(Duration),
}

/// Tracks frame timing and calculates FPS
pub struct FrameTimer {
    source: Source,
    delta: Duration,
    frame_count: u64,
    elapsed: Duration,
    fps_elapsed: Duration,
    fps: f32,
    fps_frame_count: u32,
}

impl FrameTimer {
    /// Create a wall-clock frame timer
    pub fn new() -> Self {
        Self::with_source(Source::WallClock { last_frame: Instant::now() })
    }

    /// Create a timer that advances by `step` every tick
    pub fn fixed(step: Duration) -> Self {
        Self::with_source(Source::Fixed(step))
    }

    fn with_source(source: Source) -> Self {
        Self {
            source,
            delta: Duration::ZERO,
            frame_count: 0,
            elapsed: Duration::ZERO,
            fps_elapsed: Duration::ZERO,
            fps: 0.0,
            fps_frame_count: 0,
        }
    }

    /// Call once per frame to update timing
    pub fn tick(&mut self) {
        self.delta = match &mut self.source {
            Source::WallClock { last_frame } => {
                let now = Instant::now();
                let delta = now - *last_frame;
                *last_frame = now;
                delta
            }
            Source::Fixed(step) => *step,
        };
        self.frame_count += 1;
        self.elapsed += self.delta;

        // Update FPS every second
        self.fps_frame_count += 1;
        self.fps_elapsed += self.delta;
        if self.fps_elapsed >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / self.fps_elapsed.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_elapsed = Duration::ZERO;
        }
    }

    /// Get delta time in seconds
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Total simulated time
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get current FPS (updated every second)
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step() {
        let mut timer = FrameTimer::fixed(Duration::from_millis(20));
        assert_eq!(timer.delta_secs(), 0.0);

        for _ in 0..50 {
            timer.tick();
        }
        assert!((timer.delta_secs() - 0.02).abs() < 1e-6);
        assert_eq!(timer.frame_count(), 50);
        assert_eq!(timer.elapsed(), Duration::from_secs(1));
        assert!((timer.fps() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_wall_clock_advances() {
        let mut timer = FrameTimer::new();
        std::thread::sleep(Duration::from_millis(2));
        timer.tick();
        assert!(timer.delta_secs() > 0.0);
    }
}
