//! Fixed-capacity ring buffer of scanned points

use rand::Rng;

use crate::core::error::Error;
use crate::core::types::{ColorRgb, Result, Vec3};

/// Coordinate every unwritten slot is parked at, far outside any scene
pub const SENTINEL_POSITION: f32 = 1_000_000.0;

/// Default multiplicative colour jitter amplitude
pub const DEFAULT_JITTER: f32 = 0.1;

/// One deposited point, laid out for direct GPU upload
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ScannedPoint {
    pub position: [f32; 3],
    pub color: ColorRgb,
}

impl ScannedPoint {
    /// Placeholder for slots that were never written
    pub const UNWRITTEN: Self = Self {
        position: [SENTINEL_POSITION; 3],
        color: ColorRgb::BLACK,
    };

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Ring buffer of coloured points.
///
/// Allocated once at full capacity; once full, each append overwrites the
/// oldest point. `write_cursor` always indexes the next slot to overwrite.
pub struct PointCloudBuffer {
    points: Vec<ScannedPoint>,
    write_cursor: usize,
    /// Total appends since creation, used to know how many slots hold real points
    total_written: u64,
    jitter: f32,
    dirty: bool,
}

impl PointCloudBuffer {
    /// Allocate `capacity` slots, all parked at the sentinel position
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_jitter(capacity, DEFAULT_JITTER)
    }

    /// Allocate with a custom colour jitter amplitude (0 disables jitter)
    pub fn with_jitter(capacity: usize, jitter: f32) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid("point buffer capacity must be non-zero"));
        }
        if !(0.0..1.0).contains(&jitter) {
            return Err(Error::invalid(format!("colour jitter must be in [0, 1), got {jitter}")));
        }

        log::info!(
            "Allocating point cloud buffer: {} points ({:.1} MB)",
            capacity,
            (capacity * std::mem::size_of::<ScannedPoint>()) as f64 / (1024.0 * 1024.0)
        );

        Ok(Self {
            points: vec![ScannedPoint::UNWRITTEN; capacity],
            write_cursor: 0,
            total_written: 0,
            jitter,
            dirty: false,
        })
    }

    /// Deposit a point. `None` colour means opaque white.
    ///
    /// Each channel is multiplied by its own `1 + U(-jitter, jitter)` factor so
    /// repeated hits on one surface don't render flat.
    pub fn append(&mut self, position: Vec3, color: Option<ColorRgb>, rng: &mut impl Rng) {
        let base = color.unwrap_or(ColorRgb::WHITE);
        let color = if self.jitter > 0.0 {
            let j = self.jitter;
            base.scaled([
                1.0 + rng.random_range(-j..j),
                1.0 + rng.random_range(-j..j),
                1.0 + rng.random_range(-j..j),
            ])
        } else {
            base
        };

        self.points[self.write_cursor] = ScannedPoint {
            position: position.to_array(),
            color,
        };
        self.write_cursor = (self.write_cursor + 1) % self.points.len();
        self.total_written += 1;
        self.dirty = true;
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.points.len()
    }

    /// Number of slots holding real points: `min(appends, capacity)`
    pub fn len(&self) -> usize {
        self.total_written.min(self.points.len() as u64) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.total_written == 0
    }

    /// Index of the next slot to be overwritten
    pub fn write_cursor(&self) -> usize {
        self.write_cursor
    }

    /// Appends since creation, including overwritten ones
    pub fn total_written(&self) -> u64 {
        self.total_written
    }

    /// Raw slots in storage order, including unwritten sentinels
    pub fn points(&self) -> &[ScannedPoint] {
        &self.points
    }

    /// Raw slots as bytes for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }

    /// Live points, oldest first
    pub fn iter_oldest_first(&self) -> impl Iterator<Item = &ScannedPoint> {
        let (start, len) = if self.total_written >= self.points.len() as u64 {
            (self.write_cursor, self.points.len())
        } else {
            (0, self.write_cursor)
        };
        let (tail, head) = self.points.split_at(start);
        head.iter().chain(tail.iter()).take(len)
    }

    /// Whether points changed since the render layer last uploaded
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and clear the dirty flag. Call once per upload.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn point(i: usize) -> Vec3 {
        Vec3::new(i as f32, 0.0, 0.0)
    }

    #[test]
    fn test_new_is_parked_at_sentinel() {
        let buffer = PointCloudBuffer::new(16).unwrap();
        assert_eq!(buffer.capacity(), 16);
        assert!(buffer.is_empty());
        assert!(!buffer.is_dirty());
        assert!(buffer.points().iter().all(|p| p.position == [SENTINEL_POSITION; 3]));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(PointCloudBuffer::new(0), Err(Error::InvalidArgument(_))));
        assert!(PointCloudBuffer::with_jitter(4, 1.5).is_err());
    }

    #[test]
    fn test_ring_invariant() {
        let mut rng = SmallRng::seed_from_u64(1);
        let capacity = 8;

        for n in [0usize, 3, 8, 9, 20, 33] {
            let mut buffer = PointCloudBuffer::new(capacity).unwrap();
            for i in 0..n {
                buffer.append(point(i), None, &mut rng);
            }

            assert_eq!(buffer.len(), n.min(capacity));
            assert_eq!(buffer.write_cursor(), n % capacity);

            // Most recent `capacity` points survive, in insertion order
            let expected: Vec<f32> = (n.saturating_sub(capacity)..n).map(|i| i as f32).collect();
            let actual: Vec<f32> = buffer.iter_oldest_first().map(|p| p.position[0]).collect();
            assert_eq!(actual, expected, "n = {n}");

            // Overwritten points are gone
            for i in 0..n.saturating_sub(capacity) {
                assert!(buffer.points().iter().all(|p| p.position[0] != i as f32));
            }
        }
    }

    #[test]
    fn test_default_color_is_jittered_white() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut buffer = PointCloudBuffer::new(64).unwrap();
        for i in 0..64 {
            buffer.append(point(i), None, &mut rng);
        }

        let mut all_same = true;
        for p in buffer.points() {
            for c in [p.color.r, p.color.g, p.color.b] {
                assert!((0.9..=1.1).contains(&c));
            }
            all_same &= p.color == buffer.points()[0].color;
        }
        assert!(!all_same);
    }

    #[test]
    fn test_tag_color_is_scaled_per_channel() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut buffer = PointCloudBuffer::new(4).unwrap();
        let tag = ColorRgb::new(0.5, 0.0, 1.0);
        buffer.append(Vec3::ONE, Some(tag), &mut rng);

        let c = buffer.points()[0].color;
        assert!((0.45..=0.55).contains(&c.r));
        assert_eq!(c.g, 0.0);
        assert!((0.9..=1.1).contains(&c.b));
    }

    #[test]
    fn test_no_jitter_keeps_color() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut buffer = PointCloudBuffer::with_jitter(4, 0.0).unwrap();
        buffer.append(Vec3::ONE, None, &mut rng);
        assert_eq!(buffer.points()[0].color, ColorRgb::WHITE);
    }

    #[test]
    fn test_dirty_flag() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut buffer = PointCloudBuffer::new(4).unwrap();
        buffer.append(Vec3::ONE, None, &mut rng);
        buffer.append(Vec3::ONE, None, &mut rng);

        assert!(buffer.take_dirty());
        assert!(!buffer.take_dirty());
    }

    #[test]
    fn test_as_bytes_covers_every_slot() {
        let buffer = PointCloudBuffer::new(10).unwrap();
        assert_eq!(buffer.as_bytes().len(), 10 * 6 * 4);
    }
}
