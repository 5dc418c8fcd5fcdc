//! Fires pattern batches through the camera and deposits hits

use rand::Rng;

use crate::core::camera::Camera;
use crate::core::types::Result;
use crate::scene::{ObjectId, SpatialQuery};

use super::buffer::PointCloudBuffer;
use super::pattern::{PatternContext, ScanPattern};

/// Outcome of one scan batch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub rays: usize,
    pub hits: usize,
}

/// Trigger state and selected pattern
#[derive(Clone, Debug, Default)]
pub struct Scanner {
    /// Whether the trigger is held; the tick driver only fires while active
    pub active: bool,
    pattern: ScanPattern,
}

impl Scanner {
    pub fn new(pattern: ScanPattern) -> Self {
        Self {
            active: false,
            pattern,
        }
    }

    pub fn pattern(&self) -> ScanPattern {
        self.pattern
    }

    pub fn set_pattern(&mut self, pattern: ScanPattern) {
        if pattern != self.pattern {
            log::debug!("Scan pattern: {:?} -> {:?}", self.pattern, pattern);
            self.pattern = pattern;
        }
    }

    /// Select by digit. Ids outside 0-9 are rejected and leave the selection unchanged.
    pub fn select(&mut self, id: u32) -> Result<()> {
        self.set_pattern(ScanPattern::from_id(id)?);
        Ok(())
    }

    /// Fire one batch of the selected pattern.
    ///
    /// Each offset becomes a camera ray; the nearest hit among `candidates`
    /// is appended to `buffer` with the hit object's colour tag. Misses are dropped.
    pub fn fire(
        &self,
        camera: &Camera,
        ctx: &PatternContext,
        query: &impl SpatialQuery,
        candidates: &[ObjectId],
        buffer: &mut PointCloudBuffer,
        rng: &mut impl Rng,
    ) -> Result<ScanStats> {
        let offsets = self.pattern.generate(ctx, rng)?;
        let mut stats = ScanStats {
            rays: offsets.len(),
            hits: 0,
        };

        let projector = camera.projector();
        for offset in offsets {
            let ray = projector.project(offset.x, offset.y);
            if let Some(hit) = query.intersect(&ray, candidates) {
                buffer.append(hit.point, hit.tag, rng);
                stats.hits += 1;
            }
        }

        log::debug!("{:?}: {} rays, {} hits", self.pattern, stats.rays, stats.hits);
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ColorRgb, Vec3};
    use crate::scene::{Scene, Shape};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Unit-ish plane facing the camera, `distance` units down -Z
    fn plane_scene(distance: f32, tag: Option<ColorRgb>) -> Scene {
        let mut scene = Scene::new();
        let z = -distance;
        scene.add(
            Shape::Quad([
                Vec3::new(-1.0, -1.0, z),
                Vec3::new(1.0, -1.0, z),
                Vec3::new(1.0, 1.0, z),
                Vec3::new(-1.0, 1.0, z),
            ]),
            tag,
        );
        scene
    }

    #[test]
    fn test_single_dot_hits_plane() {
        let mut rng = SmallRng::seed_from_u64(1);
        let scene = plane_scene(10.0, None);
        let camera = Camera::default();
        let mut buffer = PointCloudBuffer::new(16).unwrap();
        let scanner = Scanner::new(ScanPattern::Dot);

        let stats = scanner
            .fire(&camera, &PatternContext::new(camera.aspect), &scene, &scene.ids(), &mut buffer, &mut rng)
            .unwrap();

        assert_eq!(stats, ScanStats { rays: 1, hits: 1 });
        assert_eq!(buffer.len(), 1);
        let point = buffer.points()[0];
        assert!((point.position() - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-3);
        // Untagged surfaces scan white, within jitter
        for c in [point.color.r, point.color.g, point.color.b] {
            assert!((0.9..=1.1).contains(&c));
        }
    }

    #[test]
    fn test_tag_color_is_used() {
        let mut rng = SmallRng::seed_from_u64(2);
        let scene = plane_scene(5.0, Some(ColorRgb::new(0.0, 1.0, 0.0)));
        let camera = Camera::default();
        let mut buffer = PointCloudBuffer::new(16).unwrap();

        Scanner::new(ScanPattern::Dot)
            .fire(&camera, &PatternContext::new(camera.aspect), &scene, &scene.ids(), &mut buffer, &mut rng)
            .unwrap();
        let color = buffer.points()[0].color;
        assert_eq!(color.r, 0.0);
        assert!(color.g > 0.85);
    }

    #[test]
    fn test_misses_add_nothing() {
        let mut rng = SmallRng::seed_from_u64(3);
        let scene = Scene::new();
        let camera = Camera::default();
        let mut buffer = PointCloudBuffer::new(16).unwrap();

        let stats = Scanner::new(ScanPattern::Spiral)
            .fire(&camera, &PatternContext::new(camera.aspect), &scene, &[], &mut buffer, &mut rng)
            .unwrap();
        assert_eq!(stats, ScanStats { rays: 200, hits: 0 });
        assert!(buffer.is_empty());
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_spiral_lands_on_close_plane() {
        let mut rng = SmallRng::seed_from_u64(4);
        let scene = plane_scene(2.0, None);
        let camera = Camera::default();
        let mut buffer = PointCloudBuffer::new(1024).unwrap();

        let stats = Scanner::new(ScanPattern::Spiral)
            .fire(&camera, &PatternContext::new(camera.aspect), &scene, &scene.ids(), &mut buffer, &mut rng)
            .unwrap();
        assert_eq!(stats.hits, 200);
        assert!(buffer.points()[..200].iter().all(|p| (p.position[2] + 2.0).abs() < 1e-3));
    }

    #[test]
    fn test_select_rejects_unknown() {
        let mut scanner = Scanner::default();
        assert_eq!(scanner.pattern(), ScanPattern::Spiral);
        scanner.select(7).unwrap();
        assert_eq!(scanner.pattern(), ScanPattern::Screen);
        assert!(scanner.select(12).is_err());
        assert_eq!(scanner.pattern(), ScanPattern::Screen);
    }
}
