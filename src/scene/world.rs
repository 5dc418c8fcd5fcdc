//! Flat list of collidable objects

use rand::Rng;

use crate::core::config::FieldConfig;
use crate::core::types::{ColorRgb, Vec3};
use crate::math::{Aabb, Ray};

use super::collider::{ObjectId, SceneObject, Shape};
use super::query::{RayHit, SpatialQuery};

/// Owner of every collidable object in the session.
///
/// Objects are never removed, so an [`ObjectId`] is an index into `objects`.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Demo scene without a maze: a wide floor far below and randomly
    /// placed, randomly coloured boxes around the origin
    pub fn field(config: &FieldConfig, rng: &mut impl Rng) -> Self {
        let mut scene = Self::new();

        let half = config.floor_size * 0.5;
        let y = config.floor_y;
        scene.add(
            Shape::Quad([
                Vec3::new(-half, y, -half),
                Vec3::new(half, y, -half),
                Vec3::new(half, y, half),
                Vec3::new(-half, y, half),
            ]),
            None,
        );

        let spread = config.spread * 0.5;
        for _ in 0..config.object_count {
            let center = Vec3::new(
                rng.random_range(-spread..spread),
                rng.random_range(-spread..spread),
                rng.random_range(-spread..spread),
            );
            let half_extent = Vec3::new(
                rng.random_range(3.0..8.0),
                rng.random_range(3.0..8.0),
                rng.random_range(3.0..8.0),
            );
            let tag = ColorRgb::new(rng.random(), rng.random(), rng.random());
            scene.add(
                Shape::Box(Aabb::from_center_half_extent(center, half_extent)),
                Some(tag),
            );
        }

        log::info!("Field scene built with {} objects", scene.len());
        scene
    }

    /// Add an object, returning its handle
    pub fn add(&mut self, shape: Shape, tag: Option<ColorRgb>) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(SceneObject::new(shape, tag));
        id
    }

    /// Look up an object by handle
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0 as usize)
    }

    /// Handles of every object, in insertion order
    pub fn ids(&self) -> Vec<ObjectId> {
        (0..self.objects.len() as u32).map(ObjectId).collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl SpatialQuery for Scene {
    fn intersect(&self, ray: &Ray, candidates: &[ObjectId]) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;

        for &id in candidates {
            let Some(object) = self.get(id) else {
                log::trace!("Skipping unknown candidate {:?}", id);
                continue;
            };

            // Broadphase: the box entry can't be further than the best hit so far
            let Some((t_near, _)) = ray.intersects_aabb(&object.bounds) else {
                continue;
            };
            if nearest.is_some_and(|hit| t_near > hit.distance) {
                continue;
            }

            let Some((t, normal)) = object.shape.intersect(ray) else {
                continue;
            };
            if nearest.is_none_or(|hit| t < hit.distance) {
                nearest = Some(RayHit {
                    point: ray.at(t),
                    normal,
                    distance: t,
                    object: id,
                    tag: object.tag,
                });
            }
        }

        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn wall_at_z(z: f32) -> Shape {
        Shape::Quad([
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(1.0, 1.0, z),
            Vec3::new(-1.0, 1.0, z),
        ])
    }

    #[test]
    fn test_nearest_hit_wins() {
        let mut scene = Scene::new();
        let far = scene.add(wall_at_z(-10.0), None);
        let near = scene.add(wall_at_z(-4.0), Some(ColorRgb::new(1.0, 0.0, 0.0)));

        let ray = Ray::new(Vec3::new(0.2, 0.3, 0.0), Vec3::NEG_Z);
        let hit = scene.intersect(&ray, &[far, near]).unwrap();
        assert_eq!(hit.object, near);
        assert!((hit.distance - 4.0).abs() < 1e-5);
        assert_eq!(hit.tag, Some(ColorRgb::new(1.0, 0.0, 0.0)));

        // Order of candidates is irrelevant
        let hit = scene.intersect(&ray, &[near, far]).unwrap();
        assert_eq!(hit.object, near);
    }

    #[test]
    fn test_candidates_restrict_query() {
        let mut scene = Scene::new();
        let far = scene.add(wall_at_z(-10.0), None);
        let _near = scene.add(wall_at_z(-4.0), None);

        let ray = Ray::new(Vec3::new(0.2, 0.3, 0.0), Vec3::NEG_Z);
        let hit = scene.intersect(&ray, &[far]).unwrap();
        assert_eq!(hit.object, far);
    }

    #[test]
    fn test_empty_candidates_and_misses() {
        let mut scene = Scene::new();
        let id = scene.add(wall_at_z(-4.0), None);

        let ray = Ray::new(Vec3::new(0.2, 0.3, 0.0), Vec3::NEG_Z);
        assert!(scene.intersect(&ray, &[]).is_none());

        let away = Ray::new(Vec3::new(0.2, 0.3, 0.0), Vec3::Z);
        assert!(scene.intersect(&away, &[id]).is_none());

        assert!(scene.intersect(&ray, &[ObjectId(99)]).is_none());
    }

    #[test]
    fn test_field_scene() {
        let mut rng = SmallRng::seed_from_u64(3);
        let config = FieldConfig::default();
        let scene = Scene::field(&config, &mut rng);
        assert_eq!(scene.len(), config.object_count + 1);
        assert!(scene.get(ObjectId(0)).unwrap().tag.is_none());
        assert!(scene.ids().iter().skip(1).all(|&id| scene.get(id).unwrap().tag.is_some()));

        // Looking straight down near the origin always reaches the floor or a box
        let down = Ray::new(Vec3::new(0.25, 0.0, 0.6), Vec3::NEG_Y);
        assert!(scene.intersect(&down, &scene.ids()).is_some());
    }
}
