//! Nearest-hit ray queries against collidable geometry

use crate::core::types::{ColorRgb, Vec3};
use crate::math::Ray;

use super::collider::ObjectId;

/// Nearest intersection along a ray
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    /// Unit surface normal, facing the ray origin
    pub normal: Vec3,
    pub distance: f32,
    pub object: ObjectId,
    /// Point colour tag of the hit object
    pub tag: Option<ColorRgb>,
}

/// Ray casting service used by the scanner and the movement controller.
///
/// Implementations must return the globally nearest hit among `candidates`
/// and must return `None` for an empty candidate set.
pub trait SpatialQuery {
    fn intersect(&self, ray: &Ray, candidates: &[ObjectId]) -> Option<RayHit>;
}
