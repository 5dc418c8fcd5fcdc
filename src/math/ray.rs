//! Ray type and operations

use crate::core::types::Vec3;
use super::aabb::Aabb;

const PARALLEL_EPSILON: f32 = 1e-7;
const EDGE_EPSILON: f32 = 1e-6;

/// A ray defined by origin and direction
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Precomputed 1/direction for fast AABB intersection
    pub inv_direction: Vec3,
}

impl Ray {
    /// Create a new ray (direction should be normalized)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: Vec3::new(
                1.0 / direction.x,
                1.0 / direction.y,
                1.0 / direction.z,
            ),
        }
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray-AABB intersection using slab method
    /// Returns Some((t_near, t_far)) if intersection, None otherwise
    pub fn intersects_aabb(&self, aabb: &Aabb) -> Option<(f32, f32)> {
        let t1 = (aabb.min - self.origin) * self.inv_direction;
        let t2 = (aabb.max - self.origin) * self.inv_direction;

        let t_min = t1.min(t2);
        let t_max = t1.max(t2);

        let t_near = t_min.x.max(t_min.y).max(t_min.z);
        let t_far = t_max.x.min(t_max.y).min(t_max.z);

        if t_near <= t_far && t_far >= 0.0 {
            Some((t_near.max(0.0), t_far))
        } else {
            None
        }
    }

    /// Double-sided intersection with a planar convex quad, corners in winding order.
    ///
    /// Tests the supporting plane, then keeps the hit only if it lies on the
    /// inner side of all four edges. Points on an edge count as inside.
    /// Returns None for misses, hits behind the origin, or rays parallel to the quad.
    pub fn intersects_quad(&self, corners: &[Vec3; 4]) -> Option<f32> {
        let normal = (corners[1] - corners[0]).cross(corners[3] - corners[0]);
        let denom = normal.dot(self.direction);
        if denom.abs() < PARALLEL_EPSILON * normal.length() {
            return None;
        }

        let t = normal.dot(corners[0] - self.origin) / denom;
        if t < 0.0 {
            return None;
        }

        let p = self.at(t);
        let tolerance = -EDGE_EPSILON * normal.length_squared();
        for i in 0..4 {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            if (b - a).cross(p - a).dot(normal) < tolerance {
                return None;
            }
        }
        Some(t)
    }
}
