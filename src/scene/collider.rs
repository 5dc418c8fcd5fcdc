//! Collidable scene objects

use crate::core::types::{ColorRgb, Vec3};
use crate::math::{Aabb, Ray};

/// Stable handle of an object inside a [`Scene`](super::Scene)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// Intersectable geometry
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Planar quad, corners in winding order. Hit from either side.
    Quad([Vec3; 4]),
    /// Solid axis-aligned box
    Box(Aabb),
}

impl Shape {
    /// Bounding box used for broadphase rejection
    pub fn bounds(&self) -> Aabb {
        match self {
            Shape::Quad(corners) => Aabb::from_points(corners),
            Shape::Box(aabb) => *aabb,
        }
    }

    /// Narrowphase test. Returns ray parameter and unit surface normal facing the ray origin.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, Vec3)> {
        match self {
            Shape::Quad(corners) => {
                let t = ray.intersects_quad(corners)?;
                let [a, b, _, d] = *corners;
                let normal = (b - a).cross(d - a).normalize_or_zero();
                let normal = if normal.dot(ray.direction) > 0.0 { -normal } else { normal };
                Some((t, normal))
            }
            Shape::Box(aabb) => {
                let (t_near, t_far) = ray.intersects_aabb(aabb)?;
                // Origin inside the box: report the exit face
                let t = if aabb.contains_point(ray.origin) { t_far } else { t_near };
                Some((t, aabb.face_normal(ray.at(t))))
            }
        }
    }
}

/// A shape plus the point colour deposited when the scanner hits it
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub shape: Shape,
    /// Point colour tag; `None` scans as white
    pub tag: Option<ColorRgb>,
    /// Cached broadphase bounds, padded so flat quads still have volume
    pub bounds: Aabb,
}

impl SceneObject {
    pub fn new(shape: Shape, tag: Option<ColorRgb>) -> Self {
        let bounds = shape.bounds().padded(1e-3);
        Self { shape, tag, bounds }
    }
}
