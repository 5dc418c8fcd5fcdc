//! Collidable scene geometry and the ray query service.
//!
//! The scanner and the walk controller only see geometry through
//! [`SpatialQuery`]; [`Scene`] is the in-process implementation that owns
//! maze walls, the floor and any free-standing obstacles.

pub mod collider;
pub mod query;
pub mod world;

pub use collider::{ObjectId, SceneObject, Shape};
pub use query::{RayHit, SpatialQuery};
pub use world::Scene;
