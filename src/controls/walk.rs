//! Collision-aware walking: wall sliding and snap-to-ground

use crate::core::config::MovementConfig;
use crate::core::types::Vec3;
use crate::math::Ray;
use crate::scene::{ObjectId, SpatialQuery};

/// Remove the component of `move_vector` along `normal` (tangent-plane projection)
pub fn slide_along(move_vector: Vec3, normal: Vec3) -> Vec3 {
    move_vector - normal * move_vector.dot(normal)
}

/// Probe along the move vector and slide off any wall closer than the probe distance.
///
/// Runs at most `config.wall_passes` times so that two walls meeting at a
/// corner are both resolved. A zero move vector has nothing to probe.
pub fn resolve_walls(
    query: &impl SpatialQuery,
    candidates: &[ObjectId],
    position: Vec3,
    mut move_vector: Vec3,
    config: &MovementConfig,
) -> Vec3 {
    for pass in 0..config.wall_passes {
        let Some(direction) = move_vector.try_normalize() else {
            break;
        };
        let Some(hit) = query.intersect(&Ray::new(position, direction), candidates) else {
            break;
        };
        if hit.distance < config.wall_probe_distance {
            log::trace!(
                "wall pass {}: hit {:?} at {:.3}, normal {:?}",
                pass, hit.object, hit.distance, hit.normal
            );
            move_vector = slide_along(move_vector, hit.normal);
        }
    }
    move_vector
}

/// Vertical displacement for this tick.
///
/// Free fall is `gravity * delta * speed`; when the ground is within reach of
/// that fall the player is snapped to rest exactly `eye_height` above it.
pub fn ground_step(
    query: &impl SpatialQuery,
    candidates: &[ObjectId],
    position: Vec3,
    move_scale: f32,
    config: &MovementConfig,
) -> f32 {
    let gravity = config.gravity * move_scale;

    match query.intersect(&Ray::new(position, Vec3::NEG_Y), candidates) {
        Some(hit) if hit.distance <= config.eye_height + gravity.abs() => {
            config.eye_height - hit.distance
        }
        Some(_) => gravity,
        None => {
            log::trace!("no ground below {:?}, free fall", position);
            gravity
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Scene, Shape};

    fn floor(scene: &mut Scene, y: f32) -> ObjectId {
        scene.add(
            Shape::Quad([
                Vec3::new(-50.0, y, -50.0),
                Vec3::new(50.0, y, -50.0),
                Vec3::new(50.0, y, 50.0),
                Vec3::new(-50.0, y, 50.0),
            ]),
            None,
        )
    }

    /// Wall in the plane x = `x`, facing -X
    fn wall_x(scene: &mut Scene, x: f32) -> ObjectId {
        scene.add(
            Shape::Quad([
                Vec3::new(x, 0.0, -50.0),
                Vec3::new(x, 0.0, 50.0),
                Vec3::new(x, 10.0, 50.0),
                Vec3::new(x, 10.0, -50.0),
            ]),
            None,
        )
    }

    /// Wall in the plane z = `z`
    fn wall_z(scene: &mut Scene, z: f32) -> ObjectId {
        scene.add(
            Shape::Quad([
                Vec3::new(-50.0, 0.0, z),
                Vec3::new(50.0, 0.0, z),
                Vec3::new(50.0, 10.0, z),
                Vec3::new(-50.0, 10.0, z),
            ]),
            None,
        )
    }

    #[test]
    fn test_slide_along_removes_normal_component() {
        let n = Vec3::new(-1.0, 0.0, 0.0);
        let v = Vec3::new(1.0, 0.0, -1.0).normalize();
        let slid = slide_along(v, n);
        assert!(slid.dot(n).abs() < 1e-6);
        assert!((slid.z - v.z).abs() < 1e-6);
    }

    #[test]
    fn test_wall_sliding_near_wall() {
        let mut scene = Scene::new();
        let wall = wall_x(&mut scene, 0.3);
        let config = MovementConfig::default();

        let v = Vec3::new(1.0, 0.0, -1.0).normalize();
        let corrected = resolve_walls(&scene, &[wall], Vec3::new(0.0, 1.0, 0.0), v, &config);

        assert!(corrected.dot(Vec3::X).abs() < 1e-5);
        // Tangential component keeps its direction and magnitude
        assert!((corrected.z - v.z).abs() < 1e-5);
        assert!(corrected.z < 0.0);
    }

    #[test]
    fn test_far_wall_leaves_vector_alone() {
        let mut scene = Scene::new();
        let wall = wall_x(&mut scene, 5.0);
        let config = MovementConfig::default();

        let v = Vec3::new(1.0, 0.0, -1.0).normalize();
        let corrected = resolve_walls(&scene, &[wall], Vec3::new(0.0, 1.0, 0.0), v, &config);
        assert_eq!(corrected, v);
    }

    #[test]
    fn test_corner_resolves_both_walls() {
        let mut scene = Scene::new();
        let a = wall_x(&mut scene, 0.3);
        let b = wall_z(&mut scene, -0.3);
        let config = MovementConfig::default();

        let v = Vec3::new(1.0, 0.0, -1.0).normalize();
        let corrected = resolve_walls(&scene, &[a, b], Vec3::new(0.0, 1.0, 0.0), v, &config);
        assert!(corrected.length() < 1e-5);
    }

    #[test]
    fn test_zero_move_vector_skips_probe() {
        let mut scene = Scene::new();
        let wall = wall_x(&mut scene, 0.1);
        let config = MovementConfig::default();
        let corrected = resolve_walls(&scene, &[wall], Vec3::ZERO, Vec3::ZERO, &config);
        assert_eq!(corrected, Vec3::ZERO);
    }

    #[test]
    fn test_ground_snap_at_rest_height() {
        let mut scene = Scene::new();
        let ground = floor(&mut scene, 0.0);
        let config = MovementConfig::default();
        let move_scale = config.movement_speed / 60.0;

        let dy = ground_step(&scene, &[ground], Vec3::new(0.3, 1.0, 0.7), move_scale, &config);
        assert!(dy.abs() < 1e-5);
    }

    #[test]
    fn test_ground_snap_lands_exactly() {
        let mut scene = Scene::new();
        let ground = floor(&mut scene, 0.0);
        let config = MovementConfig::default();
        let move_scale = config.movement_speed / 60.0;

        // Within one fall step of rest height: snap up/down to it
        let dy = ground_step(&scene, &[ground], Vec3::new(0.3, 1.1, 0.7), move_scale, &config);
        assert!((dy - (-0.1)).abs() < 1e-5);

        // Slightly sunk: pushed back up
        let dy = ground_step(&scene, &[ground], Vec3::new(0.3, 0.8, 0.7), move_scale, &config);
        assert!((dy - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_free_fall_far_above_ground_or_without_ground() {
        let mut scene = Scene::new();
        let ground = floor(&mut scene, 0.0);
        let config = MovementConfig::default();
        let move_scale = config.movement_speed / 60.0;
        let expected = config.gravity * move_scale;

        let dy = ground_step(&scene, &[ground], Vec3::new(0.3, 20.0, 0.7), move_scale, &config);
        assert!((dy - expected).abs() < 1e-6);

        let dy = ground_step(&scene, &[], Vec3::new(0.3, 1.0, 0.7), move_scale, &config);
        assert!((dy - expected).abs() < 1e-6);
    }
}
