//! Debug-fly movement: no gravity, no collision

use crate::core::types::{Quat, Vec3};

/// Displacement for one tick of free flight.
///
/// Movement follows the full camera orientation, so looking up and pressing
/// forward climbs. The held translation is normalized before scaling.
pub fn fly_step(rotation: Quat, translation: Vec3, speed: f32, dt: f32) -> Vec3 {
    let velocity = rotation * translation;
    if velocity.length_squared() > 0.0 {
        velocity.normalize() * speed * dt
    } else {
        Vec3::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_follows_pitch() {
        let rotation = Quat::from_euler(glam::EulerRot::YXZ, 0.0, std::f32::consts::FRAC_PI_4, 0.0);
        let step = fly_step(rotation, Vec3::NEG_Z, 10.0, 0.5);
        assert!((step.length() - 5.0).abs() < 1e-5);
        assert!(step.y > 3.0);
    }

    #[test]
    fn test_idle_does_not_move() {
        assert_eq!(fly_step(Quat::IDENTITY, Vec3::ZERO, 10.0, 1.0), Vec3::ZERO);
    }
}
