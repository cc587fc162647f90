use glam::DVec3;
use serde::{Deserialize, Serialize};

// EntityLocation is where a vehicle (or a steering target) sits in the world
// and which way it faces. Local space follows the ship convention: x is
// right, y is up, z is forward.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityLocation {
    pub position: DVec3,
    pub unit_steer_direction: DVec3,  // should be a normalized vector
    pub unit_upward_direction: DVec3, // should be a normalized vector
}

impl EntityLocation {
    pub fn new(position: DVec3, unit_steer_direction: DVec3) -> Self {
        Self {
            position,
            unit_steer_direction: unit_steer_direction.normalize_or_zero(),
            unit_upward_direction: DVec3::Y,
        }
    }

    pub fn forward(&self) -> DVec3 {
        self.unit_steer_direction
    }

    pub fn right(&self) -> DVec3 {
        self.unit_upward_direction
            .cross(self.unit_steer_direction)
            .normalize_or_zero()
    }

    // Express a world-space point in this entity's local frame
    pub fn inverse_transform_point(&self, point: DVec3) -> DVec3 {
        let delta = point - self.position;
        DVec3::new(
            delta.dot(self.right()),
            delta.dot(self.unit_upward_direction),
            delta.dot(self.unit_steer_direction),
        )
    }
}

// Per-tick snapshot of a vehicle's physical state, produced by whatever is
// integrating the vehicle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VehicleMotion {
    pub location: EntityLocation,
    pub velocity: DVec3,
    pub angular_velocity: DVec3, // radians per second
    // velocity projected onto the forward axis; negative when reversing
    pub speed: f64,
    pub terminal_velocity: f64,
}

impl VehicleMotion {
    pub fn at_rest(location: EntityLocation, terminal_velocity: f64) -> Self {
        Self {
            location,
            velocity: DVec3::ZERO,
            angular_velocity: DVec3::ZERO,
            speed: 0.0,
            terminal_velocity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_is_positive_x_when_facing_positive_z() {
        let location = EntityLocation::new(DVec3::ZERO, DVec3::Z);
        assert!(location.right().abs_diff_eq(DVec3::X, 1e-9));
    }

    #[test]
    fn local_point_accounts_for_heading() {
        // facing +x, so world +z is to the left
        let location = EntityLocation::new(DVec3::new(10.0, 0.0, 0.0), DVec3::X);
        let local = location.inverse_transform_point(DVec3::new(10.0, 0.0, 5.0));
        assert!(local.abs_diff_eq(DVec3::new(-5.0, 0.0, 0.0), 1e-9));

        let ahead = location.inverse_transform_point(DVec3::new(13.0, 0.0, 0.0));
        assert!(ahead.abs_diff_eq(DVec3::new(0.0, 0.0, 3.0), 1e-9));
    }
}
