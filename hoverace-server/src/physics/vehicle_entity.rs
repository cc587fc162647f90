use glam::DVec3;
use hoverace_core::entity_location::{EntityLocation, VehicleMotion};
use hoverace_core::vehicle::{driver_inputs::DriverInputs, VehicleId};

use crate::physics::bounding_box::BoundingBox;
use crate::physics::constants::{
    BRAKING_VELOCITY_FACTOR, COASTING_VELOCITY_FACTOR, DRAG, DRIVE_FORCE, SHIP_SIZE,
    TERMINAL_VELOCITY,
};

// A hover ship on flat ground. Good enough to run a race headless; the
// simulation only ever sees it through motion() and its bounding box.
#[derive(Clone, Debug)]
pub struct VehicleEntity {
    pub id: VehicleId,
    pub velocity: DVec3,
    pub yaw_rate: f64, // radians per second, positive turns right

    pub size: DVec3,
    pub bounding_box: BoundingBox,

    pub driver_inputs: DriverInputs,
    pub entity_location: EntityLocation,
}

impl VehicleEntity {
    pub fn new(id: VehicleId, start: EntityLocation) -> VehicleEntity {
        let mut vehicle = VehicleEntity {
            id,
            velocity: DVec3::ZERO,
            yaw_rate: 0.0,
            size: DVec3::from(SHIP_SIZE),
            bounding_box: BoundingBox::around(start.position, DVec3::from(SHIP_SIZE)),
            driver_inputs: DriverInputs::NEUTRAL,
            entity_location: start,
        };
        vehicle.update_bounding_box();
        vehicle
    }

    // how much of the velocity is along the nose; negative when reversing
    pub fn speed(&self) -> f64 {
        self.velocity.dot(self.entity_location.forward())
    }

    pub fn motion(&self) -> VehicleMotion {
        VehicleMotion {
            location: self.entity_location,
            velocity: self.velocity,
            angular_velocity: DVec3::new(0.0, self.yaw_rate, 0.0),
            speed: self.speed(),
            terminal_velocity: TERMINAL_VELOCITY,
        }
    }

    pub fn update_bounding_box(&mut self) {
        self.bounding_box.set_dimensions(
            &self.entity_location.position,
            &self.size,
            &self.entity_location.unit_steer_direction,
        );
    }

    pub fn is_touching(&self, other: &VehicleEntity) -> bool {
        self.id != other.id && self.bounding_box.is_colliding(&other.bounding_box)
    }

    /* Given the current inputs, compute and return what next tick's
     * vehicle will look like */
    pub fn do_physics_step(&self, time_step: f64) -> VehicleEntity {
        let inputs = self.driver_inputs;
        let forward = self.entity_location.forward();
        let right = self.entity_location.right();
        let speed = self.speed();

        // the yaw torque cancels the current spin and applies the rudder, so
        // the new yaw rate is just the rudder
        let yaw_rate = inputs.rudder;

        // full sideways friction: ships never drift
        let mut velocity = self.velocity - right * self.velocity.dot(right);

        if inputs.thruster <= 0.0 {
            velocity *= COASTING_VELOCITY_FACTOR;
        }
        if inputs.is_braking {
            velocity *= BRAKING_VELOCITY_FACTOR;
        }

        let propulsion = DRIVE_FORCE * inputs.thruster - DRAG * speed.clamp(0.0, TERMINAL_VELOCITY);
        velocity += forward * propulsion * time_step;

        let yaw = yaw_rate * time_step;
        let steer_direction = (forward * yaw.cos() + right * yaw.sin()).normalize_or_zero();

        let mut next = VehicleEntity {
            id: self.id,
            velocity,
            yaw_rate,
            size: self.size,
            bounding_box: self.bounding_box,
            driver_inputs: inputs,
            entity_location: EntityLocation {
                position: self.entity_location.position + velocity * time_step,
                unit_steer_direction: steer_direction,
                unit_upward_direction: self.entity_location.unit_upward_direction,
            },
        };
        next.update_bounding_box();
        next
    }
}
