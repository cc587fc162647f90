use hoverace_core::vehicle::VehicleId;

use crate::checkpoints::{CheckpointEvent, CheckpointGate, Sensor};
use crate::physics::bounding_box::BoundingBox;

pub trait TriggerEntity {
    fn get_bounding_box(&self) -> BoundingBox;
    fn trigger(&self, gate: &mut CheckpointGate, sensor: &Sensor) -> Option<CheckpointEvent>;
}

// Which vehicles are currently inside which trigger. Triggers only fire on
// entry, so a vehicle parked inside one does not fire every tick.
#[derive(Default)]
pub struct TriggerOccupancy {
    inside: Vec<(usize, VehicleId)>,
}

impl TriggerOccupancy {
    // Returns true when this is a fresh entry
    pub fn update(&mut self, trigger: usize, vehicle: VehicleId, overlapping: bool) -> bool {
        let key = (trigger, vehicle);
        let was_inside = self.inside.contains(&key);
        if overlapping && !was_inside {
            self.inside.push(key);
            true
        } else {
            if !overlapping && was_inside {
                self.inside.retain(|entry| *entry != key);
            }
            false
        }
    }

    pub fn clear(&mut self) {
        self.inside.clear();
    }
}
