use crate::race::Contact;

use self::vehicle_entity::VehicleEntity;

pub mod bounding_box;
pub mod constants;
pub mod trigger_entity;
pub mod vehicle_entity;


// Every vehicle touching another one this tick, once per side of each pair.
// Ships pass through each other; the contact is only reported.
pub fn find_contacts(vehicles: &[VehicleEntity]) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for vehicle in vehicles {
        for other in vehicles.iter().filter(|other| vehicle.is_touching(other)) {
            contacts.push(Contact {
                vehicle: vehicle.id,
                other_position: other.entity_location.position,
            });
        }
    }
    contacts
}

pub fn step_all(vehicles: &mut [VehicleEntity], time_step: f64) {
    for vehicle in vehicles.iter_mut() {
        *vehicle = vehicle.do_physics_step(time_step);
    }
}
