// Checkpoint triggers only know the name of whatever sensor touched them, so
// identities are recovered from object names. Vehicle sensors are named with
// underscore-separated tokens ("AI_2_Sensor"), waypoints with spaces
// ("Waypoint 7").

use crate::vehicle::{lap_info::WaypointIndex, VehicleId};

pub fn parse_vehicle_id(name: &str) -> Option<VehicleId> {
    name.split('_').find_map(|token| token.parse::<VehicleId>().ok())
}

// the last integer token wins
pub fn parse_waypoint_index(name: &str) -> Option<WaypointIndex> {
    name.split(' ')
        .filter_map(|token| token.parse::<WaypointIndex>().ok())
        .last()
}

pub fn vehicle_sensor_name(id: VehicleId) -> String {
    format!("AI_{}_Sensor", id)
}

pub fn waypoint_name(index: WaypointIndex) -> String {
    format!("Waypoint {}", index)
}
