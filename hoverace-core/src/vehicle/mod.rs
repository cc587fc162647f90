pub mod behavior;
pub mod driver_inputs;
pub mod lap_info;
pub mod skill;

pub type VehicleId = usize;

// AI vehicles are numbered 0..K-1; the human player gets a reserved id well
// outside that range.
pub const PLAYER_ID: VehicleId = 999;

pub fn is_player(id: VehicleId) -> bool {
    id == PLAYER_ID
}
