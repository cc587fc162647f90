use serde::{Deserialize, Serialize};

// DriverInputs is what a controller (human or AI) hands to the physics
// integrator each tick
#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct DriverInputs {
    pub thruster: f64, // [-1, 1]
    pub rudder: f64,   // [-1, 1]
    pub is_braking: bool,
}

impl DriverInputs {
    pub const NEUTRAL: DriverInputs = DriverInputs {
        thruster: 0.0,
        rudder: 0.0,
        is_braking: false,
    };

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

impl Default for DriverInputs {
    fn default() -> Self {
        Self::NEUTRAL
    }
}
