// force the engine generates at full thrust
pub const DRIVE_FORCE: f64 = 17.0;
pub const TERMINAL_VELOCITY: f64 = 100.0;
// forward drag balances full thrust exactly at terminal velocity
pub const DRAG: f64 = DRIVE_FORCE / TERMINAL_VELOCITY;

// fraction of velocity kept per tick
pub const COASTING_VELOCITY_FACTOR: f64 = 0.99;
pub const BRAKING_VELOCITY_FACTOR: f64 = 0.95;

// ships are longer than they are wide; y is only used for trigger overlap
pub const SHIP_SIZE: [f64; 3] = [4.0, 2.0, 8.0];
