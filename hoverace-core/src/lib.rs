pub mod entity_location;
pub mod hud;
pub mod naming;
pub mod vehicle;
mod settings;

pub use settings::{RaceConfig, Settings, GLOBAL_CONFIG};
