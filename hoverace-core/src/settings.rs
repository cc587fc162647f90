use config::{Config, ConfigError, File};
use lazy_static::lazy_static;
use serde::Deserialize;

use crate::vehicle::lap_info::LapNumber;

// Everything the race needs at setup time. Simulation types take this by
// value; only the binary's entry point reads GLOBAL_CONFIG.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct RaceConfig {
    pub total_laps: LapNumber,
    // seconds after activation during which every AI is forced to its best tier
    pub grace_period_secs: f64,
    // fraction of the theoretical maximum counter after which the end-game rule applies
    pub endgame_cutoff_fraction: f64,
    pub formation_tolerance: f64,
    pub lead_group_offset: f64,
    pub mid_group_offset: f64,
    pub trail_group_offset: f64,
    pub mirror_group_offset: f64,
    pub waypoint_scale: f64,
    pub lap_scale: f64,
    pub wander_seed: u64,
    pub debug_laps: bool,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            total_laps: 3,
            grace_period_secs: 5.0,
            endgame_cutoff_fraction: 0.8,
            formation_tolerance: 100.0,
            lead_group_offset: 400.0,
            mid_group_offset: 200.0,
            trail_group_offset: -400.0,
            mirror_group_offset: 0.0,
            waypoint_scale: 100.0,
            lap_scale: 1000.0,
            wander_seed: 0,
            debug_laps: false,
        }
    }
}

#[derive(Deserialize)]
pub struct Settings {
    pub server_tick_ms: u64,
    pub ai_vehicle_count: usize,
    pub demo_max_ticks: u64,
    // races run back to back, resetting to the grid in between
    pub demo_races: u32,
    pub race: RaceConfig,
}

impl Settings {
    fn new() -> Result<Settings, ConfigError> {
        let race = RaceConfig::default();
        let config = Config::builder()
            .set_default("server_tick_ms", 20)?
            .set_default("ai_vehicle_count", 4)?
            .set_default("demo_max_ticks", 30_000)?
            .set_default("demo_races", 1)?
            .set_default("race.total_laps", race.total_laps as i64)?
            .set_default("race.grace_period_secs", race.grace_period_secs)?
            .set_default("race.endgame_cutoff_fraction", race.endgame_cutoff_fraction)?
            .set_default("race.formation_tolerance", race.formation_tolerance)?
            .set_default("race.lead_group_offset", race.lead_group_offset)?
            .set_default("race.mid_group_offset", race.mid_group_offset)?
            .set_default("race.trail_group_offset", race.trail_group_offset)?
            .set_default("race.mirror_group_offset", race.mirror_group_offset)?
            .set_default("race.waypoint_scale", race.waypoint_scale)?
            .set_default("race.lap_scale", race.lap_scale)?
            .set_default("race.wander_seed", race.wander_seed as i64)?
            .set_default("race.debug_laps", race.debug_laps)?
            .add_source(File::with_name("config.yaml").required(false))
            .build()?;

        config.try_deserialize()
    }
}

lazy_static! {
    pub static ref GLOBAL_CONFIG: Settings = Settings::new().expect("failed to read config file");
}
