use glam::DVec3;
use hoverace_core::entity_location::{EntityLocation, VehicleMotion};
use hoverace_core::hud::{format_race_time, HudEvent};
use hoverace_core::naming::{vehicle_sensor_name, waypoint_name};
use hoverace_core::vehicle::{behavior::BehaviorGroup, is_player, skill::SkillTier};
use hoverace_core::Settings;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use crate::checkpoints::{Checkpoint, CheckpointKind, Sensor};
use crate::circuit::Circuit;
use crate::driving::DrivingController;
use crate::error::SetupError;
use crate::physics::bounding_box::BoundingBox;
use crate::physics::trigger_entity::{TriggerEntity, TriggerOccupancy};
use crate::physics::vehicle_entity::VehicleEntity;
use crate::physics::{find_contacts, step_all};
use crate::progress::Entrant;
use crate::race::{Race, RacePhase};

const AI_NAMES: [&str; 8] = [
    "Vega", "Rigel", "Deneb", "Altair", "Sirius", "Mira", "Castor", "Pollux",
];

const WAYPOINT_VOLUME: [f64; 3] = [60.0, 20.0, 60.0];
const FINISH_LINE_VOLUME: [f64; 3] = [60.0, 20.0, 10.0];

// A rectangle with its corners cut off, driven clockwise from the origin
fn demo_circuit() -> Result<Circuit, SetupError> {
    Circuit::new(vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(0.0, 0.0, 300.0),
        DVec3::new(100.0, 0.0, 400.0),
        DVec3::new(400.0, 0.0, 400.0),
        DVec3::new(500.0, 0.0, 300.0),
        DVec3::new(500.0, 0.0, 0.0),
        DVec3::new(400.0, 0.0, -100.0),
        DVec3::new(100.0, 0.0, -100.0),
    ])
}

fn place_checkpoints(circuit: &Circuit) -> Vec<Checkpoint> {
    let waypoint_volume = DVec3::from(WAYPOINT_VOLUME);
    let mut checkpoints: Vec<Checkpoint> = circuit
        .waypoints()
        .iter()
        .enumerate()
        .filter_map(|(index, position)| {
            Checkpoint::waypoint_named(
                &waypoint_name(index),
                BoundingBox::around(*position, waypoint_volume),
            )
        })
        .collect();

    // lap checker on the far side, finish line across the first waypoint
    checkpoints.push(Checkpoint::new(
        CheckpointKind::LapChecker,
        BoundingBox::around(circuit.waypoint(circuit.len() / 2), waypoint_volume),
    ));
    checkpoints.push(Checkpoint::new(
        CheckpointKind::FinishLine,
        BoundingBox::around(circuit.waypoint(0), DVec3::from(FINISH_LINE_VOLUME)),
    ));
    checkpoints
}

// Two lanes behind the finish line; the player starts at the back
fn grid(ai_count: usize) -> Vec<Entrant> {
    let slot = |index: usize| {
        let row = (index / 2) as f64;
        let lane = if index % 2 == 0 { -6.0 } else { 6.0 };
        EntityLocation::new(DVec3::new(lane, 0.0, -40.0 - 12.0 * row), DVec3::Z)
    };

    let mut roster = vec![Entrant::player("You", slot(ai_count))];
    roster.extend((0..ai_count).map(|id| {
        Entrant::ai(
            id,
            AI_NAMES[id % AI_NAMES.len()],
            BehaviorGroup::AI_GROUPS[id % BehaviorGroup::AI_GROUPS.len()],
            slot(id),
        )
    }));
    roster
}

// Headless race: the flat-ground integrator stands in for the game engine and
// the player slot runs on autopilot.
pub struct DemoRace {
    race: Race,
    // same order as the roster: player first, then AI id order
    vehicles: Vec<VehicleEntity>,
    grid: Vec<EntityLocation>,
    sensors: Vec<Sensor>,
    checkpoints: Vec<Checkpoint>,
    occupancy: TriggerOccupancy,
    time_step: f64,
}

impl DemoRace {
    pub fn new(settings: &Settings) -> Result<DemoRace, SetupError> {
        let mut rng = StdRng::seed_from_u64(settings.race.wander_seed);
        let circuit = demo_circuit()?;
        let checkpoints = place_checkpoints(&circuit);
        let roster = grid(settings.ai_vehicle_count);

        let grid: Vec<EntityLocation> = roster.iter().map(|entrant| entrant.start).collect();
        let vehicles = roster
            .iter()
            .map(|entrant| VehicleEntity::new(entrant.id, entrant.start))
            .collect();
        let sensors = roster
            .iter()
            .map(|entrant| {
                if is_player(entrant.id) {
                    Sensor::player()
                } else {
                    Sensor::ai(&vehicle_sensor_name(entrant.id))
                }
            })
            .collect();

        let mut race = Race::prepare(&settings.race, circuit, roster, &mut rng)?;
        let mut autopilot = DrivingController::autopilot(rng.gen_range(0.0..100.0));
        autopilot.set_skill(SkillTier::Mid);
        race.set_player_autopilot(autopilot);

        Ok(DemoRace {
            race,
            vehicles,
            grid,
            sensors,
            checkpoints,
            occupancy: TriggerOccupancy::default(),
            time_step: settings.server_tick_ms as f64 / 1000.0,
        })
    }

    pub fn run_series(&mut self, races: u32, max_ticks: u64) {
        for number in 1..=races {
            if number > 1 {
                self.restart();
            }
            info!(race = number, of = races, "lights out");
            self.run(max_ticks);
        }
    }

    pub fn run(&mut self, max_ticks: u64) {
        self.race.activate();

        for tick in 0..max_ticks {
            self.step();
            if self.race.phase() == RacePhase::Finished {
                info!(tick, "chequered flag");
                break;
            }
        }
        if self.race.phase() != RacePhase::Finished {
            warn!(max_ticks, "ran out of ticks before the player finished");
        }

        self.log_standings();
    }

    // Everyone back on the grid at rest, nobody inside a trigger volume
    fn restart(&mut self) {
        self.race.reset();
        self.occupancy.clear();
        for (vehicle, start) in self.vehicles.iter_mut().zip(&self.grid) {
            *vehicle = VehicleEntity::new(vehicle.id, *start);
        }
    }

    fn step(&mut self) {
        self.detect_crossings();
        let contacts = find_contacts(&self.vehicles);

        let player = self.vehicles[0].motion();
        let ai: Vec<VehicleMotion> = self.vehicles[1..]
            .iter()
            .map(VehicleEntity::motion)
            .collect();
        let outputs = self.race.tick(self.time_step, &player, &ai, &contacts);

        for vehicle in self.vehicles.iter_mut() {
            vehicle.driver_inputs = outputs.for_vehicle(vehicle.id);
        }
        step_all(&mut self.vehicles, self.time_step);

        for event in self.race.drain_hud() {
            log_hud_event(&event);
        }
    }

    fn detect_crossings(&mut self) {
        for (index, checkpoint) in self.checkpoints.iter().enumerate() {
            let bounds = checkpoint.get_bounding_box();
            for (vehicle, sensor) in self.vehicles.iter().zip(&self.sensors) {
                let overlapping = vehicle.bounding_box.is_colliding(&bounds);
                if self.occupancy.update(index, vehicle.id, overlapping) {
                    self.race.sensor_entered(checkpoint, sensor);
                }
            }
        }
    }

    fn log_standings(&self) {
        let tracker = self.race.tracker();
        for (place, id) in tracker.ranking().iter().enumerate() {
            if let Some(vehicle) = tracker.get(*id) {
                info!(
                    place = place + 1,
                    name = vehicle.display_name(),
                    group = vehicle.behavior_group().as_str(),
                    laps = vehicle.laps_completed(),
                    counter = vehicle.ranking_counter(),
                    "standings"
                );
            }
        }
        info!(
            time = %format_race_time(self.race.total_time()),
            phase = self.race.phase().as_str(),
            ai_finishers = ?self.race.ai_finishers(),
            "player result"
        );
    }
}

// per-tick readouts go to trace so debug stays readable
fn log_hud_event(event: &HudEvent) {
    let line = match serde_json::to_string(event) {
        Ok(line) => line,
        Err(err) => {
            warn!(%err, "could not encode HUD event");
            return;
        }
    };
    match event {
        HudEvent::Speed { .. } | HudEvent::PlayerRank { .. } | HudEvent::RankingSlot { .. } => {
            trace!(hud = %line)
        }
        _ => debug!(hud = %line),
    }
}

#[cfg(test)]
mod tests {
    use hoverace_core::RaceConfig;

    use super::*;

    fn settings() -> Settings {
        Settings {
            server_tick_ms: 20,
            ai_vehicle_count: 3,
            demo_max_ticks: 100,
            demo_races: 2,
            race: RaceConfig::default(),
        }
    }

    #[test]
    fn restart_puts_everyone_back_on_the_grid() {
        let mut demo = DemoRace::new(&settings()).unwrap();
        demo.run(100);
        assert!(demo.race.elapsed_secs() > 0.0);
        assert!(demo
            .vehicles
            .iter()
            .zip(&demo.grid)
            .any(|(vehicle, start)| vehicle.entity_location.position != start.position));

        demo.restart();
        assert_eq!(demo.race.phase(), RacePhase::NotStarted);
        assert_eq!(demo.race.elapsed_secs(), 0.0);
        assert!(demo
            .vehicles
            .iter()
            .zip(&demo.grid)
            .all(|(vehicle, start)| vehicle.entity_location.position == start.position
                && vehicle.velocity == DVec3::ZERO));

        assert!(demo.race.activate());
    }
}
