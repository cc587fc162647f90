use std::cmp::Ordering;

use glam::DVec3;
use hoverace_core::entity_location::EntityLocation;
use hoverace_core::vehicle::{
    behavior::BehaviorGroup,
    is_player,
    lap_info::{LapInformation, LapNumber, Placement, WaypointIndex},
    VehicleId, PLAYER_ID,
};
use hoverace_core::RaceConfig;
use tracing::{debug, warn};

use crate::circuit::Circuit;
use crate::error::SetupError;

// Who is racing and where they line up
#[derive(Clone, Debug)]
pub struct Entrant {
    pub id: VehicleId,
    pub display_name: String,
    pub behavior_group: BehaviorGroup,
    pub start: EntityLocation,
}

impl Entrant {
    pub fn player(display_name: &str, start: EntityLocation) -> Self {
        Self {
            id: PLAYER_ID,
            display_name: display_name.to_string(),
            behavior_group: BehaviorGroup::PlayerGroup,
            start,
        }
    }

    pub fn ai(id: VehicleId, display_name: &str, behavior_group: BehaviorGroup, start: EntityLocation) -> Self {
        Self {
            id,
            display_name: display_name.to_string(),
            behavior_group,
            start,
        }
    }
}

#[derive(Clone, Debug)]
pub struct VehicleProgress {
    id: VehicleId,
    display_name: String,
    behavior_group: BehaviorGroup,
    lap_info: LapInformation,
    position: DVec3,
    ranking_counter: f64,
}

impl VehicleProgress {
    fn new(entrant: &Entrant) -> Self {
        Self {
            id: entrant.id,
            display_name: entrant.display_name.clone(),
            behavior_group: entrant.behavior_group,
            lap_info: LapInformation::new(),
            position: entrant.start.position,
            ranking_counter: 0.0,
        }
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn behavior_group(&self) -> BehaviorGroup {
        self.behavior_group
    }

    pub fn laps_completed(&self) -> LapNumber {
        self.lap_info.lap
    }

    pub fn current_waypoint(&self) -> WaypointIndex {
        self.lap_info.waypoint
    }

    pub fn lap_ready(&self) -> bool {
        self.lap_info.lap_ready
    }

    pub fn ranking_counter(&self) -> f64 {
        self.ranking_counter
    }

    pub fn is_player(&self) -> bool {
        is_player(self.id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterScales {
    pub waypoint_scale: f64,
    pub lap_scale: f64,
}

impl From<&RaceConfig> for CounterScales {
    fn from(config: &RaceConfig) -> Self {
        Self {
            waypoint_scale: config.waypoint_scale,
            lap_scale: config.lap_scale,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LapOutcome {
    Ignored,
    Counted { laps_completed: LapNumber },
}

// Sole owner of every VehicleProgress. Everything else reads through the
// accessors or goes through the event methods below.
pub struct ProgressTracker {
    circuit: Circuit,
    scales: CounterScales,
    // player first, then AI vehicles in id order
    vehicles: Vec<VehicleProgress>,
    ranking: Vec<VehicleId>,
}

impl ProgressTracker {
    pub fn new(circuit: Circuit, scales: CounterScales, roster: &[Entrant]) -> Result<ProgressTracker, SetupError> {
        validate_roster(roster)?;

        let mut vehicles: Vec<VehicleProgress> = Vec::with_capacity(roster.len());
        if let Some(player) = roster.iter().find(|entrant| is_player(entrant.id)) {
            vehicles.push(VehicleProgress::new(player));
        }
        vehicles.extend(
            roster
                .iter()
                .filter(|entrant| !is_player(entrant.id))
                .map(VehicleProgress::new),
        );

        let ranking = vehicles.iter().map(|vehicle| vehicle.id).collect();
        Ok(ProgressTracker {
            circuit,
            scales,
            vehicles,
            ranking,
        })
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    // Counter value covered by one full lap's worth of waypoints
    pub fn one_lap_value(&self) -> f64 {
        self.circuit.len() as f64 * self.scales.waypoint_scale
    }

    pub fn counter_for(&self, lap_info: &LapInformation, position: DVec3) -> f64 {
        let laps = lap_info.lap as f64;
        let fraction = self
            .circuit
            .fraction_of_segment_covered(position, lap_info.waypoint);

        // the trailing term keeps early lap L+1 above late lap L no matter
        // how many waypoints the circuit has
        laps * self.scales.lap_scale
            + lap_info.waypoint as f64 * self.scales.waypoint_scale
            + fraction
            + self.one_lap_value() * laps
    }

    fn index_of(&self, id: VehicleId) -> Option<usize> {
        let index = if is_player(id) { 0 } else { id.checked_add(1)? };
        match self.vehicles.get(index) {
            Some(vehicle) if vehicle.id == id => Some(index),
            _ => None,
        }
    }

    fn get_mut(&mut self, id: VehicleId) -> Option<&mut VehicleProgress> {
        match self.index_of(id) {
            Some(index) => Some(&mut self.vehicles[index]),
            None => {
                warn!(vehicle = id, "dropping event for unknown vehicle");
                None
            }
        }
    }

    pub fn get(&self, id: VehicleId) -> Option<&VehicleProgress> {
        self.index_of(id).map(|index| &self.vehicles[index])
    }

    pub fn player(&self) -> &VehicleProgress {
        &self.vehicles[0]
    }

    pub fn ai_vehicles(&self) -> impl Iterator<Item = &VehicleProgress> {
        self.vehicles.iter().skip(1)
    }

    pub fn ai_count(&self) -> usize {
        self.vehicles.len() - 1
    }

    pub fn refresh_position(&mut self, id: VehicleId, position: DVec3) {
        if let Some(vehicle) = self.get_mut(id) {
            vehicle.position = position;
        }
    }

    // Recompute every counter, then order by counter descending. Ties keep
    // roster order (player first).
    pub fn recompute_ranking(&mut self) -> &[VehicleId] {
        let counters: Vec<f64> = self
            .vehicles
            .iter()
            .map(|vehicle| self.counter_for(&vehicle.lap_info, vehicle.position))
            .collect();
        for (vehicle, counter) in self.vehicles.iter_mut().zip(counters) {
            vehicle.ranking_counter = counter;
        }

        let mut order: Vec<&VehicleProgress> = self.vehicles.iter().collect();
        order.sort_by(|a, b| {
            b.ranking_counter
                .partial_cmp(&a.ranking_counter)
                .unwrap_or(Ordering::Equal)
        });
        self.ranking = order.into_iter().map(|vehicle| vehicle.id).collect();

        &self.ranking
    }

    pub fn ranking(&self) -> &[VehicleId] {
        &self.ranking
    }

    // 1-based
    pub fn placement_of(&self, id: VehicleId) -> Option<Placement> {
        self.ranking
            .iter()
            .position(|ranked| *ranked == id)
            .map(|index| (index + 1) as Placement)
    }

    // No forward-only check here; a vehicle that backs through an earlier
    // waypoint gets the earlier index.
    pub fn on_waypoint_crossed(&mut self, id: VehicleId, waypoint: WaypointIndex) -> bool {
        if waypoint >= self.circuit.len() {
            warn!(vehicle = id, waypoint, "waypoint index is not on this circuit, ignoring");
            return false;
        }
        match self.get_mut(id) {
            Some(vehicle) => {
                vehicle.lap_info.waypoint = waypoint;
                debug!(vehicle = id, waypoint, "passed waypoint");
                true
            }
            None => false,
        }
    }

    pub fn on_lap_checker_crossed(&mut self, id: VehicleId) -> bool {
        match self.get_mut(id) {
            Some(vehicle) => {
                vehicle.lap_info.lap_ready = true;
                true
            }
            None => false,
        }
    }

    // The player's finish-line latch lives in the checkpoint gate, so only AI
    // vehicles are held to lap_ready here.
    pub fn on_lap_completed(&mut self, id: VehicleId, race_over: bool) -> LapOutcome {
        if race_over {
            return LapOutcome::Ignored;
        }

        let vehicle = match self.get_mut(id) {
            Some(vehicle) => vehicle,
            None => return LapOutcome::Ignored,
        };

        if !vehicle.is_player() && !vehicle.lap_info.lap_ready {
            debug!(vehicle = id, "lap line crossed before lap checker, ignoring");
            return LapOutcome::Ignored;
        }

        vehicle.lap_info.complete_lap();
        LapOutcome::Counted {
            laps_completed: vehicle.lap_info.lap,
        }
    }

    pub fn reset(&mut self, roster: &[Entrant]) {
        for vehicle in self.vehicles.iter_mut() {
            vehicle.lap_info = LapInformation::new();
            vehicle.ranking_counter = 0.0;
            if let Some(entrant) = roster.iter().find(|entrant| entrant.id == vehicle.id) {
                vehicle.position = entrant.start.position;
            }
        }
        self.ranking = self.vehicles.iter().map(|vehicle| vehicle.id).collect();
    }
}

fn validate_roster(roster: &[Entrant]) -> Result<(), SetupError> {
    if roster.is_empty() {
        return Err(SetupError::EmptyRoster);
    }

    let players = roster.iter().filter(|entrant| is_player(entrant.id)).count();
    match players {
        0 => return Err(SetupError::MissingPlayer),
        1 => {}
        _ => return Err(SetupError::DuplicatePlayer),
    }

    for (expected, entrant) in roster.iter().filter(|entrant| !is_player(entrant.id)).enumerate() {
        if entrant.id != expected {
            return Err(SetupError::AiIdsNotContiguous {
                expected,
                found: entrant.id,
            });
        }
    }

    Ok(())
}
