use std::collections::VecDeque;

use glam::DVec3;
use hoverace_core::entity_location::VehicleMotion;
use hoverace_core::hud::{format_race_time, HudEvent};
use hoverace_core::vehicle::{
    driver_inputs::DriverInputs, is_player, lap_info::LapNumber, skill::SkillTier, VehicleId,
    PLAYER_ID,
};
use hoverace_core::RaceConfig;
use rand::Rng;
use tracing::{debug, info};

use crate::checkpoints::{CheckpointEvent, CheckpointGate, Sensor};
use crate::circuit::Circuit;
use crate::difficulty::{endgame_cutoff_counter, DifficultyEngine, Verdict};
use crate::driving::DrivingController;
use crate::error::SetupError;
use crate::physics::trigger_entity::TriggerEntity;
use crate::progress::{CounterScales, Entrant, LapOutcome, ProgressTracker};

pub use self::phase::RacePhase;

mod phase;


// `vehicle` is touching a ship currently at `other_position`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub vehicle: VehicleId,
    pub other_position: DVec3,
}

// Everything the integrator needs back from one tick
#[derive(Clone, Debug, PartialEq)]
pub struct ControlOutputs {
    // neutral unless the player slot is on autopilot
    pub player: DriverInputs,
    // indexed by AI id
    pub ai: Vec<DriverInputs>,
}

impl ControlOutputs {
    fn neutral(ai_count: usize) -> ControlOutputs {
        ControlOutputs {
            player: DriverInputs::NEUTRAL,
            ai: vec![DriverInputs::NEUTRAL; ai_count],
        }
    }

    pub fn for_vehicle(&self, id: VehicleId) -> DriverInputs {
        if is_player(id) {
            self.player
        } else {
            self.ai.get(id).copied().unwrap_or(DriverInputs::NEUTRAL)
        }
    }
}

pub struct Race {
    config: RaceConfig,
    phase: RacePhase,
    roster: Vec<Entrant>,

    tracker: ProgressTracker,
    gate: CheckpointGate,
    difficulty: DifficultyEngine,

    // indexed by AI id
    drivers: Vec<DrivingController>,
    // last verdict each AI was told about, so thoughts only go out on change
    verdicts: Vec<Option<Verdict>>,
    player_autopilot: Option<DrivingController>,

    // checkpoint crossings waiting for the start of the next tick
    pending_events: VecDeque<CheckpointEvent>,
    hud_events: Vec<HudEvent>,

    // seconds since activation
    elapsed_secs: f64,
    // one entry per lap the player has started; the last is the lap in progress
    lap_times: Vec<f64>,
    ai_finishers: Vec<VehicleId>,
}

impl Race {
    // Build everything static. Nobody moves until activate().
    pub fn prepare<R: Rng>(
        config: &RaceConfig,
        circuit: Circuit,
        roster: Vec<Entrant>,
        rng: &mut R,
    ) -> Result<Race, SetupError> {
        if config.total_laps == 0 {
            return Err(SetupError::InvalidLapCount);
        }

        let tracker = ProgressTracker::new(circuit, CounterScales::from(config), &roster)?;
        let ai_count = tracker.ai_count();
        let cutoff_counter = endgame_cutoff_counter(config, tracker.one_lap_value());
        let drivers = (0..ai_count)
            .map(|_| DrivingController::from_rng(rng))
            .collect();

        info!(
            ai_vehicles = ai_count,
            waypoints = tracker.circuit().len(),
            laps = config.total_laps,
            cutoff_counter,
            "race prepared"
        );

        Ok(Race {
            config: config.clone(),
            phase: RacePhase::NotStarted,
            roster,
            tracker,
            gate: CheckpointGate::new(config.debug_laps),
            difficulty: DifficultyEngine::new(config, cutoff_counter, ai_count),
            drivers,
            verdicts: vec![None; ai_count],
            player_autopilot: None,
            pending_events: VecDeque::new(),
            hud_events: Vec::new(),
            elapsed_secs: 0.0,
            lap_times: vec![0.0],
            ai_finishers: Vec::new(),
        })
    }

    // Hands the player slot to a controller instead of a human
    pub fn set_player_autopilot(&mut self, autopilot: DrivingController) {
        self.player_autopilot = Some(autopilot);
    }

    // Called once the intro is over. Returns whether the race actually started.
    pub fn activate(&mut self) -> bool {
        match self.phase {
            RacePhase::NotStarted => {
                self.phase = RacePhase::Active;
                self.assign_targets();
                if let Some(display) = HudEvent::lap_display(0, self.config.total_laps) {
                    self.hud_events.push(display);
                }
                info!("race activated");
                true
            }
            RacePhase::Active => false,
            RacePhase::Finished => {
                debug!("race already finished, not activating");
                false
            }
        }
    }

    pub fn queue_event(&mut self, event: CheckpointEvent) {
        if self.phase == RacePhase::NotStarted {
            debug!(?event, "race has not started, dropping checkpoint event");
            return;
        }
        self.pending_events.push_back(event);
    }

    // A sensor has just entered a trigger volume
    pub fn sensor_entered(&mut self, trigger: &dyn TriggerEntity, sensor: &Sensor) {
        if self.phase == RacePhase::NotStarted {
            return;
        }
        if let Some(event) = trigger.trigger(&mut self.gate, sensor) {
            debug!(?event, sensor = %sensor.name, "checkpoint crossed");
            self.queue_event(event);
        }
    }

    /* Advance the race by one fixed step. `ai` is indexed by AI id; the
     * returned inputs are what the integrator should apply next */
    pub fn tick(
        &mut self,
        time_step: f64,
        player: &VehicleMotion,
        ai: &[VehicleMotion],
        contacts: &[Contact],
    ) -> ControlOutputs {
        self.apply_pending_events();

        // every counter is recomputed before anything reads one this tick
        self.tracker
            .refresh_position(PLAYER_ID, player.location.position);
        for (id, motion) in ai.iter().enumerate().take(self.tracker.ai_count()) {
            self.tracker.refresh_position(id, motion.location.position);
        }
        self.tracker.recompute_ranking();

        let outputs = if self.phase.is_active() {
            self.elapsed_secs += time_step;
            if let Some(lap_time) = self.lap_times.last_mut() {
                *lap_time += time_step;
            }

            self.update_difficulty();
            self.assign_targets();
            self.react_to_contacts(player, ai, contacts);
            self.drive(player, ai)
        } else {
            ControlOutputs::neutral(self.tracker.ai_count())
        };

        self.push_standings(player);
        outputs
    }

    pub fn drain_hud(&mut self) -> Vec<HudEvent> {
        std::mem::take(&mut self.hud_events)
    }

    // Throw away all per-vehicle state and go back to the grid
    pub fn reset(&mut self) {
        self.phase = RacePhase::NotStarted;
        self.tracker.reset(&self.roster);
        self.gate.reset();
        self.difficulty.reset();
        for (id, driver) in self.drivers.iter_mut().enumerate() {
            driver.reset();
            driver.set_skill(self.difficulty.tier_of(id).unwrap_or_default());
        }
        self.verdicts.iter_mut().for_each(|verdict| *verdict = None);
        if let Some(autopilot) = self.player_autopilot.as_mut() {
            autopilot.reset();
        }
        self.pending_events.clear();
        self.hud_events.clear();
        self.elapsed_secs = 0.0;
        self.lap_times = vec![0.0];
        self.ai_finishers.clear();
        info!("race reset");
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn difficulty(&self) -> &DifficultyEngine {
        &self.difficulty
    }

    pub fn driver(&self, id: VehicleId) -> Option<&DrivingController> {
        if is_player(id) {
            self.player_autopilot.as_ref()
        } else {
            self.drivers.get(id)
        }
    }

    pub fn skill_of(&self, id: VehicleId) -> Option<SkillTier> {
        self.driver(id).map(|driver| driver.skill())
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn player_laps(&self) -> LapNumber {
        self.tracker.player().laps_completed()
    }

    pub fn lap_times(&self) -> &[f64] {
        &self.lap_times
    }

    pub fn total_time(&self) -> f64 {
        self.lap_times.iter().sum()
    }

    // AI vehicles in the order they completed every lap
    pub fn ai_finishers(&self) -> &[VehicleId] {
        &self.ai_finishers
    }

    fn apply_pending_events(&mut self) {
        while let Some(event) = self.pending_events.pop_front() {
            match event {
                CheckpointEvent::WaypointCrossed { vehicle, waypoint } => {
                    self.tracker.on_waypoint_crossed(vehicle, waypoint);
                }
                CheckpointEvent::LapCheckerCrossed { vehicle } => {
                    self.tracker.on_lap_checker_crossed(vehicle);
                }
                CheckpointEvent::LapLineCrossed { vehicle } => self.complete_lap(vehicle),
            }
        }
    }

    fn complete_lap(&mut self, vehicle: VehicleId) {
        let laps_completed = match self.tracker.on_lap_completed(vehicle, self.phase.is_over()) {
            LapOutcome::Ignored => return,
            LapOutcome::Counted { laps_completed } => laps_completed,
        };
        let total_laps = self.config.total_laps;

        if !is_player(vehicle) {
            if laps_completed >= total_laps && !self.ai_finishers.contains(&vehicle) {
                self.ai_finishers.push(vehicle);
                info!(vehicle, place = self.ai_finishers.len(), "AI vehicle finished");
            }
            return;
        }

        let lap_time = self.lap_times.last().copied().unwrap_or(0.0);
        info!(lap = laps_completed, time = %format_race_time(lap_time), "player lap counted");
        self.hud_events.push(HudEvent::LapTime {
            lap: laps_completed,
            seconds: lap_time,
        });

        if laps_completed >= total_laps {
            self.finish();
        } else {
            self.lap_times.push(0.0);
            if let Some(display) = HudEvent::lap_display(laps_completed, total_laps) {
                self.hud_events.push(display);
            }
        }
    }

    fn finish(&mut self) {
        self.phase = RacePhase::Finished;
        self.drivers.iter_mut().for_each(DrivingController::halt);
        if let Some(autopilot) = self.player_autopilot.as_mut() {
            autopilot.halt();
        }

        let total_time = self.total_time();
        self.hud_events.push(HudEvent::FinalTime {
            seconds: total_time,
        });
        self.hud_events.push(HudEvent::RaceFinished);
        info!(
            time = %format_race_time(total_time),
            placement = ?self.tracker.placement_of(PLAYER_ID),
            "race finished"
        );
    }

    fn update_difficulty(&mut self) {
        let assessments = self.difficulty.update(self.elapsed_secs, &self.tracker);
        for assessment in assessments {
            if let Some(driver) = self.drivers.get_mut(assessment.vehicle) {
                driver.set_skill(assessment.tier);
            }

            if let Some(last) = self.verdicts.get_mut(assessment.vehicle) {
                if *last != Some(assessment.verdict) {
                    *last = Some(assessment.verdict);
                    self.hud_events.push(HudEvent::AiThought {
                        vehicle: assessment.vehicle,
                        thought: assessment.verdict.thought().to_string(),
                    });
                }
            }
        }
    }

    // Everyone chases the waypoint after the one they last passed
    fn assign_targets(&mut self) {
        let circuit = self.tracker.circuit();
        for vehicle in self.tracker.ai_vehicles() {
            if let Some(driver) = self.drivers.get_mut(vehicle.id()) {
                driver.set_target(circuit.target_pose(vehicle.current_waypoint() + 1));
            }
        }
        if let Some(autopilot) = self.player_autopilot.as_mut() {
            let next = self.tracker.player().current_waypoint() + 1;
            autopilot.set_target(circuit.target_pose(next));
        }
    }

    fn react_to_contacts(&mut self, player: &VehicleMotion, ai: &[VehicleMotion], contacts: &[Contact]) {
        let now = self.elapsed_secs;
        for contact in contacts {
            if is_player(contact.vehicle) {
                if let Some(autopilot) = self.player_autopilot.as_mut() {
                    autopilot.on_contact(now, &player.location, contact.other_position);
                }
            } else if let (Some(driver), Some(motion)) =
                (self.drivers.get_mut(contact.vehicle), ai.get(contact.vehicle))
            {
                driver.on_contact(now, &motion.location, contact.other_position);
            }
        }
    }

    fn drive(&mut self, player: &VehicleMotion, ai: &[VehicleMotion]) -> ControlOutputs {
        let now = self.elapsed_secs;
        let ai_inputs = self
            .drivers
            .iter_mut()
            .enumerate()
            .map(|(id, driver)| match ai.get(id) {
                Some(motion) => driver.drive(now, motion),
                None => DriverInputs::NEUTRAL,
            })
            .collect();

        let player_inputs = match self.player_autopilot.as_mut() {
            Some(autopilot) => autopilot.drive(now, player),
            None => DriverInputs::NEUTRAL,
        };

        ControlOutputs {
            player: player_inputs,
            ai: ai_inputs,
        }
    }

    fn push_standings(&mut self, player: &VehicleMotion) {
        self.hud_events.push(HudEvent::speed(player.speed));
        if let Some(rank) = self.tracker.placement_of(PLAYER_ID) {
            self.hud_events.push(HudEvent::PlayerRank { rank });
        }
        for (slot, id) in self.tracker.ranking().iter().enumerate() {
            if let Some(vehicle) = self.tracker.get(*id) {
                self.hud_events.push(HudEvent::RankingSlot {
                    slot,
                    label: vehicle.display_name().to_string(),
                });
            }
        }
    }
}
