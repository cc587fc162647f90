use hoverace_core::naming::{parse_vehicle_id, parse_waypoint_index};
use hoverace_core::vehicle::{is_player, lap_info::WaypointIndex, VehicleId, PLAYER_ID};
use tracing::{debug, warn};

use crate::physics::bounding_box::BoundingBox;
use crate::physics::trigger_entity::TriggerEntity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorTag {
    PlayerSensor,
    AiSensor,
}

// The thing on a vehicle that touches checkpoint volumes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sensor {
    pub tag: SensorTag,
    pub name: String,
}

impl Sensor {
    pub fn player() -> Self {
        Self {
            tag: SensorTag::PlayerSensor,
            name: String::from("PlayerSensor"),
        }
    }

    pub fn ai(name: &str) -> Self {
        Self {
            tag: SensorTag::AiSensor,
            name: name.to_string(),
        }
    }

    fn ai_vehicle(&self) -> Option<VehicleId> {
        match parse_vehicle_id(&self.name) {
            Some(id) if is_player(id) => {
                warn!(sensor = %self.name, "AI sensor carries the player id, dropping crossing");
                None
            }
            Some(id) => Some(id),
            None => {
                warn!(sensor = %self.name, "AI sensor name has no vehicle id, dropping crossing");
                None
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckpointEvent {
    WaypointCrossed {
        vehicle: VehicleId,
        waypoint: WaypointIndex,
    },
    LapCheckerCrossed {
        vehicle: VehicleId,
    },
    LapLineCrossed {
        vehicle: VehicleId,
    },
}

// Turns raw sensor contacts into progress events. Waypoint crossings pass
// straight through; a lap for the player only goes through if the player has
// touched the lap checker since the last one. AI vehicles carry that latch in
// their own progress record instead.
pub struct CheckpointGate {
    finish_line_ready: bool,
    debug_mode: bool,
}

impl CheckpointGate {
    pub fn new(debug_mode: bool) -> Self {
        Self {
            finish_line_ready: false,
            debug_mode,
        }
    }

    pub fn finish_line_ready(&self) -> bool {
        self.finish_line_ready
    }

    pub fn waypoint_crossed(&self, waypoint: WaypointIndex, sensor: &Sensor) -> Option<CheckpointEvent> {
        let vehicle = match sensor.tag {
            SensorTag::PlayerSensor => PLAYER_ID,
            SensorTag::AiSensor => sensor.ai_vehicle()?,
        };
        Some(CheckpointEvent::WaypointCrossed { vehicle, waypoint })
    }

    pub fn lap_checker_crossed(&mut self, sensor: &Sensor) -> Option<CheckpointEvent> {
        match sensor.tag {
            SensorTag::PlayerSensor => {
                self.finish_line_ready = true;
                None
            }
            SensorTag::AiSensor => {
                let vehicle = sensor.ai_vehicle()?;
                Some(CheckpointEvent::LapCheckerCrossed { vehicle })
            }
        }
    }

    pub fn finish_line_crossed(&mut self, sensor: &Sensor) -> Option<CheckpointEvent> {
        match sensor.tag {
            SensorTag::PlayerSensor => {
                if !(self.finish_line_ready || self.debug_mode) {
                    debug!("player crossed the finish line without passing the lap checker");
                    return None;
                }
                self.finish_line_ready = false;
                Some(CheckpointEvent::LapLineCrossed { vehicle: PLAYER_ID })
            }
            SensorTag::AiSensor => {
                let vehicle = sensor.ai_vehicle()?;
                Some(CheckpointEvent::LapLineCrossed { vehicle })
            }
        }
    }

    pub fn reset(&mut self) {
        self.finish_line_ready = false;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckpointKind {
    Waypoint(WaypointIndex),
    LapChecker,
    FinishLine,
}

// A trigger volume placed on the track
#[derive(Clone, Copy, Debug)]
pub struct Checkpoint {
    pub kind: CheckpointKind,
    pub bounds: BoundingBox,
}

impl Checkpoint {
    pub fn new(kind: CheckpointKind, bounds: BoundingBox) -> Self {
        Self { kind, bounds }
    }

    // Waypoint volumes get their index from their object name ("Waypoint 3").
    // A name with no index is a track authoring mistake; the volume is left out.
    pub fn waypoint_named(name: &str, bounds: BoundingBox) -> Option<Self> {
        match parse_waypoint_index(name) {
            Some(index) => Some(Self::new(CheckpointKind::Waypoint(index), bounds)),
            None => {
                warn!(name, "waypoint volume has no index in its name, skipping");
                None
            }
        }
    }
}

impl TriggerEntity for Checkpoint {
    fn get_bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    fn trigger(&self, gate: &mut CheckpointGate, sensor: &Sensor) -> Option<CheckpointEvent> {
        match self.kind {
            CheckpointKind::Waypoint(index) => gate.waypoint_crossed(index, sensor),
            CheckpointKind::LapChecker => gate.lap_checker_crossed(sensor),
            CheckpointKind::FinishLine => gate.finish_line_crossed(sensor),
        }
    }
}
