use serde::{Deserialize, Serialize};

pub type LapNumber = u8;
pub type WaypointIndex = usize;
pub type Placement = u8;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LapInformation {
    pub lap: LapNumber,
    pub waypoint: WaypointIndex,
    // set by the lap-checker, consumed by the next counted lap
    pub lap_ready: bool,
}

impl LapInformation {
    pub fn new() -> Self {
        LapInformation {
            lap: 0,
            waypoint: 0,
            lap_ready: false,
        }
    }

    pub fn complete_lap(&mut self) {
        self.lap = self.lap.saturating_add(1);
        self.waypoint = 0;
        self.lap_ready = false;
    }
}

impl Default for LapInformation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completing_a_lap_resets_waypoint_and_latch() {
        let mut info = LapInformation::new();
        info.waypoint = 3;
        info.lap_ready = true;

        info.complete_lap();

        assert_eq!(info.lap, 1);
        assert_eq!(info.waypoint, 0);
        assert!(!info.lap_ready);
    }
}
