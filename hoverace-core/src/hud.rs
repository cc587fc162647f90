use serde::{Deserialize, Serialize};

use crate::vehicle::{
    lap_info::{LapNumber, Placement},
    VehicleId,
};

// Fire-and-forget updates for whatever is drawing the race. The simulation
// queues these; nobody answers them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum HudEvent {
    LapDisplay { current: LapNumber, total: LapNumber },
    LapTime { lap: LapNumber, seconds: f64 },
    FinalTime { seconds: f64 },
    Speed { value: u32 },
    PlayerRank { rank: Placement },
    RankingSlot { slot: usize, label: String },
    AiThought { vehicle: VehicleId, thought: String },
    RaceFinished,
}

impl HudEvent {
    // Lap counter shown on the ship; nothing is shown past the last lap
    pub fn lap_display(laps_completed: LapNumber, total: LapNumber) -> Option<HudEvent> {
        let current = laps_completed.saturating_add(1);
        if current > total {
            return None;
        }
        Some(HudEvent::LapDisplay { current, total })
    }

    pub fn speed(forward_speed: f64) -> HudEvent {
        HudEvent::Speed {
            value: forward_speed.abs() as u32,
        }
    }
}

// mm:ss.fff
pub fn format_race_time(seconds: f64) -> String {
    let minutes = (seconds / 60.0) as u64;
    let remainder = seconds % 60.0;
    format!("{:02}:{:06.3}", minutes, remainder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn race_time_is_zero_padded() {
        assert_eq!(format_race_time(0.0), "00:00.000");
        assert_eq!(format_race_time(5.25), "00:05.250");
        assert_eq!(format_race_time(83.5), "01:23.500");
        assert_eq!(format_race_time(600.0), "10:00.000");
    }

    #[test]
    fn lap_display_stops_after_final_lap() {
        assert_eq!(
            HudEvent::lap_display(0, 3),
            Some(HudEvent::LapDisplay {
                current: 1,
                total: 3
            })
        );
        assert_eq!(
            HudEvent::lap_display(2, 3),
            Some(HudEvent::LapDisplay {
                current: 3,
                total: 3
            })
        );
        assert_eq!(HudEvent::lap_display(3, 3), None);
    }

    #[test]
    fn speed_display_drops_sign_and_fraction() {
        assert_eq!(HudEvent::speed(-42.9), HudEvent::Speed { value: 42 });
    }
}
