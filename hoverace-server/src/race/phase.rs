#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RacePhase {
    // Grid is built and everyone is parked; the intro is still playing and
    // nobody gets control until activate()
    NotStarted,
    // Racing. Difficulty and driving controllers run every tick
    Active,
    // The player has done every lap. Terminal; only a reset leaves it
    Finished,
}

impl RacePhase {
    pub fn is_active(&self) -> bool {
        *self == RacePhase::Active
    }

    pub fn is_over(&self) -> bool {
        *self == RacePhase::Finished
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RacePhase::NotStarted => "not started",
            RacePhase::Active => "active",
            RacePhase::Finished => "finished",
        }
    }
}
