use hoverace_core::vehicle::VehicleId;
use thiserror::Error;

// Problems with how a race was put together. Nothing that happens once the
// race is running is reported this way; bad events there are just dropped.
#[derive(Debug, Error, PartialEq)]
pub enum SetupError {
    #[error("a circuit needs at least 2 waypoints, found {found}")]
    TooFewWaypoints { found: usize },

    #[error("the roster is empty")]
    EmptyRoster,

    #[error("the roster has no player entrant")]
    MissingPlayer,

    #[error("the roster has more than one player entrant")]
    DuplicatePlayer,

    #[error("AI ids must run 0..K-1 in roster order: expected {expected}, found {found}")]
    AiIdsNotContiguous { expected: VehicleId, found: VehicleId },

    #[error("a race needs at least one lap")]
    InvalidLapCount,
}
