use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkillTier {
    Best,
    Mid,
    Worst,
}

// Sensitivities the driving controller runs with for a given tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkillProfile {
    // fraction of terminal velocity to drive at when maximally cautious
    pub cautious_speed_factor: f64,
    pub brake_sensitivity: f64,
    pub accel_sensitivity: f64,
    pub steer_sensitivity: f64,
    pub wander_distance: f64,
}

const BEST: SkillProfile = SkillProfile {
    cautious_speed_factor: 0.6,
    brake_sensitivity: 0.5,
    accel_sensitivity: 1.0,
    steer_sensitivity: 0.7,
    wander_distance: 5.0,
};

const MID: SkillProfile = SkillProfile {
    cautious_speed_factor: 0.5,
    brake_sensitivity: 0.75,
    accel_sensitivity: 0.75,
    steer_sensitivity: 0.5,
    wander_distance: 7.5,
};

const WORST: SkillProfile = SkillProfile {
    cautious_speed_factor: 0.4,
    brake_sensitivity: 1.0,
    accel_sensitivity: 0.5,
    steer_sensitivity: 0.3,
    wander_distance: 10.0,
};

impl SkillTier {
    pub fn profile(&self) -> SkillProfile {
        match self {
            SkillTier::Best => BEST,
            SkillTier::Mid => MID,
            SkillTier::Worst => WORST,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillTier::Best => "best",
            SkillTier::Mid => "mid",
            SkillTier::Worst => "worst",
        }
    }
}

impl Default for SkillTier {
    fn default() -> Self {
        SkillTier::Best
    }
}
