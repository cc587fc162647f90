// Rubber-banding. Every AI chases a point a fixed counter distance ahead of
// (or behind) the player and gets a skill tier depending on whether it is
// short of that point, on it, or past it.

use hoverace_core::vehicle::{behavior::BehaviorGroup, skill::SkillTier, VehicleId};
use hoverace_core::RaceConfig;
use tracing::debug;

use crate::progress::{ProgressTracker, VehicleProgress};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    // still inside the opening grace period
    FormingPack,
    HoldingFormation,
    CatchingUp,
    EasingOff,
    // past the end-game cutoff
    FinalStretchAhead,
    FinalStretchBehind,
}

impl Verdict {
    pub fn tier(&self) -> SkillTier {
        match self {
            Verdict::FormingPack | Verdict::CatchingUp | Verdict::FinalStretchAhead => SkillTier::Best,
            Verdict::HoldingFormation | Verdict::FinalStretchBehind => SkillTier::Mid,
            Verdict::EasingOff => SkillTier::Worst,
        }
    }

    pub fn thought(&self) -> &'static str {
        match self {
            Verdict::FormingPack => "Finding my spot in the pack.",
            Verdict::HoldingFormation => "I'm just right!",
            Verdict::CatchingUp => "I gotta increase my skill!",
            Verdict::EasingOff => "I'm too good, gotta decrease skill.",
            Verdict::FinalStretchAhead => "Final stretch, not letting this one go!",
            Verdict::FinalStretchBehind => "Final stretch, keep it steady.",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Assessment {
    pub vehicle: VehicleId,
    pub verdict: Verdict,
    pub tier: SkillTier,
}

// Cutoff counter: the configured fraction of the highest counter a vehicle
// can reach over the whole race
pub fn endgame_cutoff_counter(config: &RaceConfig, one_lap_value: f64) -> f64 {
    let laps = config.total_laps as f64;
    let max_counter = one_lap_value * laps + (laps - 1.0) * config.lap_scale;
    max_counter * config.endgame_cutoff_fraction
}

pub struct DifficultyEngine {
    config: RaceConfig,
    cutoff_counter: f64,
    // indexed by AI id
    tiers: Vec<SkillTier>,
}

impl DifficultyEngine {
    pub fn new(config: &RaceConfig, cutoff_counter: f64, ai_count: usize) -> Self {
        Self {
            config: config.clone(),
            cutoff_counter,
            tiers: vec![SkillTier::Best; ai_count],
        }
    }

    pub fn tier_of(&self, vehicle: VehicleId) -> Option<SkillTier> {
        self.tiers.get(vehicle).copied()
    }

    pub fn assess(&self, elapsed_secs: f64, player_counter: f64, vehicle: &VehicleProgress) -> Assessment {
        let verdict = self.verdict(
            elapsed_secs,
            player_counter,
            vehicle.ranking_counter(),
            vehicle.behavior_group(),
        );
        Assessment {
            vehicle: vehicle.id(),
            verdict,
            tier: verdict.tier(),
        }
    }

    pub fn verdict(&self, elapsed_secs: f64, player_counter: f64, ai_counter: f64, group: BehaviorGroup) -> Verdict {
        if elapsed_secs < self.config.grace_period_secs {
            return Verdict::FormingPack;
        }

        // trailing AIs never get a late push
        if ai_counter > self.cutoff_counter && group != BehaviorGroup::TrailGroup {
            return if ai_counter > player_counter {
                Verdict::FinalStretchAhead
            } else {
                Verdict::FinalStretchBehind
            };
        }

        let offset = group.target_offset(&self.config).unwrap_or(0.0);
        let target = player_counter + offset;
        let tolerance = self.config.formation_tolerance;

        if ai_counter < target - tolerance {
            Verdict::CatchingUp
        } else if ai_counter > target + tolerance {
            Verdict::EasingOff
        } else {
            Verdict::HoldingFormation
        }
    }

    // Counters must already be recomputed for this tick.
    pub fn update(&mut self, elapsed_secs: f64, tracker: &ProgressTracker) -> Vec<Assessment> {
        let player_counter = tracker.player().ranking_counter();
        let assessments: Vec<Assessment> = tracker
            .ai_vehicles()
            .map(|vehicle| self.assess(elapsed_secs, player_counter, vehicle))
            .collect();

        for assessment in &assessments {
            if let Some(tier) = self.tiers.get_mut(assessment.vehicle) {
                *tier = assessment.tier;
            }
            debug!(
                vehicle = assessment.vehicle,
                tier = assessment.tier.as_str(),
                "{}",
                assessment.verdict.thought()
            );
        }

        assessments
    }

    pub fn reset(&mut self) {
        self.tiers.iter_mut().for_each(|tier| *tier = SkillTier::Best);
    }
}
