use serde::{Deserialize, Serialize};

use crate::RaceConfig;

// Fixed AI archetypes; each one chases a different point relative to the
// player's progress.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BehaviorGroup {
    LeadGroup,
    MidGroup,
    TrailGroup,
    MirrorGroup,
    PlayerGroup,
}

impl BehaviorGroup {
    pub const AI_GROUPS: [BehaviorGroup; 4] = [
        BehaviorGroup::LeadGroup,
        BehaviorGroup::MidGroup,
        BehaviorGroup::TrailGroup,
        BehaviorGroup::MirrorGroup,
    ];

    // Offset from the player's counter, in counter units. The player has none.
    pub fn target_offset(&self, config: &RaceConfig) -> Option<f64> {
        match self {
            BehaviorGroup::LeadGroup => Some(config.lead_group_offset),
            BehaviorGroup::MidGroup => Some(config.mid_group_offset),
            BehaviorGroup::TrailGroup => Some(config.trail_group_offset),
            BehaviorGroup::MirrorGroup => Some(config.mirror_group_offset),
            BehaviorGroup::PlayerGroup => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorGroup::LeadGroup => "lead",
            BehaviorGroup::MidGroup => "mid",
            BehaviorGroup::TrailGroup => "trail",
            BehaviorGroup::MirrorGroup => "mirror",
            BehaviorGroup::PlayerGroup => "player",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_come_from_config() {
        let config = RaceConfig::default();
        let offsets: Vec<Option<f64>> = BehaviorGroup::AI_GROUPS
            .iter()
            .map(|group| group.target_offset(&config))
            .collect();

        assert_eq!(
            offsets,
            vec![Some(400.0), Some(200.0), Some(-400.0), Some(0.0)]
        );
        assert_eq!(BehaviorGroup::PlayerGroup.target_offset(&config), None);
    }
}
