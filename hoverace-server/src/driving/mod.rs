use glam::DVec3;
use hoverace_core::entity_location::{EntityLocation, VehicleMotion};
use hoverace_core::vehicle::{driver_inputs::DriverInputs, skill::SkillTier};
use rand::Rng;

use self::wander::Wander;

pub mod wander;

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug)]
pub struct DriverTuning {
    // above this fraction of terminal velocity, steer relative to the velocity
    // direction rather than the nose
    pub overspeed_fraction: f64,
    // how much current spin counts toward caution (degrees per rad/s)
    pub cautious_angular_velocity_factor: f64,
    // corner angle (degrees) treated as needing full caution
    pub cautious_max_angle: f64,

    pub lateral_wander_speed: f64,
    pub accel_wander_amount: f64, // [0, 1]
    pub accel_wander_speed: f64,

    pub avoid_duration_secs: f64,
    pub trailing_slowdown: f64,
    pub leading_slowdown: f64,
    // other car within this angle (degrees) of our nose counts as ahead of us
    pub ahead_angle_threshold: f64,
}

pub const DRIVER: DriverTuning = DriverTuning {
    overspeed_fraction: 0.1,
    cautious_angular_velocity_factor: 100.0,
    cautious_max_angle: 90.0,

    lateral_wander_speed: 0.2,
    accel_wander_amount: 0.5,
    accel_wander_speed: 0.1,

    avoid_duration_secs: 1.0,
    trailing_slowdown: 0.75,
    leading_slowdown: 1.0,
    ahead_angle_threshold: 90.0,
};

const ACCEL_WANDER_SEED: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
enum DriveState {
    Idle,
    Pursuing { target: EntityLocation },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Avoidance {
    until: f64,
    slowdown: f64,
    path_offset: f64,
}

// Steers one vehicle at a moving target. Speed comes from how sharp the
// upcoming turn is and how hard we are already spinning; the aim point wanders
// sideways unless we are busy getting away from a car we bumped into.
pub struct DrivingController {
    state: DriveState,
    skill: SkillTier,
    tuning: DriverTuning,
    lateral_wander: Wander,
    accel_wander: Wander,
    avoidance: Option<Avoidance>,
    // human-piloted vehicles never take evasive action
    avoids_contact: bool,
}

fn sign(value: f64) -> f64 {
    if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

fn inverse_lerp(from: f64, to: f64, value: f64) -> f64 {
    if from == to {
        return 0.0;
    }
    ((value - from) / (to - from)).clamp(0.0, 1.0)
}

// degrees; zero when either vector has no direction
fn angle_between_degrees(a: DVec3, b: DVec3) -> f64 {
    if a.length_squared() == 0.0 || b.length_squared() == 0.0 {
        return 0.0;
    }
    let cos = a.dot(b) / (a.length() * b.length());
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

impl DrivingController {
    pub fn new(wander_row: f64) -> Self {
        Self {
            state: DriveState::Idle,
            skill: SkillTier::default(),
            tuning: DRIVER,
            lateral_wander: Wander::new(wander_row),
            accel_wander: Wander::with_seed(ACCEL_WANDER_SEED, wander_row),
            avoidance: None,
            avoids_contact: true,
        }
    }

    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        let row = Wander::from_rng(rng).row();
        Self::new(row)
    }

    // Autopilot for a human slot: same pursuit, no evasive action
    pub fn autopilot(wander_row: f64) -> Self {
        Self {
            avoids_contact: false,
            ..Self::new(wander_row)
        }
    }

    pub fn is_pursuing(&self) -> bool {
        matches!(self.state, DriveState::Pursuing { .. })
    }

    pub fn set_target(&mut self, target: EntityLocation) {
        self.state = DriveState::Pursuing { target };
    }

    pub fn halt(&mut self) {
        self.state = DriveState::Idle;
    }

    pub fn skill(&self) -> SkillTier {
        self.skill
    }

    pub fn set_skill(&mut self, skill: SkillTier) {
        self.skill = skill;
    }

    pub fn is_avoiding(&self, now: f64) -> bool {
        matches!(self.avoidance, Some(avoidance) if now < avoidance.until)
    }

    // Back to the grid. Skill is left alone; whoever assigns it resets it.
    pub fn reset(&mut self) {
        self.state = DriveState::Idle;
        self.avoidance = None;
    }

    // Desired speed before any avoidance slowdown
    pub fn cautious_speed(&self, target: &EntityLocation, motion: &VehicleMotion) -> f64 {
        let terminal_velocity = motion.terminal_velocity;

        let mut forward = motion.location.forward();
        if motion.velocity.length() > terminal_velocity * self.tuning.overspeed_fraction {
            forward = motion.velocity;
        }

        let approaching_corner_angle = angle_between_degrees(target.forward(), forward);
        let spinning_angle = motion.angular_velocity.length() * self.tuning.cautious_angular_velocity_factor;
        let cautiousness = inverse_lerp(
            0.0,
            self.tuning.cautious_max_angle,
            spinning_angle.max(approaching_corner_angle),
        );

        let profile = self.skill.profile();
        lerp(
            terminal_velocity,
            terminal_velocity * profile.cautious_speed_factor,
            cautiousness,
        )
    }

    // One physics tick's worth of control output
    pub fn drive(&mut self, now: f64, motion: &VehicleMotion) -> DriverInputs {
        let target = match self.state {
            DriveState::Idle => return DriverInputs::NEUTRAL,
            DriveState::Pursuing { target } => target,
        };
        let profile = self.skill.profile();

        let mut desired_speed = self.cautious_speed(&target, motion);

        let mut aim_point = target.position;
        match self.avoidance {
            Some(avoidance) if now < avoidance.until => {
                desired_speed *= avoidance.slowdown;
                aim_point += target.right() * avoidance.path_offset;
            }
            _ => {
                let wander = self.lateral_wander.sample(now * self.tuning.lateral_wander_speed) * 2.0 - 1.0;
                aim_point += target.right() * wander * profile.wander_distance;
            }
        }

        let speed = motion.speed;
        let braking = desired_speed < speed;
        let sensitivity = if braking {
            profile.brake_sensitivity
        } else {
            profile.accel_sensitivity
        };
        let mut accel = ((desired_speed - speed) * sensitivity).clamp(-1.0, 1.0);
        let amount = self.tuning.accel_wander_amount;
        accel *= (1.0 - amount) + self.accel_wander.sample(now * self.tuning.accel_wander_speed) * amount;

        let local_target = motion.location.inverse_transform_point(aim_point);
        let target_angle = local_target.x.atan2(local_target.z).to_degrees();
        let steer = (target_angle * profile.steer_sensitivity).clamp(-1.0, 1.0) * sign(speed);

        if braking {
            DriverInputs {
                thruster: 0.0,
                rudder: steer,
                is_braking: true,
            }
        } else {
            DriverInputs {
                thruster: accel,
                rudder: steer,
                is_braking: false,
            }
        }
    }

    // Called every tick we are touching another vehicle. Whoever is behind
    // backs off a little; both steer away from each other for a while.
    pub fn on_contact(&mut self, now: f64, own: &EntityLocation, other_position: DVec3) {
        if !self.avoids_contact {
            return;
        }

        let to_other = other_position - own.position;
        let other_is_ahead = angle_between_degrees(own.forward(), to_other) < self.tuning.ahead_angle_threshold;
        let slowdown = if other_is_ahead {
            self.tuning.trailing_slowdown
        } else {
            self.tuning.leading_slowdown
        };

        let local_other = own.inverse_transform_point(other_position);
        let other_angle = local_other.x.atan2(local_other.z);
        let path_offset = self.skill.profile().wander_distance * -sign(other_angle);

        self.avoidance = Some(Avoidance {
            until: now + self.tuning.avoid_duration_secs,
            slowdown,
            path_offset,
        });
    }
}
