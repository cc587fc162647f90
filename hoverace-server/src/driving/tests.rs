use glam::DVec3;

use hoverace_core::entity_location::{EntityLocation, VehicleMotion};
use hoverace_core::vehicle::{driver_inputs::DriverInputs, skill::SkillTier};

use crate::driving::DrivingController;

const TERMINAL_VELOCITY: f64 = 100.0;

fn motion_at_origin(speed: f64) -> VehicleMotion {
    let location = EntityLocation::new(DVec3::ZERO, DVec3::Z);
    VehicleMotion {
        location,
        velocity: DVec3::Z * speed,
        angular_velocity: DVec3::ZERO,
        speed,
        terminal_velocity: TERMINAL_VELOCITY,
    }
}

fn target(position: DVec3, forward: DVec3) -> EntityLocation {
    EntityLocation::new(position, forward)
}

fn pursuing(skill: SkillTier, target: EntityLocation) -> DrivingController {
    let mut controller = DrivingController::new(37.25);
    controller.set_skill(skill);
    controller.set_target(target);
    controller
}

#[test]
fn idle_controller_outputs_nothing() {
    let mut controller = DrivingController::new(1.5);
    assert!(!controller.is_pursuing());
    assert_eq!(controller.drive(3.0, &motion_at_origin(10.0)), DriverInputs::NEUTRAL);
}

#[test]
fn halting_returns_to_idle() {
    let mut controller = pursuing(SkillTier::Mid, target(DVec3::Z * 50.0, DVec3::Z));
    assert!(controller.is_pursuing());
    controller.halt();
    assert!(controller.drive(0.0, &motion_at_origin(0.0)).is_neutral());
}

#[test]
fn straight_road_means_full_speed() {
    let straight = target(DVec3::Z * 50.0, DVec3::Z);
    let controller = pursuing(SkillTier::Worst, straight);
    let speed = controller.cautious_speed(&straight, &motion_at_origin(0.0));
    assert!((speed - TERMINAL_VELOCITY).abs() < 1e-9);
}

#[test]
fn right_angle_corner_means_full_caution() {
    let corner = target(DVec3::Z * 50.0, DVec3::X);

    let worst = pursuing(SkillTier::Worst, corner);
    let speed = worst.cautious_speed(&corner, &motion_at_origin(0.0));
    assert!((speed - TERMINAL_VELOCITY * 0.4).abs() < 1e-9);

    let best = pursuing(SkillTier::Best, corner);
    let speed = best.cautious_speed(&corner, &motion_at_origin(0.0));
    assert!((speed - TERMINAL_VELOCITY * 0.6).abs() < 1e-9);
}

#[test]
fn half_corner_blends_halfway() {
    let diagonal = target(DVec3::Z * 50.0, DVec3::new(1.0, 0.0, 1.0));
    let controller = pursuing(SkillTier::Mid, diagonal);
    let speed = controller.cautious_speed(&diagonal, &motion_at_origin(0.0));
    // 45 of 90 degrees -> halfway between 100 and 50
    assert!((speed - 75.0).abs() < 1e-9);
}

#[test]
fn spinning_counts_as_caution() {
    let straight = target(DVec3::Z * 50.0, DVec3::Z);
    let controller = pursuing(SkillTier::Worst, straight);
    let mut motion = motion_at_origin(0.0);
    motion.angular_velocity = DVec3::new(0.0, 0.9, 0.0);

    let speed = controller.cautious_speed(&straight, &motion);
    assert!((speed - TERMINAL_VELOCITY * 0.4).abs() < 1e-9);
}

#[test]
fn fast_vehicles_measure_corners_from_their_velocity() {
    // nose points +z but we are sliding along +x, which is where the road goes
    let road = target(DVec3::X * 50.0, DVec3::X);
    let controller = pursuing(SkillTier::Worst, road);
    let mut motion = motion_at_origin(0.0);
    motion.velocity = DVec3::X * 20.0;

    let speed = controller.cautious_speed(&road, &motion);
    assert!((speed - TERMINAL_VELOCITY).abs() < 1e-9);

    // below the overspeed threshold the nose is used instead
    motion.velocity = DVec3::X * 5.0;
    let speed = controller.cautious_speed(&road, &motion);
    assert!((speed - TERMINAL_VELOCITY * 0.4).abs() < 1e-9);
}

#[test]
fn accelerates_when_below_desired_speed() {
    let mut controller = pursuing(SkillTier::Best, target(DVec3::Z * 50.0, DVec3::Z));
    let inputs = controller.drive(2.0, &motion_at_origin(10.0));
    assert!(!inputs.is_braking);
    assert!(inputs.thruster > 0.0 && inputs.thruster <= 1.0);
}

#[test]
fn brakes_when_above_desired_speed() {
    // sharp corner caps Worst at 40
    let mut controller = pursuing(SkillTier::Worst, target(DVec3::Z * 50.0, DVec3::X));
    let inputs = controller.drive(2.0, &motion_at_origin(60.0));
    assert!(inputs.is_braking);
    assert_eq!(inputs.thruster, 0.0);
}

#[test]
fn steering_flips_in_reverse() {
    let ahead_right = target(DVec3::new(30.0, 0.0, 30.0), DVec3::Z);
    let mut forwards = pursuing(SkillTier::Mid, ahead_right);
    let mut backwards = pursuing(SkillTier::Mid, ahead_right);

    let mut reversing = motion_at_origin(-5.0);
    reversing.velocity = DVec3::Z * -5.0;

    let rudder_forwards = forwards.drive(4.0, &motion_at_origin(5.0)).rudder;
    let rudder_backwards = backwards.drive(4.0, &reversing).rudder;

    assert!(rudder_forwards > 0.0);
    assert!((rudder_forwards + rudder_backwards).abs() < 1e-12);
}

#[test]
fn steering_is_clamped() {
    let behind_left = target(DVec3::new(-100.0, 0.0, 1.0), DVec3::Z);
    let mut controller = pursuing(SkillTier::Best, behind_left);
    let rudder = controller.drive(0.0, &motion_at_origin(1.0)).rudder;
    assert_eq!(rudder, -1.0);
}

#[test]
fn trailing_car_backs_off_after_contact() {
    let straight = target(DVec3::Z * 200.0, DVec3::Z);
    let mut controller = pursuing(SkillTier::Best, straight);
    let own = EntityLocation::new(DVec3::ZERO, DVec3::Z);

    // cruising at 80 under a desired 100: no braking
    assert!(!controller.drive(0.0, &motion_at_origin(80.0)).is_braking);

    // bumped into someone in front; desired drops to 75
    controller.on_contact(0.0, &own, DVec3::new(1.0, 0.0, 3.0));
    assert!(controller.is_avoiding(0.5));
    assert!(controller.drive(0.5, &motion_at_origin(80.0)).is_braking);

    // a second later we are back to normal
    assert!(!controller.is_avoiding(1.0));
    assert!(!controller.drive(1.0, &motion_at_origin(80.0)).is_braking);
}

#[test]
fn leading_car_keeps_its_speed() {
    let straight = target(DVec3::Z * 200.0, DVec3::Z);
    let mut controller = pursuing(SkillTier::Best, straight);
    let own = EntityLocation::new(DVec3::ZERO, DVec3::Z);

    controller.on_contact(0.0, &own, DVec3::new(1.0, 0.0, -3.0));
    assert!(controller.is_avoiding(0.1));
    assert!(!controller.drive(0.1, &motion_at_origin(80.0)).is_braking);
}

#[test]
fn contact_steers_away_from_the_other_car() {
    let close_ahead = target(DVec3::Z * 20.0, DVec3::Z);
    let own = EntityLocation::new(DVec3::ZERO, DVec3::Z);

    let mut hit_on_right = pursuing(SkillTier::Best, close_ahead);
    hit_on_right.on_contact(0.0, &own, DVec3::new(2.0, 0.0, 0.5));
    assert!(hit_on_right.drive(0.2, &motion_at_origin(10.0)).rudder < 0.0);

    let mut hit_on_left = pursuing(SkillTier::Best, close_ahead);
    hit_on_left.on_contact(0.0, &own, DVec3::new(-2.0, 0.0, 0.5));
    assert!(hit_on_left.drive(0.2, &motion_at_origin(10.0)).rudder > 0.0);
}

#[test]
fn autopilot_ignores_contact() {
    let mut controller = DrivingController::autopilot(3.0);
    controller.set_target(target(DVec3::Z * 200.0, DVec3::Z));
    let own = EntityLocation::new(DVec3::ZERO, DVec3::Z);

    controller.on_contact(0.0, &own, DVec3::new(0.0, 0.0, 3.0));
    assert!(!controller.is_avoiding(0.5));
}

#[test]
fn same_inputs_same_outputs() {
    let road = target(DVec3::new(10.0, 0.0, 40.0), DVec3::new(0.3, 0.0, 1.0));
    let mut a = pursuing(SkillTier::Mid, road);
    let mut b = pursuing(SkillTier::Mid, road);
    for tick in 0..50 {
        let now = tick as f64 * 0.02;
        assert_eq!(
            a.drive(now, &motion_at_origin(12.0)),
            b.drive(now, &motion_at_origin(12.0))
        );
    }
}
