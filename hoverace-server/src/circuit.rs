use glam::DVec3;
use hoverace_core::entity_location::EntityLocation;
use hoverace_core::vehicle::lap_info::WaypointIndex;

use crate::error::SetupError;

// One lap of the track as an ordered loop of waypoints. Segment i runs from
// waypoint i to waypoint i + 1, and the last waypoint joins back to the first.
#[derive(Clone, Debug)]
pub struct Circuit {
    waypoints: Vec<DVec3>,
}

impl Circuit {
    pub fn new(waypoints: Vec<DVec3>) -> Result<Circuit, SetupError> {
        if waypoints.len() < 2 {
            return Err(SetupError::TooFewWaypoints {
                found: waypoints.len(),
            });
        }
        Ok(Circuit { waypoints })
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn waypoint(&self, index: WaypointIndex) -> DVec3 {
        self.waypoints[index % self.waypoints.len()]
    }

    pub fn waypoints(&self) -> &[DVec3] {
        &self.waypoints
    }

    // (start, end) of the segment leaving waypoint `index`
    pub fn segment(&self, index: WaypointIndex) -> (DVec3, DVec3) {
        (self.waypoint(index), self.waypoint(index + 1))
    }

    pub fn segment_direction(&self, index: WaypointIndex) -> DVec3 {
        let (start, end) = self.segment(index);
        (end - start).normalize_or_zero()
    }

    // Pose an AI steers toward: sitting on the waypoint, facing down the
    // segment that leaves it
    pub fn target_pose(&self, index: WaypointIndex) -> EntityLocation {
        EntityLocation::new(self.waypoint(index), self.segment_direction(index))
    }

    pub fn fraction_of_segment_covered(&self, position: DVec3, index: WaypointIndex) -> f64 {
        let (start, end) = self.segment(index);
        fraction_of_segment_covered(position, start, end)
    }
}

// Scalar projection of (position - start) onto the segment, in units of the
// segment's length. Not clamped: off-path vehicles can read below 0 or above 1.
pub fn fraction_of_segment_covered(position: DVec3, segment_start: DVec3, segment_end: DVec3) -> f64 {
    let from_start = position - segment_start;
    let segment = segment_end - segment_start;
    let length_squared = segment.length_squared();
    if length_squared == 0.0 {
        return 0.0;
    }
    from_start.dot(segment) / length_squared
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Circuit {
        Circuit::new(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 100.0),
            DVec3::new(100.0, 0.0, 100.0),
            DVec3::new(100.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_degenerate_circuits() {
        assert_eq!(
            Circuit::new(vec![DVec3::ZERO]).unwrap_err(),
            SetupError::TooFewWaypoints { found: 1 }
        );
    }

    #[test]
    fn fraction_is_a_scalar_projection() {
        let start = DVec3::ZERO;
        let end = DVec3::new(0.0, 0.0, 10.0);

        assert_eq!(fraction_of_segment_covered(DVec3::new(3.0, 0.0, 2.5), start, end), 0.25);
        assert_eq!(fraction_of_segment_covered(DVec3::new(0.0, 0.0, 15.0), start, end), 1.5);
        assert_eq!(fraction_of_segment_covered(DVec3::new(0.0, 0.0, -5.0), start, end), -0.5);
    }

    #[test]
    fn last_segment_wraps_to_the_first_waypoint() {
        let circuit = square();
        let (start, end) = circuit.segment(3);
        assert_eq!(start, DVec3::new(100.0, 0.0, 0.0));
        assert_eq!(end, DVec3::ZERO);
        assert_eq!(circuit.waypoint(5), circuit.waypoint(1));
        assert!(circuit.segment_direction(3).abs_diff_eq(-DVec3::X, 1e-9));
    }

    #[test]
    fn target_pose_faces_down_the_next_segment() {
        let circuit = square();
        let pose = circuit.target_pose(1);
        assert_eq!(pose.position, DVec3::new(0.0, 0.0, 100.0));
        assert!(pose.forward().abs_diff_eq(DVec3::X, 1e-9));
    }
}
