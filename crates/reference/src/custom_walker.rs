//! The `CUSTOM` reference source: a stateful walker over a user-supplied
//! waypoint list, advanced one fixed tick at a time (§4.2, §9 REDESIGN).
//!
//! Unlike the analytic [`crate::patterns::Pattern`] family this is driven
//! explicitly by the orchestrator — it is not reachable through
//! `evaluate(pattern, t)` because its output depends on its own history,
//! not on `t` alone.

use nalgebra::Vector3;
use simcore::{Reset, SimError, Setpoint};

use crate::patterns::smoothstep;

/// Walks a closed loop of waypoints, smoothstep-interpolating between
/// consecutive pairs at a constant nominal speed.
#[derive(Debug, Clone)]
pub struct CustomWalker {
    waypoints: Vec<Vector3<f64>>,
    speed: f64,
    segment: usize,
    segment_tau: f64,
}

impl CustomWalker {
    /// Rejects fewer than two waypoints — a walker cannot interpolate a
    /// single point.
    pub fn new(waypoints: Vec<Vector3<f64>>, speed: f64) -> Result<Self, SimError> {
        if waypoints.len() < 2 {
            return Err(SimError::InvalidWaypointList(format!(
                "need at least 2 waypoints, got {}",
                waypoints.len()
            )));
        }
        if speed <= 0.0 {
            return Err(SimError::InvalidWaypointList(format!(
                "speed must be positive, got {speed}"
            )));
        }
        Ok(Self {
            waypoints,
            speed,
            segment: 0,
            segment_tau: 0.0,
        })
    }

    fn segment_duration(&self, segment: usize) -> f64 {
        let from = self.waypoints[segment];
        let to = self.waypoints[(segment + 1) % self.waypoints.len()];
        ((to - from).norm() / self.speed).max(1e-6)
    }

    /// Advance the walker by `dt` seconds and return the interpolated
    /// setpoint at the new position.
    pub fn advance(&mut self, dt: f64) -> Setpoint {
        let mut remaining = dt;
        loop {
            let duration = self.segment_duration(self.segment);
            let room = duration - self.segment_tau;
            if remaining < room {
                self.segment_tau += remaining;
                break;
            }
            remaining -= room;
            self.segment_tau = 0.0;
            self.segment = (self.segment + 1) % self.waypoints.len();
        }

        let from = self.waypoints[self.segment];
        let to = self.waypoints[(self.segment + 1) % self.waypoints.len()];
        let duration = self.segment_duration(self.segment);
        let s = smoothstep(self.segment_tau / duration);
        Setpoint {
            position: from + (to - from) * s,
            velocity: None,
            yaw: 0.0,
        }
    }

    pub fn waypoints(&self) -> &[Vector3<f64>] {
        &self.waypoints
    }

    /// Current position without advancing — used for the frozen-horizon
    /// approximation when a predictive controller samples a custom path.
    pub fn current(&self) -> Setpoint {
        let from = self.waypoints[self.segment];
        let to = self.waypoints[(self.segment + 1) % self.waypoints.len()];
        let duration = self.segment_duration(self.segment);
        let s = smoothstep(self.segment_tau / duration);
        Setpoint {
            position: from + (to - from) * s,
            velocity: None,
            yaw: 0.0,
        }
    }
}

impl Reset for CustomWalker {
    fn reset(&mut self) {
        self.segment = 0;
        self.segment_tau = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square_walker() -> CustomWalker {
        CustomWalker::new(
            vec![
                Vector3::new(0.0, 3.0, 0.0),
                Vector3::new(4.0, 3.0, 0.0),
                Vector3::new(4.0, 3.0, 4.0),
                Vector3::new(0.0, 3.0, 4.0),
            ],
            2.0,
        )
        .unwrap()
    }

    #[test]
    fn rejects_fewer_than_two_waypoints() {
        let err = CustomWalker::new(vec![Vector3::zeros()], 1.0);
        assert!(matches!(err, Err(SimError::InvalidWaypointList(_))));
    }

    #[test]
    fn starts_at_the_first_waypoint() {
        let mut walker = square_walker();
        let sp = walker.advance(0.0);
        assert_abs_diff_eq!(sp.position.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(sp.position.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn cycles_back_around_the_loop() {
        let mut walker = square_walker();
        let total_duration: f64 = (0..4).map(|i| walker.segment_duration(i)).sum();
        let start = walker.current();
        let back_around = walker.advance(total_duration);
        assert_abs_diff_eq!(start.position.x, back_around.position.x, epsilon = 1e-6);
        assert_abs_diff_eq!(start.position.z, back_around.position.z, epsilon = 1e-6);
    }

    #[test]
    fn reset_returns_to_the_first_segment() {
        let mut walker = square_walker();
        walker.advance(1.0);
        walker.reset();
        let sp = walker.current();
        assert_abs_diff_eq!(sp.position.x, 0.0, epsilon = 1e-9);
    }
}
