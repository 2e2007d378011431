//! The `KEYBOARD` reference source: an operator-driven setpoint integrated
//! from discrete axis inputs (§4.2).

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use simcore::{Reset, Setpoint};

/// One tick's worth of held keys, already debounced by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyboardAxes {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
}

const LATERAL_SPEED: f64 = 3.0;
const VERTICAL_SPEED: f64 = 3.0;
const YAW_RATE: f64 = 1.5;

/// Integrates [`KeyboardAxes`] into a running position/yaw setpoint.
#[derive(Debug, Clone, Copy)]
pub struct KeyboardChannel {
    position: Vector3<f64>,
    yaw: f64,
    initial_position: Vector3<f64>,
    initial_yaw: f64,
}

impl KeyboardChannel {
    pub fn new(initial_position: Vector3<f64>, initial_yaw: f64) -> Self {
        Self {
            position: initial_position,
            yaw: initial_yaw,
            initial_position,
            initial_yaw,
        }
    }

    /// Integrate one tick of held axes into the running setpoint. Altitude
    /// is clamped at ground level — the operator cannot fly below `y = 0`.
    /// Returns the instantaneous commanded velocity as feed-forward
    /// alongside the integrated position (§4.2).
    pub fn advance(&mut self, axes: KeyboardAxes, dt: f64) -> Setpoint {
        let forward = axes.forward as i32 as f64 - axes.backward as i32 as f64;
        let strafe = axes.right as i32 as f64 - axes.left as i32 as f64;
        let vertical = axes.up as i32 as f64 - axes.down as i32 as f64;
        let yaw_input = axes.yaw_right as i32 as f64 - axes.yaw_left as i32 as f64;

        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let world_x = forward * sin_yaw + strafe * cos_yaw;
        let world_z = forward * cos_yaw - strafe * sin_yaw;
        let commanded_velocity = Vector3::new(LATERAL_SPEED * world_x, VERTICAL_SPEED * vertical, LATERAL_SPEED * world_z);

        self.position += commanded_velocity * dt;
        self.position.y = self.position.y.max(0.0);
        self.yaw += YAW_RATE * yaw_input * dt;

        Setpoint {
            position: self.position,
            velocity: Some(commanded_velocity),
            yaw: self.yaw,
        }
    }

    pub fn current(&self) -> Setpoint {
        Setpoint {
            position: self.position,
            velocity: None,
            yaw: self.yaw,
        }
    }
}

impl Reset for KeyboardChannel {
    /// Returns to the freshly-constructed state: the position/yaw passed to
    /// `new`, not the origin.
    fn reset(&mut self) {
        self.position = self.initial_position;
        self.yaw = self.initial_yaw;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn forward_at_zero_yaw_moves_along_positive_z() {
        let mut channel = KeyboardChannel::new(Vector3::zeros(), 0.0);
        let axes = KeyboardAxes {
            forward: true,
            ..Default::default()
        };
        let sp = channel.advance(axes, 1.0);
        assert_abs_diff_eq!(sp.position.z, LATERAL_SPEED, epsilon = 1e-9);
        assert_abs_diff_eq!(sp.position.x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn altitude_is_clamped_at_ground_level() {
        let mut channel = KeyboardChannel::new(Vector3::zeros(), 0.0);
        let axes = KeyboardAxes {
            down: true,
            ..Default::default()
        };
        let sp = channel.advance(axes, 10.0);
        assert_abs_diff_eq!(sp.position.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn yaw_rotates_the_commanded_lateral_frame() {
        let mut channel = KeyboardChannel::new(Vector3::zeros(), 0.0);
        channel.advance(
            KeyboardAxes {
                yaw_right: true,
                ..Default::default()
            },
            std::f64::consts::FRAC_PI_2 / YAW_RATE,
        );
        let sp = channel.advance(
            KeyboardAxes {
                forward: true,
                ..Default::default()
            },
            1.0,
        );
        assert_abs_diff_eq!(sp.position.x, LATERAL_SPEED, epsilon = 1e-6);
    }

    #[test]
    fn advance_reports_commanded_velocity_as_feed_forward() {
        let mut channel = KeyboardChannel::new(Vector3::zeros(), 0.0);
        let axes = KeyboardAxes {
            forward: true,
            up: true,
            ..Default::default()
        };
        let sp = channel.advance(axes, 0.5);
        let velocity = sp.velocity.expect("keyboard channel always reports a feed-forward velocity");
        assert_abs_diff_eq!(velocity.z, LATERAL_SPEED, epsilon = 1e-9);
        assert_abs_diff_eq!(velocity.y, VERTICAL_SPEED, epsilon = 1e-9);
    }

    #[test]
    fn reset_returns_to_the_constructed_initial_state_not_the_origin() {
        let initial_position = Vector3::new(1.0, 2.0, 3.0);
        let mut channel = KeyboardChannel::new(initial_position, 0.4);
        channel.advance(
            KeyboardAxes {
                forward: true,
                ..Default::default()
            },
            1.0,
        );
        channel.reset();
        let sp = channel.current();
        assert_eq!(sp.position, initial_position);
        assert_eq!(sp.yaw, 0.4);
    }
}
