//! 6-DOF nonlinear rigid-body dynamics: body->world rotation, Euler-angle
//! kinematics, aerodynamic drag, wind forcing, RK4 integration, and the
//! ground-contact clamp.

use nalgebra::Vector3;
use simcore::{rk4, Input, Integrable, Params, State, Wind};

use crate::mixing;

/// The 12 integrated scalars, separated from [`State`] because the four
/// motor speeds are telemetry derived *after* integration, not themselves
/// integrated.
#[derive(Debug, Clone, Copy)]
struct Vector12 {
    position: Vector3<f64>,
    velocity: Vector3<f64>,
    attitude: Vector3<f64>,
    rates: Vector3<f64>,
}

impl Integrable for Vector12 {
    fn add_scaled(&self, derivative: &Self, scale: f64) -> Self {
        Self {
            position: self.position + derivative.position * scale,
            velocity: self.velocity + derivative.velocity * scale,
            attitude: self.attitude + derivative.attitude * scale,
            rates: self.rates + derivative.rates * scale,
        }
    }
}

impl From<&State> for Vector12 {
    fn from(s: &State) -> Self {
        Self {
            position: s.position,
            velocity: s.velocity,
            attitude: s.attitude,
            rates: s.rates,
        }
    }
}

/// `f(s, u, env)`: the 12 time-derivatives (§4.1).
///
/// `cos(theta)` is not guarded against zero — the trajectory/controller
/// layer is responsible for keeping `|theta| < pi/2 - eps` (§4, §7).
fn derivative(s: &Vector12, input: &Input, wind: &Wind, params: &Params) -> Vector12 {
    let (phi, theta, psi) = (s.attitude.x, s.attitude.y, s.attitude.z);
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_psi, cos_psi) = psi.sin_cos();

    let thrust_world = Vector3::new(
        input.thrust * (cos_psi * sin_theta * cos_phi + sin_psi * sin_phi),
        input.thrust * (cos_theta * cos_phi),
        input.thrust * (sin_psi * sin_theta * cos_phi - cos_psi * sin_phi),
    );

    let velocity_dot = thrust_world / params.mass - Vector3::new(0.0, params.gravity, 0.0)
        - params.linear_drag * s.velocity
        + wind.accel;

    let (p, q, r) = (s.rates.x, s.rates.y, s.rates.z);
    let attitude_dot = Vector3::new(
        p + theta.tan() * (sin_phi * q + cos_phi * r),
        cos_phi * q - sin_phi * r,
        (sin_phi * q + cos_phi * r) / cos_theta,
    );

    let (ixx, iyy, izz) = (params.ixx(), params.iyy(), params.izz());
    let rates_dot = Vector3::new(
        (input.torque.x - (izz - iyy) * q * r) / ixx,
        (input.torque.y - (ixx - izz) * p * r) / iyy,
        (input.torque.z - (iyy - ixx) * p * q) / izz,
    );

    Vector12 {
        position: s.velocity,
        velocity: velocity_dot,
        attitude: attitude_dot,
        rates: rates_dot,
    }
}

/// Advance `state` in place by one RK4 step of `dt` seconds, then apply the
/// ground-contact clamp and recompute telemetry motor speeds.
pub fn step(state: &mut State, input: Input, wind: Wind, params: &Params, dt: f64) {
    let v0 = Vector12::from(&*state);
    let v1 = rk4(&v0, dt, |s| derivative(s, &input, &wind, params));

    state.position = v1.position;
    state.velocity = v1.velocity;
    state.attitude = v1.attitude;
    state.rates = v1.rates;

    if state.position.y < 0.0 {
        log::debug!(
            "ground contact clamp: y={:.4} vy={:.4}",
            state.position.y,
            state.velocity.y
        );
        state.position.y = 0.0;
        state.velocity.y = state.velocity.y.max(0.0);
    }

    let alloc = mixing::allocate(&input, params);
    state.motor_speeds = alloc.speeds;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn hover_input(params: &Params) -> Input {
        Input {
            thrust: params.mass * params.gravity,
            torque: Vector3::zeros(),
        }
    }

    #[test]
    fn equilibrium_hover_drifts_negligibly_over_one_second() {
        let params = Params::default();
        let mut state = State {
            position: Vector3::new(0.0, 3.0, 0.0),
            ..State::default()
        };
        let input = hover_input(&params);
        let dt = 1.0 / 120.0;
        for _ in 0..120 {
            step(&mut state, input, Wind::default(), &params, dt);
        }
        assert_abs_diff_eq!(state.position.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(state.position.y, 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(state.position.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn ground_contact_clamps_altitude_and_downward_velocity() {
        let params = Params::default();
        let mut state = State {
            position: Vector3::new(0.0, 0.05, 0.0),
            velocity: Vector3::new(0.0, -5.0, 0.0),
            ..State::default()
        };
        step(&mut state, Input::default(), Wind::default(), &params, 1.0 / 120.0);
        assert!(state.position.y >= 0.0);
        assert!(state.velocity.y >= 0.0);
    }

    #[test]
    fn motor_speeds_stay_within_bounds() {
        let params = Params::default();
        let mut state = State::default();
        let input = Input {
            thrust: 1000.0,
            torque: Vector3::new(5.0, -5.0, 5.0),
        };
        step(&mut state, input, Wind::default(), &params, 1.0 / 120.0);
        for speed in state.motor_speeds {
            assert!(speed >= 0.0);
            assert!(speed <= params.max_motor_speed + 1e-9);
        }
    }

    #[test]
    fn wind_perturbs_free_fall_acceleration() {
        let params = Params::default();
        let mut still = State {
            position: Vector3::new(0.0, 3.0, 0.0),
            ..State::default()
        };
        let mut windy = still;
        let dt = 1.0 / 120.0;
        step(&mut still, Input::default(), Wind::default(), &params, dt);
        step(&mut windy, Input::default(), Wind::sample(5.0, 0.0), &params, dt);
        // wx, wy vanish at t=0 (pure sine terms); wz = 0.4*W*cos(0) != 0.
        assert!((still.velocity.z - windy.velocity.z).abs() > 1e-9);
    }
}
