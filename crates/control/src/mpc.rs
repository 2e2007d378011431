//! Receding-horizon predictive control (§4.3.4): a closed-form
//! weighted-heuristic stand-in for a constrained QP solve, as the
//! Non-goals explicitly permit.

use nalgebra::Vector3;
use simcore::{Input, Params, Setpoint, State};

use crate::gains::MpcGains;
use crate::telemetry::ControlTelemetry;
use crate::thrust_vector;

/// One translational axis' weighted-horizon heuristic (§4.3.4's formula,
/// applied independently to x, y, z).
fn axis_command(
    pos: f64,
    vel: f64,
    gains: &MpcGains,
    dt_pred: f64,
    t_now: f64,
    axis: impl Fn(f64) -> f64,
) -> f64 {
    let n = gains.n;
    let mut sum = 0.0;
    let mut weight_sum = 0.0;
    for k in 1..=n {
        let t_k = t_now + (k as f64) * dt_pred;
        let ref_k = axis(t_k);
        let pred_k = pos + vel * (k as f64) * dt_pred;
        let e_k = ref_k - pred_k;
        let w_k = 1.0 - 0.3 * ((k - 1) as f64) / (n as f64);
        sum += w_k * (gains.q_pos * e_k - gains.q_vel * vel);
        weight_sum += w_k;
    }
    sum / (weight_sum * (1.0 + gains.r))
}

/// `N+1` samples of the constant-velocity rollout, published purely for the
/// renderer: index 0 is the current position, unmodified.
fn rollout(state: &State, gains: &MpcGains, dt_pred: f64) -> Vec<Vector3<f64>> {
    let mut horizon = Vec::with_capacity(gains.n as usize + 1);
    horizon.push(state.position);
    for k in 1..=gains.n {
        horizon.push(state.position + state.velocity * (k as f64) * dt_pred);
    }
    horizon
}

pub fn compute(
    gains: &MpcGains,
    state: &State,
    setpoint: &Setpoint,
    params: &Params,
    t_now: f64,
    dt: f64,
    ref_fn: &dyn Fn(f64) -> Setpoint,
) -> (Input, ControlTelemetry) {
    let dt_pred = 2.0 * dt;

    let ax_des = axis_command(state.position.x, state.velocity.x, gains, dt_pred, t_now, |t| {
        ref_fn(t).position.x
    });
    let ay_des = axis_command(state.position.y, state.velocity.y, gains, dt_pred, t_now, |t| {
        ref_fn(t).position.y
    });
    let az_des = axis_command(state.position.z, state.velocity.z, gains, dt_pred, t_now, |t| {
        ref_fn(t).position.z
    });

    let attitude = thrust_vector::invert(
        ax_des,
        ay_des,
        az_des,
        setpoint.yaw,
        params,
        state.roll(),
        state.pitch(),
    );

    let (p, q, r) = (state.rates.x, state.rates.y, state.rates.z);
    let tau_phi = gains.kp_att * (attitude.roll - state.roll()) - gains.kd_att * p;
    let tau_theta = gains.kp_att * (attitude.pitch - state.pitch()) - gains.kd_att * q;
    let tau_psi = gains.kp_att * (attitude.yaw - state.yaw()) - gains.kd_att * r;

    let input = Input {
        thrust: attitude.thrust,
        torque: Vector3::new(tau_phi, tau_theta, tau_psi),
    };

    let telemetry = ControlTelemetry {
        input,
        sliding_surfaces: Vector3::zeros(),
        mpc_horizon: rollout(state, gains, dt_pred),
    };

    (input, telemetry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn horizon_has_n_plus_one_entries_and_starts_at_current_position() {
        let params = Params::default();
        let gains = MpcGains::default();
        let state = State {
            position: Vector3::new(1.0, 2.0, 3.0),
            ..State::default()
        };
        let setpoint = Setpoint::hold(Vector3::zeros(), 0.0);
        let ref_fn = |_t: f64| Setpoint::hold(Vector3::zeros(), 0.0);
        let (_input, telemetry) = compute(&gains, &state, &setpoint, &params, 0.0, 1.0 / 120.0, &ref_fn);
        assert_eq!(telemetry.mpc_horizon.len(), gains.n as usize + 1);
        assert_abs_diff_eq!(telemetry.mpc_horizon[0].x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(telemetry.mpc_horizon[0].y, 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(telemetry.mpc_horizon[0].z, 3.0, epsilon = 1e-6);
    }

    #[test]
    fn tracking_a_stationary_setpoint_ahead_pulls_acceleration_toward_it() {
        let params = Params::default();
        let gains = MpcGains::default();
        let state = State::default();
        let setpoint = Setpoint::hold(Vector3::new(5.0, 0.0, 0.0), 0.0);
        let ref_fn = |_t: f64| Setpoint::hold(Vector3::new(5.0, 0.0, 0.0), 0.0);
        let (input, _telemetry) = compute(&gains, &state, &setpoint, &params, 0.0, 1.0 / 120.0, &ref_fn);
        // a target ahead on +x drives a positive desired pitch, hence a positive pitch torque.
        assert!(input.torque.y > 0.0);
    }
}
