//! First-order sliding mode (§4.3.2). No persistent state: every tick
//! recomputes the sliding surface from scratch, so chattering in the
//! control output is expected at the boundary-layer edge — see STS (§4.3.3)
//! for the continuous alternative.

use nalgebra::Vector3;
use simcore::{Input, Params, Setpoint, State};

use crate::gains::SmcGains;
use crate::telemetry::ControlTelemetry;
use crate::thrust_vector;

/// `sat(s, phi) = clamp(s/phi, -1, 1)` for `phi > 0`, else `sign(s)` with
/// `sign(0) = 0`.
pub fn sat(s: f64, phi: f64) -> f64 {
    if phi > 0.0 {
        (s / phi).clamp(-1.0, 1.0)
    } else if s > 0.0 {
        1.0
    } else if s < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn surface(v_err: f64, pos_err: f64, lambda: f64) -> f64 {
    v_err + lambda * pos_err
}

pub fn compute(
    gains: &SmcGains,
    state: &State,
    setpoint: &Setpoint,
    params: &Params,
) -> (Input, ControlTelemetry) {
    let error = setpoint.position - state.position;
    let v_ref = setpoint.velocity_or_zero();
    let v_err = v_ref - state.velocity;

    let s_x = surface(v_err.x, error.x, gains.lambda_xy);
    let s_y = surface(v_err.y, error.y, gains.lambda_z);
    let s_z = surface(v_err.z, error.z, gains.lambda_xy);

    let ax_des = gains.lambda_xy * v_err.x + gains.eta_xy * sat(s_x, gains.phi_xy);
    let ay_des = gains.lambda_z * v_err.y + gains.eta_z * sat(s_y, gains.phi_z);
    let az_des = gains.lambda_xy * v_err.z + gains.eta_xy * sat(s_z, gains.phi_xy);

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
    let s_phi = -p + gains.lambda_att * (attitude.roll - state.roll());
    let s_theta = -q + gains.lambda_att * (attitude.pitch - state.pitch());
    let s_psi = -r + gains.lambda_att * (0.0 - state.yaw());

    let tau_phi = params.ixx() * (gains.lambda_att * (-p) + gains.eta_att * sat(s_phi, gains.phi_att));
    let tau_theta =
        params.iyy() * (gains.lambda_att * (-q) + gains.eta_att * sat(s_theta, gains.phi_att));
    let tau_psi = params.izz() * (gains.lambda_att * (-r) + gains.eta_att * sat(s_psi, gains.phi_att));

    let input = Input {
        thrust: attitude.thrust,
        torque: Vector3::new(tau_phi, tau_theta, tau_psi),
    };

    let telemetry = ControlTelemetry {
        input,
        sliding_surfaces: Vector3::new(s_x, s_y, s_z),
        mpc_horizon: Vec::new(),
    };

    (input, telemetry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sat_is_zero_at_zero_with_zero_boundary_layer() {
        assert_abs_diff_eq!(sat(0.0, 0.0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn sat_saturates_to_unit_sign_outside_the_boundary_layer() {
        assert_abs_diff_eq!(sat(10.0, 0.5), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(sat(-10.0, 0.5), -1.0, epsilon = 1e-9);
    }

    #[test]
    fn sat_is_linear_and_continuous_inside_the_boundary_layer() {
        let phi = 0.6;
        assert_abs_diff_eq!(sat(0.3, phi), 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(sat(-0.3, phi), -0.5, epsilon = 1e-9);
    }

    #[test]
    fn zero_boundary_layer_at_zero_surface_yields_zero_desired_acceleration() {
        let params = Params::default();
        let gains = SmcGains {
            phi_xy: 0.0,
            phi_z: 0.0,
            ..SmcGains::default()
        };
        let state = State {
            position: Vector3::new(0.0, 3.0, 0.0),
            ..State::default()
        };
        let setpoint = Setpoint::hold(Vector3::new(0.0, 3.0, 0.0), 0.0);
        let (input, _telemetry) = compute(&gains, &state, &setpoint, &params);
        assert_abs_diff_eq!(input.thrust, params.mass * params.gravity, epsilon = 1e-6);
    }
}
