//! Super-twisting second-order sliding mode (§4.3.3): continuous control
//! law, eliminating the SMC boundary-layer chattering trade-off by driving
//! the surface to zero with a persistent integral accumulator instead of a
//! saturated feedback gain.

use nalgebra::Vector3;
use simcore::{Input, Params, Setpoint, State};

use crate::gains::StsGains;
use crate::telemetry::ControlTelemetry;
use crate::thrust_vector;

fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// One super-twisting axis: advances `v` by explicit Euler and returns the
/// continuous control `u`.
fn twist(s: f64, v: &mut f64, alpha1: f64, alpha2: f64, dt: f64) -> f64 {
    *v += -alpha2 * sign(s) * dt;
    alpha1 * s.abs().sqrt() * sign(s) + *v
}

fn surface(v_err: f64, pos_err: f64, lambda: f64) -> f64 {
    v_err + lambda * pos_err
}

#[allow(clippy::too_many_arguments)]
pub fn compute(
    v: &mut Vector3<f64>,
    v_phi: &mut f64,
    v_theta: &mut f64,
    v_psi: &mut f64,
    gains: &StsGains,
    state: &State,
    setpoint: &Setpoint,
    params: &Params,
    dt: f64,
) -> (Input, ControlTelemetry) {
    let error = setpoint.position - state.position;
    let v_ref = setpoint.velocity_or_zero();
    let v_err = v_ref - state.velocity;

    let s_x = surface(v_err.x, error.x, gains.lambda_xy);
    let s_y = surface(v_err.y, error.y, gains.lambda_z);
    let s_z = surface(v_err.z, error.z, gains.lambda_xy);

    let ax_des = twist(s_x, &mut v.x, gains.alpha1_xy, gains.alpha2_xy, dt);
    let ay_des = twist(s_y, &mut v.y, gains.alpha1_z, gains.alpha2_z, dt);
    let az_des = twist(s_z, &mut v.z, gains.alpha1_xy, gains.alpha2_xy, dt);

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

    let tau_phi = params.ixx() * twist(s_phi, v_phi, gains.alpha1_att, gains.alpha2_att, dt);
    let tau_theta = params.iyy() * twist(s_theta, v_theta, gains.alpha1_att, gains.alpha2_att, dt);
    let tau_psi = params.izz() * twist(s_psi, v_psi, gains.alpha1_att, gains.alpha2_att, dt);

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
