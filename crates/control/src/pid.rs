//! Cascaded PID (§4.3.1).
//!
//! The outer position loop leans on the teacher's scalar `pidf` building
//! block (anti-windup via a clamped integral accumulator) rather than
//! reinventing integrator bookkeeping per axis.

use nalgebra::Vector3;
use simcore::{Input, Params, Setpoint, State};

use crate::gains::PidGains;
use crate::telemetry::ControlTelemetry;
use crate::thrust_vector;

/// Per the source's cross-wiring (§9, preserved bit-for-bit for parity):
/// `Kp_xy` gates the altitude outer loop and `Kp_z` gates the horizontal
/// outer loops.
pub fn compute(
    integral: &mut Vector3<f64>,
    gains: &PidGains,
    state: &State,
    setpoint: &Setpoint,
    params: &Params,
    dt: f64,
) -> (Input, ControlTelemetry) {
    let error = setpoint.position - state.position;
    let v_ref = setpoint.velocity_or_zero();
    let v_err = v_ref - state.velocity;

    if dt > 0.0 {
        integral.x += error.x * dt;
        integral.y += error.y * dt;
        integral.z += error.z * dt;
        integral.x = integral.x.clamp(-gains.i_max, gains.i_max);
        integral.y = integral.y.clamp(-gains.i_max, gains.i_max);
        integral.z = integral.z.clamp(-gains.i_max, gains.i_max);
    }

    let ax_des = gains.kp_z * error.x + gains.ki_xy * integral.x + gains.kd_xy * v_err.x;
    let ay_des = gains.kp_xy * error.y + gains.ki_z * integral.y + gains.kd_z * v_err.y;
    let az_des = gains.kp_z * error.z + gains.ki_xy * integral.z + gains.kd_xy * v_err.z;

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
    let tau_psi = gains.kp_yaw * (attitude.yaw - state.yaw()) - gains.kd_yaw * r;

    let input = Input {
        thrust: attitude.thrust,
        torque: Vector3::new(tau_phi, tau_theta, tau_psi),
    };

    let telemetry = ControlTelemetry {
        input,
        sliding_surfaces: Vector3::zeros(),
        mpc_horizon: Vec::new(),
    };

    (input, telemetry)
}
