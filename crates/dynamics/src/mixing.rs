//! Motor allocation: inverse of the X-configuration mixing matrix, plus the
//! forward map used to check the round-trip property in §8.

use simcore::{Input, MotorAllocation, Params};
use std::f64::consts::SQRT_2;

/// Allocate `(T, tau_phi, tau_theta, tau_psi)` to four motor speeds.
///
/// Each `omega^2` is clamped to `[0, omega_max^2]` before the square root;
/// saturation is reported for telemetry only and never fed back into the
/// dynamics (the controller sees a perfect actuator).
pub fn allocate(input: &Input, params: &Params) -> MotorAllocation {
    let kt = params.thrust_coeff;
    let kd = params.drag_coeff;
    let l = params.arm_length;

    let a = input.thrust / (4.0 * kt);
    let b = input.torque.x * SQRT_2 / (4.0 * kt * l);
    let c = input.torque.y * SQRT_2 / (4.0 * kt * l);
    let d = input.torque.z / (4.0 * kd);

    let omega_sq = [
        a - b - c - d, // front-right, CW
        a - b + c + d, // front-left, CCW
        a + b + c - d, // rear-left, CW
        a + b - c + d, // rear-right, CCW
    ];

    let max_sq = params.max_motor_speed * params.max_motor_speed;
    let mut speeds = [0.0; 4];
    let mut saturated = [false; 4];
    for i in 0..4 {
        let clamped = omega_sq[i].clamp(0.0, max_sq);
        saturated[i] = clamped != omega_sq[i];
        speeds[i] = clamped.sqrt();
    }

    MotorAllocation { speeds, saturated }
}

/// Forward mixing: reconstruct `(T, tau_phi, tau_theta, tau_psi)` from four
/// motor speeds. Inverse of [`allocate`] when no axis saturates (§8).
pub fn forward_mix(speeds: [f64; 4], params: &Params) -> Input {
    let kt = params.thrust_coeff;
    let kd = params.drag_coeff;
    let l = params.arm_length;

    let omega_sq: [f64; 4] = std::array::from_fn(|i| speeds[i] * speeds[i]);
    let [o1, o2, o3, o4] = omega_sq;

    let a = (o1 + o2 + o3 + o4) / 4.0;
    let b = (-o1 - o2 + o3 + o4) / 4.0;
    let c = (-o1 + o2 + o3 - o4) / 4.0;
    let d = (-o1 + o2 - o3 + o4) / 4.0;

    Input {
        thrust: 4.0 * kt * a,
        torque: nalgebra::Vector3::new(4.0 * kt * l * b / SQRT_2, 4.0 * kt * l * c / SQRT_2, 4.0 * kd * d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn round_trip_reproduces_input_without_saturation() {
        let params = Params::default();
        let input = Input {
            thrust: params.mass * params.gravity,
            torque: nalgebra::Vector3::new(0.01, -0.02, 0.005),
        };
        let alloc = allocate(&input, &params);
        assert!(alloc.saturated.iter().all(|&s| !s));

        let recovered = forward_mix(alloc.speeds, &params);
        assert_abs_diff_eq!(recovered.thrust, input.thrust, epsilon = 1e-9);
        assert_abs_diff_eq!(recovered.torque.x, input.torque.x, epsilon = 1e-9);
        assert_abs_diff_eq!(recovered.torque.y, input.torque.y, epsilon = 1e-9);
        assert_abs_diff_eq!(recovered.torque.z, input.torque.z, epsilon = 1e-9);
    }

    #[test]
    fn allocation_clamps_to_motor_speed_bounds() {
        let params = Params::default();
        let input = Input {
            thrust: 1_000_000.0,
            torque: nalgebra::Vector3::zeros(),
        };
        let alloc = allocate(&input, &params);
        assert!(alloc.saturated.iter().all(|&s| s));
        for speed in alloc.speeds {
            assert!(speed <= params.max_motor_speed + 1e-9);
            assert!(speed >= 0.0);
        }
    }

    #[test]
    fn allocation_never_goes_negative_under_large_negative_torque() {
        let params = Params::default();
        let input = Input {
            thrust: 0.1,
            torque: nalgebra::Vector3::new(10.0, 10.0, 10.0),
        };
        let alloc = allocate(&input, &params);
        for speed in alloc.speeds {
            assert!(speed >= 0.0);
        }
    }
}
