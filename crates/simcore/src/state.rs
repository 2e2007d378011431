//! Shared numeric vocabulary: rigid-body state, plant parameters, control
//! input, setpoints, and the per-tick wind environment.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Standard gravity, m/s^2. Matches the default parameter set in the Glossary.
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Immutable plant parameters for a run.
///
/// Loaded once at `init` time and never mutated; changing tuning requires a
/// fresh `Params` and a `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Vehicle mass, kg.
    pub mass: f64,
    /// Local gravitational acceleration, m/s^2.
    pub gravity: f64,
    /// Principal body-frame inertias `(Ixx, Iyy, Izz)`, kg*m^2.
    pub inertia: Vector3<f64>,
    /// Arm length from centre of mass to a motor, m.
    pub arm_length: f64,
    /// Thrust coefficient, N/(rad/s)^2.
    pub thrust_coeff: f64,
    /// Drag-torque coefficient, N*m/(rad/s)^2.
    pub drag_coeff: f64,
    /// Translational aerodynamic drag coefficient (linear in velocity).
    pub linear_drag: f64,
    /// Maximum motor speed, rad/s.
    pub max_motor_speed: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            mass: 0.5,
            gravity: STANDARD_GRAVITY,
            inertia: Vector3::new(0.0023, 0.0023, 0.004),
            arm_length: 0.17,
            thrust_coeff: 2.98e-6,
            drag_coeff: 1.14e-7,
            linear_drag: 0.04,
            max_motor_speed: 2200.0,
        }
    }
}

impl Params {
    pub fn ixx(&self) -> f64 {
        self.inertia.x
    }
    pub fn iyy(&self) -> f64 {
        self.inertia.y
    }
    pub fn izz(&self) -> f64 {
        self.inertia.z
    }
}

/// Full 6-DOF rigid-body state plus the telemetry-only motor speeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// World-frame position, m. `y` is up.
    pub position: Vector3<f64>,
    /// World-frame linear velocity, m/s.
    pub velocity: Vector3<f64>,
    /// Euler angles `(roll, pitch, yaw)`, radians, ZYX intrinsic convention.
    pub attitude: Vector3<f64>,
    /// Body-frame angular rates `(p, q, r)`, rad/s.
    pub rates: Vector3<f64>,
    /// Motor speeds, rad/s, recomputed each tick for telemetry only.
    pub motor_speeds: [f64; 4],
}

impl Default for State {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            attitude: Vector3::zeros(),
            rates: Vector3::zeros(),
            motor_speeds: [0.0; 4],
        }
    }
}

impl State {
    pub fn roll(&self) -> f64 {
        self.attitude.x
    }
    pub fn pitch(&self) -> f64 {
        self.attitude.y
    }
    pub fn yaw(&self) -> f64 {
        self.attitude.z
    }
}

/// Total body-axis thrust and three body-axis torques.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Input {
    pub thrust: f64,
    pub torque: Vector3<f64>,
}

/// Desired position, optional feed-forward velocity, and desired yaw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Setpoint {
    pub position: Vector3<f64>,
    pub velocity: Option<Vector3<f64>>,
    pub yaw: f64,
}

impl Setpoint {
    pub fn hold(position: Vector3<f64>, yaw: f64) -> Self {
        Self {
            position,
            velocity: None,
            yaw,
        }
    }

    /// Feed-forward velocity, defaulting to zero when the pattern supplies none.
    pub fn velocity_or_zero(&self) -> Vector3<f64> {
        self.velocity.unwrap_or_else(Vector3::zeros)
    }
}

/// World-frame wind disturbance, added directly to linear acceleration
/// (§6: "three force components added to world-frame linear acceleration").
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub accel: Vector3<f64>,
}

impl Wind {
    /// Deterministic, reproducible wind sample: a fixed sum of sines scaled by
    /// intensity `w`. No entropy source — see §5.
    pub fn sample(intensity: f64, t: f64) -> Self {
        let wx = intensity * (0.5 * (1.7 * t).sin() + 0.5 * (0.3 * t).sin());
        let wy = intensity * 0.3 * (0.8 * t).sin();
        let wz = intensity * (0.4 * (1.2 * t).cos() + 0.3 * (2.1 * t).sin());
        Wind {
            accel: Vector3::new(wx, wy, wz),
        }
    }
}

/// Per-tick `(dt, t)` pair threaded through every `step_*` call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimContext {
    pub dt: f64,
    pub t: f64,
}

/// Motor speeds recomputed purely for telemetry, alongside a saturation flag
/// per motor (the allocator itself never feeds saturation back into dynamics).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotorAllocation {
    pub speeds: [f64; 4],
    pub saturated: [bool; 4],
}
