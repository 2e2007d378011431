//! Read-only per-tick telemetry, split out from controller-owned state per
//! §9 ("mutable shared telemetry fields" redesign): the controller writes
//! this record once per `compute`, collaborators only ever read it.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use simcore::Input;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlTelemetry {
    pub input: Input,
    /// Sliding-surface values `(s_x, s_y, s_z)`. Zero for algorithms with no
    /// surface concept (PID, MPC).
    pub sliding_surfaces: Vector3<f64>,
    /// `N+1` predicted world-frame positions for the receding-horizon
    /// controller, empty for every other algorithm.
    pub mpc_horizon: Vec<Vector3<f64>>,
}
