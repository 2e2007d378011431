//! Per-algorithm internal state as one tagged enum (§9): reset reconstructs
//! the variant in place rather than leaving fields half-migrated across an
//! algorithm switch.

use nalgebra::Vector3;
use simcore::Reset;

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerState {
    Pid {
        integral: Vector3<f64>,
    },
    /// First-order sliding mode carries no persistent numeric state beyond
    /// what `ControlTelemetry` already publishes each tick.
    Smc,
    Sts {
        v: Vector3<f64>,
        v_phi: f64,
        v_theta: f64,
        v_psi: f64,
    },
    Mpc {
        last_horizon: Vec<Vector3<f64>>,
    },
}

impl ControllerState {
    pub fn default_for(id: &str) -> Option<Self> {
        match id {
            "PID" => Some(ControllerState::Pid {
                integral: Vector3::zeros(),
            }),
            "SMC" => Some(ControllerState::Smc),
            "STS" => Some(ControllerState::Sts {
                v: Vector3::zeros(),
                v_phi: 0.0,
                v_theta: 0.0,
                v_psi: 0.0,
            }),
            "MPC" => Some(ControllerState::Mpc {
                last_horizon: Vec::new(),
            }),
            _ => None,
        }
    }

    pub fn algorithm_id(&self) -> &'static str {
        match self {
            ControllerState::Pid { .. } => "PID",
            ControllerState::Smc => "SMC",
            ControllerState::Sts { .. } => "STS",
            ControllerState::Mpc { .. } => "MPC",
        }
    }
}

impl Reset for ControllerState {
    fn reset(&mut self) {
        *self = ControllerState::default_for(self.algorithm_id())
            .expect("algorithm_id always round-trips through default_for");
    }
}
