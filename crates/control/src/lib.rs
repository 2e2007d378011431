//! The controller suite: four algorithms sharing a cascaded
//! outer-position/inner-attitude decomposition over one common thrust-vector
//! inversion, selected at runtime and reset atomically on algorithm switch.

pub mod controller_state;
pub mod gains;
pub mod mpc;
pub mod pid;
pub mod smc;
pub mod sts;
pub mod telemetry;
pub mod thrust_vector;

pub use controller_state::ControllerState;
pub use gains::{Gains, MpcGains, PidGains, SmcGains, StsGains};
pub use telemetry::ControlTelemetry;

use simcore::{Params, Reset, SimError, Setpoint, State};

/// Owns the currently selected algorithm's gains and internal state, and
/// the most recently published telemetry.
#[derive(Debug, Clone)]
pub struct QuadController {
    gains: Gains,
    state: ControllerState,
    telemetry: ControlTelemetry,
}

impl Default for QuadController {
    fn default() -> Self {
        Self {
            gains: Gains::default(),
            state: ControllerState::default_for("PID").expect("PID is always a valid algorithm id"),
            telemetry: ControlTelemetry::default(),
        }
    }
}

impl QuadController {
    pub fn new(algorithm_id: &str) -> Result<Self, SimError> {
        let mut controller = Self::default();
        controller.set_algorithm(algorithm_id)?;
        Ok(controller)
    }

    pub fn algorithm_id(&self) -> &'static str {
        self.state.algorithm_id()
    }

    pub fn gains(&self) -> Gains {
        self.gains
    }

    pub fn telemetry(&self) -> &ControlTelemetry {
        &self.telemetry
    }

    /// Switch algorithms, resetting internal state and restoring that
    /// algorithm's default gains. Mandatory reset per §4.3's "Reset
    /// semantics".
    pub fn set_algorithm(&mut self, id: &str) -> Result<(), SimError> {
        let state = ControllerState::default_for(id).ok_or_else(|| {
            log::warn!("rejected unknown algorithm id: {id}");
            SimError::UnknownAlgorithm(id.to_string())
        })?;
        let gains = match id {
            "PID" => Gains::Pid(PidGains::default()),
            "SMC" => Gains::Smc(SmcGains::default()),
            "STS" => Gains::Sts(StsGains::default()),
            "MPC" => Gains::Mpc(MpcGains::default()),
            _ => unreachable!("id already validated by ControllerState::default_for"),
        };
        log::info!("switching algorithm: {} -> {id}", self.algorithm_id());
        self.state = state;
        self.gains = gains;
        self.telemetry = ControlTelemetry::default();
        Ok(())
    }

    /// Replace the gain set. Rejected if the gain variant's algorithm tag
    /// doesn't match the currently selected algorithm.
    pub fn set_gains(&mut self, gains: Gains) -> Result<(), SimError> {
        if gains.algorithm_id() != self.algorithm_id() {
            let reason = format!(
                "gain set is for {} but controller is running {}",
                gains.algorithm_id(),
                self.algorithm_id()
            );
            log::warn!("rejected gain set: {reason}");
            return Err(SimError::InvalidGainSet {
                algorithm: self.algorithm_id().to_string(),
                reason,
            });
        }
        self.gains = gains;
        Ok(())
    }

    /// One control tick. `ref_fn` is used only by the predictive controller
    /// for horizon sampling; every other algorithm ignores it.
    pub fn compute(
        &mut self,
        state: &State,
        setpoint: &Setpoint,
        params: &Params,
        t_now: f64,
        dt: f64,
        ref_fn: &dyn Fn(f64) -> Setpoint,
    ) -> simcore::Input {
        let (input, telemetry) = match (&mut self.state, &self.gains) {
            (ControllerState::Pid { integral }, Gains::Pid(gains)) => {
                pid::compute(integral, gains, state, setpoint, params, dt)
            }
            (ControllerState::Smc, Gains::Smc(gains)) => smc::compute(gains, state, setpoint, params),
            (
                ControllerState::Sts {
                    v,
                    v_phi,
                    v_theta,
                    v_psi,
                },
                Gains::Sts(gains),
            ) => sts::compute(v, v_phi, v_theta, v_psi, gains, state, setpoint, params, dt),
            (ControllerState::Mpc { last_horizon }, Gains::Mpc(gains)) => {
                let (input, telemetry) = mpc::compute(gains, state, setpoint, params, t_now, dt, ref_fn);
                *last_horizon = telemetry.mpc_horizon.clone();
                (input, telemetry)
            }
            _ => unreachable!("gains and state are kept in lockstep by set_algorithm/set_gains"),
        };
        self.telemetry = telemetry;
        input
    }
}

impl Reset for QuadController {
    fn reset(&mut self) {
        self.state.reset();
        self.telemetry = ControlTelemetry::default();
    }
}
