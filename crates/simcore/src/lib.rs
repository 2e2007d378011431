//! Shared numeric vocabulary, error taxonomy, and fixed-step integrator
//! underlying the quadrotor dynamics, reference, and control crates.

pub mod error;
pub mod integrators;
pub mod state;

pub use error::SimError;
pub use integrators::{rk4, FixedStepAccumulator, Integrable};
pub use state::{Input, MotorAllocation, Params, SimContext, Setpoint, State, Wind, STANDARD_GRAVITY};

/// Lifecycle hook shared by every stateful component (controllers, the
/// keyboard channel, the custom-waypoint walker): return to the
/// freshly-constructed state. Mandatory on algorithm switch (§4.3).
pub trait Reset {
    fn reset(&mut self);
}
