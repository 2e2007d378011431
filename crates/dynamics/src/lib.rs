//! The plant: 6-DOF nonlinear rigid-body dynamics, RK4 integration,
//! ground-contact handling, and inverse motor allocation.

pub mod mixing;
pub mod rigid_body;

pub use mixing::{allocate, forward_mix};
pub use rigid_body::step;
