//! Library half of the host binary: everything except `main` lives here so
//! the orchestration loop can be driven headlessly from integration tests
//! without an `eframe` window.

pub mod app_ui;
pub mod config;
pub mod csv_log;
pub mod keyboard_input;
pub mod orchestrator;
