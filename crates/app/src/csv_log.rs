//! CSV telemetry export (§6): a ring buffer of per-tick snapshots flushed
//! to disk through the `csv` crate — the pack's convention for ad-hoc
//! tabular export, not hand-rolled string joins.

use std::collections::VecDeque;
use std::path::Path;

use control::ControlTelemetry;
use serde::Serialize;
use simcore::{Setpoint, State};

#[derive(Debug, Clone, Serialize)]
pub struct TelemetryRow {
    pub time: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub phi: f64,
    pub theta: f64,
    pub psi: f64,
    pub p: f64,
    pub q: f64,
    pub r: f64,
    pub x_ref: f64,
    pub y_ref: f64,
    pub z_ref: f64,
    #[serde(rename = "T")]
    pub t_thrust: f64,
    pub tau_phi: f64,
    pub tau_theta: f64,
    pub tau_psi: f64,
    pub s_x: f64,
    pub s_y: f64,
    pub s_z: f64,
    pub m1: f64,
    pub m2: f64,
    pub m3: f64,
    pub m4: f64,
    pub algo: String,
}

impl TelemetryRow {
    pub fn sample(time: f64, state: &State, setpoint: &Setpoint, telemetry: &ControlTelemetry, algo: &str) -> Self {
        Self {
            time,
            x: state.position.x,
            y: state.position.y,
            z: state.position.z,
            vx: state.velocity.x,
            vy: state.velocity.y,
            vz: state.velocity.z,
            phi: state.attitude.x,
            theta: state.attitude.y,
            psi: state.attitude.z,
            p: state.rates.x,
            q: state.rates.y,
            r: state.rates.z,
            x_ref: setpoint.position.x,
            y_ref: setpoint.position.y,
            z_ref: setpoint.position.z,
            t_thrust: telemetry.input.thrust,
            tau_phi: telemetry.input.torque.x,
            tau_theta: telemetry.input.torque.y,
            tau_psi: telemetry.input.torque.z,
            s_x: telemetry.sliding_surfaces.x,
            s_y: telemetry.sliding_surfaces.y,
            s_z: telemetry.sliding_surfaces.z,
            m1: state.motor_speeds[0],
            m2: state.motor_speeds[1],
            m3: state.motor_speeds[2],
            m4: state.motor_speeds[3],
            algo: algo.to_string(),
        }
    }
}

/// Fixed-capacity ring buffer of telemetry rows, trimmed from the front as
/// new rows arrive.
pub struct TelemetryLog {
    rows: VecDeque<TelemetryRow>,
    capacity: usize,
}

impl TelemetryLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            rows: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, row: TelemetryRow) {
        self.rows.push_back(row);
        while self.rows.len() > self.capacity {
            self.rows.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_path(path)?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
