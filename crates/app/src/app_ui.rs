//! The host frame loop: `eframe`/`egui` drives the frame callback, dividing
//! elapsed wall-clock time into fixed physics substeps (§5's accumulator
//! pattern, grounded on the teacher's `FixedStepAccumulator`), capped per
//! frame to avoid a spiral-of-death after a stall.

use std::collections::VecDeque;
use std::time::Instant;

use egui_plot::{Legend, Line, Plot, PlotPoints};
use simcore::FixedStepAccumulator;

use crate::config::AppConfig;
use crate::csv_log::{TelemetryLog, TelemetryRow};
use crate::keyboard_input;
use crate::orchestrator::{Orchestrator, FIXED_DT};

const ALGORITHMS: [&str; 4] = ["PID", "SMC", "STS", "MPC"];
const PATTERNS: [&str; 6] = ["HOVER", "CIRCLE", "HELIX", "FIGURE8", "SQUARE", "STEP"];
const MAX_SUBSTEPS_PER_FRAME: u32 = 240;

struct Trace {
    t: VecDeque<f64>,
    x: VecDeque<f64>,
    y: VecDeque<f64>,
    z: VecDeque<f64>,
    x_ref: VecDeque<f64>,
    y_ref: VecDeque<f64>,
    z_ref: VecDeque<f64>,
    capacity: usize,
}

impl Trace {
    fn new(capacity: usize) -> Self {
        Self {
            t: VecDeque::with_capacity(capacity),
            x: VecDeque::with_capacity(capacity),
            y: VecDeque::with_capacity(capacity),
            z: VecDeque::with_capacity(capacity),
            x_ref: VecDeque::with_capacity(capacity),
            y_ref: VecDeque::with_capacity(capacity),
            z_ref: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, t: f64, pos: nalgebra::Vector3<f64>, pos_ref: nalgebra::Vector3<f64>) {
        self.t.push_back(t);
        self.x.push_back(pos.x);
        self.y.push_back(pos.y);
        self.z.push_back(pos.z);
        self.x_ref.push_back(pos_ref.x);
        self.y_ref.push_back(pos_ref.y);
        self.z_ref.push_back(pos_ref.z);
        while self.t.len() > self.capacity {
            self.t.pop_front();
            self.x.pop_front();
            self.y.pop_front();
            self.z.pop_front();
            self.x_ref.pop_front();
            self.y_ref.pop_front();
            self.z_ref.pop_front();
        }
    }

    fn line<'a>(series: &'a VecDeque<f64>, t: &'a VecDeque<f64>) -> PlotPoints<'a> {
        PlotPoints::from_iter(t.iter().copied().zip(series.iter().copied()).map(|(x, y)| [x, y]))
    }
}

pub struct QuadSimApp {
    orchestrator: Orchestrator,
    accumulator: FixedStepAccumulator,
    last_frame: Instant,
    paused: bool,
    sim_speed: f64,
    algorithm_idx: usize,
    pattern_idx: usize,
    trace: Trace,
    log: TelemetryLog,
    export_path: String,
    export_status: Option<String>,
}

impl QuadSimApp {
    pub fn new(config: AppConfig) -> Self {
        let orchestrator = Orchestrator::new(config.params, &config.algorithm, &config.pattern)
            .unwrap_or_else(|err| {
                log::warn!("{err}; falling back to PID/HOVER defaults");
                Orchestrator::new(config.params, "PID", "HOVER").expect("PID/HOVER is always valid")
            });
        let algorithm_idx = ALGORITHMS
            .iter()
            .position(|id| *id == orchestrator.controller.algorithm_id())
            .unwrap_or(0);
        let mut app = Self {
            orchestrator,
            accumulator: FixedStepAccumulator::new(FIXED_DT),
            last_frame: Instant::now(),
            paused: false,
            sim_speed: 1.0,
            algorithm_idx,
            pattern_idx: 0,
            trace: Trace::new(2400),
            log: TelemetryLog::new(6000),
            export_path: "telemetry.csv".to_string(),
            export_status: None,
        };
        app.orchestrator.wind_intensity = config.wind_intensity;
        app
    }

    fn reset(&mut self) {
        self.orchestrator.reset();
        self.trace = Trace::new(self.trace.capacity);
        self.log.clear();
    }

}

impl eframe::App for QuadSimApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.paused {
            let now = Instant::now();
            let wall_dt = now.duration_since(self.last_frame).as_secs_f64();
            self.last_frame = now;

            let axes = if matches!(self.orchestrator.source, reference::ReferenceSource::Keyboard) {
                keyboard_input::poll(ctx)
            } else {
                Default::default()
            };
            let steps = self
                .accumulator
                .consume(wall_dt.min(0.25) * self.sim_speed, MAX_SUBSTEPS_PER_FRAME);
            for _ in 0..steps {
                self.orchestrator.step(axes);
                let telemetry = self.orchestrator.controller.telemetry().clone();
                self.trace.push(
                    self.orchestrator.t,
                    self.orchestrator.state.position,
                    self.orchestrator.last_setpoint.position,
                );
                self.log.push(TelemetryRow::sample(
                    self.orchestrator.t,
                    &self.orchestrator.state,
                    &self.orchestrator.last_setpoint,
                    &telemetry,
                    self.orchestrator.controller.algorithm_id(),
                ));
            }
        } else {
            self.last_frame = Instant::now();
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                if ui.button(if self.paused { "\u{25b6} Resume" } else { "\u{23f8} Pause" }).clicked() {
                    self.paused = !self.paused;
                }
                if ui.button("\u{27f2} Reset").clicked() {
                    self.reset();
                }
                ui.separator();
                ui.label("Sim speed");
                ui.add(egui::Slider::new(&mut self.sim_speed, 0.1..=5.0).logarithmic(true).suffix("x"));

                ui.separator();
                ui.label("Algorithm");
                let previous = self.algorithm_idx;
                egui::ComboBox::from_id_salt("algorithm")
                    .selected_text(ALGORITHMS[self.algorithm_idx])
                    .show_ui(ui, |ui| {
                        for (i, id) in ALGORITHMS.iter().enumerate() {
                            ui.selectable_value(&mut self.algorithm_idx, i, *id);
                        }
                    });
                if previous != self.algorithm_idx {
                    let _ = self.orchestrator.set_algorithm(ALGORITHMS[self.algorithm_idx]);
                }

                ui.separator();
                ui.label("Pattern");
                let previous_pattern = self.pattern_idx;
                egui::ComboBox::from_id_salt("pattern")
                    .selected_text(PATTERNS[self.pattern_idx])
                    .show_ui(ui, |ui| {
                        for (i, id) in PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.pattern_idx, i, *id);
                        }
                    });
                if previous_pattern != self.pattern_idx {
                    let _ = self.orchestrator.set_pattern(PATTERNS[self.pattern_idx]);
                }

                ui.separator();
                ui.label("Wind");
                ui.add(egui::Slider::new(&mut self.orchestrator.wind_intensity, 0.0..=10.0).suffix(" m/s^2"));

                ui.separator();
                if ui.button("Custom square path").clicked() {
                    let waypoints = vec![
                        nalgebra::Vector3::new(0.0, 3.0, 0.0),
                        nalgebra::Vector3::new(4.0, 3.0, 0.0),
                        nalgebra::Vector3::new(4.0, 3.0, 4.0),
                        nalgebra::Vector3::new(0.0, 3.0, 4.0),
                    ];
                    let _ = self.orchestrator.set_custom_waypoints(waypoints, 2.0);
                }
                if ui.button("Keyboard (WASD + space/shift, Q/E yaw)").clicked() {
                    self.orchestrator.use_keyboard();
                }

                ui.separator();
                if ui.button("Export CSV").clicked() {
                    self.export_status = Some(match self.log.write_csv(&self.export_path) {
                        Ok(()) => format!("wrote {}", self.export_path),
                        Err(err) => format!("export failed: {err}"),
                    });
                }
                if let Some(status) = &self.export_status {
                    ui.label(status);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(format!(
                "t = {:.2} s   pos = ({:.2}, {:.2}, {:.2})   algo = {}",
                self.orchestrator.t,
                self.orchestrator.state.position.x,
                self.orchestrator.state.position.y,
                self.orchestrator.state.position.z,
                self.orchestrator.controller.algorithm_id(),
            ));

            Plot::new("altitude_plot")
                .legend(Legend::default())
                .allow_scroll(false)
                .height(220.0)
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("y", Trace::line(&self.trace.y, &self.trace.t)));
                    plot_ui.line(Line::new("y_ref", Trace::line(&self.trace.y_ref, &self.trace.t)));
                });

            Plot::new("horizontal_plan_plot")
                .legend(Legend::default())
                .allow_scroll(false)
                .height(280.0)
                .data_aspect(1.0)
                .show(ui, |plot_ui| {
                    let path: PlotPoints = self
                        .trace
                        .x
                        .iter()
                        .zip(self.trace.z.iter())
                        .map(|(x, z)| [*x, *z])
                        .collect::<Vec<_>>()
                        .into();
                    plot_ui.line(Line::new("path", path));
                });
        });

        ctx.request_repaint();
    }
}
