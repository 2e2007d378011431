//! Host binary: structured logging, JSON config loading, and the
//! `eframe`/`egui` frame loop around the simulation core.

use quad_sim_app::{app_ui::QuadSimApp, config};
use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode};

fn init_logging() {
    TermLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("logger can only be initialized once per process");
}

fn main() -> eframe::Result<()> {
    init_logging();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = config::load(&config_path);
    log::info!(
        "starting quad-sim: algorithm={} pattern={} wind={}",
        config.algorithm,
        config.pattern,
        config.wind_intensity
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title("Quadrotor Flight-Dynamics Bench"),
        ..Default::default()
    };

    eframe::run_native(
        "Quadrotor Flight-Dynamics Bench",
        options,
        Box::new(|_cc| Ok(Box::new(QuadSimApp::new(config)))),
    )
}
