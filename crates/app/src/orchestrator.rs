//! Per-tick ordering: reference query, controller compute, plant step
//! (§5) — the only component allowed to see all three crates at once.

use nalgebra::Vector3;
use reference::{CustomWalker, KeyboardAxes, KeyboardChannel, Pattern, ReferenceSource};
use simcore::{Params, Reset, SimError, Setpoint, State, Wind};

use control::QuadController;

pub const FIXED_DT: f64 = 1.0 / 120.0;

pub struct Orchestrator {
    pub params: Params,
    pub state: State,
    pub controller: QuadController,
    pub source: ReferenceSource,
    pub custom_walker: Option<CustomWalker>,
    pub keyboard: KeyboardChannel,
    pub wind_intensity: f64,
    pub t: f64,
    pub last_setpoint: Setpoint,
}

impl Orchestrator {
    pub fn new(params: Params, algorithm: &str, pattern: &str) -> Result<Self, SimError> {
        let controller = QuadController::new(algorithm)?;
        let source = Pattern::from_id(pattern)
            .map(ReferenceSource::Analytic)
            .ok_or_else(|| SimError::UnknownPattern(pattern.to_string()))?;
        Ok(Self {
            params,
            state: State::default(),
            controller,
            source,
            custom_walker: None,
            keyboard: KeyboardChannel::new(Vector3::new(0.0, 3.0, 0.0), 0.0),
            wind_intensity: 0.0,
            t: 0.0,
            last_setpoint: Setpoint::hold(Vector3::new(0.0, 3.0, 0.0), 0.0),
        })
    }

    pub fn reset(&mut self) {
        self.state = State::default();
        self.controller.reset();
        self.keyboard.reset();
        if let Some(walker) = &mut self.custom_walker {
            walker.reset();
        }
        self.t = 0.0;
    }

    pub fn set_algorithm(&mut self, id: &str) -> Result<(), SimError> {
        self.controller.set_algorithm(id)
    }

    pub fn set_pattern(&mut self, id: &str) -> Result<(), SimError> {
        let pattern = Pattern::from_id(id).ok_or_else(|| {
            log::warn!("rejected unknown trajectory pattern id: {id}");
            SimError::UnknownPattern(id.to_string())
        })?;
        log::info!("switching trajectory pattern to {id}");
        self.source = ReferenceSource::Analytic(pattern);
        Ok(())
    }

    pub fn set_custom_waypoints(&mut self, waypoints: Vec<Vector3<f64>>, speed: f64) -> Result<(), SimError> {
        self.custom_walker = Some(CustomWalker::new(waypoints, speed)?);
        self.source = ReferenceSource::Custom;
        Ok(())
    }

    pub fn use_keyboard(&mut self) {
        self.source = ReferenceSource::Keyboard;
    }

    pub fn set_wind_intensity(&mut self, intensity: f64) {
        self.wind_intensity = intensity;
    }

    /// Advance exactly one fixed-size physics substep: reference, controller,
    /// plant, in that strict order (§5).
    pub fn step(&mut self, keyboard_axes: KeyboardAxes) {
        let setpoint = match self.source {
            ReferenceSource::Analytic(pattern) => reference::evaluate(pattern, self.t),
            ReferenceSource::Custom => self
                .custom_walker
                .as_mut()
                .map(|w| w.advance(FIXED_DT))
                .unwrap_or_else(|| Setpoint::hold(self.state.position, 0.0)),
            ReferenceSource::Keyboard => self.keyboard.advance(keyboard_axes, FIXED_DT),
        };
        self.last_setpoint = setpoint;

        let t_now = self.t;
        let source = self.source;
        let custom_walker = &self.custom_walker;
        let keyboard = &self.keyboard;
        let horizon = |t_future: f64| -> Setpoint {
            let horizon_seconds = t_future - t_now;
            source.horizon_setpoint(t_now, horizon_seconds, custom_walker.as_ref(), Some(keyboard))
        };

        let input = self
            .controller
            .compute(&self.state, &setpoint, &self.params, t_now, FIXED_DT, &horizon);

        let wind = Wind::sample(self.wind_intensity, self.t);
        dynamics::step(&mut self.state, input, wind, &self.params, FIXED_DT);

        self.t += FIXED_DT;
    }
}
