//! Trajectory generation: six analytic patterns plus the two stateful,
//! operator-driven sources (`CUSTOM`, `KEYBOARD`).

pub mod custom_walker;
pub mod keyboard;
pub mod patterns;

pub use custom_walker::CustomWalker;
pub use keyboard::{KeyboardAxes, KeyboardChannel};
pub use patterns::{evaluate, preview, trajectory_fn, Pattern};

use simcore::Setpoint;

/// The full catalogue of reference sources an orchestrator can select
/// among, unifying the pure analytic patterns with the two stateful
/// channels behind one selector (§4.2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReferenceSource {
    Analytic(Pattern),
    Custom,
    Keyboard,
}

impl Default for ReferenceSource {
    fn default() -> Self {
        ReferenceSource::Analytic(Pattern::default())
    }
}

impl ReferenceSource {
    /// A frozen-horizon lookahead for the predictive controller: analytic
    /// patterns evaluate at `t + horizon`; the stateful sources have no
    /// well-defined future beyond the next tick, so their current setpoint
    /// is held fixed across the horizon (DESIGN.md).
    pub fn horizon_setpoint(
        &self,
        t: f64,
        horizon: f64,
        custom: Option<&CustomWalker>,
        keyboard: Option<&KeyboardChannel>,
    ) -> Setpoint {
        match self {
            ReferenceSource::Analytic(pattern) => evaluate(*pattern, t + horizon),
            ReferenceSource::Custom => custom
                .map(|w| w.current())
                .unwrap_or_else(|| Setpoint::hold(Default::default(), 0.0)),
            ReferenceSource::Keyboard => keyboard
                .map(|k| k.current())
                .unwrap_or_else(|| Setpoint::hold(Default::default(), 0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn analytic_horizon_matches_direct_evaluate() {
        let source = ReferenceSource::Analytic(Pattern::Circle);
        let direct = evaluate(Pattern::Circle, 5.0);
        let horizon = source.horizon_setpoint(3.0, 2.0, None, None);
        assert_eq!(direct.position, horizon.position);
    }

    #[test]
    fn custom_horizon_freezes_the_current_setpoint() {
        let walker = CustomWalker::new(
            vec![Vector3::zeros(), Vector3::new(1.0, 0.0, 0.0)],
            1.0,
        )
        .unwrap();
        let source = ReferenceSource::Custom;
        let frozen = source.horizon_setpoint(0.0, 2.0, Some(&walker), None);
        assert_eq!(frozen.position, walker.current().position);
    }
}
