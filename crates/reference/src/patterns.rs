//! Analytic parametric trajectories.
//!
//! Per the REDESIGN FLAGS (§9), lookahead is modeled as a data-carrying
//! `Pattern` enum dispatched through one pure function of `(pattern, t)`,
//! not a heap-allocated closure captured over mutable state. `trajectory_fn`
//! still hands back a `Fn(f64) -> Setpoint` for the predictive controller's
//! horizon sampling (§4.3.4), but it is a zero-capture wrapper around
//! [`evaluate`] — cheap to construct and call repeatedly.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use simcore::Setpoint;

/// Smoothstep: `3s^2 - 2s^3`, clamped to `[0, 1]` first.
pub fn smoothstep(s: f64) -> f64 {
    let s = s.clamp(0.0, 1.0);
    s * s * (3.0 - 2.0 * s)
}

/// One of the six purely time-parametric trajectory patterns. `CUSTOM` and
/// `KEYBOARD` are not representable here — they carry stateful channels
/// (`CustomWalker`, `KeyboardChannel`) and are driven explicitly by the
/// orchestrator instead of through `evaluate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    Hover,
    Circle,
    Helix,
    Figure8,
    Square,
    Step {
        y0: f64,
        y1: f64,
        switch_time: f64,
    },
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern::Hover
    }
}

impl Pattern {
    /// Canonical id string, used by the boundary setters in §6/§7.
    pub fn id(&self) -> &'static str {
        match self {
            Pattern::Hover => "HOVER",
            Pattern::Circle => "CIRCLE",
            Pattern::Helix => "HELIX",
            Pattern::Figure8 => "FIGURE8",
            Pattern::Square => "SQUARE",
            Pattern::Step { .. } => "STEP",
        }
    }

    /// Parse a pattern id with the scenario-2 default step parameters
    /// (`y0=1, y1=4, ts=3`) when the id is `STEP`.
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_ascii_uppercase().as_str() {
            "HOVER" => Some(Pattern::Hover),
            "CIRCLE" => Some(Pattern::Circle),
            "HELIX" => Some(Pattern::Helix),
            "FIGURE8" => Some(Pattern::Figure8),
            "SQUARE" => Some(Pattern::Square),
            "STEP" => Some(Pattern::Step {
                y0: 1.0,
                y1: 4.0,
                switch_time: 3.0,
            }),
            _ => None,
        }
    }
}

const CIRCLE_RADIUS: f64 = 4.0;
const CIRCLE_ALTITUDE: f64 = 3.0;
const CIRCLE_OMEGA: f64 = 0.5;
const HELIX_CLIMB_RATE: f64 = 0.3;
const HELIX_BASE_ALTITUDE: f64 = 1.0;
// Lemniscate half-widths; the spec names Sx/Sz without a numeric value, so
// these default to the CIRCLE radius for a comparably-sized figure (DESIGN.md).
const FIGURE8_SX: f64 = 4.0;
const FIGURE8_SZ: f64 = 4.0;
const FIGURE8_ALTITUDE: f64 = 3.0;
// SQUARE corner half-side and per-leg traversal time; likewise unnamed in the
// spec (DESIGN.md).
const SQUARE_HALF_SIDE: f64 = 4.0;
const SQUARE_ALTITUDE: f64 = 3.0;
const SQUARE_LEG_DURATION: f64 = 3.0;

/// Pure function of `(pattern, t)` — the sole analytic-reference operation.
pub fn evaluate(pattern: Pattern, t: f64) -> Setpoint {
    match pattern {
        Pattern::Hover => Setpoint {
            position: Vector3::new(0.0, CIRCLE_ALTITUDE, 0.0),
            velocity: Some(Vector3::zeros()),
            yaw: 0.0,
        },
        Pattern::Circle => {
            let (s, c) = (CIRCLE_OMEGA * t).sin_cos();
            Setpoint {
                position: Vector3::new(CIRCLE_RADIUS * c, CIRCLE_ALTITUDE, CIRCLE_RADIUS * s),
                velocity: Some(Vector3::new(
                    -CIRCLE_RADIUS * CIRCLE_OMEGA * s,
                    0.0,
                    CIRCLE_RADIUS * CIRCLE_OMEGA * c,
                )),
                yaw: 0.0,
            }
        }
        Pattern::Helix => {
            let (s, c) = (CIRCLE_OMEGA * t).sin_cos();
            Setpoint {
                position: Vector3::new(
                    CIRCLE_RADIUS * c,
                    HELIX_BASE_ALTITUDE + HELIX_CLIMB_RATE * t,
                    CIRCLE_RADIUS * s,
                ),
                velocity: Some(Vector3::new(
                    -CIRCLE_RADIUS * CIRCLE_OMEGA * s,
                    HELIX_CLIMB_RATE,
                    CIRCLE_RADIUS * CIRCLE_OMEGA * c,
                )),
                yaw: 0.0,
            }
        }
        Pattern::Figure8 => {
            let omega = CIRCLE_OMEGA;
            let x = FIGURE8_SX * (omega * t).cos();
            let y = FIGURE8_ALTITUDE + 0.5 * (0.5 * omega * t).sin();
            let z = FIGURE8_SZ * (2.0 * omega * t).sin() / 2.0;
            let vx = -FIGURE8_SX * omega * (omega * t).sin();
            let vy = 0.25 * omega * (0.5 * omega * t).cos();
            let vz = FIGURE8_SZ * omega * (2.0 * omega * t).cos();
            Setpoint {
                position: Vector3::new(x, y, z),
                velocity: Some(Vector3::new(vx, vy, vz)),
                yaw: 0.0,
            }
        }
        Pattern::Square => {
            let corners = square_corners();
            let leg_len = corners.len() as f64;
            let cycle = t.rem_euclid(SQUARE_LEG_DURATION * leg_len);
            let leg = (cycle / SQUARE_LEG_DURATION).floor() as usize % corners.len();
            let local = cycle - leg as f64 * SQUARE_LEG_DURATION;
            let from = corners[leg];
            let to = corners[(leg + 1) % corners.len()];
            let s = smoothstep(local / SQUARE_LEG_DURATION);
            Setpoint {
                position: from + (to - from) * s,
                velocity: Some(Vector3::zeros()),
                yaw: 0.0,
            }
        }
        Pattern::Step { y0, y1, switch_time } => Setpoint {
            position: Vector3::new(0.0, if t < switch_time { y0 } else { y1 }, 0.0),
            velocity: Some(Vector3::zeros()),
            yaw: 0.0,
        },
    }
}

fn square_corners() -> [Vector3<f64>; 4] {
    let l = SQUARE_HALF_SIDE;
    let a = SQUARE_ALTITUDE;
    [
        Vector3::new(l, a, l),
        Vector3::new(-l, a, l),
        Vector3::new(-l, a, -l),
        Vector3::new(l, a, -l),
    ]
}

/// A cheap, allocation-free wrapper around [`evaluate`], callable repeatedly
/// at arbitrary future times without side effects — used by the predictive
/// controller's horizon sampling (§4.3.4).
pub fn trajectory_fn(pattern: Pattern) -> impl Fn(f64) -> Setpoint {
    move |t| evaluate(pattern, t)
}

/// Uniform sampling of a pattern over `[0, horizon_seconds]`, used to draw
/// the desired path preview.
pub fn preview(pattern: Pattern, n: usize, horizon_seconds: f64) -> Vec<Setpoint> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let t = if n == 1 {
                0.0
            } else {
                horizon_seconds * (i as f64) / ((n - 1) as f64)
            };
            evaluate(pattern, t)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn preview_matches_direct_evaluate_for_every_analytic_pattern() {
        let patterns = [
            Pattern::Hover,
            Pattern::Circle,
            Pattern::Helix,
            Pattern::Figure8,
            Pattern::Square,
            Pattern::Step {
                y0: 1.0,
                y1: 4.0,
                switch_time: 3.0,
            },
        ];
        for pattern in patterns {
            let preview = preview(pattern, 5, 4.0);
            for (i, sample) in preview.iter().enumerate() {
                let t = 4.0 * (i as f64) / 4.0;
                let direct = evaluate(pattern, t);
                assert_abs_diff_eq!(sample.position.x, direct.position.x, epsilon = 1e-9);
                assert_abs_diff_eq!(sample.position.y, direct.position.y, epsilon = 1e-9);
                assert_abs_diff_eq!(sample.position.z, direct.position.z, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn hover_is_a_steady_setpoint() {
        let a = evaluate(Pattern::Hover, 0.0);
        let b = evaluate(Pattern::Hover, 123.4);
        assert_eq!(a.position, b.position);
        assert_eq!(a.position, Vector3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn circle_traces_the_configured_radius() {
        let sp = evaluate(Pattern::Circle, 1.0);
        let radial = (sp.position.x.powi(2) + sp.position.z.powi(2)).sqrt();
        assert_abs_diff_eq!(radial, CIRCLE_RADIUS, epsilon = 1e-9);
        assert_abs_diff_eq!(sp.position.y, CIRCLE_ALTITUDE, epsilon = 1e-9);
    }

    #[test]
    fn helix_climbs_linearly() {
        let at5 = evaluate(Pattern::Helix, 5.0);
        let at10 = evaluate(Pattern::Helix, 10.0);
        assert_abs_diff_eq!(
            at10.position.y - at5.position.y,
            HELIX_CLIMB_RATE * 5.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn step_switches_at_the_configured_time() {
        let pattern = Pattern::Step {
            y0: 1.0,
            y1: 4.0,
            switch_time: 3.0,
        };
        assert_abs_diff_eq!(evaluate(pattern, 2.999).position.y, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(evaluate(pattern, 3.0).position.y, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn square_smoothstep_is_continuous_across_a_leg_boundary() {
        let just_before = evaluate(Pattern::Square, SQUARE_LEG_DURATION - 1e-6);
        let just_after = evaluate(Pattern::Square, SQUARE_LEG_DURATION + 1e-6);
        assert_abs_diff_eq!(just_before.position.x, just_after.position.x, epsilon = 1e-3);
    }

    #[test]
    fn square_cycles_back_to_the_start_corner() {
        let start = evaluate(Pattern::Square, 0.0);
        let one_cycle_later = evaluate(Pattern::Square, SQUARE_LEG_DURATION * 4.0);
        assert_abs_diff_eq!(start.position.x, one_cycle_later.position.x, epsilon = 1e-9);
        assert_abs_diff_eq!(start.position.z, one_cycle_later.position.z, epsilon = 1e-9);
    }
}
