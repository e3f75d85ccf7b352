//! Data-driven game balance
//!
//! All numbers the simulation consumes live here, as plain data. The raw
//! form ([`RawTuning`]) is what a JSON tuning file deserializes into and
//! still carries legacy/optional fields; [`RawTuning::resolve`] collapses
//! those into the fully-populated [`Tuning`] the sim reads, so ambiguity
//! is resolved once at load time instead of at every call site.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Easing applied to the difficulty curve's progress parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Easing {
    /// `t²` - small change early, ramps later
    #[default]
    Quadratic,
    /// `t³` - even flatter start
    Cubic,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Quadratic => t * t,
            Easing::Cubic => t * t * t,
        }
    }
}

/// Tuning validation failures, surfaced only by the development-mode
/// [`Tuning::validate`] check. Release code paths clamp instead of failing.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("non-positive {0} (must be > 0)")]
    NonPositive(&'static str),
    #[error("flap velocity must be negative (upward), got {0}")]
    FlapNotUpward(f32),
    #[error("margins leave no admissible gap band: top {top} + bottom {bottom} + gap floor {gap_floor} exceeds field height {field_height}")]
    NoAdmissibleBand {
        top: f32,
        bottom: f32,
        gap_floor: f32,
        field_height: f32,
    },
    #[error("speed ramp thresholds must be strictly ascending at index {0}")]
    RampNotAscending(usize),
    #[error("ground level {ground} outside field height {field_height}")]
    GroundOutOfField { ground: f32, field_height: f32 },
}

/// Raw tuning as loaded from a config file.
///
/// Obstacle hitbox insets keep the legacy shape: either a single symmetric
/// `obstacle_inset_x` (split half/half across left and right) or explicit
/// per-edge values that take precedence when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTuning {
    pub field_width: f32,
    pub field_height: f32,
    /// Y of the ground plane (body dies on contact); below the field bottom
    /// margin because the backdrop art owns the last strip.
    pub ground_level: f32,

    pub fixed_hz: f32,
    pub gravity: f32,
    pub flap_velocity: f32,
    pub terminal_velocity: f32,
    /// Input buffering window in milliseconds; with the tick length it
    /// bounds the fastest effective flap cadence.
    pub input_buffer_ms: f32,

    pub body_width: f32,
    pub body_height: f32,
    pub body_start_x_frac: f32,
    pub body_start_y_frac: f32,
    pub body_inset_x: f32,
    pub body_inset_y: f32,
    /// Downward velocity floor applied on a fatal hit (nose-dive).
    pub nose_dive_velocity: f32,

    pub obstacle_width: f32,
    pub obstacle_inset_x: f32,
    pub obstacle_inset_left: Option<f32>,
    pub obstacle_inset_right: Option<f32>,
    /// Extra tolerance shaved off each segment on the gap side.
    pub obstacle_inset_gap: Option<f32>,

    pub initial_gap: f32,
    pub min_gap: f32,
    pub difficulty_target_score: u32,
    pub easing: Easing,
    pub fairness_factor: f32,
    pub spacing: f32,
    pub spacing_jitter: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    /// Debug/tuning override: pin the bottom segment's top edge to this Y
    /// (clamped into the admissible band) instead of sampling.
    pub pin_bottom_y: Option<f32>,

    pub base_speed: f32,
    /// `(score threshold, multiplier)` pairs, ascending; the highest
    /// threshold at or below the score wins.
    pub speed_ramp: Vec<(u32, f32)>,

    pub first_obstacle_x_frac: f32,
    pub evict_margin: f32,

    /// Zen/no-fail mode: collisions are reported but never fatal.
    pub ghost_mode: bool,
}

impl Default for RawTuning {
    fn default() -> Self {
        Self {
            field_width: 540.0,
            field_height: 960.0,
            ground_level: 920.0,

            fixed_hz: 60.0,
            gravity: 1200.0,
            flap_velocity: -280.0,
            terminal_velocity: 900.0,
            input_buffer_ms: 50.0,

            body_width: 48.0,
            body_height: 48.0,
            body_start_x_frac: 0.28,
            body_start_y_frac: 0.45,
            body_inset_x: 10.0,
            body_inset_y: 10.0,
            nose_dive_velocity: 400.0,

            obstacle_width: 64.0,
            obstacle_inset_x: 8.0,
            obstacle_inset_left: None,
            obstacle_inset_right: None,
            obstacle_inset_gap: None,

            initial_gap: 200.0,
            min_gap: 130.0,
            difficulty_target_score: 40,
            easing: Easing::Quadratic,
            fairness_factor: 3.5,
            spacing: 260.0,
            spacing_jitter: 10.0,
            margin_top: 60.0,
            margin_bottom: 80.0,
            pin_bottom_y: None,

            base_speed: 120.0,
            speed_ramp: vec![(15, 1.05), (30, 1.10)],

            first_obstacle_x_frac: 0.75,
            evict_margin: 20.0,

            ghost_mode: false,
        }
    }
}

impl RawTuning {
    /// Collapse optional/legacy fields into the fully-populated form.
    pub fn resolve(self) -> Tuning {
        let obstacle_inset_left = self.obstacle_inset_left.unwrap_or(self.obstacle_inset_x * 0.5);
        let obstacle_inset_right = self
            .obstacle_inset_right
            .unwrap_or(self.obstacle_inset_x * 0.5);
        let obstacle_inset_gap = self.obstacle_inset_gap.unwrap_or(0.0);

        let mut speed_ramp = self.speed_ramp;
        speed_ramp.sort_by_key(|&(threshold, _)| threshold);

        Tuning {
            field_width: self.field_width,
            field_height: self.field_height,
            ground_level: self.ground_level,
            fixed_hz: self.fixed_hz,
            gravity: self.gravity,
            flap_velocity: self.flap_velocity,
            terminal_velocity: self.terminal_velocity,
            input_buffer_ms: self.input_buffer_ms,
            body_width: self.body_width,
            body_height: self.body_height,
            body_start_x_frac: self.body_start_x_frac,
            body_start_y_frac: self.body_start_y_frac,
            body_inset_x: self.body_inset_x,
            body_inset_y: self.body_inset_y,
            nose_dive_velocity: self.nose_dive_velocity,
            obstacle_width: self.obstacle_width,
            obstacle_inset_left,
            obstacle_inset_right,
            obstacle_inset_gap,
            initial_gap: self.initial_gap,
            min_gap: self.min_gap,
            difficulty_target_score: self.difficulty_target_score,
            easing: self.easing,
            fairness_factor: self.fairness_factor,
            spacing: self.spacing,
            spacing_jitter: self.spacing_jitter,
            margin_top: self.margin_top,
            margin_bottom: self.margin_bottom,
            pin_bottom_y: self.pin_bottom_y,
            base_speed: self.base_speed,
            speed_ramp,
            first_obstacle_x_frac: self.first_obstacle_x_frac,
            evict_margin: self.evict_margin,
            ghost_mode: self.ghost_mode,
        }
    }
}

/// Fully-resolved, immutable tuning consumed by the simulation.
///
/// Every field is populated; no fallback chains remain. Construct via
/// [`RawTuning::resolve`] or [`Tuning::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,
    pub ground_level: f32,

    pub fixed_hz: f32,
    pub gravity: f32,
    pub flap_velocity: f32,
    pub terminal_velocity: f32,
    pub input_buffer_ms: f32,

    pub body_width: f32,
    pub body_height: f32,
    pub body_start_x_frac: f32,
    pub body_start_y_frac: f32,
    pub body_inset_x: f32,
    pub body_inset_y: f32,
    pub nose_dive_velocity: f32,

    pub obstacle_width: f32,
    pub obstacle_inset_left: f32,
    pub obstacle_inset_right: f32,
    pub obstacle_inset_gap: f32,

    pub initial_gap: f32,
    pub min_gap: f32,
    pub difficulty_target_score: u32,
    pub easing: Easing,
    pub fairness_factor: f32,
    pub spacing: f32,
    pub spacing_jitter: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub pin_bottom_y: Option<f32>,

    pub base_speed: f32,
    pub speed_ramp: Vec<(u32, f32)>,

    pub first_obstacle_x_frac: f32,
    pub evict_margin: f32,

    pub ghost_mode: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        RawTuning::default().resolve()
    }
}

impl Tuning {
    /// Fixed physics timestep in seconds.
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.fixed_hz
    }

    /// Minimum time between two effective flap inputs: the larger of the
    /// input buffering window and one physics tick.
    pub fn reaction_interval(&self) -> f32 {
        (self.input_buffer_ms / 1000.0).max(self.tick_dt())
    }

    /// Lower bound on any generated gap, regardless of the curve.
    pub fn gap_floor(&self) -> f32 {
        self.body_height * self.fairness_factor
    }

    /// Development-mode configuration check.
    ///
    /// The simulation itself never fails on bad tuning (it clamps), but a
    /// config that trips this would be playing a materially different game
    /// than the numbers suggest, so surface it early.
    pub fn validate(&self) -> Result<(), TuningError> {
        for (name, v) in [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("fixed_hz", self.fixed_hz),
            ("gravity", self.gravity),
            ("terminal_velocity", self.terminal_velocity),
            ("body_width", self.body_width),
            ("body_height", self.body_height),
            ("obstacle_width", self.obstacle_width),
            ("base_speed", self.base_speed),
            ("spacing", self.spacing),
        ] {
            if v <= 0.0 {
                return Err(TuningError::NonPositive(name));
            }
        }
        if self.flap_velocity >= 0.0 {
            return Err(TuningError::FlapNotUpward(self.flap_velocity));
        }
        let gap_floor = self.gap_floor().max(self.min_gap);
        if self.margin_top + self.margin_bottom + gap_floor > self.field_height {
            return Err(TuningError::NoAdmissibleBand {
                top: self.margin_top,
                bottom: self.margin_bottom,
                gap_floor,
                field_height: self.field_height,
            });
        }
        for (i, window) in self.speed_ramp.windows(2).enumerate() {
            if window[1].0 <= window[0].0 {
                return Err(TuningError::RampNotAscending(i + 1));
            }
        }
        if self.ground_level <= 0.0 || self.ground_level > self.field_height {
            return Err(TuningError::GroundOutOfField {
                ground: self.ground_level,
                field_height: self.field_height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Tuning::default().validate().unwrap();
    }

    #[test]
    fn legacy_symmetric_inset_splits_half_each_side() {
        let raw = RawTuning {
            obstacle_inset_x: 8.0,
            ..RawTuning::default()
        };
        let tuning = raw.resolve();
        assert_eq!(tuning.obstacle_inset_left, 4.0);
        assert_eq!(tuning.obstacle_inset_right, 4.0);
    }

    #[test]
    fn per_edge_insets_override_symmetric() {
        let raw = RawTuning {
            obstacle_inset_x: 8.0,
            obstacle_inset_left: Some(2.0),
            obstacle_inset_right: Some(6.0),
            ..RawTuning::default()
        };
        let tuning = raw.resolve();
        assert_eq!(tuning.obstacle_inset_left, 2.0);
        assert_eq!(tuning.obstacle_inset_right, 6.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let raw: RawTuning = serde_json::from_str(r#"{ "gravity": 1000.0 }"#).unwrap();
        let tuning = raw.resolve();
        assert_eq!(tuning.gravity, 1000.0);
        assert_eq!(tuning.field_width, 540.0);
        assert_eq!(tuning.obstacle_inset_left, 4.0);
    }

    #[test]
    fn validate_rejects_crushed_band() {
        let tuning = Tuning {
            margin_top: 500.0,
            margin_bottom: 500.0,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NoAdmissibleBand { .. })
        ));
    }

    #[test]
    fn validate_rejects_downward_flap() {
        let tuning = Tuning {
            flap_velocity: 50.0,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::FlapNotUpward(_))
        ));
    }

    #[test]
    fn resolve_sorts_ramp_thresholds() {
        let raw = RawTuning {
            speed_ramp: vec![(30, 1.10), (15, 1.05)],
            ..RawTuning::default()
        };
        let tuning = raw.resolve();
        assert_eq!(tuning.speed_ramp, vec![(15, 1.05), (30, 1.10)]);
    }

    #[test]
    fn reaction_interval_is_buffer_or_tick() {
        let tuning = Tuning::default();
        // 50 ms buffer > 1/60 s tick
        assert!((tuning.reaction_interval() - 0.05).abs() < 1e-6);

        let coarse = Tuning {
            input_buffer_ms: 5.0,
            ..Tuning::default()
        };
        assert!((coarse.reaction_interval() - 1.0 / 60.0).abs() < 1e-6);
    }
}
