//! Obstacle generation and the fairness clamp
//!
//! The load-bearing piece of the whole game: every obstacle placed here
//! must be passable given the body's own physics and the fastest a player
//! can physically re-flap. The clamp is re-derived from whatever gravity /
//! impulse / terminal-velocity / spacing numbers the tuning carries; there
//! is no table of blessed values to drift out of date.
//!
//! Generation is side-effect-free: instead of logging, it returns a
//! [`SpawnInfo`] record the caller may trace.

use serde::{Deserialize, Serialize};

use super::body::Aabb;
use super::difficulty::{gap_at_score, scroll_speed};
use super::rng::SeededRng;
use crate::tuning::Tuning;

/// One obstacle unit: a full-height column with a single vertical gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge; scrolls left each tick.
    pub x: f32,
    pub gap_center_y: f32,
    pub gap_size: f32,
    /// Set once when the body clears the right edge; never unset.
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_center_y: f32, gap_size: f32) -> Self {
        Self {
            x,
            gap_center_y,
            gap_size,
            passed: false,
        }
    }

    pub fn right_edge(&self, tuning: &Tuning) -> f32 {
        self.x + tuning.obstacle_width
    }

    /// Collision boxes for the segment above and below the gap, inset per
    /// the hitbox tuning so grazing the lip feels fair.
    pub fn segment_boxes(&self, tuning: &Tuning) -> (Aabb, Aabb) {
        let top_height = (self.gap_center_y - self.gap_size / 2.0).max(0.0);
        let bottom_y = self.gap_center_y + self.gap_size / 2.0;
        let bottom_height = (tuning.field_height - bottom_y).max(0.0);

        let x = self.x + tuning.obstacle_inset_left;
        let w = (tuning.obstacle_width - tuning.obstacle_inset_left - tuning.obstacle_inset_right)
            .max(0.0);
        let gap_inset = tuning.obstacle_inset_gap;

        let top = Aabb::new(x, 0.0, w, (top_height - gap_inset).max(0.0));
        let bottom = Aabb::new(
            x,
            bottom_y + gap_inset,
            w,
            (bottom_height - gap_inset).max(0.0),
        );
        (top, bottom)
    }
}

/// How the fairness clamp resolved a candidate center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClampOutcome {
    /// First obstacle, or candidate already inside the reachable window.
    Untouched,
    /// Candidate pulled to the nearest edge of the reachable window.
    Clamped,
    /// Window was empty (obstacles too close); fell back to the previous
    /// center clamped into the static band.
    Fallback,
}

/// Trace record for one generated obstacle; callers may log it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnInfo {
    pub x: f32,
    pub score: u32,
    pub gap_size: f32,
    /// Center drawn before the fairness clamp.
    pub candidate_center_y: f32,
    /// Center actually emitted.
    pub gap_center_y: f32,
    pub band_min: f32,
    pub band_max: f32,
    /// Transition time from the previous obstacle, if any.
    pub t_avail: Option<f32>,
    pub outcome: ClampOutcome,
    /// Active queue length after the spawn (filled in by the world).
    pub queue_len: usize,
}

/// Greatest upward displacement achievable in `seconds`, flapping every
/// reaction interval.
///
/// Each flap resets velocity to the impulse rather than accumulating, so
/// the bound models the fastest humanly-deliverable input stream, per
/// segment: `v_flap * dt + g * dt² / 2`.
pub fn max_upward_reach(tuning: &Tuning, seconds: f32) -> f32 {
    let interval = tuning.reaction_interval();
    let mut remaining = seconds;
    let mut dy = 0.0; // positive = down
    while remaining > 1e-6 {
        let dt = remaining.min(interval);
        dy += tuning.flap_velocity * dt + 0.5 * tuning.gravity * dt * dt;
        remaining -= dt;
    }
    (-dy).max(0.0)
}

/// Greatest downward displacement in `seconds`: free fall, closed form,
/// capped at terminal velocity.
pub fn max_downward_reach(tuning: &Tuning, seconds: f32) -> f32 {
    let t_to_term = tuning.terminal_velocity / tuning.gravity;
    if seconds <= t_to_term {
        0.5 * tuning.gravity * seconds * seconds
    } else {
        let dist_to_term = 0.5 * tuning.gravity * t_to_term * t_to_term;
        dist_to_term + tuning.terminal_velocity * (seconds - t_to_term)
    }
}

/// Static admissible band of gap centers for a given gap size: keeps the
/// whole gap on screen with the configured margins.
pub fn admissible_band(tuning: &Tuning, gap_size: f32) -> (f32, f32) {
    (
        tuning.margin_top + gap_size / 2.0,
        tuning.field_height - tuning.margin_bottom - gap_size / 2.0,
    )
}

/// Generate the next obstacle at `x`.
///
/// Draws a candidate center from the admissible band, then (when a previous
/// obstacle exists) clamps it into the window the body can actually reach
/// in the transition time. A degenerate window falls back to the previous
/// center; generation never emits an unreachable gap.
pub fn generate(
    tuning: &Tuning,
    rng: &mut SeededRng,
    prev: Option<&Obstacle>,
    x: f32,
    score: u32,
    body_height: f32,
) -> (Obstacle, SpawnInfo) {
    let gap_size = gap_at_score(tuning, score, body_height);
    let (band_min, band_max) = admissible_band(tuning, gap_size);

    let candidate = match tuning.pin_bottom_y {
        // Pin the bottom segment's top edge, held inside the band. Max then
        // min, not `clamp`: a crushed band (min > max) must degrade to the
        // upper bound, not panic.
        Some(bottom_y) => {
            let held = bottom_y
                .max(band_min + gap_size / 2.0)
                .min(band_max + gap_size / 2.0);
            held - gap_size / 2.0
        }
        None => rng.range(band_min, band_max),
    };

    let mut center_y = candidate;
    let mut outcome = ClampOutcome::Untouched;
    let mut t_avail = None;

    if let Some(prev) = prev {
        let dx = (x - prev.x).max(0.0);
        let speed = scroll_speed(tuning, score).max(1e-6);
        let seconds = dx / speed;
        t_avail = Some(seconds);

        let up = max_upward_reach(tuning, seconds);
        let down = max_downward_reach(tuning, seconds);
        let allowed_min = band_min.max(prev.gap_center_y - up);
        let allowed_max = band_max.min(prev.gap_center_y + down);

        if allowed_min <= allowed_max {
            if center_y < allowed_min {
                center_y = allowed_min;
                outcome = ClampOutcome::Clamped;
            } else if center_y > allowed_max {
                center_y = allowed_max;
                outcome = ClampOutcome::Clamped;
            }
        } else {
            // Same max/min ordering as above: survives a crushed band
            center_y = prev.gap_center_y.max(band_min).min(band_max);
            outcome = ClampOutcome::Fallback;
        }
    }

    let obstacle = Obstacle::new(x, center_y, gap_size);
    let info = SpawnInfo {
        x,
        score,
        gap_size,
        candidate_center_y: candidate,
        gap_center_y: center_y,
        band_min,
        band_max,
        t_avail,
        outcome,
        queue_len: 0,
    };
    (obstacle, info)
}
