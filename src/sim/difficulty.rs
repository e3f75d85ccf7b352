//! Difficulty curve: pure functions from score to gap size and scroll speed
//!
//! Gap shrinkage is eased so early play barely changes and the squeeze
//! lands late; scroll speed ramps in discrete steps so the player feels
//! a distinct gear change rather than a slow creep.

use crate::tuning::Tuning;

/// Target gap height at a given score.
///
/// Lerps from `initial_gap` to `min_gap` with eased progress toward
/// `difficulty_target_score`, then floors at `body_height * fairness_factor`
/// so the body always physically fits whatever the curve says.
pub fn gap_at_score(tuning: &Tuning, score: u32, body_height: f32) -> f32 {
    let target = tuning.difficulty_target_score.max(1) as f32;
    let t = (score as f32 / target).clamp(0.0, 1.0);
    let eased = tuning.easing.apply(t);
    let raw = (1.0 - eased) * tuning.initial_gap + eased * tuning.min_gap;
    raw.max(body_height * tuning.fairness_factor)
}

/// Scroll-speed multiplier at a given score: the highest ramp threshold at
/// or below the score wins.
///
/// Scans the whole table rather than assuming sorted order; `Tuning` has
/// public fields, so the sort done at resolution time is not guaranteed.
pub fn speed_ramp(tuning: &Tuning, score: u32) -> f32 {
    let mut best: Option<u32> = None;
    let mut multiplier = 1.0;
    for &(threshold, m) in &tuning.speed_ramp {
        if score >= threshold && best.map_or(true, |t| threshold >= t) {
            best = Some(threshold);
            multiplier = m;
        }
    }
    multiplier
}

/// Effective scroll speed in units/s.
pub fn scroll_speed(tuning: &Tuning, score: u32) -> f32 {
    tuning.base_speed * speed_ramp(tuning, score)
}
