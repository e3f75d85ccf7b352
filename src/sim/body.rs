//! The player body: one falling/boosted box under gravity
//!
//! Two operations only: `flap` sets vertical velocity to the impulse
//! outright (spamming cancels a fall but can't stack upward speed), and
//! `step` integrates one fixed timestep with a terminal-velocity clamp.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Axis-aligned box, y-down field coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap test; edge-touching boxes do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// The controllable body. X is fixed for the run; only y and vertical
/// velocity change, and only via [`Body::flap`] and [`Body::step`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner of the sprite box.
    pub pos: Vec2,
    pub vel_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Body {
    /// Place a new body at the configured start fractions of the field.
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                tuning.field_width * tuning.body_start_x_frac,
                tuning.field_height * tuning.body_start_y_frac,
            ),
            vel_y: 0.0,
            width: tuning.body_width,
            height: tuning.body_height,
        }
    }

    /// Boost upward: velocity is assigned, not accumulated.
    pub fn flap(&mut self, tuning: &Tuning) {
        self.vel_y = tuning.flap_velocity;
    }

    /// Integrate one timestep: gravity, terminal-velocity clamp, position.
    pub fn step(&mut self, tuning: &Tuning, dt: f32) {
        self.vel_y += tuning.gravity * dt;
        if self.vel_y > tuning.terminal_velocity {
            self.vel_y = tuning.terminal_velocity;
        }
        self.pos.y += self.vel_y * dt;
    }

    /// Full sprite box.
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Collision box: the sprite box shrunk symmetrically by the configured
    /// insets, so near-misses read as misses.
    pub fn hitbox(&self, tuning: &Tuning) -> Aabb {
        Aabb::new(
            self.pos.x + tuning.body_inset_x * 0.5,
            self.pos.y + tuning.body_inset_y * 0.5,
            (self.width - tuning.body_inset_x).max(0.0),
            (self.height - tuning.body_inset_y).max(0.0),
        )
    }
}
