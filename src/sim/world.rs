//! World: the active obstacle queue and the collision/score pass
//!
//! Obstacles live in a FIFO in left-to-right field order; that ordering is
//! load-bearing, because the fairness clamp always reasons against the
//! immediately preceding obstacle and eviction only ever touches the head.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::difficulty::scroll_speed;
use super::rng::SeededRng;
use super::spawn::{self, Obstacle, SpawnInfo};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Active obstacles, head = leftmost.
    pub obstacles: VecDeque<Obstacle>,
    /// Last score reported by the driver; drives spawning difficulty.
    pub score: u32,
    /// Current scroll speed, derived from score each step.
    pub speed: f32,
}

impl World {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacles: VecDeque::new(),
            score: 0,
            speed: tuning.base_speed,
        }
    }

    pub fn reset(&mut self, tuning: &Tuning) {
        self.obstacles.clear();
        self.score = 0;
        self.speed = tuning.base_speed;
    }

    /// Spawn the next obstacle if the queue is empty or the tail has
    /// scrolled within spacing range of the right field edge.
    ///
    /// Returns the spawn trace when an obstacle was emitted.
    pub fn spawn_if_needed(
        &mut self,
        tuning: &Tuning,
        rng: &mut SeededRng,
        body_height: f32,
    ) -> Option<SpawnInfo> {
        let x = match self.obstacles.back() {
            None => tuning.field_width * tuning.first_obstacle_x_frac,
            Some(tail) => {
                if tail.right_edge(tuning) >= tuning.field_width + tuning.spacing {
                    return None;
                }
                let jitter = rng.range(-tuning.spacing_jitter, tuning.spacing_jitter);
                tail.x + tuning.spacing + jitter
            }
        };

        let (obstacle, mut info) = spawn::generate(
            tuning,
            rng,
            self.obstacles.back(),
            x,
            self.score,
            body_height,
        );
        self.obstacles.push_back(obstacle);
        info.queue_len = self.obstacles.len();
        Some(info)
    }

    /// Advance one timestep: derive scroll speed from the score, shift all
    /// obstacles left, evict any fully off the left edge.
    pub fn step(&mut self, tuning: &Tuning, dt: f32, score: u32) {
        self.score = score;
        self.speed = scroll_speed(tuning, score);
        for obstacle in &mut self.obstacles {
            obstacle.x -= self.speed * dt;
        }
        // FIFO never reorders, so only the head can be off-screen
        while let Some(head) = self.obstacles.front() {
            if head.right_edge(tuning) < -tuning.evict_margin {
                self.obstacles.pop_front();
            } else {
                break;
            }
        }
    }

    /// Score passes and detect collisions for this tick.
    ///
    /// `on_pass` fires exactly once per obstacle, the tick its right edge
    /// crosses left of the body's x. Collision (segment boxes, then
    /// ground/ceiling) invokes `on_hit` and returns `true` immediately
    /// unless `bypass` is set.
    pub fn check_score_and_collisions(
        &mut self,
        tuning: &Tuning,
        body: &Body,
        mut on_pass: impl FnMut(),
        mut on_hit: impl FnMut(),
        bypass: bool,
    ) -> bool {
        let hitbox = body.hitbox(tuning);
        for obstacle in &mut self.obstacles {
            if !obstacle.passed && obstacle.right_edge(tuning) < body.pos.x {
                obstacle.passed = true;
                on_pass();
            }
            if !bypass {
                let (top, bottom) = obstacle.segment_boxes(tuning);
                if hitbox.overlaps(&top) || hitbox.overlaps(&bottom) {
                    on_hit();
                    return true;
                }
            }
        }
        // Ground and ceiling
        if !bypass && (body.pos.y + body.height >= tuning.ground_level || body.pos.y <= 0.0) {
            on_hit();
            return true;
        }
        false
    }
}
