//! Fixed timestep run driver contract
//!
//! [`RunState`] owns everything a run needs (rng, world, body, score) and
//! [`RunState::tick`] advances it one fixed step in a strict order: input,
//! body step, spawn check, world step, score/collision. Physics, scoring
//! and collision are therefore always evaluated at the same simulated
//! instant.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::rng::{SeededRng, hash_seed};
use super::spawn::SpawnInfo;
use super::world::World;
use crate::tuning::Tuning;

/// Run phase. Boot/title/menu states live with the UI, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Fatal hit taken; body nose-dives until it reaches the ground
    Dying,
    /// Run ended
    GameOver,
}

/// Input resolved for a single tick.
///
/// The outer loop owns the wall-clock input buffer; by the time a tick
/// runs, `flap` is simply "a buffered press is live at this boundary".
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub flap: bool,
}

/// Events emitted by a tick, in occurrence order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Flap,
    Spawned(SpawnInfo),
    Pass { score: u32 },
    Hit,
    GameOver { score: u32 },
}

/// Medals awarded at run end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Medal {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

/// Medal for a final score, if any (10/20/30/50 thresholds).
pub fn medal_for_score(score: u32) -> Option<Medal> {
    match score {
        0..=9 => None,
        10..=19 => Some(Medal::Bronze),
        20..=29 => Some(Medal::Silver),
        30..=49 => Some(Medal::Gold),
        _ => Some(Medal::Platinum),
    }
}

/// Complete state of one run. Rebuilding from the same seed and tuning
/// replays the run; nothing leaks across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub seed: u32,
    pub tuning: Tuning,
    pub rng: SeededRng,
    pub world: World,
    pub body: Body,
    pub score: u32,
    pub phase: GamePhase,
    pub time_ticks: u64,
}

impl RunState {
    /// Start a run. `seed` of `None` draws a process-random seed (casual
    /// play); pass `Some` for reproducible runs.
    pub fn new_run(tuning: Tuning, seed: Option<u32>) -> Self {
        let seed = seed.unwrap_or_else(rand::random::<u32>);
        let world = World::new(&tuning);
        let body = Body::new(&tuning);
        Self {
            seed,
            rng: SeededRng::new(seed),
            world,
            body,
            score: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            tuning,
        }
    }

    /// Start a shared-challenge run: the seed is a deterministic hash of
    /// the label (typically a calendar date), identical on every client.
    pub fn new_challenge_run(tuning: Tuning, label: &str) -> Self {
        Self::new_run(tuning, Some(hash_seed(label)))
    }

    /// Advance one fixed timestep.
    pub fn tick(&mut self, input: TickInput, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.time_ticks += 1;

        match self.phase {
            GamePhase::Playing => {
                if input.flap {
                    self.body.flap(&self.tuning);
                    events.push(GameEvent::Flap);
                }
                self.body.step(&self.tuning, dt);

                if let Some(info) =
                    self.world
                        .spawn_if_needed(&self.tuning, &mut self.rng, self.body.height)
                {
                    events.push(GameEvent::Spawned(info));
                }
                self.world.step(&self.tuning, dt, self.score);

                let mut passes = 0u32;
                let hit = self.world.check_score_and_collisions(
                    &self.tuning,
                    &self.body,
                    || passes += 1,
                    || {},
                    self.tuning.ghost_mode,
                );
                for _ in 0..passes {
                    self.score += 1;
                    events.push(GameEvent::Pass { score: self.score });
                }

                if hit {
                    events.push(GameEvent::Hit);
                    // Nose-dive: force a downward exit, keep falling in Dying
                    self.body.vel_y = self.body.vel_y.max(self.tuning.nose_dive_velocity);
                    self.phase = GamePhase::Dying;
                }
            }

            GamePhase::Dying => {
                self.body.step(&self.tuning, dt);
                let floor = self.tuning.ground_level - self.body.height;
                if self.body.pos.y >= floor {
                    self.body.pos.y = floor;
                    self.phase = GamePhase::GameOver;
                    events.push(GameEvent::GameOver { score: self.score });
                }
            }

            GamePhase::GameOver => {}
        }

        events
    }
}
