//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (single 32-bit state, byte-identical across platforms)
//! - No rendering, audio, or platform dependencies
//! - Misconfiguration clamps; the sim never fails at runtime

pub mod body;
pub mod difficulty;
pub mod rng;
pub mod spawn;
pub mod tick;
pub mod world;

pub use body::{Aabb, Body};
pub use difficulty::{gap_at_score, scroll_speed, speed_ramp};
pub use rng::{SeededRng, hash_seed};
pub use spawn::{
    ClampOutcome, Obstacle, SpawnInfo, admissible_band, generate, max_downward_reach,
    max_upward_reach,
};
pub use tick::{GameEvent, GamePhase, Medal, RunState, TickInput, medal_for_score};
pub use world::World;
