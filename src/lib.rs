//! Updraft - an endless side-scroller core
//!
//! A controllable body falls under gravity and is boosted upward by
//! discrete flap inputs while paired obstacles scroll toward it. The crate
//! is the obstacle-generation and fairness-guarantee engine plus the
//! fixed-timestep physics/collision core it must stay consistent with;
//! rendering, audio, persistence and input plumbing are external.
//!
//! Core modules:
//! - `sim`: deterministic simulation (rng, body physics, difficulty,
//!   obstacle generation with the reachability fairness clamp, world,
//!   tick driver)
//! - `tuning`: data-driven balance, resolved once at load time
//!
//! The central guarantee: no generated obstacle sequence ever requires
//! vertical movement the body's own physics cannot produce in the time
//! available, re-derived from whatever constants are configured.

pub mod sim;
pub mod tuning;

pub use sim::{Body, GameEvent, GamePhase, RunState, SeededRng, TickInput, World};
pub use tuning::{Easing, RawTuning, Tuning, TuningError};
