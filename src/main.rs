//! Updraft headless demo driver
//!
//! Runs the full simulation without a renderer: a simple autopilot flaps
//! toward the next gap center, the fixed-timestep loop drains simulated
//! time, and events are logged. Useful for eyeballing difficulty tuning
//! and for reproducing seeds from bug reports.
//!
//! Usage:
//!   updraft [SEED]                 run one game with the given u32 seed
//!   updraft --challenge LABEL      seed from a shared label (e.g. a date)
//!   updraft --tuning FILE.json     load tuning overrides from JSON
//!   updraft --max-ticks N          stop after N ticks (default 36000)

use std::process::ExitCode;

use updraft::sim::{GameEvent, GamePhase, RunState, TickInput, medal_for_score};
use updraft::tuning::{RawTuning, Tuning};

struct Args {
    seed: Option<u32>,
    challenge: Option<String>,
    tuning_path: Option<String>,
    max_ticks: u64,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        seed: None,
        challenge: None,
        tuning_path: None,
        max_ticks: 36_000,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--challenge" => {
                args.challenge = Some(iter.next().ok_or("--challenge needs a label")?);
            }
            "--tuning" => {
                args.tuning_path = Some(iter.next().ok_or("--tuning needs a file path")?);
            }
            "--max-ticks" => {
                let v = iter.next().ok_or("--max-ticks needs a number")?;
                args.max_ticks = v.parse().map_err(|_| format!("bad tick count: {v}"))?;
            }
            other => {
                args.seed = Some(
                    other
                        .parse()
                        .map_err(|_| format!("bad seed (want u32): {other}"))?,
                );
            }
        }
    }
    Ok(args)
}

fn load_tuning(path: Option<&str>) -> Result<Tuning, String> {
    let raw: RawTuning = match path {
        Some(path) => {
            let text =
                std::fs::read_to_string(path).map_err(|e| format!("read {path}: {e}"))?;
            serde_json::from_str(&text).map_err(|e| format!("parse {path}: {e}"))?
        }
        None => RawTuning::default(),
    };
    let tuning = raw.resolve();
    // Development assertion path: warn loudly, keep running (the sim clamps)
    if let Err(e) = tuning.validate() {
        log::warn!("tuning failed validation: {e}");
    }
    Ok(tuning)
}

/// Decide whether the autopilot flaps this tick: aim the hitbox center at
/// the next unpassed gap center, never faster than the reaction interval.
fn autopilot_flap(state: &RunState, ticks_since_flap: u32) -> bool {
    let tuning = &state.tuning;
    let min_interval_ticks = (tuning.reaction_interval() / tuning.tick_dt()).ceil() as u32;
    if ticks_since_flap < min_interval_ticks {
        return false;
    }

    let body_center = state.body.pos.y + state.body.height / 2.0;
    let target = state
        .world
        .obstacles
        .iter()
        .find(|o| o.right_edge(tuning) >= state.body.pos.x)
        .map_or(tuning.field_height * 0.5, |o| o.gap_center_y);

    // Flap when sinking below target, or any time we're falling fast near it
    body_center > target || (body_center > target - 20.0 && state.body.vel_y > 300.0)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let tuning = match load_tuning(args.tuning_path.as_deref()) {
        Ok(tuning) => tuning,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut state = match &args.challenge {
        Some(label) => RunState::new_challenge_run(tuning, label),
        None => RunState::new_run(tuning, args.seed),
    };
    log::info!("run start: seed={}", state.seed);

    let dt = state.tuning.tick_dt();
    let mut ticks_since_flap = u32::MAX;
    while state.phase != GamePhase::GameOver && state.time_ticks < args.max_ticks {
        let flap = state.phase == GamePhase::Playing && autopilot_flap(&state, ticks_since_flap);
        if flap {
            ticks_since_flap = 0;
        } else {
            ticks_since_flap = ticks_since_flap.saturating_add(1);
        }

        for event in state.tick(TickInput { flap }, dt) {
            match event {
                GameEvent::Spawned(info) => log::debug!(
                    "spawn: x={:.1} gap={:.1} center={:.1} outcome={:?} queue={}",
                    info.x,
                    info.gap_size,
                    info.gap_center_y,
                    info.outcome,
                    info.queue_len
                ),
                GameEvent::Pass { score } => log::info!("pass: score={score}"),
                GameEvent::Hit => log::info!("hit at tick {}", state.time_ticks),
                GameEvent::GameOver { score } => log::info!("game over: score={score}"),
                GameEvent::Flap => {}
            }
        }
    }

    let medal = medal_for_score(state.score)
        .map_or_else(|| "none".to_string(), |m| format!("{m:?}"));
    println!(
        "seed {} -> score {} in {} ticks (medal: {medal})",
        state.seed, state.score, state.time_ticks
    );
    ExitCode::SUCCESS
}
