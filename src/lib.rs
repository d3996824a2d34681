//! Reward signal for a reinforcement-learning agent driving a simulated
//! vehicle around a track.
//!
//! A [`TelemetrySnapshot`] is scored by running the checkpoints listed in a
//! [`Tuning`] over a running score that starts at `default_reward`. Two
//! shipped variants are available as presets, see [`TuningPreset`].

pub mod checkpoints;
pub mod config;
pub mod error;
pub mod lookahead;
pub mod pipeline;
pub mod replay;
pub mod types;

pub use error::{RewardError, Result};
pub use pipeline::{evaluate, evaluate_traced, Checkpoint, RewardTrace};
pub use types::telemetry::{TelemetrySnapshot, Waypoint};
pub use types::tuning::{ExceptionMode, Tuning, TuningPreset};

/// Scores one simulation step.
pub fn reward(snapshot: &TelemetrySnapshot, tuning: &Tuning) -> Result<f64> {
    evaluate(snapshot, tuning)
}

/// Decodes a JSON parameter record and scores it.
pub fn reward_from_json(input: &str, tuning: &Tuning) -> Result<f64> {
    let snapshot = TelemetrySnapshot::from_json(input)?;
    evaluate(&snapshot, tuning)
}
