//! Offline scoring of recorded telemetry, one JSON snapshot per line.

use crate::error::{RewardError, Result};
use crate::pipeline::evaluate;
use crate::types::telemetry::TelemetrySnapshot;
use crate::types::tuning::Tuning;
use serde::Serialize;
use std::io::BufRead;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub tuning: String,
    pub steps: usize,
    pub total: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Steps that ended at `lowest_reward`.
    pub floored: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub rewards: Vec<f64>,
    pub summary: ReplaySummary,
}

pub fn score_lines(reader: impl BufRead, tuning: &Tuning) -> Result<ReplayReport> {
    let mut rewards = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let reward = TelemetrySnapshot::from_json(&line)
            .and_then(|snapshot| evaluate(&snapshot, tuning))
            .map_err(|source| RewardError::Line {
                line: index + 1,
                source: Box::new(source),
            })?;
        rewards.push(reward);
    }

    let summary = summarize(&rewards, tuning);
    info!(
        tuning = %summary.tuning,
        steps = summary.steps,
        mean = summary.mean,
        floored = summary.floored,
        "replay scored"
    );
    Ok(ReplayReport { rewards, summary })
}

fn summarize(rewards: &[f64], tuning: &Tuning) -> ReplaySummary {
    let total: f64 = rewards.iter().sum();
    let steps = rewards.len();
    ReplaySummary {
        tuning: tuning.name.clone(),
        steps,
        total,
        mean: if steps == 0 { 0.0 } else { total / steps as f64 },
        min: rewards.iter().copied().reduce(f64::min).unwrap_or(0.0),
        max: rewards.iter().copied().reduce(f64::max).unwrap_or(0.0),
        floored: rewards
            .iter()
            .filter(|reward| **reward <= tuning.lowest_reward)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::telemetry::fixtures::centred_snapshot;
    use std::io::Cursor;

    fn log(snapshots: &[TelemetrySnapshot]) -> String {
        snapshots
            .iter()
            .map(|snapshot| serde_json::to_string(snapshot).expect("snapshot should encode"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn replay_scores_every_line_and_counts_floored_steps() {
        let mut crashed = centred_snapshot();
        crashed.is_crashed = true;
        let input = format!("{}\n\n", log(&[centred_snapshot(), crashed, centred_snapshot()]));

        let report = score_lines(Cursor::new(input), &Tuning::lookahead_v3())
            .expect("replay should succeed");

        assert_eq!(report.rewards.len(), 3);
        assert_eq!(report.summary.steps, 3);
        assert_eq!(report.summary.floored, 1);
        assert_eq!(report.summary.min, 1e-3);
        assert!(report.summary.max > 1.0);
        assert_eq!(report.summary.tuning, "lookahead-v3");
    }

    #[test]
    fn replay_reports_failing_line_number() {
        let mut broken = centred_snapshot();
        broken.track_width = 0.0;
        let input = log(&[centred_snapshot(), broken]);

        let err = score_lines(Cursor::new(input), &Tuning::lookahead_v3())
            .expect_err("zero width should fail");
        assert!(matches!(err, RewardError::Line { line: 2, .. }));
        assert!(err.to_string().contains("track_width"));
    }

    #[test]
    fn empty_replay_has_zero_summary() {
        let report =
            score_lines(Cursor::new(""), &Tuning::centerline_v2()).expect("empty replay is fine");
        assert!(report.rewards.is_empty());
        assert_eq!(report.summary.mean, 0.0);
        assert_eq!(report.summary.floored, 0);
    }
}
