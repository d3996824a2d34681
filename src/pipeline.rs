use crate::checkpoints::{
    beyond_outer_band, center_distance_check, direction_check, exception_check,
    left_of_center_check, on_track_check, progress_check, speed_check, steering_check,
    steering_rate_check, straight_line_check,
};
use crate::error::Result;
use crate::lookahead::speed_up_check;
use crate::types::telemetry::TelemetrySnapshot;
use crate::types::tuning::Tuning;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One entry of the composition table. The order of a [`Tuning`]'s
/// checkpoints is the order they run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Checkpoint {
    OnTrack,
    Offtrack,
    Crashed,
    Reversed,
    CenterDistance,
    StraightLine,
    Direction,
    SteeringLimit,
    SteeringRate,
    LeftOfCenter,
    Progress,
    Speed,
    SpeedUp,
}

impl Checkpoint {
    pub fn name(self) -> &'static str {
        match self {
            Checkpoint::OnTrack => "on_track",
            Checkpoint::Offtrack => "offtrack",
            Checkpoint::Crashed => "crashed",
            Checkpoint::Reversed => "reversed",
            Checkpoint::CenterDistance => "center_distance",
            Checkpoint::StraightLine => "straight_line",
            Checkpoint::Direction => "direction",
            Checkpoint::SteeringLimit => "steering_limit",
            Checkpoint::SteeringRate => "steering_rate",
            Checkpoint::LeftOfCenter => "left_of_center",
            Checkpoint::Progress => "progress",
            Checkpoint::Speed => "speed",
            Checkpoint::SpeedUp => "speed_up",
        }
    }

    /// Whether this checkpoint ends evaluation at the floor: a raised hazard
    /// flag or a car past the outer centre band.
    fn floors(self, tuning: &Tuning, snapshot: &TelemetrySnapshot) -> bool {
        match self {
            Checkpoint::Offtrack => snapshot.is_offtrack,
            Checkpoint::Crashed => snapshot.is_crashed,
            Checkpoint::Reversed => snapshot.is_reversed,
            Checkpoint::CenterDistance => beyond_outer_band(
                tuning,
                snapshot.track_width,
                snapshot.distance_from_center,
            ),
            _ => false,
        }
    }

    pub fn apply(self, tuning: &Tuning, score: f64, snapshot: &TelemetrySnapshot) -> Result<f64> {
        let adjusted = match self {
            Checkpoint::OnTrack => on_track_check(tuning, score, snapshot.all_wheels_on_track),
            Checkpoint::Offtrack => exception_check(tuning, score, snapshot.is_offtrack),
            Checkpoint::Crashed => exception_check(tuning, score, snapshot.is_crashed),
            Checkpoint::Reversed => exception_check(tuning, score, snapshot.is_reversed),
            Checkpoint::CenterDistance => center_distance_check(
                tuning,
                score,
                snapshot.track_width,
                snapshot.distance_from_center,
            )?,
            Checkpoint::StraightLine => {
                straight_line_check(tuning, score, snapshot.abs_steering(), snapshot.speed)
            }
            Checkpoint::Direction => direction_check(
                tuning,
                score,
                &snapshot.waypoints,
                snapshot.closest_waypoints,
                snapshot.heading,
            )?,
            Checkpoint::SteeringLimit => steering_check(tuning, score, snapshot.steering_angle),
            Checkpoint::SteeringRate => {
                steering_rate_check(tuning, score, snapshot.speed, snapshot.steering_angle)
            }
            Checkpoint::LeftOfCenter => {
                left_of_center_check(tuning, score, snapshot.is_left_of_center)
            }
            Checkpoint::Progress => progress_check(tuning, score, snapshot.progress),
            Checkpoint::Speed => speed_check(tuning, score, snapshot.speed),
            Checkpoint::SpeedUp => speed_up_check(
                tuning,
                score,
                &snapshot.waypoints,
                snapshot.closest_waypoints,
                snapshot.speed,
            )?,
        };
        Ok(adjusted)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStep {
    pub checkpoint: Checkpoint,
    pub before: f64,
    pub after: f64,
}

/// Score after every checkpoint that ran, plus the final reward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardTrace {
    pub steps: Vec<TraceStep>,
    /// Checkpoint that ended evaluation at the floor, if any.
    pub floored_by: Option<Checkpoint>,
    pub reward: f64,
}

pub fn evaluate(snapshot: &TelemetrySnapshot, tuning: &Tuning) -> Result<f64> {
    evaluate_traced(snapshot, tuning).map(|trace| trace.reward)
}

/// Runs the checkpoints in order. A raised hazard flag, or a car past the
/// outer centre band, ends evaluation at `lowest_reward`; otherwise the
/// accumulated score is clamped below by it.
pub fn evaluate_traced(snapshot: &TelemetrySnapshot, tuning: &Tuning) -> Result<RewardTrace> {
    tuning.validate()?;
    snapshot.validate()?;

    let mut score = tuning.default_reward;
    let mut steps = Vec::with_capacity(tuning.checkpoints.len());

    for &checkpoint in &tuning.checkpoints {
        let before = score;
        score = checkpoint.apply(tuning, score, snapshot)?;
        debug!(checkpoint = checkpoint.name(), before, after = score, "checkpoint");
        steps.push(TraceStep {
            checkpoint,
            before,
            after: score,
        });

        if checkpoint.floors(tuning, snapshot) {
            debug!(checkpoint = checkpoint.name(), "reward floored");
            return Ok(RewardTrace {
                steps,
                floored_by: Some(checkpoint),
                reward: tuning.lowest_reward,
            });
        }
    }

    Ok(RewardTrace {
        steps,
        floored_by: None,
        reward: score.max(tuning.lowest_reward),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RewardError;
    use crate::types::telemetry::fixtures::centred_snapshot;
    use crate::types::tuning::ExceptionMode;

    #[test]
    fn checkpoint_names_match_serde_names() {
        for checkpoint in Tuning::centerline_v2()
            .checkpoints
            .into_iter()
            .chain(Tuning::lookahead_v3().checkpoints)
            .chain([Checkpoint::SteeringLimit])
        {
            let encoded = serde_json::to_string(&checkpoint).expect("checkpoint should encode");
            assert_eq!(encoded, format!("\"{}\"", checkpoint.name()));
        }
    }

    #[test]
    fn centerline_v2_reset_discards_earlier_factors() {
        let trace = evaluate_traced(&centred_snapshot(), &Tuning::centerline_v2())
            .expect("evaluation should succeed");
        assert!(trace.floored_by.is_none());
        assert_eq!(trace.steps.len(), 11);
        assert!(trace.steps[8].after > 1.0);
        assert_eq!(trace.reward, 1.0);
    }

    #[test]
    fn centerline_v2_hold_keeps_factors() {
        let mut tuning = Tuning::centerline_v2();
        tuning.exception_mode = ExceptionMode::Hold;
        // centre 1.2, straight 1.5, steering rate 0.8, left 1.2, progress 1.15, speed 1.3
        let expected = 1.2 * 1.5 * 0.8 * 1.2 * 1.15 * 1.3;
        let reward = evaluate(&centred_snapshot(), &tuning).expect("evaluation should succeed");
        assert!((reward - expected).abs() < 1e-9);
    }

    #[test]
    fn hazard_stops_evaluation_at_floor() {
        let mut snapshot = centred_snapshot();
        snapshot.is_crashed = true;
        let trace =
            evaluate_traced(&snapshot, &Tuning::lookahead_v3()).expect("evaluation should succeed");
        assert_eq!(trace.floored_by, Some(Checkpoint::Crashed));
        assert_eq!(trace.steps.len(), 3);
        assert_eq!(trace.reward, 1e-3);
    }

    #[test]
    fn leaving_the_outer_band_stops_evaluation() {
        let mut snapshot = centred_snapshot();
        snapshot.distance_from_center = 0.7;
        let trace =
            evaluate_traced(&snapshot, &Tuning::centerline_v2()).expect("evaluation should succeed");
        assert_eq!(trace.floored_by, Some(Checkpoint::CenterDistance));
        assert_eq!(trace.steps.len(), 3);
        assert_eq!(trace.reward, 1e-3);
    }

    #[test]
    fn reward_never_drops_below_floor() {
        let mut tuning = Tuning::lookahead_v3();
        tuning.exception_mode = ExceptionMode::Hold;
        let mut snapshot = centred_snapshot();
        snapshot.all_wheels_on_track = false;
        snapshot.distance_from_center = 0.45;
        snapshot.is_left_of_center = false;

        let reward = evaluate(&snapshot, &tuning).expect("evaluation should succeed");
        assert_eq!(reward, 1e-3);
    }

    #[test]
    fn invalid_tuning_is_rejected_before_scoring() {
        let mut tuning = Tuning::lookahead_v3();
        tuning.lowest_reward = -1.0;
        let mut snapshot = centred_snapshot();
        snapshot.is_offtrack = true;

        let err = evaluate(&snapshot, &tuning).expect_err("negative floor should fail");
        assert!(matches!(err, RewardError::Configuration(_)));
        assert!(err.to_string().contains("lowest_reward"));
    }

    #[test]
    fn invalid_snapshot_is_rejected_before_scoring() {
        let mut snapshot = centred_snapshot();
        snapshot.closest_waypoints = [3, 40];
        assert!(matches!(
            evaluate(&snapshot, &Tuning::lookahead_v3()),
            Err(RewardError::WaypointIndex { index: 40, .. })
        ));
    }
}
