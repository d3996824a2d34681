//! Look-ahead over the centre line: decides whether the track ahead is
//! straight enough to reward acceleration.

use crate::error::Result;
use crate::types::telemetry::{waypoint_at, Waypoint};
use crate::types::tuning::Tuning;
use tracing::trace;

/// Bearing in degrees (-180..=180) of the vector `from -> to`.
pub fn bearing(from: Waypoint, to: Waypoint) -> f64 {
    (to.1 - from.1).atan2(to.0 - from.0).to_degrees()
}

/// Absolute difference of two bearings folded into 0..=180.
pub fn angle_between(a: f64, b: f64) -> f64 {
    let difference = (a - b).abs();
    if difference > 180.0 {
        360.0 - difference
    } else {
        difference
    }
}

pub fn distance(a: Waypoint, b: Waypoint) -> f64 {
    (b.0 - a.0).hypot(b.1 - a.1)
}

/// Index `step` waypoints past `next`, clamped to the last waypoint. The lap
/// is not wrapped.
fn horizon_index(waypoints: &[Waypoint], next: usize, step: usize) -> usize {
    next.saturating_add(step).min(waypoints.len().saturating_sub(1))
}

/// Classifies the segment ahead: `true` means straight enough to speed up.
///
/// The long horizon (`future_step`) is tried first. When it bends past the
/// threshold but spans less than `min_span` metres there is not enough track
/// left to judge and the answer is `false`; otherwise the short horizon
/// (`min_step`) gets a second look.
///
/// The reference bearing points along the direction of travel, `prev -> next`,
/// so that a straight compares equal to the bearing towards the far waypoint.
pub fn is_speed_up(
    tuning: &Tuning,
    waypoints: &[Waypoint],
    closest_waypoints: [usize; 2],
) -> Result<bool> {
    let prev_waypoint = waypoint_at(waypoints, closest_waypoints[0])?;
    let next_waypoint = waypoint_at(waypoints, closest_waypoints[1])?;
    let reference = bearing(prev_waypoint, next_waypoint);

    let far_index = horizon_index(waypoints, closest_waypoints[1], tuning.lookahead.future_step);
    let far_waypoint = waypoint_at(waypoints, far_index)?;
    let difference = angle_between(reference, bearing(prev_waypoint, far_waypoint));
    trace!(reference, far_index, difference, "long horizon");

    if difference < tuning.direction_threshold {
        return Ok(true);
    }
    if distance(next_waypoint, far_waypoint) < tuning.lookahead.min_span {
        return Ok(false);
    }

    let near_index = horizon_index(waypoints, closest_waypoints[1], tuning.lookahead.min_step);
    let near_waypoint = waypoint_at(waypoints, near_index)?;
    let difference = angle_between(reference, bearing(prev_waypoint, near_waypoint));
    trace!(reference, near_index, difference, "short horizon");

    Ok(difference < tuning.direction_threshold)
}

/// Rewards speed on a straight and slowing down before a bend.
pub fn speed_up_check(
    tuning: &Tuning,
    score: f64,
    waypoints: &[Waypoint],
    closest_waypoints: [usize; 2],
    speed: f64,
) -> Result<f64> {
    let speed_up = is_speed_up(tuning, waypoints, closest_waypoints)?;
    let adjusted = if speed_up && speed > tuning.lookahead.fast_speed {
        score * tuning.reinforce[1]
    } else if !speed_up && speed < tuning.lookahead.slow_speed {
        score * tuning.reinforce[2]
    } else {
        score
    };
    Ok(adjusted)
}
