use crate::error::{RewardError, Result};
use crate::lookahead::bearing;
use crate::types::telemetry::{waypoint_at, Waypoint};
use crate::types::tuning::Tuning;

/// Past the outer band the car is effectively off the road; evaluation ends
/// at the floor.
pub fn beyond_outer_band(tuning: &Tuning, track_width: f64, distance: f64) -> bool {
    distance > tuning.center.outer * track_width
}

/// Band edges are inclusive: a distance equal to a marker belongs to the
/// inner band.
pub fn center_distance_check(
    tuning: &Tuning,
    score: f64,
    track_width: f64,
    distance: f64,
) -> Result<f64> {
    if track_width <= 0.0 {
        return Err(RewardError::Configuration(format!(
            "track_width must be positive (found {track_width})"
        )));
    }

    let marker_1 = tuning.center.inner * track_width;
    let marker_2 = tuning.center.middle * track_width;

    let adjusted = if beyond_outer_band(tuning, track_width, distance) {
        tuning.lowest_reward
    } else if distance <= marker_1 {
        score * tuning.reinforce[0]
    } else if distance <= marker_2 {
        score * tuning.punish[0]
    } else {
        score * tuning.punish[1]
    };
    Ok(adjusted)
}

/// Compares the heading with the bearing of the closest segment. The raw
/// difference is not wrapped, so headings near ±180 can be punished on a
/// straight.
pub fn direction_check(
    tuning: &Tuning,
    score: f64,
    waypoints: &[Waypoint],
    closest_waypoints: [usize; 2],
    heading: f64,
) -> Result<f64> {
    let prev_waypoint = waypoint_at(waypoints, closest_waypoints[0])?;
    let next_waypoint = waypoint_at(waypoints, closest_waypoints[1])?;

    let direction = bearing(prev_waypoint, next_waypoint);
    let difference = (direction - heading).abs();

    if difference > tuning.direction_threshold {
        return Ok(score * tuning.punish[2]);
    }
    Ok(score)
}

pub fn left_of_center_check(tuning: &Tuning, score: f64, is_left_of_center: bool) -> f64 {
    if is_left_of_center {
        score * tuning.reinforce[0]
    } else {
        score * tuning.punish[0]
    }
}
