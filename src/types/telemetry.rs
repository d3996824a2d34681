use crate::error::{RewardError, Result};
use serde::{Deserialize, Serialize};

/// Centre-line point `(x, y)` in metres.
pub type Waypoint = (f64, f64);

/// Per-step agent state handed over by the simulator.
///
/// Field names match the simulator's parameter record so a snapshot can be
/// decoded straight from its JSON form. Every field is required; a record
/// missing one is rejected rather than defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub all_wheels_on_track: bool,
    pub x: f64,
    pub y: f64,
    pub closest_objects: [usize; 2],
    pub closest_waypoints: [usize; 2],
    pub distance_from_center: f64,
    pub is_crashed: bool,
    pub is_left_of_center: bool,
    pub is_offtrack: bool,
    pub is_reversed: bool,
    /// Yaw in degrees, -180..180.
    pub heading: f64,
    pub objects_distance: Vec<f64>,
    pub objects_heading: Vec<f64>,
    pub objects_left_of_center: Vec<bool>,
    pub objects_location: Vec<Waypoint>,
    pub objects_speed: Vec<f64>,
    /// Percentage of the lap completed, 0..100.
    pub progress: f64,
    pub speed: f64,
    /// Degrees, positive to the left.
    pub steering_angle: f64,
    pub steps: u64,
    pub track_length: f64,
    pub track_width: f64,
    pub waypoints: Vec<Waypoint>,
}

impl TelemetrySnapshot {
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(map_decode_error)
    }

    pub fn abs_steering(&self) -> f64 {
        self.steering_angle.abs()
    }

    /// Boundary check run once per evaluation before any checkpoint.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("x", self.x),
            ("y", self.y),
            ("distance_from_center", self.distance_from_center),
            ("heading", self.heading),
            ("progress", self.progress),
            ("speed", self.speed),
            ("steering_angle", self.steering_angle),
            ("track_length", self.track_length),
            ("track_width", self.track_width),
        ] {
            if !value.is_finite() {
                return Err(RewardError::invalid(field, format!("{value} is not finite")));
            }
        }

        if self.distance_from_center < 0.0 {
            return Err(RewardError::invalid(
                "distance_from_center",
                "must be non-negative",
            ));
        }
        if self.speed < 0.0 {
            return Err(RewardError::invalid("speed", "must be non-negative"));
        }
        if !(0.0..=100.0).contains(&self.progress) {
            return Err(RewardError::invalid("progress", "must be between 0 and 100"));
        }
        if self.track_width <= 0.0 {
            return Err(RewardError::Configuration(format!(
                "track_width must be positive (found {})",
                self.track_width
            )));
        }
        if let Some((index, point)) = self
            .waypoints
            .iter()
            .enumerate()
            .find(|(_, (x, y))| !x.is_finite() || !y.is_finite())
        {
            return Err(RewardError::invalid(
                "waypoints",
                format!("waypoint {index} {point:?} is not finite"),
            ));
        }
        for index in self.closest_waypoints {
            waypoint_at(&self.waypoints, index)?;
        }

        Ok(())
    }
}

pub fn waypoint_at(waypoints: &[Waypoint], index: usize) -> Result<Waypoint> {
    waypoints
        .get(index)
        .copied()
        .ok_or(RewardError::WaypointIndex {
            index,
            len: waypoints.len(),
        })
}

fn map_decode_error(err: serde_json::Error) -> RewardError {
    let message = err.to_string();
    match message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
    {
        Some(field) => RewardError::MissingField(field.to_string()),
        None => RewardError::Json(err),
    }
}
