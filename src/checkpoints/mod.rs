//! Checkpoint evaluators. Each takes the running score plus the telemetry it
//! inspects and returns the adjusted score; none of them keep state.

pub mod hazard;
pub mod motion;
pub mod position;

pub use hazard::{exception_check, on_track_check};
pub use motion::{
    progress_check, speed_check, steering_check, steering_rate_check, straight_line_check,
};
pub use position::{
    beyond_outer_band, center_distance_check, direction_check, left_of_center_check,
};
