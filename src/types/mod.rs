pub mod telemetry;
pub mod tuning;
