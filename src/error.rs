use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewardError {
    #[error("missing telemetry field: {0}")]
    MissingField(String),

    #[error("invalid telemetry field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("waypoint index {index} out of bounds for {len} waypoints")]
    WaypointIndex { index: usize, len: usize },

    #[error("tuning parse error: {0}")]
    ConfigParse(String),

    #[error("unknown tuning preset: {0}")]
    UnknownPreset(String),

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<RewardError>,
    },

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RewardError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        RewardError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RewardError>;
