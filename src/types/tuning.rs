use crate::error::RewardError;
use crate::pipeline::Checkpoint;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What a hazard check does when its flag is clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionMode {
    /// Replace the running score with `default_reward`. Trained models depend on this.
    Reset,
    /// Leave the running score untouched.
    Hold,
}

/// Thresholds, factors and checkpoint order for one reward variant.
///
/// Factor slots:
/// - `reinforce[0]` inner centre band, left of centre, mild straight-line bonus
/// - `reinforce[1]` strong straight-line bonus, look-ahead speed-up
/// - `reinforce[2]` progress, look-ahead slow-down
/// - `reinforce[3]` speed above the high band
/// - `punish[0]` middle centre band, right of centre, steering
/// - `punish[1]` outer centre band
/// - `punish[2]` heading off the track bearing
/// - `punish[3]` speed below the low band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub name: String,
    pub default_reward: f64,
    pub lowest_reward: f64,
    pub exception_mode: ExceptionMode,
    pub direction_threshold: f64,
    pub abs_steering_threshold: f64,
    pub progress_threshold: f64,
    pub reinforce: [f64; 4],
    pub punish: [f64; 4],
    pub checkpoints: Vec<Checkpoint>,
    pub center: CenterBands,
    pub straight_line: StraightLineBands,
    pub steering: SteeringCeiling,
    pub speed: SpeedBands,
    pub lookahead: LookAheadTuning,
}

/// Fractions of `track_width`, inclusive upper bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterBands {
    pub inner: f64,
    pub middle: f64,
    pub outer: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StraightLineBands {
    pub strong_steering: f64,
    pub strong_speed: f64,
    pub mild_steering: f64,
    pub mild_speed: f64,
}

/// Speed ceiling `intercept - slope * |steering|`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteeringCeiling {
    pub intercept: f64,
    pub slope: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedBands {
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookAheadTuning {
    pub min_step: usize,
    pub future_step: usize,
    /// Metres between the next and far waypoints below which the long horizon is not trusted.
    pub min_span: f64,
    pub fast_speed: f64,
    pub slow_speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuningPreset {
    CenterlineV2,
    LookaheadV3,
}

impl TuningPreset {
    pub const ALL: [TuningPreset; 2] = [TuningPreset::CenterlineV2, TuningPreset::LookaheadV3];

    pub fn name(self) -> &'static str {
        match self {
            TuningPreset::CenterlineV2 => "centerline-v2",
            TuningPreset::LookaheadV3 => "lookahead-v3",
        }
    }

    pub fn tuning(self) -> Tuning {
        match self {
            TuningPreset::CenterlineV2 => Tuning::centerline_v2(),
            TuningPreset::LookaheadV3 => Tuning::lookahead_v3(),
        }
    }
}

impl FromStr for TuningPreset {
    type Err = RewardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TuningPreset::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| RewardError::UnknownPreset(s.to_string()))
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::lookahead_v3()
    }
}

impl Tuning {
    /// Centre-line variant: no look-ahead, crash/reverse checks run last.
    pub fn centerline_v2() -> Self {
        Self {
            name: TuningPreset::CenterlineV2.name().to_string(),
            default_reward: 1.0,
            lowest_reward: 1e-3,
            exception_mode: ExceptionMode::Reset,
            direction_threshold: 10.0,
            abs_steering_threshold: 25.0,
            progress_threshold: 75.0,
            reinforce: [1.2, 1.5, 1.15, 1.3],
            punish: [0.8, 0.5, 0.6, 0.75],
            checkpoints: vec![
                Checkpoint::Offtrack,
                Checkpoint::OnTrack,
                Checkpoint::CenterDistance,
                Checkpoint::StraightLine,
                Checkpoint::Direction,
                Checkpoint::SteeringRate,
                Checkpoint::LeftOfCenter,
                Checkpoint::Progress,
                Checkpoint::Speed,
                Checkpoint::Crashed,
                Checkpoint::Reversed,
            ],
            center: CenterBands {
                inner: 0.1,
                middle: 0.3,
                outer: 0.5,
            },
            straight_line: StraightLineBands {
                strong_steering: 0.15,
                strong_speed: 2.0,
                mild_steering: 0.2,
                mild_speed: 1.7,
            },
            steering: SteeringCeiling {
                intercept: 2.1,
                slope: 0.5,
            },
            speed: SpeedBands {
                low: 1.2,
                high: 1.5,
            },
            lookahead: LookAheadTuning {
                min_step: 2,
                future_step: 5,
                min_span: 1.1,
                fast_speed: 2.0,
                slow_speed: 1.5,
            },
        }
    }

    /// Look-ahead variant: hazards first, speed reward gated on the segment ahead.
    pub fn lookahead_v3() -> Self {
        Self {
            name: TuningPreset::LookaheadV3.name().to_string(),
            reinforce: [1.25, 1.6, 1.15, 1.3],
            punish: [0.85, 0.5, 0.6, 0.75],
            checkpoints: vec![
                Checkpoint::OnTrack,
                Checkpoint::Offtrack,
                Checkpoint::Crashed,
                Checkpoint::Reversed,
                Checkpoint::CenterDistance,
                Checkpoint::SpeedUp,
                Checkpoint::Direction,
                Checkpoint::LeftOfCenter,
                Checkpoint::Progress,
            ],
            center: CenterBands {
                inner: 0.1,
                middle: 0.25,
                outer: 0.5,
            },
            ..Self::centerline_v2()
        }
    }

    pub fn validate(&self) -> Result<(), RewardError> {
        for (key, value) in [
            ("default_reward", self.default_reward),
            ("lowest_reward", self.lowest_reward),
            ("direction_threshold", self.direction_threshold),
            ("abs_steering_threshold", self.abs_steering_threshold),
            ("progress_threshold", self.progress_threshold),
            ("straight_line.strong_steering", self.straight_line.strong_steering),
            ("straight_line.strong_speed", self.straight_line.strong_speed),
            ("straight_line.mild_steering", self.straight_line.mild_steering),
            ("straight_line.mild_speed", self.straight_line.mild_speed),
            ("steering.intercept", self.steering.intercept),
            ("steering.slope", self.steering.slope),
            ("speed.low", self.speed.low),
            ("speed.high", self.speed.high),
            ("lookahead.min_span", self.lookahead.min_span),
            ("lookahead.fast_speed", self.lookahead.fast_speed),
            ("lookahead.slow_speed", self.lookahead.slow_speed),
        ] {
            if !value.is_finite() {
                return Err(RewardError::Configuration(format!(
                    "{key} must be finite (found {value})"
                )));
            }
        }

        if self.lowest_reward <= 0.0 {
            return Err(RewardError::Configuration(
                "lowest_reward must be greater than 0".to_string(),
            ));
        }
        if self.lowest_reward >= self.default_reward {
            return Err(RewardError::Configuration(format!(
                "lowest_reward ({}) must be below default_reward ({})",
                self.lowest_reward, self.default_reward
            )));
        }
        if let Some(factor) = self.reinforce.iter().find(|factor| !(**factor > 1.0)) {
            return Err(RewardError::Configuration(format!(
                "reinforce factors must be greater than 1.0 (found {factor})"
            )));
        }
        if let Some(factor) = self
            .punish
            .iter()
            .find(|factor| !(**factor > 0.0 && **factor < 1.0))
        {
            return Err(RewardError::Configuration(format!(
                "punish factors must be between 0.0 and 1.0 exclusive (found {factor})"
            )));
        }

        let CenterBands {
            inner,
            middle,
            outer,
        } = self.center;
        if !(inner > 0.0 && inner < middle && middle < outer && outer <= 1.0) {
            return Err(RewardError::Configuration(format!(
                "center bands must increase within (0, 1] (found {inner}, {middle}, {outer})"
            )));
        }
        if self.speed.low > self.speed.high {
            return Err(RewardError::Configuration(
                "speed.low must not exceed speed.high".to_string(),
            ));
        }
        if self.lookahead.min_step == 0 {
            return Err(RewardError::Configuration(
                "lookahead.min_step must be greater than 0".to_string(),
            ));
        }
        if self.lookahead.min_step > self.lookahead.future_step {
            return Err(RewardError::Configuration(
                "lookahead.min_step must not exceed lookahead.future_step".to_string(),
            ));
        }
        if self.checkpoints.is_empty() {
            return Err(RewardError::Configuration(
                "checkpoints cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
