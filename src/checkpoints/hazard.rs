use crate::types::tuning::{ExceptionMode, Tuning};

/// Floors the score when `exception` is set. A clear flag resets to
/// `default_reward` under [`ExceptionMode::Reset`].
pub fn exception_check(tuning: &Tuning, score: f64, exception: bool) -> f64 {
    if exception {
        return tuning.lowest_reward;
    }
    settle(tuning, score)
}

pub fn on_track_check(tuning: &Tuning, score: f64, all_wheels_on_track: bool) -> f64 {
    if all_wheels_on_track {
        return settle(tuning, score);
    }
    tuning.lowest_reward
}

fn settle(tuning: &Tuning, score: f64) -> f64 {
    match tuning.exception_mode {
        ExceptionMode::Reset => tuning.default_reward,
        ExceptionMode::Hold => score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exception_floors_regardless_of_score() {
        let tuning = Tuning::centerline_v2();
        assert_eq!(exception_check(&tuning, 4.2, true), 1e-3);
        assert_eq!(exception_check(&tuning, 0.0, true), 1e-3);
    }

    #[test]
    fn clear_exception_resets_accumulated_score() {
        let tuning = Tuning::centerline_v2();
        assert_eq!(exception_check(&tuning, 2.5, false), 1.0);
        assert_eq!(on_track_check(&tuning, 0.4, true), 1.0);
    }

    #[test]
    fn hold_mode_keeps_accumulated_score() {
        let mut tuning = Tuning::centerline_v2();
        tuning.exception_mode = ExceptionMode::Hold;
        assert_eq!(exception_check(&tuning, 2.5, false), 2.5);
        assert_eq!(on_track_check(&tuning, 0.4, true), 0.4);
        assert_eq!(on_track_check(&tuning, 0.4, false), 1e-3);
    }
}
