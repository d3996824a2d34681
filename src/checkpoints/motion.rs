use crate::types::tuning::Tuning;

pub fn straight_line_check(tuning: &Tuning, score: f64, abs_steering: f64, speed: f64) -> f64 {
    let bands = &tuning.straight_line;
    if abs_steering < bands.strong_steering && speed > bands.strong_speed {
        score * tuning.reinforce[1]
    } else if abs_steering < bands.mild_steering && speed > bands.mild_speed {
        score * tuning.reinforce[0]
    } else {
        score
    }
}

/// Hard limit on steering magnitude.
pub fn steering_check(tuning: &Tuning, score: f64, steering: f64) -> f64 {
    if steering.abs() > tuning.abs_steering_threshold {
        return score * tuning.punish[0];
    }
    score
}

/// Punishes speed above a ceiling that drops as steering grows.
pub fn steering_rate_check(tuning: &Tuning, score: f64, speed: f64, steering: f64) -> f64 {
    let ceiling = tuning.steering.intercept - tuning.steering.slope * steering.abs();
    if speed > ceiling {
        return score * tuning.punish[0];
    }
    score
}

pub fn progress_check(tuning: &Tuning, score: f64, progress: f64) -> f64 {
    if progress > tuning.progress_threshold {
        return score * tuning.reinforce[2];
    }
    score
}

pub fn speed_check(tuning: &Tuning, score: f64, speed: f64) -> f64 {
    if speed < tuning.speed.low {
        score * tuning.punish[3]
    } else if speed > tuning.speed.high {
        score * tuning.reinforce[3]
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn straight_line_has_two_bonus_tiers() {
        let tuning = Tuning::centerline_v2();
        assert!(close(straight_line_check(&tuning, 1.0, 0.1, 2.5), 1.5));
        assert!(close(straight_line_check(&tuning, 1.0, 0.18, 1.8), 1.2));
        assert!(close(straight_line_check(&tuning, 1.0, 0.1, 1.8), 1.2));
        assert!(close(straight_line_check(&tuning, 1.0, 0.5, 3.0), 1.0));
        assert!(close(straight_line_check(&tuning, 1.0, 0.1, 1.7), 1.0));
    }

    #[test]
    fn steering_check_punishes_only_past_threshold() {
        let tuning = Tuning::centerline_v2();
        assert!(close(steering_check(&tuning, 1.0, -25.0), 1.0));
        assert!(close(steering_check(&tuning, 1.0, -30.0), 0.8));
    }

    #[test]
    fn steering_rate_ceiling_shrinks_with_steering() {
        let tuning = Tuning::centerline_v2();
        // ceiling at zero steering is 2.1
        assert!(close(steering_rate_check(&tuning, 1.0, 2.0, 0.0), 1.0));
        assert!(close(steering_rate_check(&tuning, 1.0, 2.2, 0.0), 0.8));
        // ceiling at 2 degrees is 1.1
        assert!(close(steering_rate_check(&tuning, 1.0, 1.5, -2.0), 0.8));
        assert!(close(steering_rate_check(&tuning, 1.0, 1.0, 2.0), 1.0));
    }

    #[test]
    fn progress_rewards_only_past_threshold() {
        let tuning = Tuning::centerline_v2();
        assert!(close(progress_check(&tuning, 1.0, 75.0), 1.0));
        assert!(close(progress_check(&tuning, 1.0, 80.0), 1.15));
    }

    #[test]
    fn speed_check_bands() {
        let tuning = Tuning::centerline_v2();
        assert!(close(speed_check(&tuning, 1.0, 1.0), 0.75));
        assert!(close(speed_check(&tuning, 1.0, 1.3), 1.0));
        assert!(close(speed_check(&tuning, 1.0, 2.0), 1.3));
    }
}
