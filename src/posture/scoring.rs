use serde::{Deserialize, Serialize};

use super::config::{EngineConfig, IdealRanges};
use super::types::{PostureStatus, PressureReading};

/// Component sub-scores (each 0-100) plus the weighted total and its tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub balance: f64,
    pub back_support: f64,
    pub center: f64,
    pub total: u8,
    pub status: PostureStatus,
}

/// Compute the posture score using the 3-factor weighted model.
pub fn compute_score(reading: &PressureReading, config: &EngineConfig) -> ScoreBreakdown {
    let balance = score_balance(reading, &config.ranges);
    let back_support = score_back_support(reading.back_support, &config.ranges);
    let center = score_center(reading.seat_center, &config.ranges);

    let weights = &config.weights;
    let weighted = balance * weights.balance
        + back_support * weights.back_support
        + center * weights.center;
    let total = clamp_score(weighted).round() as u8;

    ScoreBreakdown {
        balance,
        back_support,
        center,
        total,
        status: PostureStatus::from_score(total),
    }
}

/// 100 at zero left/right difference, 0 once the difference reaches
/// `max_imbalance`, linear in between.
pub fn score_balance(reading: &PressureReading, ranges: &IdealRanges) -> f64 {
    let imbalance = (reading.left_side - reading.right_side).abs();
    clamp_score(100.0 - (imbalance / ranges.max_imbalance) * 100.0)
}

/// Saturates at 100 once the minimum is reached; linear ramp from 0 below it.
pub fn score_back_support(back_support: f64, ranges: &IdealRanges) -> f64 {
    if back_support >= ranges.back_support_min {
        100.0
    } else {
        clamp_score((back_support / ranges.back_support_min) * 100.0)
    }
}

/// Plateau of 100 inside `[center_min, center_max]`.
pub fn score_center(seat_center: f64, ranges: &IdealRanges) -> f64 {
    let score = if seat_center < ranges.center_min {
        // sitting on the front edge
        (seat_center / ranges.center_min) * 100.0
    } else if seat_center > ranges.center_max {
        // slouched back
        let overflow = seat_center - ranges.center_max;
        let max_overflow = 100.0 - ranges.center_max;
        100.0 - (overflow / max_overflow) * 100.0
    } else {
        100.0
    };
    clamp_score(score)
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn ranges() -> IdealRanges {
        IdealRanges::default()
    }

    #[test]
    fn total_is_bounded_for_random_readings() {
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..20_000 {
            let reading = PressureReading {
                left_side: rng.gen_range(0.0..=100.0),
                right_side: rng.gen_range(0.0..=100.0),
                back_support: rng.gen_range(0.0..=100.0),
                seat_center: rng.gen_range(0.0..=100.0),
            };
            let breakdown = compute_score(&reading, &config);
            assert!(breakdown.total <= 100);
            for part in [breakdown.balance, breakdown.back_support, breakdown.center] {
                assert!((0.0..=100.0).contains(&part));
            }
            assert_eq!(breakdown.status, PostureStatus::from_score(breakdown.total));
        }
    }

    #[test]
    fn corner_readings_are_bounded() {
        let config = EngineConfig::default();
        for left in [0.0, 100.0] {
            for right in [0.0, 100.0] {
                for back in [0.0, 100.0] {
                    for center in [0.0, 100.0] {
                        let reading = PressureReading::new(left, right, back, center);
                        assert!(compute_score(&reading, &config).total <= 100);
                    }
                }
            }
        }
    }

    #[test]
    fn balance_is_monotonic_and_hits_zero_at_max_imbalance() {
        let mut previous = f64::INFINITY;
        let mut diff = 0.0;
        while diff <= 50.0 {
            let reading = PressureReading::new(50.0 + diff / 2.0, 50.0 - diff / 2.0, 60.0, 55.0);
            let score = score_balance(&reading, &ranges());
            assert!(score <= previous, "balance rose at diff {diff}");
            if diff >= 30.0 {
                assert_eq!(score, 0.0);
            }
            previous = score;
            diff += 0.25;
        }

        let even = PressureReading::new(42.0, 42.0, 60.0, 55.0);
        assert_eq!(score_balance(&even, &ranges()), 100.0);
        let half = PressureReading::new(65.0, 50.0, 60.0, 55.0);
        assert!((score_balance(&half, &ranges()) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn back_support_saturates_at_minimum() {
        assert_eq!(score_back_support(0.0, &ranges()), 0.0);
        assert!((score_back_support(25.0, &ranges()) - 50.0).abs() < 1e-9);
        assert!(score_back_support(49.99, &ranges()) < 100.0);
        for value in [50.0, 65.0, 99.0, 100.0] {
            assert_eq!(score_back_support(value, &ranges()), 100.0);
        }
    }

    #[test]
    fn center_has_plateau_and_penalties_on_both_sides() {
        let mut value = 40.0;
        while value <= 70.0 {
            assert_eq!(score_center(value, &ranges()), 100.0);
            value += 0.5;
        }
        assert!(score_center(39.99, &ranges()) < 100.0);
        assert!(score_center(70.01, &ranges()) < 100.0);
        assert!((score_center(20.0, &ranges()) - 50.0).abs() < 1e-9);
        assert!((score_center(85.0, &ranges()) - 50.0).abs() < 1e-9);
        assert_eq!(score_center(0.0, &ranges()), 0.0);
        assert_eq!(score_center(100.0, &ranges()), 0.0);
    }

    #[test]
    fn total_uses_weighted_model() {
        let config = EngineConfig::default();

        let ideal = compute_score(&PressureReading::new(50.0, 50.0, 65.0, 55.0), &config);
        assert_eq!(ideal.total, 100);
        assert_eq!(ideal.status, PostureStatus::Good);

        // no balance, full back support and center: 0.40 + 0.25
        let lopsided = compute_score(&PressureReading::new(80.0, 20.0, 65.0, 55.0), &config);
        assert_eq!(lopsided.total, 65);
        assert_eq!(lopsided.status, PostureStatus::Warning);

        // only center contributes
        let collapsed = compute_score(&PressureReading::new(80.0, 20.0, 0.0, 55.0), &config);
        assert_eq!(collapsed.total, 25);
        assert_eq!(collapsed.status, PostureStatus::Danger);
    }

    #[test]
    fn default_reading_scores_good() {
        let breakdown = compute_score(&PressureReading::default(), &EngineConfig::default());
        // imbalance 3 -> balance 90; back 100; center 100
        assert!(breakdown.total > 90);
        assert!((breakdown.balance - 90.0).abs() < 1e-9);
        assert_eq!(breakdown.status, PostureStatus::Good);
    }
}
