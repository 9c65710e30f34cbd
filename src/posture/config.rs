use std::time::Duration;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;
const TICK_RATIO_TOLERANCE: f64 = 1e-9;

/// Share of each component in the final score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreWeights {
    /// Left/right balance
    pub balance: f64,
    /// Back support carries the most weight
    pub back_support: f64,
    /// Centering on the seat
    pub center: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            balance: 0.35,
            back_support: 0.40,
            center: 0.25,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.balance + self.back_support + self.center
    }
}

/// Calibration points used to normalise sensor values into 0-100 sub-scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct IdealRanges {
    /// Less central pressure than this means sitting on the front edge
    pub center_min: f64,
    /// More central pressure than this means slouching back
    pub center_max: f64,
    /// Left/right difference at which the balance score reaches zero
    pub max_imbalance: f64,
    /// Back pressure needed to count as supported
    pub back_support_min: f64,
}

impl Default for IdealRanges {
    fn default() -> Self {
        Self {
            center_min: 40.0,
            center_max: 70.0,
            max_imbalance: 30.0,
            back_support_min: 50.0,
        }
    }
}

/// Full width of the uniform perturbation applied to each channel per tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelVariance {
    pub left_side: f64,
    pub right_side: f64,
    pub back_support: f64,
    pub seat_center: f64,
    pub tilt_angle: f64,
}

impl Default for ChannelVariance {
    fn default() -> Self {
        Self {
            left_side: 8.0,
            right_side: 8.0,
            back_support: 10.0,
            seat_center: 6.0,
            tilt_angle: 3.0,
        }
    }
}

/// Wall-clock tick period and the simulated minutes credited per tick.
///
/// The two values move together: the break cadence counts simulated minutes,
/// so changing one without the other changes how often breaks are suggested.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Cadence {
    pub tick_period_ms: u64,
    pub minutes_per_tick: f64,
    pub break_interval_minutes: f64,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            tick_period_ms: 2_000,
            minutes_per_tick: 0.5,
            break_interval_minutes: 30.0,
        }
    }
}

impl Cadence {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Whole ticks between two break suggestions.
    pub fn ticks_per_break(&self) -> u64 {
        self.tick_ratio().round().max(1.0) as u64
    }

    /// Ticks needed to cover `minutes` of simulated time, to the nearest tick.
    pub fn ticks_for(&self, minutes: f64) -> u64 {
        (minutes.max(0.0) / self.minutes_per_tick).round() as u64
    }

    pub fn minutes_for(&self, ticks: u64) -> f64 {
        ticks as f64 * self.minutes_per_tick
    }

    fn tick_ratio(&self) -> f64 {
        self.break_interval_minutes / self.minutes_per_tick
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub weights: ScoreWeights,
    pub ranges: IdealRanges,
    pub variance: ChannelVariance,
    pub cadence: Cadence,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        let weights = &self.weights;
        if [weights.balance, weights.back_support, weights.center]
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            bail!("score weights must be finite and non-negative: {weights:?}");
        }
        if (weights.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            bail!("score weights must sum to 1.0, got {}", weights.sum());
        }

        let ranges = &self.ranges;
        if !(ranges.max_imbalance > 0.0) {
            bail!("maxImbalance must be positive, got {}", ranges.max_imbalance);
        }
        if !(ranges.back_support_min > 0.0) {
            bail!(
                "backSupportMin must be positive, got {}",
                ranges.back_support_min
            );
        }
        if !(ranges.center_min > 0.0) || ranges.center_min > ranges.center_max {
            bail!(
                "centerMin must be positive and not above centerMax ({} > {})",
                ranges.center_min,
                ranges.center_max
            );
        }
        if !(ranges.center_max < 100.0) {
            bail!("centerMax must be below 100, got {}", ranges.center_max);
        }

        let variance = &self.variance;
        if [
            variance.left_side,
            variance.right_side,
            variance.back_support,
            variance.seat_center,
            variance.tilt_angle,
        ]
        .iter()
        .any(|v| !v.is_finite() || *v < 0.0)
        {
            bail!("channel variances must be finite and non-negative: {variance:?}");
        }

        let cadence = &self.cadence;
        if cadence.tick_period_ms == 0 {
            bail!("tickPeriodMs must be greater than zero");
        }
        if !(cadence.minutes_per_tick > 0.0) {
            bail!(
                "minutesPerTick must be positive, got {}",
                cadence.minutes_per_tick
            );
        }
        if !(cadence.break_interval_minutes > 0.0) {
            bail!(
                "breakIntervalMinutes must be positive, got {}",
                cadence.break_interval_minutes
            );
        }
        let ratio = cadence.tick_ratio();
        if !ratio.is_finite()
            || ratio < 1.0
            || (ratio - ratio.round()).abs() > TICK_RATIO_TOLERANCE
        {
            bail!(
                "breakIntervalMinutes ({}) must be a whole number of ticks of minutesPerTick ({})",
                cadence.break_interval_minutes,
                cadence.minutes_per_tick
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.weights.sum() - 1.0).abs() < 1e-9);
        assert_eq!(config.cadence.tick_period(), Duration::from_secs(2));
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let mut config = EngineConfig::default();
        config.weights.center = 0.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn rejects_degenerate_ranges() {
        let mut config = EngineConfig::default();
        config.ranges.max_imbalance = 0.0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.ranges.center_min = 80.0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.ranges.center_max = 100.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_cadence() {
        let mut config = EngineConfig::default();
        config.cadence.tick_period_ms = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.cadence.minutes_per_tick = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_break_interval_off_the_tick_grid() {
        let mut config = EngineConfig::default();
        config.cadence.minutes_per_tick = 0.7;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("whole number of ticks"));

        let mut config = EngineConfig::default();
        config.cadence.minutes_per_tick = 45.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn inexact_increment_still_counts_whole_ticks() {
        let mut config = EngineConfig::default();
        config.cadence.minutes_per_tick = 0.1;
        assert!(config.validate().is_ok());
        assert_eq!(config.cadence.ticks_per_break(), 300);
        assert_eq!(config.cadence.ticks_for(47.5), 475);
        assert_eq!(EngineConfig::default().cadence.ticks_per_break(), 60);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"cadence": {"tickPeriodMs": 500}}"#).unwrap();
        assert_eq!(config.cadence.tick_period_ms, 500);
        assert_eq!(config.cadence.minutes_per_tick, 0.5);
        assert_eq!(config.weights, ScoreWeights::default());
    }
}
