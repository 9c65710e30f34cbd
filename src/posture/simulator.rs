use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::ChannelVariance;
use super::types::PressureReading;

/// Random-walk generator for the seat sensors.
///
/// Each channel moves by a uniform step in `[-variance/2, +variance/2)` and is
/// clamped back into `[0, 100]`. The tilt angle walks the same way but is not
/// bounded.
pub struct PressureSimulator {
    variance: ChannelVariance,
    rng: StdRng,
}

impl PressureSimulator {
    pub fn new(variance: ChannelVariance) -> Self {
        Self {
            variance,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(variance: ChannelVariance, seed: u64) -> Self {
        Self {
            variance,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_reading(&mut self, previous: &PressureReading) -> PressureReading {
        PressureReading {
            left_side: self.perturb(previous.left_side, self.variance.left_side),
            right_side: self.perturb(previous.right_side, self.variance.right_side),
            back_support: self.perturb(previous.back_support, self.variance.back_support),
            seat_center: self.perturb(previous.seat_center, self.variance.seat_center),
        }
        .clamped()
    }

    pub fn next_tilt(&mut self, previous: f64) -> f64 {
        self.perturb(previous, self.variance.tilt_angle)
    }

    fn perturb(&mut self, base: f64, variance: f64) -> f64 {
        base + (self.rng.gen::<f64>() - 0.5) * variance
    }
}
