use serde::{Deserialize, Serialize};

pub const PRESSURE_MIN: f64 = 0.0;
pub const PRESSURE_MAX: f64 = 100.0;

/// One synthetic sample of the four seat sensors. Every channel stays in
/// `[0, 100]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PressureReading {
    pub left_side: f64,
    pub right_side: f64,
    pub back_support: f64,
    pub seat_center: f64,
}

impl Default for PressureReading {
    fn default() -> Self {
        Self {
            left_side: 45.0,
            right_side: 42.0,
            back_support: 65.0,
            seat_center: 58.0,
        }
    }
}

impl PressureReading {
    pub fn new(left_side: f64, right_side: f64, back_support: f64, seat_center: f64) -> Self {
        Self {
            left_side,
            right_side,
            back_support,
            seat_center,
        }
        .clamped()
    }

    pub fn clamped(self) -> Self {
        Self {
            left_side: clamp_pressure(self.left_side),
            right_side: clamp_pressure(self.right_side),
            back_support: clamp_pressure(self.back_support),
            seat_center: clamp_pressure(self.seat_center),
        }
    }

    pub fn channels(&self) -> [f64; 4] {
        [
            self.left_side,
            self.right_side,
            self.back_support,
            self.seat_center,
        ]
    }

    pub fn levels(&self) -> PressureLevels {
        PressureLevels {
            left_side: PressureLevel::from_value(self.left_side),
            right_side: PressureLevel::from_value(self.right_side),
            back_support: PressureLevel::from_value(self.back_support),
            seat_center: PressureLevel::from_value(self.seat_center),
        }
    }
}

pub fn clamp_pressure(value: f64) -> f64 {
    if value.is_nan() {
        return PRESSURE_MIN;
    }
    value.clamp(PRESSURE_MIN, PRESSURE_MAX)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum PostureStatus {
    Good,
    Warning,
    Danger,
}

impl Default for PostureStatus {
    fn default() -> Self {
        PostureStatus::Good
    }
}

impl PostureStatus {
    pub const DANGER_BELOW: u8 = 40;
    pub const WARNING_BELOW: u8 = 70;

    /// Fixed tiers, no hysteresis: a score hovering on a boundary may flip
    /// status on every tick.
    pub fn from_score(score: u8) -> Self {
        if score < Self::DANGER_BELOW {
            PostureStatus::Danger
        } else if score < Self::WARNING_BELOW {
            PostureStatus::Warning
        } else {
            PostureStatus::Good
        }
    }

    pub fn is_good(self) -> bool {
        self == PostureStatus::Good
    }
}

/// Coarse per-channel reading used by the pressure map display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PressureLevel {
    Low,
    Medium,
    High,
}

impl PressureLevel {
    pub fn from_value(value: f64) -> Self {
        if value < 40.0 {
            PressureLevel::Low
        } else if value < 70.0 {
            PressureLevel::Medium
        } else {
            PressureLevel::High
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PressureLevels {
    pub left_side: PressureLevel,
    pub right_side: PressureLevel,
    pub back_support: PressureLevel,
    pub seat_center: PressureLevel,
}
