pub mod config;
pub mod scoring;
pub mod simulator;
pub mod types;

pub use config::{Cadence, ChannelVariance, EngineConfig, IdealRanges, ScoreWeights};
pub use scoring::{compute_score, ScoreBreakdown};
pub use simulator::PressureSimulator;
pub use types::{PostureStatus, PressureLevel, PressureLevels, PressureReading};
