mod allocation;
mod generator;
mod random;
mod types;
mod wizard;

pub use allocation::{AllocationMix, RiskProfile, profile_for};
pub use generator::{DEFAULT_BASELINE, GeneratorError, generate_series, mean_return, volatility};
pub use random::{EntropySource, RandomSource, SeededSource};
pub use types::{
    HORIZON_STEPS, RISK_LEVEL_COUNT, RiskLevel, RiskLevelOutOfRange, SeriesCollection, SeriesPoint,
};
pub use wizard::{JourneyController, JourneyError, JourneyStep};
