use thiserror::Error;

use super::random::RandomSource;
use super::types::{HORIZON_STEPS, RISK_LEVEL_COUNT, RiskLevel, SeriesCollection, SeriesPoint};

/// Starting value every curve grows from unless the caller overrides it.
pub const DEFAULT_BASELINE: f64 = 100.0;

/// A step can never land below this fraction of the previous value. Bounds
/// worst-case single-step loss to exactly 10% regardless of volatility;
/// displayed curves depend on the exact 0.9 factor.
const STEP_FLOOR: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeneratorError {
    #[error("baseline must be a finite positive number, got {0}")]
    InvalidBaseline(f64),
    #[error("random source produced a draw outside [0,1): {0}")]
    DrawOutOfRange(f64),
}

/// Expected per-step return for a risk level: 2.5% at level 1 up to 7% at 10.
pub fn mean_return(level: RiskLevel) -> f64 {
    0.02 + f64::from(level.get()) * 0.005
}

/// Per-step shock magnitude for a risk level: 2% at level 1 up to 11% at 10.
pub fn volatility(level: RiskLevel) -> f64 {
    0.01 + f64::from(level.get()) * 0.01
}

/// One multiplicative growth step with the single-step loss floor applied.
pub(crate) fn step_value(value: f64, mean: f64, shock: f64) -> f64 {
    let next = value * (1.0 + mean + shock);
    next.max(value * STEP_FLOOR)
}

/// Produce the full set of growth curves: `HORIZON_STEPS + 1` points, one
/// value per risk level, all starting at `baseline`.
///
/// Each level walks independently: a uniform shock in
/// `[-volatility, +volatility]` is added to the level's mean return, then the
/// loss floor clamps the step. Draws outside `[0,1)` mean the injected source
/// is broken and fail the whole run rather than skewing the curves silently.
pub fn generate_series<R>(baseline: f64, source: &mut R) -> Result<SeriesCollection, GeneratorError>
where
    R: RandomSource + ?Sized,
{
    if !baseline.is_finite() || baseline <= 0.0 {
        return Err(GeneratorError::InvalidBaseline(baseline));
    }

    let mut values = [baseline; RISK_LEVEL_COUNT];
    let mut points = Vec::with_capacity(HORIZON_STEPS + 1);
    points.push(SeriesPoint { step: 0, values });
    let mut peak = baseline;

    for step in 1..=HORIZON_STEPS {
        for level in RiskLevel::all() {
            let draw = source.next_uniform();
            if !(0.0..1.0).contains(&draw) {
                return Err(GeneratorError::DrawOutOfRange(draw));
            }
            let shock = (draw - 0.5) * 2.0 * volatility(level);
            let idx = level.index();
            values[idx] = step_value(values[idx], mean_return(level), shock);
            if values[idx] > peak {
                peak = values[idx];
            }
        }
        points.push(SeriesPoint {
            step: step as u32,
            values,
        });
    }

    Ok(SeriesCollection { points, peak })
}
