use serde::Serialize;
use thiserror::Error;

/// Number of discrete risk levels offered by the journey wizard.
pub const RISK_LEVEL_COUNT: usize = 10;

/// Number of steps after the baseline point; a series has `HORIZON_STEPS + 1`
/// points, indexed `0..=HORIZON_STEPS`.
pub const HORIZON_STEPS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("risk level must be within 1..=10, got {got}")]
pub struct RiskLevelOutOfRange {
    pub got: u8,
}

/// User-selected aggressiveness, 1 (most cautious) to 10 (most aggressive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct RiskLevel(u8);

impl RiskLevel {
    pub const MIN: RiskLevel = RiskLevel(1);
    pub const MAX: RiskLevel = RiskLevel(10);

    /// Mid-range starting point shown when the wizard first opens.
    pub const DEFAULT: RiskLevel = RiskLevel(5);

    pub fn new(level: u8) -> Result<Self, RiskLevelOutOfRange> {
        if (1..=RISK_LEVEL_COUNT as u8).contains(&level) {
            Ok(RiskLevel(level))
        } else {
            Err(RiskLevelOutOfRange { got: level })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into per-level value arrays.
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub fn all() -> impl Iterator<Item = RiskLevel> {
        (1..=RISK_LEVEL_COUNT as u8).map(RiskLevel)
    }
}

impl From<RiskLevel> for u8 {
    fn from(level: RiskLevel) -> u8 {
        level.0
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One time slice of the generated growth curves: the simulated relative
/// value at `step` for every risk level, ordered by level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub step: u32,
    pub values: [f64; RISK_LEVEL_COUNT],
}

impl SeriesPoint {
    pub fn value(&self, level: RiskLevel) -> f64 {
        self.values[level.index()]
    }
}

/// The full set of growth curves for one generation: `HORIZON_STEPS + 1`
/// points in step order. Read-only once produced; the wizard highlights one
/// level at render time without touching the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesCollection {
    pub points: Vec<SeriesPoint>,
    /// Running maximum across all levels and steps, for axis scaling.
    pub peak: f64,
}

impl SeriesCollection {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn value_at(&self, step: usize, level: RiskLevel) -> Option<f64> {
        self.points.get(step).map(|p| p.value(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_accepts_full_range() {
        for n in 1..=10u8 {
            let level = RiskLevel::new(n).expect("in-range level");
            assert_eq!(level.get(), n);
            assert_eq!(level.index(), n as usize - 1);
        }
    }

    #[test]
    fn risk_level_rejects_out_of_range() {
        assert_eq!(RiskLevel::new(0), Err(RiskLevelOutOfRange { got: 0 }));
        assert_eq!(RiskLevel::new(11), Err(RiskLevelOutOfRange { got: 11 }));
        assert_eq!(RiskLevel::new(255), Err(RiskLevelOutOfRange { got: 255 }));
    }

    #[test]
    fn all_yields_ten_levels_in_order() {
        let levels: Vec<u8> = RiskLevel::all().map(RiskLevel::get).collect();
        assert_eq!(levels, (1..=10).collect::<Vec<u8>>());
    }

    #[test]
    fn risk_level_serializes_as_plain_integer() {
        let json = serde_json::to_string(&RiskLevel::new(7).unwrap()).unwrap();
        assert_eq!(json, "7");
    }
}
