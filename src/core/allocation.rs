use serde::Serialize;

use super::types::{RISK_LEVEL_COUNT, RiskLevel};

/// Illustrative asset split shown on the allocation step. Percentages, each
/// row sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationMix {
    pub equities: u8,
    pub bonds: u8,
    pub cash: u8,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    pub level: RiskLevel,
    pub label: &'static str,
    pub description: &'static str,
    pub mix: AllocationMix,
}

struct ProfileRow {
    label: &'static str,
    description: &'static str,
    mix: AllocationMix,
}

const PROFILES: [ProfileRow; RISK_LEVEL_COUNT] = [
    ProfileRow {
        label: "Cautious",
        description: "Capital preservation first; most of the portfolio sits in bonds and cash.",
        mix: AllocationMix { equities: 15, bonds: 60, cash: 25 },
    },
    ProfileRow {
        label: "Cautious",
        description: "A small equity sleeve on top of a defensive bond core.",
        mix: AllocationMix { equities: 25, bonds: 55, cash: 20 },
    },
    ProfileRow {
        label: "Balanced",
        description: "Bonds still lead, with equities taking a meaningful share.",
        mix: AllocationMix { equities: 35, bonds: 50, cash: 15 },
    },
    ProfileRow {
        label: "Balanced",
        description: "Close to an even split between growth and defensive assets.",
        mix: AllocationMix { equities: 45, bonds: 43, cash: 12 },
    },
    ProfileRow {
        label: "Balanced",
        description: "Equities edge ahead; the classic middle-of-the-road mix.",
        mix: AllocationMix { equities: 52, bonds: 38, cash: 10 },
    },
    ProfileRow {
        label: "Growth",
        description: "Growth assets lead, cushioned by a solid bond allocation.",
        mix: AllocationMix { equities: 60, bonds: 32, cash: 8 },
    },
    ProfileRow {
        label: "Growth",
        description: "Equity-driven returns with bonds as a shock absorber.",
        mix: AllocationMix { equities: 68, bonds: 26, cash: 6 },
    },
    ProfileRow {
        label: "Growth",
        description: "Strongly equity-weighted; expect wider swings along the way.",
        mix: AllocationMix { equities: 76, bonds: 19, cash: 5 },
    },
    ProfileRow {
        label: "Aggressive",
        description: "Near-full equity exposure for long horizons.",
        mix: AllocationMix { equities: 84, bonds: 12, cash: 4 },
    },
    ProfileRow {
        label: "Aggressive",
        description: "Maximum growth tilt; only a token defensive holding remains.",
        mix: AllocationMix { equities: 92, bonds: 6, cash: 2 },
    },
];

pub fn profile_for(level: RiskLevel) -> RiskProfile {
    let row = &PROFILES[level.index()];
    RiskProfile {
        level,
        label: row.label,
        description: row.description,
        mix: row.mix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mix_sums_to_one_hundred() {
        for level in RiskLevel::all() {
            let mix = profile_for(level).mix;
            let total = u32::from(mix.equities) + u32::from(mix.bonds) + u32::from(mix.cash);
            assert_eq!(total, 100, "level {level} mix must sum to 100");
        }
    }

    #[test]
    fn equity_share_strictly_increases_with_risk() {
        let mut prev = 0u8;
        for level in RiskLevel::all() {
            let equities = profile_for(level).mix.equities;
            assert!(equities > prev, "equities must grow with risk level");
            prev = equities;
        }
    }

    #[test]
    fn defensive_share_never_increases_with_risk() {
        let mut prev = u16::MAX;
        for level in RiskLevel::all() {
            let mix = profile_for(level).mix;
            let defensive = u16::from(mix.bonds) + u16::from(mix.cash);
            assert!(defensive < prev, "bonds+cash must shrink with risk level");
            prev = defensive;
        }
    }

    #[test]
    fn profiles_carry_copy_for_every_level() {
        for level in RiskLevel::all() {
            let profile = profile_for(level);
            assert_eq!(profile.level, level);
            assert!(!profile.label.is_empty());
            assert!(!profile.description.is_empty());
        }
    }
}
