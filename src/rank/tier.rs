/// Discrete rank bucket, ordered lowest to highest.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Tier {
    /// Entry tier.
    E,
    /// Second tier.
    D,
    /// Third tier.
    C,
    /// Fourth tier.
    B,
    /// Fifth tier.
    A,
    /// Top tier, open-ended upward.
    S,
}

/// Lower bounds of each tier, ascending. Tier `i` covers `[TIER_THRESHOLDS[i].0, TIER_THRESHOLDS[i + 1].0)`.
pub const TIER_THRESHOLDS: [(i64, Tier); 6] = [
    (0, Tier::E),
    (10_000, Tier::D),
    (20_000, Tier::C),
    (50_000, Tier::B),
    (100_000, Tier::A),
    (150_000, Tier::S),
];

impl Tier {
    /// All tiers, lowest first.
    pub const ALL: [Tier; 6] = [Tier::E, Tier::D, Tier::C, Tier::B, Tier::A, Tier::S];

    /// Single letter used inside the rank badge.
    pub fn letter(self) -> &'static str {
        match self {
            Tier::E => "E",
            Tier::D => "D",
            Tier::C => "C",
            Tier::B => "B",
            Tier::A => "A",
            Tier::S => "S",
        }
    }

    /// Human label, e.g. `"S-RANK"`.
    pub fn label(self) -> &'static str {
        match self {
            Tier::E => "E-RANK",
            Tier::D => "D-RANK",
            Tier::C => "C-RANK",
            Tier::B => "B-RANK",
            Tier::A => "A-RANK",
            Tier::S => "S-RANK",
        }
    }
}

/// Map a score to its tier.
///
/// Negative scores clamp to [`Tier::E`]. The table is scanned highest threshold first, so
/// exactly one half-open interval matches.
pub fn derive_tier(score: i64) -> Tier {
    let score = score.max(0);
    TIER_THRESHOLDS
        .iter()
        .rev()
        .find(|(low, _)| score >= *low)
        .map(|(_, tier)| *tier)
        .unwrap_or(Tier::E)
}

#[cfg(test)]
#[path = "../../tests/unit/rank/tier.rs"]
mod tests;
