//! Score to tier mapping and the per-tier visual theme.

/// Tier themes.
pub mod theme;
/// Tier thresholds.
pub mod tier;
