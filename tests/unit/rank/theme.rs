use super::*;
use crate::rank::tier::derive_tier;

#[test]
fn every_tier_has_a_theme() {
    for tier in Tier::ALL {
        let theme = resolve_theme(tier);
        assert_eq!(theme.tier, tier);
        assert!(!theme.category.is_empty());
    }
}

#[test]
fn resolution_is_deterministic() {
    for tier in Tier::ALL {
        assert_eq!(resolve_theme(tier), resolve_theme(tier));
    }
}

#[test]
fn zero_score_gets_lowest_category() {
    let theme = resolve_theme(derive_tier(0));
    assert_eq!(theme.category, "Script Kiddie");
}

#[test]
fn panel_tone_is_darker_than_accent() {
    let luma = |c: Rgb| u32::from(c.r) + u32::from(c.g) + u32::from(c.b);
    for tier in Tier::ALL {
        let theme = resolve_theme(tier);
        assert!(luma(theme.panel) < luma(theme.accent));
    }
}

#[test]
fn value_color_is_brighter_than_accent() {
    let luma = |c: Rgb| u32::from(c.r) + u32::from(c.g) + u32::from(c.b);
    for tier in Tier::ALL {
        let theme = resolve_theme(tier);
        assert!(luma(theme.value_color()) > luma(theme.accent));
    }
}
