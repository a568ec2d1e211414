use crate::foundation::core::Rgb;
use crate::rank::tier::Tier;

/// Near-black base the whole card is built on.
pub const CARD_BACKGROUND: Rgb = Rgb::from_hex(0x0b0f17);
/// Primary text color (labels, handle).
pub const TEXT_PRIMARY: Rgb = Rgb::from_hex(0xe2e8f0);
/// Secondary text color (field labels, captions).
pub const TEXT_MUTED: Rgb = Rgb::from_hex(0x94a3b8);

/// Visual styling bound to a tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Tier the theme was resolved for.
    pub tier: Tier,
    /// Accent color used for badges, frame, values and the avatar tint.
    pub accent: Rgb,
    /// Category name shown in the info panel.
    pub category: &'static str,
    /// Dark panel tone, the accent pushed almost to the background.
    pub panel: Rgb,
}

impl Theme {
    /// Color of field values: the accent lifted towards the primary text color.
    pub fn value_color(&self) -> Rgb {
        self.accent.mix(TEXT_PRIMARY, 0.35)
    }
}

/// Resolve the theme for a tier. Total over [`Tier`].
pub fn resolve_theme(tier: Tier) -> Theme {
    let (accent, category) = match tier {
        Tier::S => (Rgb::from_hex(0xe11d48), "Omniscient"),
        Tier::A => (Rgb::from_hex(0x7c3aed), "Guru"),
        Tier::B => (Rgb::from_hex(0x0284c7), "Elite Hacker"),
        Tier::C => (Rgb::from_hex(0x16a34a), "Pro Hacker"),
        Tier::D => (Rgb::from_hex(0x475569), "Hacker"),
        Tier::E => (Rgb::from_hex(0x475569), "Script Kiddie"),
    };
    Theme {
        tier,
        accent,
        category,
        panel: accent.mix(CARD_BACKGROUND, 0.86),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rank/theme.rs"]
mod tests;
