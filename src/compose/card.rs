use crate::assets::source::ImageSource;
use crate::avatar::normalize::{AvatarOutcome, render_avatar};
use crate::compose::backdrop::backdrop_bitmap;
use crate::compose::fingerprint::{CardFingerprint, fingerprint_inputs};
use crate::compose::layout::{CardLayout, DESIGN_CANVAS, FieldRow};
use crate::encode::png::encode_png;
use crate::foundation::core::{Bitmap, Canvas, Point, Rect};
use crate::foundation::error::{CardError, CardResult};
use crate::profile::Profile;
use crate::rank::theme::{CARD_BACKGROUND, TEXT_MUTED, Theme, resolve_theme};
use crate::rank::tier::{Tier, derive_tier};
use crate::render::cpu::CpuSurface;
use crate::render::primitives::{
    RectStyle, corner_brackets, faded_divider, rounded_rect, soft_glow,
};
use crate::render::surface::Surface;
use crate::text::fit::fit_size;
use crate::text::fonts::{FontFace, FontSet};
use crate::text::layout::TextLayoutEngine;

/// Grain seed used unless configured otherwise.
pub const DEFAULT_GRAIN_SEED: u64 = 1;
/// Largest canvas side a card may be rendered at.
pub const MAX_CANVAS_SIDE: u32 = 4096;
/// Opacity of the value and rank badges.
pub const BADGE_ALPHA: f32 = 0.12;

/// Per-render knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CardOptions {
    /// Output size; the layout scales to it.
    pub canvas: Canvas,
    /// Seed of the background grain, `None` to disable it.
    pub grain_seed: Option<u64>,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            canvas: DESIGN_CANVAS,
            grain_seed: Some(DEFAULT_GRAIN_SEED),
        }
    }
}

impl CardOptions {
    /// Reject canvases that cannot be rasterized.
    pub fn validate(&self) -> CardResult<()> {
        let Canvas { width, height } = self.canvas;
        if width == 0 || height == 0 {
            return Err(CardError::validation("canvas dimensions must be > 0"));
        }
        if width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
            return Err(CardError::validation(format!(
                "canvas {width}x{height} exceeds {MAX_CANVAS_SIDE}px per side"
            )));
        }
        Ok(())
    }
}

/// Font sizes the fitter settled on, per field.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FittedSizes {
    /// License number.
    pub license: f32,
    /// Handle.
    pub handle: f32,
    /// Category.
    pub category: f32,
    /// Score.
    pub score: f32,
    /// Team.
    pub team: f32,
    /// CTF count.
    pub ctf: f32,
}

/// What [`compose_card`] decided while drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardSummary {
    /// Tier derived from the score.
    pub tier: Tier,
    /// Theme the card was drawn with.
    pub theme: Theme,
    /// Avatar panel result.
    pub avatar: AvatarOutcome,
    /// Fitted font sizes.
    pub sizes: FittedSizes,
}

/// A finished card.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// PNG-encoded image.
    pub png: Vec<u8>,
    /// Image size.
    pub canvas: Canvas,
    /// Tier shown on the card.
    pub tier: Tier,
    /// Hash of the inputs that determined the pixels.
    pub fingerprint: CardFingerprint,
    /// Avatar panel result.
    pub avatar: AvatarOutcome,
}

/// Renders cards with a fixed font set.
///
/// Holds no mutable state: every render builds its own surface, so one renderer can be shared
/// across threads.
#[derive(Clone, Debug)]
pub struct CardRenderer {
    fonts: FontSet,
    options: CardOptions,
}

impl CardRenderer {
    /// Validate the options and check that both faces register with the shaper.
    pub fn new(fonts: FontSet, options: CardOptions) -> CardResult<Self> {
        options.validate()?;
        TextLayoutEngine::new(&fonts)?;
        Ok(Self { fonts, options })
    }

    /// Options every render uses.
    pub fn options(&self) -> &CardOptions {
        &self.options
    }

    /// Render a profile with already-acquired avatar bytes and encode it as PNG.
    #[tracing::instrument(level = "debug", skip_all, fields(handle = %profile.display_handle(), score = profile.score))]
    pub fn render(&self, profile: &Profile, avatar: Option<&[u8]>) -> CardResult<RenderResult> {
        let (bitmap, summary) = self.rasterize(profile, avatar)?;
        let png = encode_png(&bitmap)?;
        Ok(RenderResult {
            png,
            canvas: self.options.canvas,
            tier: summary.tier,
            fingerprint: fingerprint_inputs(profile, avatar, &self.options),
            avatar: summary.avatar,
        })
    }

    /// Fetch the profile's avatar through `source`, then [`render`](Self::render). Fetch
    /// failures fall back to the placeholder.
    pub fn render_from_source(
        &self,
        profile: &Profile,
        source: &dyn ImageSource,
    ) -> CardResult<RenderResult> {
        let bytes = match profile.avatar() {
            Some(reference) => match source.fetch(reference) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    tracing::warn!(reference, error = %e, "avatar fetch failed, using placeholder");
                    None
                }
            },
            None => None,
        };
        self.render(profile, bytes.as_deref())
    }

    /// Draw the card into a fresh CPU surface and return the raw pixels.
    pub fn rasterize(
        &self,
        profile: &Profile,
        avatar: Option<&[u8]>,
    ) -> CardResult<(Bitmap, CardSummary)> {
        let layout = CardLayout::new(self.options.canvas);
        let mut surface =
            CpuSurface::new(self.options.canvas, &self.fonts, CARD_BACKGROUND.opaque())?;
        let summary = compose_card(&mut surface, &layout, profile, avatar, &self.options);
        let bitmap = surface.finish()?;
        Ok((bitmap, summary))
    }
}

/// Draw a whole card onto `surface`.
///
/// Back to front: backdrop, frame glow and frame, header (license and rank badge), avatar
/// panel, info rows, dividers. Avatar problems are absorbed into a placeholder.
pub fn compose_card(
    surface: &mut dyn Surface,
    layout: &CardLayout,
    profile: &Profile,
    avatar: Option<&[u8]>,
    options: &CardOptions,
) -> CardSummary {
    let tier = derive_tier(profile.clamped_score());
    let theme = resolve_theme(tier);
    tracing::debug!(?tier, category = theme.category, "resolved theme");
    let s = layout.scale;

    match backdrop_bitmap(layout.canvas, &theme, options.grain_seed) {
        Ok(bm) => surface.draw_image(&bm, bm.rect(), layout.canvas.rect(), 1.0),
        Err(e) => tracing::debug!(error = %e, "backdrop skipped"),
    }

    // frame
    soft_glow(
        surface,
        layout.frame,
        layout.frame_radius,
        theme.accent,
        scaled_px(24.0, s),
        0.35,
    );
    rounded_rect(
        surface,
        layout.frame,
        layout.frame_radius,
        RectStyle::Fill(theme.panel.mix(CARD_BACKGROUND, 0.5).with_alpha(0.92)),
    );
    rounded_rect(
        surface,
        layout.frame,
        layout.frame_radius,
        RectStyle::Stroke {
            color: theme.accent.with_alpha(0.6),
            width: 2.0 * s,
        },
    );

    // header
    let license = draw_field(surface, layout, &layout.license, &profile.license_number(), &theme);
    draw_rank_badge(surface, layout, tier, &theme);
    let (dx0, dx1) = layout.divider_span;
    faded_divider(surface, dx0, dx1, layout.header_divider_y, theme.accent);

    // avatar panel
    soft_glow(
        surface,
        layout.avatar,
        layout.avatar_radius,
        theme.accent,
        scaled_px(16.0, s),
        0.45,
    );
    rounded_rect(
        surface,
        layout.avatar.inflate(4.0 * s, 4.0 * s),
        layout.avatar_radius + 4.0 * s,
        RectStyle::Stroke {
            color: theme.accent.opaque(),
            width: 3.0 * s,
        },
    );
    let avatar_outcome = render_avatar(
        surface,
        layout.avatar,
        layout.avatar_radius,
        avatar,
        profile.display_handle(),
        &theme,
    );
    corner_brackets(
        surface,
        layout.avatar.inflate(12.0 * s, 12.0 * s),
        28.0 * s,
        4.0 * s,
        theme.accent.opaque(),
    );

    // info rows
    let sizes = FittedSizes {
        license,
        handle: draw_field(surface, layout, &layout.handle, profile.display_handle(), &theme),
        category: draw_field(surface, layout, &layout.category, theme.category, &theme),
        score: draw_field(
            surface,
            layout,
            &layout.score,
            &profile.clamped_score().to_string(),
            &theme,
        ),
        team: draw_field(surface, layout, &layout.team, profile.display_team(), &theme),
        ctf: draw_field(surface, layout, &layout.ctf, &profile.display_ctf_count(), &theme),
    };
    for y in layout.row_divider_ys {
        faded_divider(surface, layout.avatar.x1 + 40.0 * s, dx1, y, theme.accent);
    }

    CardSummary {
        tier,
        theme,
        avatar: avatar_outcome,
        sizes,
    }
}

/// Bold muted label followed by the value on a tinted badge; returns the value's font size.
fn draw_field(
    surface: &mut dyn Surface,
    layout: &CardLayout,
    row: &FieldRow,
    value: &str,
    theme: &Theme,
) -> f32 {
    let rect = row.rect;
    let cy = rect.center().y;
    let label_w = surface.measure_text(row.label, FontFace::Bold, row.font_size);
    surface.fill_text(
        row.label,
        FontFace::Bold,
        row.font_size,
        Point::new(rect.x0, baseline_y(cy, row.font_size)),
        TEXT_MUTED.opaque(),
    );

    let pad = 14.0 * layout.scale;
    let badge_x0 = rect.x0 + label_w;
    let avail = (rect.x1 - badge_x0 - 2.0 * pad).max(0.0);
    let size = fit_size(value, avail, row.font_size, layout.min_font_size(), |t, sz| {
        surface.measure_text(t, FontFace::Regular, sz)
    });
    let value_w = surface.measure_text(value, FontFace::Regular, size);

    let badge = Rect::new(
        badge_x0,
        rect.y0,
        (badge_x0 + value_w + 2.0 * pad).min(rect.x1),
        rect.y1,
    );
    rounded_rect(
        surface,
        badge,
        10.0 * layout.scale,
        RectStyle::Fill(theme.accent.with_alpha(BADGE_ALPHA)),
    );
    surface.fill_text(
        value,
        FontFace::Regular,
        size,
        Point::new(badge_x0 + pad, baseline_y(cy, size)),
        theme.value_color().opaque(),
    );
    size
}

/// `"[ S ]"` badge flush with the right edge of the rank strip, its label to the left.
fn draw_rank_badge(surface: &mut dyn Surface, layout: &CardLayout, tier: Tier, theme: &Theme) {
    let row = &layout.rank;
    let rect = row.rect;
    let cy = rect.center().y;
    let text = format!("[ {} ]", tier.letter());
    let pad = 22.0 * layout.scale;

    let text_w = surface.measure_text(&text, FontFace::Regular, row.font_size);
    let badge = Rect::new((rect.x1 - text_w - 2.0 * pad).max(rect.x0), rect.y0, rect.x1, rect.y1);
    rounded_rect(
        surface,
        badge,
        10.0 * layout.scale,
        RectStyle::Fill(theme.accent.with_alpha(BADGE_ALPHA)),
    );
    surface.fill_text(
        &text,
        FontFace::Regular,
        row.font_size,
        Point::new(badge.x0 + pad, baseline_y(cy, row.font_size)),
        theme.value_color().opaque(),
    );

    let label_size = row.font_size * 0.7;
    let label_w = surface.measure_text(row.label, FontFace::Bold, label_size);
    surface.fill_text(
        row.label,
        FontFace::Bold,
        label_size,
        Point::new(badge.x0 - 16.0 * layout.scale - label_w, baseline_y(cy, label_size)),
        TEXT_MUTED.opaque(),
    );
}

/// Baseline that visually centers a line of `size` px text on `center_y`.
fn baseline_y(center_y: f64, size: f32) -> f64 {
    center_y + f64::from(size) * 0.35
}

fn scaled_px(px: f64, scale: f64) -> u32 {
    (px * scale).round().max(1.0) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/compose/card.rs"]
mod tests;
