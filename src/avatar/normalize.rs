use crate::assets::decode::decode_image;
use crate::avatar::sample::{ImageProfile, sample_image_profile};
use crate::avatar::shading::{bottom_shade, radial_vignette};
use crate::foundation::core::{Bitmap, Point, Rect, Rgb};
use crate::foundation::math::clamp_finite;
use crate::rank::theme::{TEXT_PRIMARY, Theme};
use crate::render::surface::{Surface, clamp_radius, is_degenerate};
use crate::text::fit::fit_size;
use crate::text::fonts::FontFace;

/// Clamp range of [`BlendParams::neutral`].
pub const NEUTRAL_RANGE: (f32, f32) = (0.05, 0.21);
/// Clamp range of [`BlendParams::dark`].
pub const DARK_RANGE: (f32, f32) = (0.10, 0.28);
/// Clamp range of [`BlendParams::lift`].
pub const LIFT_RANGE: (f32, f32) = (0.0, 0.08);
/// Clamp range of [`BlendParams::accent`].
pub const ACCENT_RANGE: (f32, f32) = (0.04, 0.10);

/// Light grey used by the desaturating overlay.
pub const NEUTRAL_TINT: Rgb = Rgb::new(200, 204, 212);
/// Near-black used by the darkening overlay.
pub const DARK_TINT: Rgb = Rgb::new(8, 10, 16);
/// White used by the lift overlay.
pub const LIFT_TINT: Rgb = Rgb::new(255, 255, 255);

const MAX_SHADE_SIDE: f64 = 256.0;

/// Overlay opacities derived from an [`ImageProfile`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendParams {
    /// Light desaturating overlay.
    pub neutral: f32,
    /// Darkening overlay.
    pub dark: f32,
    /// Brightening overlay; zero for images that are not dark.
    pub lift: f32,
    /// Tint of the theme accent.
    pub accent: f32,
}

impl BlendParams {
    /// Derive overlay strengths. Every value stays inside its `*_RANGE`.
    ///
    /// Vivid or bright photos get more neutralization and darkening (the two compound when both
    /// hold); dark photos get a small lift.
    pub fn derive(profile: ImageProfile) -> Self {
        let l = clamp_finite(profile.mean_luminance, 0.0, 1.0, 0.5);
        let s = clamp_finite(profile.mean_saturation, 0.0, 1.0, 0.0);

        let neutral = 0.05 + 0.30 * (s - 0.35).max(0.0) + 0.40 * (l - 0.55).max(0.0);
        let sat_over = (s - 0.45).max(0.0);
        let lum_over = (l - 0.50).max(0.0);
        let dark = 0.10 + 0.25 * sat_over + 0.40 * lum_over + 0.60 * sat_over * lum_over;
        let lift = if l < 0.32 { (0.32 - l) * 0.25 } else { 0.0 };
        let accent = 0.04 + 0.06 * s;

        Self {
            neutral: within(neutral, NEUTRAL_RANGE),
            dark: within(dark, DARK_RANGE),
            lift: within(lift, LIFT_RANGE),
            accent: within(accent, ACCENT_RANGE),
        }
    }
}

fn within(v: f32, (lo, hi): (f32, f32)) -> f32 {
    clamp_finite(v, lo, hi, lo)
}

/// Why the avatar panel shows a placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceholderReason {
    /// The profile has no avatar, or the source could not produce one.
    Missing,
    /// Bytes were present but not a decodable image.
    Undecodable,
}

/// What ended up in the avatar panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AvatarOutcome {
    /// The photo was drawn with these overlays.
    Normalized(BlendParams),
    /// A flat placeholder was drawn instead.
    Placeholder(PlaceholderReason),
}

/// Draw the avatar panel from optional encoded bytes. Never fails: anything that cannot be
/// decoded becomes a placeholder.
#[tracing::instrument(level = "debug", skip_all, fields(has_bytes = bytes.is_some()))]
pub fn render_avatar(
    surface: &mut dyn Surface,
    rect: Rect,
    radius: f64,
    bytes: Option<&[u8]>,
    handle: &str,
    theme: &Theme,
) -> AvatarOutcome {
    let Some(bytes) = bytes else {
        draw_placeholder(surface, rect, radius, handle, theme);
        return AvatarOutcome::Placeholder(PlaceholderReason::Missing);
    };
    match decode_image(bytes) {
        Ok(image) => AvatarOutcome::Normalized(draw_avatar(surface, rect, radius, &image, theme)),
        Err(e) => {
            tracing::debug!(error = %e, "avatar not decodable, drawing placeholder");
            draw_placeholder(surface, rect, radius, handle, theme);
            AvatarOutcome::Placeholder(PlaceholderReason::Undecodable)
        }
    }
}

/// Draw `image` cover-scaled into the rounded `rect` and normalize it against the theme.
///
/// Back to front inside the clip: photo, radial vignette, bottom shade, neutral, dark, lift
/// (only when positive) and accent overlays.
pub fn draw_avatar(
    surface: &mut dyn Surface,
    rect: Rect,
    radius: f64,
    image: &Bitmap,
    theme: &Theme,
) -> BlendParams {
    let profile = sample_image_profile(&image.rgba8_premul, image.width, image.height)
        .unwrap_or_else(|e| {
            tracing::debug!(error = %e, "avatar sampling failed, using neutral profile");
            ImageProfile::NEUTRAL
        });
    let params = BlendParams::derive(profile);
    tracing::debug!(
        luminance = profile.mean_luminance,
        saturation = profile.mean_saturation,
        ?params,
        "avatar blend"
    );
    if is_degenerate(rect) {
        return params;
    }

    let radius = clamp_radius(rect, radius);
    surface.push_clip_rounded_rect(rect, radius);
    surface.draw_image(image, cover_src_rect(image, rect), rect, 1.0);
    draw_shading(surface, rect);
    surface.fill_rect(rect, NEUTRAL_TINT.with_alpha(params.neutral));
    surface.fill_rect(rect, DARK_TINT.with_alpha(params.dark));
    if params.lift > 0.0 {
        surface.fill_rect(rect, LIFT_TINT.with_alpha(params.lift));
    }
    surface.fill_rect(rect, theme.accent.with_alpha(params.accent));
    surface.pop_clip();
    params
}

/// Flat panel with the handle's initial, used when no photo is available.
pub fn draw_placeholder(
    surface: &mut dyn Surface,
    rect: Rect,
    radius: f64,
    handle: &str,
    theme: &Theme,
) {
    if is_degenerate(rect) {
        return;
    }
    let radius = clamp_radius(rect, radius);
    surface.push_clip_rounded_rect(rect, radius);
    surface.fill_rect(rect, theme.panel.opaque());
    draw_shading(surface, rect);
    surface.pop_clip();

    let initial = placeholder_initial(handle);
    let max_w = rect.width() * 0.6;
    let start = (rect.height().min(rect.width()) * 0.45) as f32;
    let size = fit_size(&initial, max_w, start, 12.0, |t, s| {
        surface.measure_text(t, FontFace::Bold, s)
    });
    let w = surface.measure_text(&initial, FontFace::Bold, size);
    let c = rect.center();
    let baseline = Point::new(c.x - w / 2.0, c.y + f64::from(size) * 0.35);
    surface.fill_text(
        &initial,
        FontFace::Bold,
        size,
        baseline,
        theme.accent.mix(TEXT_PRIMARY, 0.5).opaque(),
    );
}

/// Uppercased first letter or digit of the handle, `?` when there is none.
pub fn placeholder_initial(handle: &str) -> String {
    handle
        .chars()
        .find(|c| c.is_alphanumeric())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

/// Largest centered region of `image` with the aspect ratio of `dst`.
pub fn cover_src_rect(image: &Bitmap, dst: Rect) -> Rect {
    let iw = f64::from(image.width);
    let ih = f64::from(image.height);
    if is_degenerate(dst) {
        return image.rect();
    }
    let dst_aspect = dst.width() / dst.height();
    if iw / ih > dst_aspect {
        let w = ih * dst_aspect;
        let x0 = (iw - w) / 2.0;
        Rect::new(x0, 0.0, x0 + w, ih)
    } else {
        let h = iw / dst_aspect;
        let y0 = (ih - h) / 2.0;
        Rect::new(0.0, y0, iw, y0 + h)
    }
}

fn draw_shading(surface: &mut dyn Surface, rect: Rect) {
    let vw = rect.width().round().clamp(1.0, MAX_SHADE_SIDE) as u32;
    let vh = rect.height().round().clamp(1.0, MAX_SHADE_SIDE) as u32;
    match radial_vignette(vw, vh) {
        Ok(v) => surface.draw_image(&v, v.rect(), rect, 1.0),
        Err(e) => tracing::debug!(error = %e, "vignette skipped"),
    }
    match bottom_shade(vh) {
        Ok(s) => surface.draw_image(&s, s.rect(), rect, 1.0),
        Err(e) => tracing::debug!(error = %e, "bottom shade skipped"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/avatar/normalize.rs"]
mod tests;
