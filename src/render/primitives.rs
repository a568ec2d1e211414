//! Stateless drawing primitives over any [`Surface`].
//!
//! Every function collapses degenerate input (non-finite or empty geometry) to a no-op and clamps
//! corner radii to half the smaller side.

use crate::effects::blur::blur_mask;
use crate::foundation::core::{Bitmap, Point, Rect, Rgb, Rgba8, premul_rgba8};
use crate::render::surface::{Surface, clamp_radius, is_degenerate};

/// Soft glows are rasterized at `1 / GLOW_DOWNSAMPLE` resolution and scaled up on draw.
pub const GLOW_DOWNSAMPLE: u32 = 4;
/// Peak alpha of a faded divider.
pub const DIVIDER_ALPHA: u8 = 0x55;
/// Fraction of a divider's length spent fading in (and out) at each end.
pub const DIVIDER_FADE: f32 = 0.05;

const MAX_SCRATCH_SIDE: u32 = 4096;

/// Fill or outline for [`rounded_rect`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RectStyle {
    /// Solid fill.
    Fill(Rgba8),
    /// Outline centered on the rect edge.
    Stroke {
        /// Paint.
        color: Rgba8,
        /// Line width in pixels.
        width: f64,
    },
}

/// Rounded rectangle, filled or stroked.
pub fn rounded_rect(surface: &mut dyn Surface, rect: Rect, radius: f64, style: RectStyle) {
    if is_degenerate(rect) {
        return;
    }
    let radius = clamp_radius(rect, radius);
    match style {
        RectStyle::Fill(color) => surface.fill_rounded_rect(rect, radius, color),
        RectStyle::Stroke { color, width } => {
            if width.is_finite() && width > 0.0 {
                surface.stroke_rounded_rect(rect, radius, width, color);
            }
        }
    }
}

/// Blurred halo of a rounded rect, spreading `blur_radius` pixels past its edge.
#[tracing::instrument(level = "trace", skip(surface))]
pub fn soft_glow(
    surface: &mut dyn Surface,
    rect: Rect,
    radius: f64,
    color: Rgb,
    blur_radius: u32,
    opacity: f32,
) {
    if is_degenerate(rect) || !opacity.is_finite() || opacity <= 0.0 {
        return;
    }
    let radius = clamp_radius(rect, radius);
    let spread = f64::from(blur_radius) * 2.0;
    let outer = rect.inflate(spread, spread);

    let d = f64::from(GLOW_DOWNSAMPLE);
    let bw = (outer.width() / d).ceil().max(1.0);
    let bh = (outer.height() / d).ceil().max(1.0);
    if bw > f64::from(MAX_SCRATCH_SIDE) || bh > f64::from(MAX_SCRATCH_SIDE) {
        tracing::debug!(bw, bh, "glow too large, skipped");
        return;
    }
    let (bw, bh) = (bw as u32, bh as u32);

    let mut coverage = Vec::with_capacity((bw as usize) * (bh as usize));
    for y in 0..bh {
        for x in 0..bw {
            let p = Point::new(
                outer.x0 + (f64::from(x) + 0.5) * d,
                outer.y0 + (f64::from(y) + 0.5) * d,
            );
            let c = (0.5 - rounded_rect_sdf(p, rect, radius) / d).clamp(0.0, 1.0);
            coverage.push((c * 255.0).round() as u8);
        }
    }

    let small_radius = (blur_radius / GLOW_DOWNSAMPLE).max(1);
    let blurred = match blur_mask(&coverage, bw, bh, small_radius).and_then(|mask| {
        let px = mask
            .into_iter()
            .flat_map(|a| premul_rgba8([color.r, color.g, color.b, a]))
            .collect();
        Bitmap::new(bw, bh, px)
    }) {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!(error = %e, "glow blur failed, skipped");
            return;
        }
    };
    let src = blurred.rect();
    let dst = Rect::new(
        outer.x0,
        outer.y0,
        outer.x0 + f64::from(bw) * d,
        outer.y0 + f64::from(bh) * d,
    );
    surface.draw_image(&blurred, src, dst, opacity.min(1.0));
}

/// Two pixel tall horizontal rule that fades in and out at both ends.
pub fn faded_divider(surface: &mut dyn Surface, x1: f64, x2: f64, y: f64, color: Rgb) {
    let rect = Rect::new(x1, y - 1.0, x2, y + 1.0);
    if is_degenerate(rect) {
        return;
    }
    let w = rect.width().ceil().min(f64::from(MAX_SCRATCH_SIDE)) as u32;
    if w == 0 {
        return;
    }
    let row: Vec<u8> = (0..w)
        .flat_map(|x| {
            let t = (x as f32 + 0.5) / w as f32;
            let a = f32::from(DIVIDER_ALPHA) * divider_fade(t);
            premul_rgba8([color.r, color.g, color.b, a.round() as u8])
        })
        .collect();
    match Bitmap::new(w, 1, row) {
        Ok(bm) => surface.draw_image(&bm, bm.rect(), rect, 1.0),
        Err(e) => tracing::debug!(error = %e, "divider skipped"),
    }
}

/// Alpha ramp of a divider at position `t` in `[0, 1]` along its length.
pub fn divider_fade(t: f32) -> f32 {
    if !t.is_finite() {
        return 0.0;
    }
    let t = t.clamp(0.0, 1.0);
    (t / DIVIDER_FADE).min((1.0 - t) / DIVIDER_FADE).min(1.0)
}

/// L-shaped brackets hugging the four corners of `rect`.
pub fn corner_brackets(
    surface: &mut dyn Surface,
    rect: Rect,
    arm: f64,
    thickness: f64,
    color: Rgba8,
) {
    if is_degenerate(rect) || !arm.is_finite() || !thickness.is_finite() {
        return;
    }
    let arm = arm.clamp(0.0, rect.width().min(rect.height()) / 2.0);
    let t = thickness.clamp(0.0, arm);
    if arm <= 0.0 || t <= 0.0 {
        return;
    }
    let Rect { x0, y0, x1, y1 } = rect;
    let bars = [
        // top-left
        Rect::new(x0, y0, x0 + arm, y0 + t),
        Rect::new(x0, y0 + t, x0 + t, y0 + arm),
        // top-right
        Rect::new(x1 - arm, y0, x1, y0 + t),
        Rect::new(x1 - t, y0 + t, x1, y0 + arm),
        // bottom-left
        Rect::new(x0, y1 - t, x0 + arm, y1),
        Rect::new(x0, y1 - arm, x0 + t, y1 - t),
        // bottom-right
        Rect::new(x1 - arm, y1 - t, x1, y1),
        Rect::new(x1 - t, y1 - arm, x1, y1 - t),
    ];
    for bar in bars {
        surface.fill_rect(bar, color);
    }
}

/// Signed distance from `p` to a rounded rect (negative inside).
fn rounded_rect_sdf(p: Point, rect: Rect, radius: f64) -> f64 {
    let c = rect.center();
    let hx = rect.width() / 2.0 - radius;
    let hy = rect.height() / 2.0 - radius;
    let qx = (p.x - c.x).abs() - hx;
    let qy = (p.y - c.y).abs() - hy;
    let outside = qx.max(0.0).hypot(qy.max(0.0));
    let inside = qx.max(qy).min(0.0);
    outside + inside - radius
}

#[cfg(test)]
#[path = "../../tests/unit/render/primitives.rs"]
mod tests;
