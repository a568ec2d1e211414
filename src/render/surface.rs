use crate::foundation::core::{Bitmap, Canvas, Point, Rect, Rgba8};
use crate::text::fonts::FontFace;

/// 2D drawing target consumed by the primitives, the avatar pipeline and the card composer.
///
/// Operations are infallible: implementations treat degenerate geometry as a no-op. A surface
/// belongs to exactly one render at a time.
pub trait Surface {
    /// Pixel size of the target.
    fn canvas(&self) -> Canvas;

    /// Fill an axis-aligned rect.
    fn fill_rect(&mut self, rect: Rect, color: Rgba8);

    /// Fill a rounded rect; `radius` is already clamped by the caller.
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Rgba8);

    /// Stroke a rounded rect outline centered on its edge.
    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f64, width: f64, color: Rgba8);

    /// Restrict subsequent drawing to a rounded rect until the matching [`Surface::pop_clip`].
    fn push_clip_rounded_rect(&mut self, rect: Rect, radius: f64);

    /// Drop the innermost clip. Unbalanced pops are ignored.
    fn pop_clip(&mut self);

    /// Draw the `src` region of `image` scaled into `dst`.
    fn draw_image(&mut self, image: &Bitmap, src: Rect, dst: Rect, opacity: f32);

    /// Draw one line of text with its baseline starting at `baseline`.
    fn fill_text(&mut self, text: &str, face: FontFace, size_px: f32, baseline: Point, color: Rgba8);

    /// Advance width of one line of text.
    fn measure_text(&mut self, text: &str, face: FontFace, size_px: f32) -> f64;
}

/// True for rects that draw nothing: non-finite, zero or negative extent.
pub fn is_degenerate(rect: Rect) -> bool {
    !(rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite())
        || rect.width() <= 0.0
        || rect.height() <= 0.0
}

/// Clamp a corner radius to `[0, min(w, h) / 2]`.
pub fn clamp_radius(rect: Rect, radius: f64) -> f64 {
    let max = (rect.width().min(rect.height()) / 2.0).max(0.0);
    if radius.is_finite() {
        radius.clamp(0.0, max)
    } else {
        0.0
    }
}
