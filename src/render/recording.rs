use crate::foundation::core::{Bitmap, Canvas, Point, Rect, Rgba8};
use crate::render::surface::Surface;
use crate::text::fonts::FontFace;

/// Advance per character, as a fraction of the font size, for regular text.
pub const REGULAR_ADVANCE: f64 = 0.55;
/// Advance per character, as a fraction of the font size, for bold text.
pub const BOLD_ADVANCE: f64 = 0.6;

/// One recorded surface operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// [`Surface::fill_rect`].
    FillRect {
        /// Target rect.
        rect: Rect,
        /// Paint.
        color: Rgba8,
    },
    /// [`Surface::fill_rounded_rect`].
    FillRoundedRect {
        /// Target rect.
        rect: Rect,
        /// Corner radius.
        radius: f64,
        /// Paint.
        color: Rgba8,
    },
    /// [`Surface::stroke_rounded_rect`].
    StrokeRoundedRect {
        /// Target rect.
        rect: Rect,
        /// Corner radius.
        radius: f64,
        /// Line width.
        width: f64,
        /// Paint.
        color: Rgba8,
    },
    /// [`Surface::push_clip_rounded_rect`].
    PushClip {
        /// Clip rect.
        rect: Rect,
        /// Corner radius.
        radius: f64,
    },
    /// [`Surface::pop_clip`].
    PopClip,
    /// [`Surface::draw_image`].
    DrawImage {
        /// Source bitmap width.
        width: u32,
        /// Source bitmap height.
        height: u32,
        /// Source region.
        src: Rect,
        /// Destination rect.
        dst: Rect,
        /// Opacity multiplier.
        opacity: f32,
    },
    /// [`Surface::fill_text`].
    FillText {
        /// Drawn string.
        text: String,
        /// Face.
        face: FontFace,
        /// Font size.
        size_px: f32,
        /// Baseline origin.
        baseline: Point,
        /// Paint.
        color: Rgba8,
    },
}

/// Surface that records calls instead of rasterizing, with monospace-like text metrics.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    calls: Vec<DrawCall>,
    clip_depth: usize,
    max_clip_depth: usize,
}

impl RecordingSurface {
    /// Empty recording for a canvas.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            calls: Vec::new(),
            clip_depth: 0,
            max_clip_depth: 0,
        }
    }

    /// Everything drawn so far, in order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Strings drawn with `fill_text`, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// First text call drawing exactly `text`.
    pub fn find_text(&self, text: &str) -> Option<&DrawCall> {
        self.calls
            .iter()
            .find(|c| matches!(c, DrawCall::FillText { text: t, .. } if t == text))
    }

    /// Currently open clips.
    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    /// Deepest clip nesting seen.
    pub fn max_clip_depth(&self) -> usize {
        self.max_clip_depth
    }
}

impl Surface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.calls.push(DrawCall::FillRect { rect, color });
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Rgba8) {
        self.calls
            .push(DrawCall::FillRoundedRect { rect, radius, color });
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f64, width: f64, color: Rgba8) {
        self.calls.push(DrawCall::StrokeRoundedRect {
            rect,
            radius,
            width,
            color,
        });
    }

    fn push_clip_rounded_rect(&mut self, rect: Rect, radius: f64) {
        self.clip_depth += 1;
        self.max_clip_depth = self.max_clip_depth.max(self.clip_depth);
        self.calls.push(DrawCall::PushClip { rect, radius });
    }

    fn pop_clip(&mut self) {
        if self.clip_depth == 0 {
            return;
        }
        self.clip_depth -= 1;
        self.calls.push(DrawCall::PopClip);
    }

    fn draw_image(&mut self, image: &Bitmap, src: Rect, dst: Rect, opacity: f32) {
        self.calls.push(DrawCall::DrawImage {
            width: image.width,
            height: image.height,
            src,
            dst,
            opacity,
        });
    }

    fn fill_text(&mut self, text: &str, face: FontFace, size_px: f32, baseline: Point, color: Rgba8) {
        self.calls.push(DrawCall::FillText {
            text: text.to_string(),
            face,
            size_px,
            baseline,
            color,
        });
    }

    fn measure_text(&mut self, text: &str, face: FontFace, size_px: f32) -> f64 {
        let advance = match face {
            FontFace::Regular => REGULAR_ADVANCE,
            FontFace::Bold => BOLD_ADVANCE,
        };
        text.chars().count() as f64 * f64::from(size_px) * advance
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
