use crate::foundation::core::{Canvas, Rect};

/// Canvas the layout proportions are authored against.
pub const DESIGN_CANVAS: Canvas = Canvas::new(1220, 640);
/// Smallest font size any field shrinks to.
pub const MIN_FONT_SIZE: f32 = 18.0;

/// One labelled value row of the card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldRow {
    /// Label drawn in bold before the value, e.g. `"Name : "`.
    pub label: &'static str,
    /// Row bounds; the value badge fills the row height.
    pub rect: Rect,
    /// Size the label is drawn at and the value starts fitting from.
    pub font_size: f32,
}

/// Fixed regions of the card resolved for a concrete canvas.
///
/// Content never moves a region; it only changes font sizes inside one.
#[derive(Clone, Debug, PartialEq)]
pub struct CardLayout {
    /// Output size.
    pub canvas: Canvas,
    /// Uniform scale from the design canvas (the smaller of both axes).
    pub scale: f64,
    /// Outer frame.
    pub frame: Rect,
    /// Frame corner radius.
    pub frame_radius: f64,
    /// License field in the header, above the avatar.
    pub license: FieldRow,
    /// Header strip holding the rank badge, right-aligned.
    pub rank: FieldRow,
    /// Avatar panel.
    pub avatar: Rect,
    /// Avatar corner radius.
    pub avatar_radius: f64,
    /// Handle row.
    pub handle: FieldRow,
    /// Category row.
    pub category: FieldRow,
    /// Score row.
    pub score: FieldRow,
    /// Left half-width secondary row.
    pub team: FieldRow,
    /// Right half-width secondary row.
    pub ctf: FieldRow,
    /// Horizontal extent of the divider rules.
    pub divider_span: (f64, f64),
    /// Divider under the header.
    pub header_divider_y: f64,
    /// Dividers between info rows.
    pub row_divider_ys: [f64; 3],
}

impl CardLayout {
    /// Resolve the design proportions for `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        let sx = f64::from(canvas.width) / f64::from(DESIGN_CANVAS.width);
        let sy = f64::from(canvas.height) / f64::from(DESIGN_CANVAS.height);
        let scale = sx.min(sy);
        let r = |x0: f64, y0: f64, x1: f64, y1: f64| Rect::new(x0 * sx, y0 * sy, x1 * sx, y1 * sy);
        let row = |label: &'static str, rect: Rect, size: f64| FieldRow {
            label,
            rect,
            font_size: (size * scale) as f32,
        };

        Self {
            canvas,
            scale,
            frame: r(20.0, 20.0, 1200.0, 620.0),
            frame_radius: 28.0 * scale,
            license: row("License : ", r(64.0, 58.0, 700.0, 126.0), 42.0),
            rank: row("Rank : ", r(760.0, 58.0, 1160.0, 126.0), 54.0),
            avatar: r(64.0, 164.0, 364.0, 580.0),
            avatar_radius: 22.0 * scale,
            handle: row("Name : ", r(404.0, 176.0, 1156.0, 256.0), 56.0),
            category: row("Category : ", r(404.0, 288.0, 1156.0, 358.0), 48.0),
            score: row("Points : ", r(404.0, 390.0, 1156.0, 460.0), 48.0),
            team: row("Team : ", r(404.0, 492.0, 772.0, 562.0), 44.0),
            ctf: row("CTF : ", r(788.0, 492.0, 1156.0, 562.0), 44.0),
            divider_span: (64.0 * sx, 1156.0 * sx),
            header_divider_y: 140.0 * sy,
            row_divider_ys: [272.0 * sy, 374.0 * sy, 476.0 * sy],
        }
    }

    /// Smallest font size fields shrink to at this scale.
    pub fn min_font_size(&self) -> f32 {
        (f64::from(MIN_FONT_SIZE) * self.scale).max(6.0) as f32
    }

    /// Info panel rows in drawing order.
    pub fn rows(&self) -> [&FieldRow; 5] {
        [
            &self.handle,
            &self.category,
            &self.score,
            &self.team,
            &self.ctf,
        ]
    }
}

impl Default for CardLayout {
    fn default() -> Self {
        Self::new(DESIGN_CANVAS)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layout.rs"]
mod tests;
