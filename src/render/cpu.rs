use std::sync::Arc;

use kurbo::Shape as _;

use crate::foundation::core::{Affine, Bitmap, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{CardError, CardResult};
use crate::render::surface::{Surface, clamp_radius, is_degenerate};
use crate::text::fonts::{FontFace, FontSet};
use crate::text::layout::{TextBrushRgba8, TextLayoutEngine};

/// Rasterizing surface backed by `vello_cpu`, with parley for shaping.
///
/// Output is premultiplied RGBA8. Each instance owns its render context and text engine, so
/// independent renders can run on independent threads.
pub struct CpuSurface {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    text: TextLayoutEngine,
    regular: vello_cpu::peniko::FontData,
    bold: vello_cpu::peniko::FontData,
    clip_depth: usize,
}

impl CpuSurface {
    /// New surface cleared to `clear`.
    pub fn new(canvas: Canvas, fonts: &FontSet, clear: Rgba8) -> CardResult<Self> {
        let (w, h) = canvas_u16(canvas)?;
        let text = TextLayoutEngine::new(fonts)?;
        let font_data = |face: FontFace| {
            vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(fonts.bytes(face).as_ref().clone()),
                0,
            )
        };
        let mut surface = Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
            text,
            regular: font_data(FontFace::Regular),
            bold: font_data(FontFace::Bold),
            clip_depth: 0,
        };
        surface.fill_rect(canvas.rect(), clear);
        Ok(surface)
    }

    /// Close open clips, rasterize everything drawn and return the pixels.
    pub fn finish(mut self) -> CardResult<Bitmap> {
        while self.clip_depth > 0 {
            self.pop_clip();
        }
        let (w, h) = canvas_u16(self.canvas)?;
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Bitmap::new(
            self.canvas.width,
            self.canvas.height,
            pixmap.data_as_u8_slice().to_vec(),
        )
    }

    fn reset_transforms(&mut self) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }
}

impl Surface for CpuSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        if is_degenerate(rect) || color.a == 0 {
            return;
        }
        self.reset_transforms();
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Rgba8) {
        if is_degenerate(rect) || color.a == 0 {
            return;
        }
        self.reset_transforms();
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx.fill_path(&rounded_path(rect, radius));
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f64, width: f64, color: Rgba8) {
        if is_degenerate(rect) || color.a == 0 || !width.is_finite() || width <= 0.0 {
            return;
        }
        self.reset_transforms();
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&rounded_path(rect, radius));
    }

    fn push_clip_rounded_rect(&mut self, rect: Rect, radius: f64) {
        // A degenerate clip still pushes a layer so pushes and pops stay paired.
        let path = if is_degenerate(rect) {
            vello_cpu::kurbo::BezPath::new()
        } else {
            rounded_path(rect, radius)
        };
        self.reset_transforms();
        self.ctx.push_clip_layer(&path);
        self.clip_depth += 1;
    }

    fn pop_clip(&mut self) {
        if self.clip_depth == 0 {
            return;
        }
        self.ctx.pop_layer();
        self.clip_depth -= 1;
    }

    fn draw_image(&mut self, image: &Bitmap, src: Rect, dst: Rect, opacity: f32) {
        if is_degenerate(src) || is_degenerate(dst) || opacity.is_nan() || opacity <= 0.0 {
            return;
        }
        let pixmap =
            match pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height) {
                Ok(p) => p,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping image draw");
                    return;
                }
            };
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        let tr = Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(dst.width() / src.width(), dst.height() / src.height())
            * Affine::translate((-src.x0, -src.y0));

        self.reset_transforms();
        self.ctx.set_transform(affine_to_cpu(tr));
        self.ctx.set_paint(paint);
        let opacity = opacity.min(1.0);
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        self.ctx.fill_rect(&rect_to_cpu(src));
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
        self.reset_transforms();
    }

    fn fill_text(&mut self, text: &str, face: FontFace, size_px: f32, baseline: Point, color: Rgba8) {
        if text.is_empty() || color.a == 0 || !baseline.x.is_finite() || !baseline.y.is_finite() {
            return;
        }
        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let layout = match self.text.layout_line(text, face, size_px, brush) {
            Ok(l) => l,
            Err(e) => {
                tracing::debug!(error = %e, "skipping text draw");
                return;
            }
        };
        let first_baseline = layout
            .lines()
            .next()
            .map(|l| l.metrics().baseline)
            .unwrap_or(0.0);
        let font = match face {
            FontFace::Regular => self.regular.clone(),
            FontFace::Bold => self.bold.clone(),
        };

        self.reset_transforms();
        self.ctx.set_transform(affine_to_cpu(Affine::translate((
            baseline.x,
            baseline.y - f64::from(first_baseline),
        ))));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.reset_transforms();
    }

    fn measure_text(&mut self, text: &str, face: FontFace, size_px: f32) -> f64 {
        match self.text.measure(text, face, size_px) {
            Ok(w) => w,
            Err(e) => {
                tracing::debug!(error = %e, "text measure failed");
                0.0
            }
        }
    }
}

fn canvas_u16(canvas: Canvas) -> CardResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| CardError::validation("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| CardError::validation("surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(CardError::validation("surface dimensions must be > 0"));
    }
    Ok((w, h))
}

fn to_cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rounded_path(rect: Rect, radius: f64) -> vello_cpu::kurbo::BezPath {
    let r = clamp_radius(rect, radius);
    let path = kurbo::RoundedRect::from_rect(rect, r).to_path(0.1);
    bezpath_to_cpu(&path)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> CardResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CardError::validation("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CardError::validation("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(CardError::validation("pixmap byte len mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
