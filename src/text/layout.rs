use std::borrow::Cow;

use crate::foundation::error::{CardError, CardResult};
use crate::text::fonts::{FontFace, FontSet};

/// RGBA8 brush carried through parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Single-line shaping over the card's two registered faces.
///
/// One engine belongs to one surface; parley contexts are not shared between renders.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    regular_family: String,
    bold_family: String,
}

impl TextLayoutEngine {
    /// Register both faces with a fresh font context.
    pub fn new(fonts: &FontSet) -> CardResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let regular_family = register(&mut font_ctx, fonts.bytes(FontFace::Regular))?;
        let bold_family = register(&mut font_ctx, fonts.bytes(FontFace::Bold))?;
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            regular_family,
            bold_family,
        })
    }

    /// Family name parley resolved for a face.
    pub fn family_name(&self, face: FontFace) -> &str {
        match face {
            FontFace::Regular => &self.regular_family,
            FontFace::Bold => &self.bold_family,
        }
    }

    /// Shape `text` on one unbroken line.
    pub fn layout_line(
        &mut self,
        text: &str,
        face: FontFace,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> CardResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family = match face {
            FontFace::Regular => self.regular_family.clone(),
            FontFace::Bold => self.bold_family.clone(),
        };
        let weight = match face {
            FontFace::Regular => parley::style::FontWeight::NORMAL,
            FontFace::Bold => parley::style::FontWeight::BOLD,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Advance width of `text` on one line, in pixels.
    pub fn measure(&mut self, text: &str, face: FontFace, size_px: f32) -> CardResult<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let layout = self.layout_line(text, face, size_px, TextBrushRgba8::default())?;
        Ok(f64::from(layout.width()))
    }
}

fn register(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> CardResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| CardError::asset("no font families registered from font bytes"))?;
    let name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| CardError::asset("registered font family has no name"))?;
    Ok(name.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
