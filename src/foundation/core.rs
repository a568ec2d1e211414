use std::sync::Arc;

use crate::foundation::error::{CardError, CardResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Pixel dimensions of a drawing target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas of the given size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The full canvas as a rect anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Opaque sRGB color (no alpha).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Build a color from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Attach an opacity in `[0, 1]`.
    pub fn with_alpha(self, alpha: f32) -> Rgba8 {
        let a = if alpha.is_finite() {
            (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
        } else {
            0
        };
        Rgba8 {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Fully opaque paint of this color.
    pub fn opaque(self) -> Rgba8 {
        Rgba8 {
            r: self.r,
            g: self.g,
            b: self.b,
            a: 255,
        }
    }

    /// Linear mix towards `other` (`t = 0` is `self`).
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let lerp = |a: u8, b: u8| -> u8 {
            let af = f32::from(a);
            let bf = f32::from(b);
            (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
        }
    }
}

/// Straight-alpha RGBA8 paint color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (straight).
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Premultiplied bytes of this color.
    pub fn to_premul(self) -> [u8; 4] {
        premul_rgba8([self.r, self.g, self.b, self.a])
    }

    /// Alpha as a float in `[0, 1]`.
    pub fn alpha_f32(self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

/// Premultiplied RGBA8 raster, shared between decoding, shading and surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8 bytes.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Bitmap {
    /// Wrap premultiplied bytes, checking that they match `width * height * 4`.
    pub fn new(width: u32, height: u32, rgba8_premul: Vec<u8>) -> CardResult<Self> {
        if width == 0 || height == 0 {
            return Err(CardError::validation("bitmap dimensions must be > 0"));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| CardError::validation("bitmap buffer size overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(CardError::validation(format!(
                "bitmap expects {expected} bytes for {width}x{height}, got {}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// A bitmap filled with one color.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> CardResult<Self> {
        let px = color.to_premul();
        let n = (width as usize).saturating_mul(height as usize);
        Self::new(width, height, px.repeat(n))
    }

    /// Premultiplied pixel at `(x, y)`; out-of-range coordinates read as transparent.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let d = &self.rgba8_premul;
        [d[idx], d[idx + 1], d[idx + 2], d[idx + 3]]
    }

    /// The bitmap's own extent in pixel space.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Premultiply a straight RGBA8 pixel.
pub fn premul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    let a16 = u16::from(a);
    let premul = |c: u8| -> u8 { (((u16::from(c) * a16) + 127) / 255) as u8 };
    [premul(r), premul(g), premul(b), a]
}

/// Undo premultiplication of an RGBA8 pixel.
pub fn unpremul_rgba8(px: [u8; 4]) -> [u8; 4] {
    let a = u32::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |c: u8| -> u8 { ((u32::from(c) * 255 + a / 2) / a).min(255) as u8 };
    [un(px[0]), un(px[1]), un(px[2]), px[3]]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
