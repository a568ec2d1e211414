use crate::effects::composite::over_in_place;
use crate::foundation::core::{Bitmap, Canvas, premul_rgba8};
use crate::foundation::error::{CardError, CardResult};
use crate::foundation::math::hash_u32;
use crate::rank::theme::{CARD_BACKGROUND, Theme};

/// Opacity of the film grain layer.
pub const GRAIN_OPACITY: f32 = 0.05;

/// Full-canvas background: the theme panel tone at the top fading to the card background at the
/// bottom, with optional seeded grain on top.
pub fn backdrop_bitmap(canvas: Canvas, theme: &Theme, grain_seed: Option<u64>) -> CardResult<Bitmap> {
    let (w, h) = (canvas.width, canvas.height);
    if w == 0 || h == 0 {
        return Err(CardError::validation("backdrop canvas must be non-empty"));
    }
    let row_len = (w as usize) * 4;
    let mut px = Vec::with_capacity(row_len * (h as usize));
    for y in 0..h {
        let t = if h > 1 { y as f32 / (h - 1) as f32 } else { 0.0 };
        let c = theme.panel.mix(CARD_BACKGROUND, t);
        let rgba = [c.r, c.g, c.b, 255];
        for _ in 0..w {
            px.extend_from_slice(&rgba);
        }
    }
    if let Some(seed) = grain_seed {
        let grain = grain_layer(w, h, seed);
        over_in_place(&mut px, &grain, GRAIN_OPACITY)?;
    }
    Bitmap::new(w, h, px)
}

/// Opaque grey noise, one stable value per pixel for a given seed.
pub fn grain_layer(width: u32, height: u32, seed: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity((width as usize) * (height as usize) * 4);
    for y in 0..height {
        for x in 0..width {
            let v = (hash_u32(seed, x, y) >> 24) as u8;
            out.extend_from_slice(&premul_rgba8([v, v, v, 255]));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compose/backdrop.rs"]
mod tests;
