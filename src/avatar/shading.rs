//! Gradient overlays baked into small bitmaps and stretched over the avatar.

use crate::foundation::core::{Bitmap, premul_rgba8};
use crate::foundation::error::CardResult;
use crate::foundation::math::smoothstep;

/// Vignette stays clear up to this fraction of the center-to-corner distance.
pub const VIGNETTE_START: f32 = 0.35;
/// Vignette alpha at the corners.
pub const VIGNETTE_ALPHA: f32 = 0.55;
/// Bottom shade starts at this fraction of the height.
pub const SHADE_START: f32 = 0.55;
/// Bottom shade alpha at the bottom edge.
pub const SHADE_ALPHA: f32 = 0.65;

/// Black radial vignette: transparent center, darkening towards the corners.
pub fn radial_vignette(width: u32, height: u32) -> CardResult<Bitmap> {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let corner = cx.hypot(cy).max(f32::EPSILON);
    let mut px = Vec::with_capacity((width as usize) * (height as usize) * 4);
    for y in 0..height {
        for x in 0..width {
            let d = ((x as f32 + 0.5 - cx).hypot(y as f32 + 0.5 - cy) / corner).min(1.0);
            let a = smoothstep(VIGNETTE_START, 1.0, d) * VIGNETTE_ALPHA;
            px.extend_from_slice(&black(a));
        }
    }
    Bitmap::new(width, height, px)
}

/// Black linear shade rising from the bottom edge. One pixel wide; stretch it horizontally.
pub fn bottom_shade(height: u32) -> CardResult<Bitmap> {
    let h = height.max(1);
    let px: Vec<u8> = (0..h)
        .flat_map(|y| {
            let t = (y as f32 + 0.5) / h as f32;
            black(smoothstep(SHADE_START, 1.0, t) * SHADE_ALPHA)
        })
        .collect();
    Bitmap::new(1, h, px)
}

fn black(alpha: f32) -> [u8; 4] {
    premul_rgba8([0, 0, 0, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8])
}

#[cfg(test)]
#[path = "../../tests/unit/avatar/shading.rs"]
mod tests;
