use crate::foundation::error::{CardError, CardResult};

/// Side of the sampling grid laid over the source image.
pub const SAMPLE_GRID: u32 = 24;
/// Cells whose mean alpha is below this are treated as empty.
pub const MIN_SAMPLE_ALPHA: f32 = 0.04;

/// Mean luminance and saturation of an image, both in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageProfile {
    /// Mean BT.709 luminance.
    pub mean_luminance: f32,
    /// Mean HSV-style saturation, `(max - min) / max`.
    pub mean_saturation: f32,
}

impl ImageProfile {
    /// Profile used when an image has no opaque content to sample.
    pub const NEUTRAL: ImageProfile = ImageProfile {
        mean_luminance: 0.5,
        mean_saturation: 0.0,
    };
}

/// Sample a premultiplied RGBA8 buffer on a [`SAMPLE_GRID`] grid of area-averaged cells.
///
/// Images smaller than the grid use one cell per pixel. Nearly transparent cells are skipped;
/// an image without any usable cell yields [`ImageProfile::NEUTRAL`].
pub fn sample_image_profile(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> CardResult<ImageProfile> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CardError::validation("sample buffer size overflow"))?;
    if rgba8_premul.len() != expected {
        return Err(CardError::validation(
            "sample_image_profile expects width*height*4 bytes",
        ));
    }
    if expected == 0 {
        return Ok(ImageProfile::NEUTRAL);
    }

    let cols = width.min(SAMPLE_GRID);
    let rows = height.min(SAMPLE_GRID);
    let mut lum_sum = 0.0f64;
    let mut sat_sum = 0.0f64;
    let mut n = 0u32;

    for cy in 0..rows {
        let y0 = cell_start(cy, rows, height);
        let y1 = cell_start(cy + 1, rows, height);
        for cx in 0..cols {
            let x0 = cell_start(cx, cols, width);
            let x1 = cell_start(cx + 1, cols, width);

            let mut acc = [0u64; 4];
            for y in y0..y1 {
                let row = (y as usize) * (width as usize);
                for x in x0..x1 {
                    let i = (row + x as usize) * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(rgba8_premul[i + c]);
                    }
                }
            }
            let count = u64::from(x1 - x0) * u64::from(y1 - y0);
            if count == 0 || acc[3] == 0 {
                continue;
            }
            let mean_alpha = acc[3] as f32 / (count as f32 * 255.0);
            if mean_alpha < MIN_SAMPLE_ALPHA {
                continue;
            }

            // Premultiplied sums divided by the alpha sum give the straight mean color.
            let r = (acc[0] as f64 / acc[3] as f64).min(1.0);
            let g = (acc[1] as f64 / acc[3] as f64).min(1.0);
            let b = (acc[2] as f64 / acc[3] as f64).min(1.0);
            lum_sum += luminance(r, g, b);
            sat_sum += saturation(r, g, b);
            n += 1;
        }
    }

    if n == 0 {
        return Ok(ImageProfile::NEUTRAL);
    }
    Ok(ImageProfile {
        mean_luminance: (lum_sum / f64::from(n)).clamp(0.0, 1.0) as f32,
        mean_saturation: (sat_sum / f64::from(n)).clamp(0.0, 1.0) as f32,
    })
}

/// ITU-R BT.709 relative luminance of normalized channels.
pub fn luminance(r: f64, g: f64, b: f64) -> f64 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// `(max - min) / max`, zero for black.
pub fn saturation(r: f64, g: f64, b: f64) -> f64 {
    let max = r.max(g).max(b);
    if max <= 0.0 {
        return 0.0;
    }
    let min = r.min(g).min(b);
    (max - min) / max
}

fn cell_start(i: u32, cells: u32, extent: u32) -> u32 {
    ((u64::from(i) * u64::from(extent)) / u64::from(cells)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/avatar/sample.rs"]
mod tests;
