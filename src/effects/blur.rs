use crate::foundation::error::{CardError, CardResult};

/// Largest blur radius accepted; bigger requests are clamped.
pub const MAX_BLUR_RADIUS: u32 = 64;

/// Gaussian blur of a coverage mask holding one byte per pixel.
///
/// Rows are blurred into a transposed scratch plane, then the scratch rows (the original
/// columns) are blurred and transposed back, so both passes walk memory linearly. Samples past
/// the edge read as zero coverage, which lets a halo fade out instead of smearing its border.
pub fn blur_mask(mask: &[u8], width: u32, height: u32, radius: u32) -> CardResult<Vec<u8>> {
    let (w, h) = (width as usize, height as usize);
    let len = w
        .checked_mul(h)
        .ok_or_else(|| CardError::validation("blur mask size overflow"))?;
    if mask.len() != len {
        return Err(CardError::validation(format!(
            "blur mask is {} bytes, expected {width}x{height}",
            mask.len()
        )));
    }
    if radius == 0 || len == 0 {
        return Ok(mask.to_vec());
    }

    let kernel = gaussian_kernel(radius);
    let plane: Vec<f32> = mask.iter().map(|&c| f32::from(c)).collect();
    let columns = blur_rows_transposed(&plane, w, h, &kernel);
    let blurred = blur_rows_transposed(&columns, h, w, &kernel);
    Ok(blurred
        .into_iter()
        .map(|v| v.round().clamp(0.0, 255.0) as u8)
        .collect())
}

/// Sigma paired with a blur radius, so the kernel tails off near its ends.
pub fn sigma_for_radius(radius: u32) -> f32 {
    (radius as f32 / 2.0).max(0.5)
}

/// Normalized weights for taps `-r..=r`, with `r` clamped to [`MAX_BLUR_RADIUS`].
pub fn gaussian_kernel(radius: u32) -> Vec<f32> {
    let r = radius.min(MAX_BLUR_RADIUS) as i32;
    let sigma = sigma_for_radius(r as u32);
    let denom = 2.0 * sigma * sigma;
    let weights: Vec<f32> = (-r..=r)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let total: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Blur each `w`-wide row of `src` and write it as a column of an `h`-wide output.
fn blur_rows_transposed(src: &[f32], w: usize, h: usize, kernel: &[f32]) -> Vec<f32> {
    let r = kernel.len() / 2;
    let mut out = vec![0.0f32; w * h];
    for (y, row) in src.chunks_exact(w).enumerate() {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &weight) in kernel.iter().enumerate() {
                let Some(sx) = (x + k).checked_sub(r) else {
                    continue;
                };
                if let Some(&v) = row.get(sx) {
                    acc += weight * v;
                }
            }
            out[x * h + y] = acc;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
