use std::io::Cursor;

use crate::foundation::core::{Bitmap, unpremul_rgba8};
use crate::foundation::error::{CardError, CardResult};

/// Encode a premultiplied bitmap as a straight-alpha RGBA PNG.
pub fn encode_png(bitmap: &Bitmap) -> CardResult<Vec<u8>> {
    let straight: Vec<u8> = bitmap
        .rgba8_premul
        .chunks_exact(4)
        .flat_map(|px| unpremul_rgba8([px[0], px[1], px[2], px[3]]))
        .collect();
    let img = image::RgbaImage::from_raw(bitmap.width, bitmap.height, straight)
        .ok_or_else(|| CardError::encode("bitmap buffer does not match its dimensions"))?;

    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| CardError::encode(format!("write png: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
