use crate::foundation::core::Bitmap;
use crate::foundation::error::{CardError, CardResult};

/// Decoded avatars larger than this on either side are downscaled before use.
pub const MAX_DECODED_SIDE: u32 = 1024;

/// Decode PNG/JPEG/GIF/WebP/... bytes into a premultiplied bitmap.
///
/// Oversized images are shrunk (aspect preserved) so no side exceeds [`MAX_DECODED_SIDE`].
pub fn decode_image(bytes: &[u8]) -> CardResult<Bitmap> {
    if bytes.is_empty() {
        return Err(CardError::decode("empty image buffer"));
    }
    let mut dyn_img = image::load_from_memory(bytes)
        .map_err(|e| CardError::decode(format!("decode image from memory: {e}")))?;
    if dyn_img.width() > MAX_DECODED_SIDE || dyn_img.height() > MAX_DECODED_SIDE {
        dyn_img = dyn_img.thumbnail(MAX_DECODED_SIDE, MAX_DECODED_SIDE);
    }
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    Bitmap::new(width, height, rgba8_premul)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((u16::from(px[0]) * a + 127) / 255) as u8;
        px[1] = ((u16::from(px[1]) * a + 127) / 255) as u8;
        px[2] = ((u16::from(px[2]) * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
