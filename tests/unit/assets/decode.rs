use std::io::Cursor;

use super::*;

fn png(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let bm = decode_image(&png(1, 1, [100, 50, 200, 128])).unwrap();
    assert_eq!((bm.width, bm.height), (1, 1));
    assert_eq!(
        bm.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn transparent_pixels_drop_their_color() {
    let bm = decode_image(&png(2, 1, [200, 10, 10, 0])).unwrap();
    assert_eq!(bm.pixel(1, 0), [0, 0, 0, 0]);
}

#[test]
fn oversized_images_are_downscaled() {
    let bm = decode_image(&png(2048, 512, [1, 2, 3, 255])).unwrap();
    assert_eq!(bm.width, MAX_DECODED_SIDE);
    assert_eq!(bm.height, 256);
}

#[test]
fn garbage_is_a_decode_error() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, CardError::Decode(_)));
    assert!(matches!(decode_image(&[]).unwrap_err(), CardError::Decode(_)));
}
