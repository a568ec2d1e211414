use super::*;

#[test]
fn rgb_from_hex_splits_channels() {
    assert_eq!(Rgb::from_hex(0xe11d48), Rgb::new(0xe1, 0x1d, 0x48));
}

#[test]
fn with_alpha_clamps_and_rejects_nan() {
    assert_eq!(Rgb::new(1, 2, 3).with_alpha(2.0).a, 255);
    assert_eq!(Rgb::new(1, 2, 3).with_alpha(-1.0).a, 0);
    assert_eq!(Rgb::new(1, 2, 3).with_alpha(f32::NAN).a, 0);
    assert_eq!(Rgb::new(1, 2, 3).with_alpha(0.5).a, 128);
}

#[test]
fn mix_endpoints() {
    let a = Rgb::new(0, 0, 0);
    let b = Rgb::new(200, 100, 50);
    assert_eq!(a.mix(b, 0.0), a);
    assert_eq!(a.mix(b, 1.0), b);
    assert_eq!(a.mix(b, 0.5), Rgb::new(100, 50, 25));
}

#[test]
fn premul_then_unpremul_is_close() {
    let px = [200u8, 100, 50, 128];
    let back = unpremul_rgba8(premul_rgba8(px));
    for c in 0..3 {
        assert!((i32::from(back[c]) - i32::from(px[c])).abs() <= 2);
    }
    assert_eq!(back[3], 128);
    assert_eq!(unpremul_rgba8([10, 10, 10, 0]), [0, 0, 0, 0]);
}

#[test]
fn bitmap_rejects_length_mismatch_and_zero_size() {
    assert!(Bitmap::new(2, 2, vec![0; 15]).is_err());
    assert!(Bitmap::new(0, 2, vec![]).is_err());
    let bm = Bitmap::new(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    assert_eq!(bm.pixel(1, 0), [5, 6, 7, 8]);
    assert_eq!(bm.pixel(2, 0), [0, 0, 0, 0]);
}

#[test]
fn solid_bitmap_is_premultiplied() {
    let bm = Bitmap::solid(
        3,
        2,
        Rgba8 {
            r: 255,
            g: 0,
            b: 0,
            a: 128,
        },
    )
    .unwrap();
    assert_eq!(bm.rgba8_premul.len(), 24);
    assert_eq!(bm.pixel(2, 1), [128, 0, 0, 128]);
}
