use super::*;

fn total(mask: &[u8]) -> u32 {
    mask.iter().map(|&c| u32::from(c)).sum()
}

#[test]
fn zero_radius_returns_the_mask() {
    let mask = vec![0u8, 40, 255, 7, 0, 90];
    assert_eq!(blur_mask(&mask, 3, 2, 0).unwrap(), mask);
}

#[test]
fn kernel_is_symmetric_and_normalized() {
    let k = gaussian_kernel(5);
    assert_eq!(k.len(), 11);
    let sum: f32 = k.iter().sum();
    assert!((sum - 1.0).abs() < 1e-5, "sum {sum}");
    for i in 0..k.len() / 2 {
        assert!((k[i] - k[k.len() - 1 - i]).abs() < 1e-7);
        assert!(k[i] < k[i + 1]);
    }
}

#[test]
fn kernel_radius_is_clamped() {
    assert_eq!(gaussian_kernel(10_000).len(), 2 * MAX_BLUR_RADIUS as usize + 1);
}

#[test]
fn interior_of_a_flat_mask_is_unchanged() {
    let (w, h) = (12u32, 12u32);
    let mask = vec![200u8; (w * h) as usize];
    let out = blur_mask(&mask, w, h, 2).unwrap();
    // Two-pixel taps past the border read zero, so only the middle keeps its value.
    for y in 4..8 {
        for x in 4..8 {
            assert_eq!(out[(y * w + x) as usize], 200);
        }
    }
    assert!(out[0] < 200);
}

#[test]
fn single_dot_spreads_and_keeps_its_mass() {
    let (w, h) = (9u32, 9u32);
    let mut mask = vec![0u8; (w * h) as usize];
    mask[(4 * w + 4) as usize] = 255;
    let out = blur_mask(&mask, w, h, 2).unwrap();

    assert!(out.iter().filter(|&&c| c > 0).count() > 1);
    assert!(out[(4 * w + 4) as usize] < 255);
    assert!(out[(4 * w + 5) as usize] > out[(4 * w + 6) as usize]);
    assert!((total(&out) as i32 - 255).abs() <= 12, "mass {}", total(&out));
}

#[test]
fn halo_fades_toward_the_border() {
    let (w, h) = (16u32, 1u32);
    let mut mask = vec![0u8; w as usize];
    mask[6..10].fill(255);
    let out = blur_mask(&mask, w, h, 4).unwrap();
    assert!(out[2] > 0);
    assert!(out[2] < out[4]);
    assert!(out[4] < out[7]);
}

#[test]
fn mismatched_length_is_rejected() {
    assert!(blur_mask(&[0u8; 5], 2, 3, 1).is_err());
    assert!(blur_mask(&[], 0, 0, 3).unwrap().is_empty());
}
