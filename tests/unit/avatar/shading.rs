use super::*;

#[test]
fn vignette_is_clear_in_the_middle_and_dark_at_corners() {
    let v = radial_vignette(64, 64).unwrap();
    assert_eq!(v.pixel(32, 32)[3], 0);
    let corner = v.pixel(0, 0)[3];
    assert!(corner > 100, "corner alpha {corner}");
    assert!(corner <= (VIGNETTE_ALPHA * 255.0).round() as u8);
    // color channels stay black
    assert_eq!(&v.pixel(0, 0)[..3], &[0, 0, 0]);
}

#[test]
fn vignette_grows_monotonically_outwards() {
    let v = radial_vignette(80, 80).unwrap();
    let mut last = 0;
    for x in 40..80 {
        let a = v.pixel(x, 40)[3];
        assert!(a >= last);
        last = a;
    }
}

#[test]
fn bottom_shade_darkens_towards_the_bottom() {
    let s = bottom_shade(100).unwrap();
    assert_eq!((s.width, s.height), (1, 100));
    assert_eq!(s.pixel(0, 10)[3], 0);
    assert_eq!(s.pixel(0, 54)[3], 0);
    assert!(s.pixel(0, 99)[3] > 150);
    assert!(s.pixel(0, 80)[3] < s.pixel(0, 95)[3]);
}

#[test]
fn zero_sized_requests_fail_cleanly() {
    assert!(radial_vignette(0, 10).is_err());
    assert!(bottom_shade(0).is_ok());
}
