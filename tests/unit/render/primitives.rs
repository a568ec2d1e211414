use super::*;
use crate::foundation::core::Canvas;
use crate::render::recording::{DrawCall, RecordingSurface};

fn rec() -> RecordingSurface {
    RecordingSurface::new(Canvas::new(400, 300))
}

const WHITE: Rgba8 = Rgba8 {
    r: 255,
    g: 255,
    b: 255,
    a: 255,
};

#[test]
fn rounded_rect_clamps_radius_to_half_the_short_side() {
    let mut s = rec();
    rounded_rect(&mut s, Rect::new(0.0, 0.0, 100.0, 40.0), 500.0, RectStyle::Fill(WHITE));
    assert_eq!(
        s.calls(),
        &[DrawCall::FillRoundedRect {
            rect: Rect::new(0.0, 0.0, 100.0, 40.0),
            radius: 20.0,
            color: WHITE,
        }]
    );
}

#[test]
fn rounded_rect_negative_radius_is_square() {
    let mut s = rec();
    rounded_rect(
        &mut s,
        Rect::new(0.0, 0.0, 10.0, 10.0),
        -3.0,
        RectStyle::Stroke {
            color: WHITE,
            width: 2.0,
        },
    );
    assert!(matches!(
        s.calls()[0],
        DrawCall::StrokeRoundedRect { radius, width, .. } if radius == 0.0 && width == 2.0
    ));
}

#[test]
fn degenerate_input_draws_nothing() {
    let mut s = rec();
    let empty = Rect::new(10.0, 10.0, 10.0, 50.0);
    let nan = Rect::new(f64::NAN, 0.0, 10.0, 10.0);
    rounded_rect(&mut s, empty, 4.0, RectStyle::Fill(WHITE));
    rounded_rect(&mut s, nan, 4.0, RectStyle::Fill(WHITE));
    rounded_rect(
        &mut s,
        Rect::new(0.0, 0.0, 10.0, 10.0),
        4.0,
        RectStyle::Stroke {
            color: WHITE,
            width: 0.0,
        },
    );
    soft_glow(&mut s, empty, 4.0, Rgb::new(255, 0, 0), 12, 0.5);
    soft_glow(&mut s, Rect::new(0.0, 0.0, 10.0, 10.0), 4.0, Rgb::new(255, 0, 0), 12, 0.0);
    faded_divider(&mut s, 50.0, 50.0, 10.0, Rgb::new(255, 0, 0));
    faded_divider(&mut s, 80.0, 20.0, 10.0, Rgb::new(255, 0, 0));
    corner_brackets(&mut s, empty, 10.0, 2.0, WHITE);
    assert!(s.calls().is_empty());
}

#[test]
fn soft_glow_draws_one_image_around_the_rect() {
    let mut s = rec();
    let rect = Rect::new(40.0, 40.0, 140.0, 100.0);
    soft_glow(&mut s, rect, 10.0, Rgb::new(124, 58, 237), 16, 0.4);
    let [DrawCall::DrawImage { dst, opacity, .. }] = s.calls() else {
        panic!("expected one image, got {:?}", s.calls());
    };
    assert!(dst.x0 <= rect.x0 - 32.0 && dst.y0 <= rect.y0 - 32.0);
    assert!(dst.x1 >= rect.x1 + 32.0 && dst.y1 >= rect.y1 + 32.0);
    assert_eq!(*opacity, 0.4);
}

#[test]
fn rounded_rect_sdf_signs() {
    let r = Rect::new(0.0, 0.0, 100.0, 50.0);
    assert!(rounded_rect_sdf(Point::new(50.0, 25.0), r, 10.0) < 0.0);
    assert!(rounded_rect_sdf(Point::new(150.0, 25.0), r, 10.0) > 0.0);
    // corner is cut by the radius
    assert!(rounded_rect_sdf(Point::new(0.5, 0.5), r, 10.0) > 0.0);
    assert!((rounded_rect_sdf(Point::new(100.0, 25.0), r, 10.0)).abs() < 1e-9);
}

#[test]
fn divider_fades_at_both_ends() {
    assert_eq!(divider_fade(0.0), 0.0);
    assert_eq!(divider_fade(1.0), 0.0);
    assert_eq!(divider_fade(0.5), 1.0);
    assert!((divider_fade(0.025) - 0.5).abs() < 1e-5);
    assert_eq!(divider_fade(f32::NAN), 0.0);
}

#[test]
fn divider_spans_the_requested_range() {
    let mut s = rec();
    faded_divider(&mut s, 64.0, 1156.0, 140.0, Rgb::new(255, 255, 255));
    let [DrawCall::DrawImage { width, height, dst, .. }] = s.calls() else {
        panic!("expected one image");
    };
    assert_eq!((*width, *height), (1092, 1));
    assert_eq!(*dst, Rect::new(64.0, 139.0, 1156.0, 141.0));
}

#[test]
fn corner_brackets_stay_inside_the_rect() {
    let mut s = rec();
    let rect = Rect::new(60.0, 160.0, 368.0, 584.0);
    corner_brackets(&mut s, rect, 28.0, 4.0, WHITE);
    assert_eq!(s.calls().len(), 8);
    for call in s.calls() {
        let DrawCall::FillRect { rect: bar, .. } = call else {
            panic!("unexpected call {call:?}");
        };
        assert!(bar.x0 >= rect.x0 && bar.x1 <= rect.x1);
        assert!(bar.y0 >= rect.y0 && bar.y1 <= rect.y1);
        assert!(bar.width() > 0.0 && bar.height() > 0.0);
    }
}
