use super::*;

fn inside(inner: Rect, outer: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

#[test]
fn design_canvas_resolves_to_design_coordinates() {
    let l = CardLayout::default();
    assert_eq!(l.canvas, Canvas::new(1220, 640));
    assert_eq!(l.scale, 1.0);
    assert_eq!(l.avatar, Rect::new(64.0, 164.0, 364.0, 580.0));
    assert_eq!(l.handle.font_size, 56.0);
    assert_eq!(l.min_font_size(), MIN_FONT_SIZE);
}

#[test]
fn every_region_sits_inside_the_frame() {
    let l = CardLayout::default();
    let mut regions = vec![l.license.rect, l.rank.rect, l.avatar];
    regions.extend(l.rows().iter().map(|r| r.rect));
    for r in regions {
        assert!(inside(r, l.frame), "{r:?}");
        assert!(inside(l.frame, l.canvas.rect()));
    }
}

#[test]
fn info_rows_do_not_overlap_each_other_or_the_avatar() {
    let l = CardLayout::default();
    let rows = l.rows();
    for (i, a) in rows.iter().enumerate() {
        assert!(!overlaps(a.rect, l.avatar));
        for b in rows.iter().skip(i + 1) {
            assert!(!overlaps(a.rect, b.rect), "{} vs {}", a.label, b.label);
        }
    }
}

#[test]
fn dividers_fall_between_rows() {
    let l = CardLayout::default();
    assert!(l.header_divider_y > l.rank.rect.y1 && l.header_divider_y < l.avatar.y0);
    let [d1, d2, d3] = l.row_divider_ys;
    assert!(l.handle.rect.y1 < d1 && d1 < l.category.rect.y0);
    assert!(l.category.rect.y1 < d2 && d2 < l.score.rect.y0);
    assert!(l.score.rect.y1 < d3 && d3 < l.team.rect.y0);
}

#[test]
fn half_size_canvas_scales_everything() {
    let l = CardLayout::new(Canvas::new(610, 320));
    assert_eq!(l.scale, 0.5);
    assert_eq!(l.avatar, Rect::new(32.0, 82.0, 182.0, 290.0));
    assert_eq!(l.handle.font_size, 28.0);
    assert_eq!(l.min_font_size(), 9.0);
}
