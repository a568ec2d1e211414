use super::*;
use crate::avatar::normalize::PlaceholderReason;
use crate::render::recording::{DrawCall, RecordingSurface};

fn compose(profile: &Profile, avatar: Option<&[u8]>) -> (RecordingSurface, CardSummary) {
    let layout = CardLayout::default();
    let mut s = RecordingSurface::new(layout.canvas);
    let summary = compose_card(&mut s, &layout, profile, avatar, &CardOptions::default());
    (s, summary)
}

fn baseline_of(s: &RecordingSurface, text: &str) -> Point {
    match s.find_text(text) {
        Some(DrawCall::FillText { baseline, .. }) => *baseline,
        other => panic!("{text:?} not drawn: {other:?}"),
    }
}

#[test]
fn zero_score_card_shows_lowest_tier() {
    let (s, summary) = compose(&Profile::new("neo", 0), None);
    assert_eq!(summary.tier, Tier::E);
    let texts = s.texts();
    for expected in ["Script Kiddie", "[ E ]", "0000000000", "neo", "0", "morvax60", "10"] {
        assert!(texts.contains(&expected), "missing {expected:?} in {texts:?}");
    }
}

#[test]
fn top_tier_boundary() {
    let (_, a) = compose(&Profile::new("neo", 149_999), None);
    let (s, top) = compose(&Profile::new("neo", 150_000), None);
    assert_eq!(a.tier, Tier::A);
    assert_eq!(top.tier, Tier::S);
    assert!(s.find_text("Omniscient").is_some());
    assert!(s.find_text("0000150000").is_some());
}

#[test]
fn labels_are_drawn_for_every_field() {
    let (s, _) = compose(&Profile::new("neo", 42), None);
    for label in ["License : ", "Rank : ", "Name : ", "Category : ", "Points : ", "Team : ", "CTF : "] {
        assert!(s.find_text(label).is_some(), "missing label {label:?}");
    }
}

#[test]
fn long_handle_shrinks_to_the_floor_without_failing() {
    let layout = CardLayout::default();
    let handle = "x".repeat(200);
    let (s, summary) = compose(&Profile::new(handle.clone(), 1), None);
    assert_eq!(summary.sizes.handle, layout.min_font_size());
    assert!(s.find_text(&handle).is_some());
    // other rows are unaffected
    assert_eq!(summary.sizes.category, layout.category.font_size);
}

#[test]
fn content_never_moves_rows() {
    let (short, _) = compose(&Profile::new("a", 5), None);
    let (long, _) = compose(&Profile::new("a".repeat(80), 99_999_999), None);
    for label in ["Name : ", "Category : ", "Points : ", "Team : ", "CTF : ", "License : "] {
        assert_eq!(baseline_of(&short, label), baseline_of(&long, label), "{label}");
    }
}

#[test]
fn missing_avatar_uses_placeholder_and_keeps_clips_balanced() {
    let (s, summary) = compose(&Profile::new("trinity", 60_000), None);
    assert_eq!(
        summary.avatar,
        AvatarOutcome::Placeholder(PlaceholderReason::Missing)
    );
    assert!(s.find_text("T").is_some());
    assert_eq!(s.clip_depth(), 0);
    assert_eq!(s.max_clip_depth(), 1);
}

#[test]
fn broken_avatar_bytes_still_compose() {
    let (s, summary) = compose(&Profile::new("morpheus", 10), Some(b"GIF89a-not-really"));
    assert_eq!(
        summary.avatar,
        AvatarOutcome::Placeholder(PlaceholderReason::Undecodable)
    );
    assert_eq!(s.clip_depth(), 0);
}

#[test]
fn backdrop_is_drawn_first_over_the_whole_canvas() {
    let (s, _) = compose(&Profile::new("neo", 0), None);
    let layout = CardLayout::default();
    assert!(matches!(
        s.calls()[0],
        DrawCall::DrawImage { width: 1220, height: 640, dst, .. } if dst == layout.canvas.rect()
    ));
}

#[test]
fn composing_twice_records_identical_calls() {
    let p = Profile::new("cypher", 77_777);
    let (a, sa) = compose(&p, None);
    let (b, sb) = compose(&p, None);
    assert_eq!(a.calls(), b.calls());
    assert_eq!(sa, sb);
}

#[test]
fn profile_team_and_ctf_override_defaults() {
    let mut p = Profile::new("neo", 1);
    p.team = Some("zion".into());
    p.ctf_count = Some(3);
    let (s, _) = compose(&p, None);
    assert!(s.find_text("zion").is_some());
    assert!(s.find_text("3").is_some());
    assert!(s.find_text("morvax60").is_none());
}

#[test]
fn options_reject_unrenderable_canvases() {
    assert!(CardOptions::default().validate().is_ok());
    let zero = CardOptions {
        canvas: Canvas::new(0, 640),
        ..CardOptions::default()
    };
    assert!(zero.validate().is_err());
    let huge = CardOptions {
        canvas: Canvas::new(1220, 10_000),
        ..CardOptions::default()
    };
    assert!(matches!(huge.validate(), Err(CardError::Validation(_))));
}

#[test]
fn rank_badge_ends_at_the_strip_edge() {
    let layout = CardLayout::default();
    let (s, _) = compose(&Profile::new("neo", 0), None);
    let badge_right_edges: Vec<f64> = s
        .calls()
        .iter()
        .filter_map(|c| match c {
            DrawCall::FillRoundedRect { rect, .. } if rect.y0 == layout.rank.rect.y0 => Some(rect.x1),
            _ => None,
        })
        .collect();
    assert!(badge_right_edges.contains(&layout.rank.rect.x1));
}
