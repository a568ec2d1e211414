use super::*;

#[test]
fn zero_is_lowest_tier() {
    assert_eq!(derive_tier(0), Tier::E);
}

#[test]
fn upper_boundary_belongs_to_higher_tier() {
    assert_eq!(derive_tier(149_999), Tier::A);
    assert_eq!(derive_tier(150_000), Tier::S);
    assert_eq!(derive_tier(9_999), Tier::E);
    assert_eq!(derive_tier(10_000), Tier::D);
    assert_eq!(derive_tier(i64::MAX), Tier::S);
}

#[test]
fn negative_scores_clamp_to_lowest() {
    assert_eq!(derive_tier(-1), Tier::E);
    assert_eq!(derive_tier(i64::MIN), Tier::E);
}

#[test]
fn thresholds_are_strictly_ascending_and_cover_every_tier() {
    for w in TIER_THRESHOLDS.windows(2) {
        assert!(w[0].0 < w[1].0);
        assert!(w[0].1 < w[1].1);
    }
    assert_eq!(TIER_THRESHOLDS[0].0, 0);
    for (low, tier) in TIER_THRESHOLDS {
        assert_eq!(derive_tier(low), tier);
    }
    let covered: Vec<Tier> = TIER_THRESHOLDS.iter().map(|(_, t)| *t).collect();
    assert_eq!(covered, Tier::ALL);
}

#[test]
fn tiering_is_monotonic() {
    let mut prev = derive_tier(0);
    let mut s = 0i64;
    while s <= 200_000 {
        let t = derive_tier(s);
        assert!(prev <= t, "tier dropped at score {s}");
        prev = t;
        s += 250;
    }
    for (low, _) in TIER_THRESHOLDS {
        if low > 0 {
            assert!(derive_tier(low - 1) <= derive_tier(low));
        }
    }
}

#[test]
fn labels_and_letters() {
    assert_eq!(Tier::S.label(), "S-RANK");
    assert_eq!(Tier::E.letter(), "E");
}
