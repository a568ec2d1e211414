use super::*;

#[test]
fn store_record_field_names_are_accepted() {
    let json = r#"{"thmUsername":"neo","points":12345,"avatar":""}"#;
    let p: Profile = serde_json::from_str(json).unwrap();
    assert_eq!(p.handle, "neo");
    assert_eq!(p.score, 12345);
    assert_eq!(p.avatar_ref, None);
    assert_eq!(p.avatar(), None);
}

#[test]
fn canonical_field_names_round_trip() {
    let p = Profile::new("trinity", 99).with_avatar("https://example.com/a.png");
    let json = serde_json::to_string(&p).unwrap();
    let back: Profile = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
}

#[test]
fn license_number_is_zero_padded_and_clamped() {
    assert_eq!(Profile::new("a", 42).license_number(), "0000000042");
    assert_eq!(Profile::new("a", -7).license_number(), "0000000000");
}

#[test]
fn display_fallbacks() {
    let p = Profile::new("   ", 0);
    assert_eq!(p.display_handle(), UNKNOWN_HANDLE);
    assert_eq!(p.display_team(), DEFAULT_TEAM);
    assert_eq!(p.display_ctf_count(), "10");

    let p = Profile {
        team: Some("zion".to_string()),
        ctf_count: Some(3),
        ..Profile::new("morpheus", 1)
    };
    assert_eq!(p.display_team(), "zion");
    assert_eq!(p.display_ctf_count(), "3");
}

#[test]
fn blank_avatar_is_absent() {
    assert_eq!(Profile::new("a", 1).with_avatar("  ").avatar(), None);
}

#[test]
fn fractional_and_textual_points_are_floored() {
    let p: Profile = serde_json::from_str(r#"{"thmUsername":"neo","points":150000.7}"#).unwrap();
    assert_eq!(p.score, 150_000);
    assert_eq!(crate::rank::tier::derive_tier(p.clamped_score()), crate::rank::tier::Tier::S);

    let p: Profile = serde_json::from_str(r#"{"points":"12,345"}"#).unwrap();
    assert_eq!(p.score, 12_345);

    let p: Profile = serde_json::from_str(r#"{"points":-3.2}"#).unwrap();
    assert_eq!(p.score, -4);
    assert_eq!(p.clamped_score(), 0);
}

#[test]
fn unusable_points_read_as_zero() {
    for json in [r#"{"points":null}"#, r#"{"points":"n/a"}"#, r#"{}"#] {
        let p: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(p.score, 0, "{json}");
    }
    let p: Profile = serde_json::from_str(r#"{"points":1e300}"#).unwrap();
    assert_eq!(p.score, i64::MAX);
}

#[test]
fn float_scores_saturate_and_ignore_nan() {
    assert_eq!(score_from_f64(f64::NAN), 0);
    assert_eq!(score_from_f64(f64::INFINITY), i64::MAX);
    assert_eq!(score_from_f64(f64::NEG_INFINITY), i64::MIN);
    assert_eq!(score_from_f64(9_999.99), 9_999);
}
