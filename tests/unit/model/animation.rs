use super::*;

#[test]
fn names_round_trip_through_from_str() {
    for name in AnimationName::ALL {
        assert_eq!(name.as_str().parse::<AnimationName>().unwrap(), name);
    }
    assert_eq!(AnimationName::LimitAtk.to_string(), "limit_atk");
}

#[test]
fn unknown_name_is_rejected_not_skipped() {
    let err = "dance".parse::<AnimationName>().unwrap_err();
    assert!(matches!(err, ReelError::UnknownAnimation(ref n) if n == "dance"));
    assert!("Idle".parse::<AnimationName>().is_err());
}

#[test]
fn total_ticks_sums_durations() {
    let frame = |duration| AnimationFrameRef {
        sprite_index: 0,
        offset_x: 0,
        offset_y: 0,
        duration,
    };
    let anim = Animation {
        name: AnimationName::Idle,
        frames: vec![frame(2), frame(1), frame(3)],
    };
    assert_eq!(anim.total_ticks(), 6);
}
