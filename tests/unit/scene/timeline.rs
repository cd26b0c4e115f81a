use super::*;
use crate::foundation::core::FrameIndex;

fn clock(frame: u64) -> FrameClock {
    FrameClock::new(FrameIndex(frame), Fps::new(30, 1).unwrap())
}

#[test]
fn rejects_negative_or_non_finite_durations() {
    assert!(Segment::new("a", 0.0, -1.0).is_err());
    assert!(Segment::new("a", f64::NAN, 1.0).is_err());
    assert!(Segment::new("a", 0.0, f64::INFINITY).is_err());
    assert!(Segment::new("a", 5.0, 0.0).is_ok());
}

#[test]
fn after_chains_off_the_previous_end() {
    let a = Segment::new("a", 10.0, 20.0).unwrap();
    let b = Segment::after("b", &a, 5.0, 10.0).unwrap();
    assert_eq!(b.start, 35.0);
    assert_eq!(b.end(), 45.0);
    assert_eq!(b.local(40.0), 5.0);
    assert!(b.contains(35.0));
    assert!(!b.contains(45.0));
    assert!(!b.strictly_contains(35.0));
    assert!(b.strictly_contains(35.5));
}

#[test]
fn progress_clamps_and_steps_for_zero_length() {
    let s = Segment::new("s", 10.0, 10.0).unwrap();
    assert_eq!(s.progress(0.0), 0.0);
    assert_eq!(s.progress(15.0), 0.5);
    assert_eq!(s.progress(99.0), 1.0);
    let z = Segment::new("z", 10.0, 0.0).unwrap();
    assert_eq!(z.progress(9.0), 0.0);
    assert_eq!(z.progress(10.0), 1.0);
}

#[test]
fn fade_window_envelope() {
    let s = Segment::new("w", 0.0, 60.0).unwrap();
    assert_eq!(s.fade(-1.0, 10.0, 10.0), 0.0);
    assert_eq!(s.fade(5.0, 10.0, 10.0), 0.5);
    assert_eq!(s.fade(30.0, 10.0, 10.0), 1.0);
    assert_eq!(s.fade(55.0, 10.0, 10.0), 0.5);
    assert_eq!(s.fade(61.0, 10.0, 10.0), 0.0);
    assert_eq!(s.fade(30.0, 0.0, 0.0), 1.0);
}

#[test]
fn sample_dispatches_on_motion() {
    let lin = Segment::new("l", 10.0, 20.0).unwrap();
    assert_eq!(lin.sample(clock(20)).unwrap(), 0.5);

    let spr = Segment::new("s", 10.0, 60.0)
        .unwrap()
        .with_motion(Motion::spring(SpringConfig::default()));
    assert_eq!(spr.sample(clock(5)).unwrap(), 0.0);
    assert!(spr.sample(clock(20)).unwrap() > 0.5);

    let stretched = Segment::new("s2", 0.0, 60.0).unwrap().with_motion(Motion::Spring {
        config: SpringConfig::new(200.0, 100.0),
        stretch: true,
    });
    assert!((stretched.sample(clock(60)).unwrap() - 1.0).abs() < 0.01);

    let kf = Segment::new("k", 10.0, 10.0).unwrap().with_motion(Motion::Keyframes {
        input: vec![0.0, 10.0],
        output: vec![-100.0, 0.0],
        opts: InterpolateOpts::CLAMP,
    });
    assert_eq!(kf.sample(clock(0)).unwrap(), -100.0);
    assert_eq!(kf.sample(clock(15)).unwrap(), -50.0);
    assert_eq!(kf.sample(clock(40)).unwrap(), 0.0);
}

#[test]
fn timeline_lookup_and_bounds() {
    let tl = Timeline::new()
        .with(Segment::new("a", 0.0, 30.0).unwrap())
        .unwrap()
        .with(Segment::new("b", 20.0, 40.0).unwrap())
        .unwrap();
    assert_eq!(tl.end(), 60.0);
    assert_eq!(tl.active(25.0).collect::<Vec<_>>(), vec!["a", "b"]);
    assert!(matches!(tl.get("c"), Err(GearersError::Evaluation(_))));
    assert!(tl.clone().with(Segment::new("a", 0.0, 1.0).unwrap()).is_err());
    assert_eq!(tl.sample("a", clock(15)).unwrap(), 0.5);
}

#[test]
fn motion_deserializes_with_defaults() {
    let m: Motion = serde_json::from_value(serde_json::json!({
        "type": "keyframes",
        "input": [0.0, 10.0],
        "output": [0.0, 1.0]
    }))
    .unwrap();
    assert!(matches!(m, Motion::Keyframes { opts, .. } if opts == InterpolateOpts::CLAMP));
    let s: Motion = serde_json::from_value(serde_json::json!({"type": "spring"})).unwrap();
    assert_eq!(s, Motion::spring(SpringConfig::default()));
}
