use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.frames().count(), 3);
    assert_eq!(r.len_frames(), 3);
    assert_eq!(FrameRange::new(FrameIndex(4), FrameIndex(4)).unwrap().len_frames(), 0);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn fps_frames_secs_roundtrip_floor() {
    let fps = Fps::new(30000, 1001).unwrap();
    let secs = fps.frames_to_secs(123.0);
    assert_eq!(fps.secs_to_frames_floor(secs), 123);
}

#[test]
fn clock_derives_time_from_rate() {
    let clock = FrameClock::new(FrameIndex(45), Fps::new(30, 1).unwrap());
    assert!((clock.time_secs() - 1.5).abs() < 1e-12);
    assert_eq!(clock.secs(2.2).round(), 66.0);
}

#[test]
fn transform_to_affine_identity_and_translation() {
    let t = Transform2D::default();
    assert!(t.is_identity());
    assert_eq!(t.to_affine(), Affine::IDENTITY);

    let t = Transform2D::translate(10.0, -2.5);
    assert_eq!(t.to_affine(), Affine::translate(Vec2::new(10.0, -2.5)));
}

#[test]
fn transform_rotation_is_in_degrees() {
    let t = Transform2D::default().rotated(90.0);
    let p = t.to_affine() * Point::new(1.0, 0.0);
    assert!(p.x.abs() < 1e-9);
    assert!((p.y - 1.0).abs() < 1e-9);
}
