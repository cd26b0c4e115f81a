use super::*;

#[test]
fn teeth_are_evenly_spaced() {
    for n in [1u32, 7, 12, 30] {
        let layout = GearSpec::new(100.0, Color::WHITE)
            .with_teeth(n)
            .layout()
            .unwrap();
        assert_eq!(layout.teeth.len(), n as usize);
        for (i, t) in layout.teeth.iter().enumerate() {
            let expected = 360.0 / f64::from(n) * i as f64;
            assert!((t.angle_deg - expected).abs() < 1e-12);
        }
    }
}

#[test]
fn proportions_follow_size() {
    let l = GearSpec::new(200.0, Color::WHITE).layout().unwrap();
    assert_eq!(l.teeth.len(), 12);
    assert!((l.body_radius - 70.0).abs() < 1e-9);
    assert!((l.bore_radius - 70.0).abs() < 1e-9);
    assert!((l.bore_border - 10.0).abs() < 1e-9);
    assert!((l.axle_radius - 15.0).abs() < 1e-9);
    assert!((l.tooth_width - 24.0).abs() < 1e-9);
    assert!((l.tooth_height - 30.0).abs() < 1e-9);
}

#[test]
fn invalid_specs_are_rejected() {
    for size in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let err = GearSpec::new(size, Color::WHITE).layout().unwrap_err();
        assert!(matches!(err, GearersError::Validation(_)));
    }
    let err = GearSpec::new(10.0, Color::WHITE)
        .with_teeth(0)
        .layout()
        .unwrap_err();
    assert!(matches!(err, GearersError::Validation(_)));
}

#[test]
fn node_is_deterministic_and_rotated() {
    let spec = GearSpec::new(120.0, Color::hex("#3b82f6").unwrap()).rotated(33.0);
    let a = gear_node("g", &spec, Point::new(10.0, 20.0)).unwrap();
    let b = gear_node("g", &spec, Point::new(10.0, 20.0)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.style.transform.rotation_deg, 33.0);
    assert_eq!(a.style.transform.translate.x, 10.0);
    assert!(a.find("g-tooth-11").is_some());
    assert!(a.find("g-tooth-12").is_none());
    assert!(a.find("g-axle").is_some());
    assert_eq!(a.count(), 1 + 12 + 3);
}
