use super::*;

#[test]
fn halves_share_seam_teeth() {
    let upper: Vec<f64> = LogoSpec::tooth_angles(Half::Upper).collect();
    let lower: Vec<f64> = LogoSpec::tooth_angles(Half::Lower).collect();
    assert_eq!(upper.first().copied(), Some(160.0));
    assert_eq!(upper.last().copied(), Some(340.0));
    assert_eq!(lower.first().copied(), Some(0.0));
    assert_eq!(lower.last().copied(), Some(200.0));
    assert_eq!(upper.len() + lower.len(), 21);
}

#[test]
fn arcs_pass_through_top_and_bottom() {
    let up = half_arc(100.0, Half::Upper).bounding_box();
    assert!((up.y0 + 100.0).abs() < 0.5);
    assert!(up.y1.abs() < 1e-6);
    let down = half_arc(100.0, Half::Lower).bounding_box();
    assert!((down.y1 - 100.0).abs() < 0.5);
    assert!(down.y0.abs() < 1e-6);
}

#[test]
fn wordmark_is_optional() {
    let with = LogoSpec::new(300.0).to_node("logo", Point::ZERO).unwrap();
    assert_eq!(with.find("logo-wordmark").unwrap().text_content(), "GEARERS");
    let without = LogoSpec::new(300.0)
        .without_text()
        .to_node("logo", Point::ZERO)
        .unwrap();
    assert!(without.find("logo-wordmark").is_none());
    assert!(without.find("logo-swoosh-top").is_some());
}

#[test]
fn rejects_bad_size() {
    assert!(LogoSpec::new(0.0).to_node("logo", Point::ZERO).is_err());
}
