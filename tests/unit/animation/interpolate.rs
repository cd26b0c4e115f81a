use super::*;

const INPUTS: &[&[f64]] = &[
    &[0.0, 1.0],
    &[60.0, 70.0],
    &[-5.0, 0.0, 5.0, 15.0],
    &[0.1, 0.2, 0.7],
];

fn outputs_for(input: &[f64]) -> Vec<f64> {
    input
        .iter()
        .enumerate()
        .map(|(i, x)| 0.1 * (i as f64 + 1.0) + x * 0.3)
        .collect()
}

#[test]
fn exact_breakpoints_return_exact_outputs() {
    for input in INPUTS {
        let output = outputs_for(input);
        for opts in [InterpolateOpts::EXTEND, InterpolateOpts::CLAMP] {
            for (x, y) in input.iter().zip(&output) {
                assert_eq!(interpolate(*x, input, &output, opts).unwrap(), *y);
            }
        }
    }
}

#[test]
fn clamp_holds_edge_outputs() {
    for input in INPUTS {
        let output = outputs_for(input);
        let first = input[0];
        let last = input[input.len() - 1];
        for dx in [1e-6, 0.5, 3.0, 1e6] {
            let below = interpolate(first - dx, input, &output, InterpolateOpts::CLAMP).unwrap();
            let above = interpolate(last + dx, input, &output, InterpolateOpts::CLAMP).unwrap();
            assert_eq!(below, output[0]);
            assert_eq!(above, output[output.len() - 1]);
        }
    }
}

#[test]
fn midpoint_is_linear() {
    let v = interpolate(65.0, &[60.0, 70.0], &[0.0, 1.0], InterpolateOpts::CLAMP).unwrap();
    assert!((v - 0.5).abs() < 1e-12);
}

#[test]
fn extend_continues_edge_slope() {
    let input = [0.0, 10.0, 20.0];
    let output = [0.0, 100.0, 0.0];
    let left = interpolate(-5.0, &input, &output, InterpolateOpts::EXTEND).unwrap();
    let right = interpolate(25.0, &input, &output, InterpolateOpts::EXTEND).unwrap();
    assert!((left + 50.0).abs() < 1e-9);
    assert!((right + 50.0).abs() < 1e-9);
}

#[test]
fn sides_are_independent() {
    let input = [0.0, 1.0];
    let output = [-100.0, 0.0];
    let below = interpolate(-1.0, &input, &output, InterpolateOpts::CLAMP_RIGHT).unwrap();
    let above = interpolate(2.0, &input, &output, InterpolateOpts::CLAMP_RIGHT).unwrap();
    assert!((below + 200.0).abs() < 1e-9);
    assert_eq!(above, 0.0);
}

#[test]
fn identity_passes_value_through() {
    let opts = InterpolateOpts {
        left: Extrapolate::Identity,
        right: Extrapolate::Identity,
        ease: Ease::Linear,
    };
    assert_eq!(interpolate(-3.0, &[0.0, 1.0], &[5.0, 6.0], opts).unwrap(), -3.0);
    assert_eq!(interpolate(42.0, &[0.0, 1.0], &[5.0, 6.0], opts).unwrap(), 42.0);
}

#[test]
fn ease_shapes_the_segment_only() {
    let opts = InterpolateOpts::CLAMP.with_ease(Ease::InQuad);
    let v = interpolate(0.5, &[0.0, 1.0], &[0.0, 10.0], opts).unwrap();
    assert!((v - 2.5).abs() < 1e-12);
    assert_eq!(interpolate(1.0, &[0.0, 1.0], &[0.0, 10.0], opts).unwrap(), 10.0);
}

#[test]
fn malformed_ranges_are_invalid_range_errors() {
    let cases: [(&[f64], &[f64]); 5] = [
        (&[0.0, 0.0], &[0.0, 1.0]),
        (&[1.0, 0.0], &[0.0, 1.0]),
        (&[0.0, 1.0, 2.0], &[0.0, 1.0]),
        (&[0.0], &[0.0]),
        (&[0.0, f64::INFINITY], &[0.0, 1.0]),
    ];
    for (input, output) in cases {
        let err = interpolate(0.5, input, output, InterpolateOpts::CLAMP).unwrap_err();
        assert!(matches!(err, GearersError::InvalidRange(_)), "{err}");
    }
    let err = interpolate(f64::NAN, &[0.0, 1.0], &[0.0, 1.0], InterpolateOpts::CLAMP).unwrap_err();
    assert!(matches!(err, GearersError::InvalidRange(_)));
}

#[test]
fn color_blends_between_stops() {
    let colors = [Color::BLACK, Color::WHITE];
    let mid = interpolate_color(5.0, &[0.0, 10.0], &colors, InterpolateOpts::CLAMP).unwrap();
    assert!((mid.r - 0.5).abs() < 1e-12);
    assert_eq!(mid.a, 1.0);

    let past = interpolate_color(50.0, &[0.0, 10.0], &colors, InterpolateOpts::CLAMP).unwrap();
    assert_eq!(past, Color::WHITE);
}

#[test]
fn color_rejects_identity() {
    let opts = InterpolateOpts {
        left: Extrapolate::Identity,
        ..InterpolateOpts::CLAMP
    };
    assert!(interpolate_color(0.0, &[0.0, 1.0], &[Color::BLACK, Color::WHITE], opts).is_err());
}
