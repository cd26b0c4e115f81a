use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

const CONFIGS: [SpringConfig; 6] = [
    SpringConfig {
        damping: 10.0,
        stiffness: 100.0,
        mass: 1.0,
        overshoot_clamping: false,
    },
    SpringConfig {
        damping: 12.0,
        stiffness: 200.0,
        mass: 1.0,
        overshoot_clamping: false,
    },
    SpringConfig {
        damping: 20.0,
        stiffness: 100.0,
        mass: 1.0,
        overshoot_clamping: false,
    },
    SpringConfig {
        damping: 80.0,
        stiffness: 40.0,
        mass: 1.0,
        overshoot_clamping: false,
    },
    SpringConfig {
        damping: 8.0,
        stiffness: 60.0,
        mass: 2.0,
        overshoot_clamping: true,
    },
    SpringConfig {
        damping: 0.0,
        stiffness: 100.0,
        mass: 1.0,
        overshoot_clamping: false,
    },
];

#[test]
fn before_trigger_is_at_rest() {
    for config in CONFIGS {
        let opts = SpringOpts::from(config);
        assert_eq!(spring(-1.0, fps30(), &opts).unwrap(), 0.0);
        assert_eq!(spring(-0.25, fps30(), &opts).unwrap(), 0.0);
        assert_eq!(spring(0.0, fps30(), &opts).unwrap(), 0.0);
    }
}

#[test]
fn critically_and_over_damped_never_overshoot() {
    for config in [CONFIGS[2], CONFIGS[3]] {
        assert!(config.damping_ratio() >= 1.0 - 1e-12);
        let opts = SpringOpts::from(config);
        let mut prev = 0.0;
        for f in 0..600 {
            let v = spring(f as f64, fps30(), &opts).unwrap();
            assert!(v + 1e-12 >= prev, "frame {f}: {v} < {prev}");
            assert!(v <= 1.0 + 1e-9, "frame {f}: overshoot {v}");
            prev = v;
        }
        assert!((prev - 1.0).abs() < 1e-3);
    }
}

#[test]
fn under_damped_overshoots_then_settles() {
    let opts = SpringOpts::from(CONFIGS[0]);
    let peak = (0..60)
        .map(|f| spring(f as f64, fps30(), &opts).unwrap())
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
    let late = spring(300.0, fps30(), &opts).unwrap();
    assert!((late - 1.0).abs() < 1e-4);
}

#[test]
fn overshoot_clamping_caps_at_target() {
    let mut config = CONFIGS[0];
    config.overshoot_clamping = true;
    let opts = SpringOpts::from(config);
    for f in 0..120 {
        assert!(spring(f as f64, fps30(), &opts).unwrap() <= 1.0);
    }
}

#[test]
fn from_to_rescales_the_trajectory() {
    let opts = SpringOpts::from(CONFIGS[3]).between(-100.0, 0.0);
    assert_eq!(spring(-5.0, fps30(), &opts).unwrap(), -100.0);
    let late = spring(900.0, fps30(), &opts).unwrap();
    assert!(late.abs() < 0.1);
}

#[test]
fn duration_stretches_to_settle_on_time() {
    let opts = SpringOpts::from(SpringConfig::new(80.0, 40.0)).with_duration(60.0);
    let at_end = spring(60.0, fps30(), &opts).unwrap();
    assert!((at_end - 1.0).abs() < 0.006, "{at_end}");
    assert_eq!(spring(61.0, fps30(), &opts).unwrap(), 1.0);

    let mid = spring(30.0, fps30(), &opts).unwrap();
    assert!(mid > 0.0 && mid < at_end);
}

#[test]
fn delay_shifts_the_trigger() {
    let base = SpringOpts::from(CONFIGS[1]);
    let delayed = SpringOpts { delay: 10.0, ..base };
    assert_eq!(spring(9.0, fps30(), &delayed).unwrap(), 0.0);
    assert_eq!(
        spring(15.0, fps30(), &delayed).unwrap(),
        spring(5.0, fps30(), &base).unwrap()
    );
}

#[test]
fn reverse_plays_backwards() {
    let opts = SpringOpts {
        reverse: true,
        ..SpringOpts::from(SpringConfig::new(20.0, 100.0)).with_duration(30.0)
    };
    let forward = SpringOpts {
        reverse: false,
        ..opts
    };
    assert_eq!(
        spring(0.0, fps30(), &opts).unwrap(),
        spring(30.0, fps30(), &forward).unwrap()
    );
    assert_eq!(spring(30.0, fps30(), &opts).unwrap(), 0.0);
}

#[test]
fn measure_spring_rejects_undamped_and_bad_threshold() {
    assert!(measure_spring(fps30(), &CONFIGS[5], DEFAULT_REST_THRESHOLD).is_err());
    assert!(measure_spring(fps30(), &CONFIGS[0], 0.0).is_err());
    let n = measure_spring(fps30(), &CONFIGS[0], DEFAULT_REST_THRESHOLD).unwrap();
    assert!(n > 0 && n < 120, "{n}");
}

#[test]
fn invalid_config_is_animation_error() {
    let bad = SpringOpts::from(SpringConfig::new(10.0, 0.0));
    assert!(matches!(
        spring(1.0, fps30(), &bad).unwrap_err(),
        GearersError::Animation(_)
    ));
}

#[test]
fn config_deserializes_partially() {
    let c: SpringConfig = serde_json::from_str(r#"{"damping": 15}"#).unwrap();
    assert_eq!(c, SpringConfig::with_damping(15.0));
}
