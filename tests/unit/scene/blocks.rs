use super::*;
use crate::scene::tree::NodeKind;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn sparks() -> ParticleBurst {
    ParticleBurst {
        count: 12,
        origin: Point::new(960.0, 540.0),
        trigger: 50.0,
        delay_per_particle: 2.0,
        motion: BurstMotion::Linear { life: 20.0 },
        angle: AngleMode::Random,
        distance: 50.0,
        distance_jitter: 100.0,
        opacity: OpacityCurve::FadeOut,
        size_min: 4.0,
        size_max: 4.0,
        palette: vec![Color::WHITE],
        glow: vec![],
        glow_scale: 1.0,
        shape: ParticleShape::Streak {
            width: 4.0,
            height: 12.0,
        },
        after: 50.0,
        until: Some(90.0),
        seeds: BurstSeeds {
            angle: "spark-angle".to_owned(),
            distance: "spark-dist".to_owned(),
            size: "spark-size".to_owned(),
        },
    }
}

#[test]
fn glyph_row_is_centered_and_staggered() {
    let row = GlyphRow::new("abc", Font::new("Arial", 100.0), Point::new(500.0, 300.0))
        .with_gap(20.0)
        .staggered(10.0, 5.0);
    let glyphs = row.glyphs();
    assert_eq!(glyphs.len(), 3);
    assert_eq!(glyphs[2].start, 20.0);
    let left = glyphs[0].at.x - glyphs[0].advance / 2.0;
    let right = glyphs[2].at.x + glyphs[2].advance / 2.0;
    assert!((left + right - 1000.0).abs() < 1e-9);
    assert!((right - left - row.width()).abs() < 1e-9);
    assert!(glyphs.iter().all(|g| g.at.y == 300.0));
}

#[test]
fn wide_characters_advance_a_full_em() {
    let font = Font::new("Arial", 40.0);
    assert_eq!(estimate_advance('人', &font), 40.0);
    assert!(estimate_advance('a', &font) < 40.0);
    assert_eq!(estimate_width("", &font), 0.0);
    assert_eq!(GlyphRow::new("", font, Point::ZERO).width(), 0.0);
}

#[test]
fn burst_is_deterministic_and_windowed() {
    let burst = sparks();
    let a = burst.particles(60.0, fps30()).unwrap();
    let b = burst.particles(60.0, fps30()).unwrap();
    assert_eq!(a, b);
    assert!(!a.is_empty());
    // Particle 0 is 10 frames into a 20-frame life; particle 5 has not launched yet.
    assert_eq!(a[0].index, 0);
    assert!((a[0].opacity - 0.5).abs() < 1e-12);
    assert!(a.iter().all(|p| p.index < 5));
    assert!(burst.particles(50.0, fps30()).unwrap().is_empty());
    assert!(burst.particles(90.0, fps30()).unwrap().is_empty());
}

#[test]
fn spread_angles_follow_index() {
    let burst = ParticleBurst {
        count: 24,
        motion: BurstMotion::Spring {
            config: SpringConfig::new(8.0, 60.0),
        },
        angle: AngleMode::Spread { jitter_deg: 0.0 },
        after: f64::NEG_INFINITY,
        until: None,
        delay_per_particle: 0.0,
        ..sparks()
    };
    let ps = burst.particles(70.0, fps30()).unwrap();
    assert_eq!(ps.len(), 24);
    for p in &ps {
        assert!((p.angle_deg - 15.0 * f64::from(p.index)).abs() < 1e-9);
    }
}

#[test]
fn burst_rejects_empty_palette() {
    let burst = ParticleBurst {
        palette: vec![],
        ..sparks()
    };
    assert!(burst.particles(60.0, fps30()).is_err());
}

#[test]
fn burst_node_skips_invisible_particles() {
    let node = sparks().node("spark", 60.0, fps30()).unwrap();
    assert!(node.find("spark-0").is_some());
    assert!(node.find("spark-11").is_none());
}

#[test]
fn grid_lines_cover_area() {
    let g = grid("grid", (0.0, 0.0, 100.0, 100.0), 50.0, 10.0, Color::WHITE).unwrap();
    let NodeKind::Path { d } = &g.kind else {
        panic!("grid should be a path");
    };
    assert_eq!(d.matches('V').count(), 3);
    assert_eq!(d.matches('H').count(), 2);
    assert!(d.contains("M0 10H100"));
    assert!(grid("grid", (0.0, 0.0, 1.0, 1.0), 0.0, 0.0, Color::WHITE).is_err());
}

#[test]
fn light_rays_emit_one_wedge_per_ray() {
    let rays = light_rays("rays", Point::ZERO, 10.0, 0.0, 4, 20.0, Color::WHITE);
    assert_eq!(rays.children.len(), 4);
    let NodeKind::Path { d } = &rays.children[0].kind else {
        panic!("ray should be a path");
    };
    assert!(d.starts_with("M0 0L0 -10"));
}
