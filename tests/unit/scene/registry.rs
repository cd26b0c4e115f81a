use std::{path::PathBuf, sync::Mutex};

use super::*;
use crate::scene::tree::VisualNode;

struct Dots {
    meta: CompositionMeta,
}

impl Dots {
    fn new(id: &str, frames: u64) -> Self {
        Self {
            meta: CompositionMeta {
                id: id.to_owned(),
                duration_in_frames: frames,
                fps: Fps::new(30, 1).unwrap(),
                canvas: Canvas {
                    width: 64,
                    height: 64,
                },
            },
        }
    }
}

impl Scene for Dots {
    fn meta(&self) -> &CompositionMeta {
        &self.meta
    }

    fn render(&self, clock: FrameClock, canvas: Canvas) -> GearersResult<VisualTree> {
        Ok(VisualTree {
            composition: self.meta.id.clone(),
            frame: clock.frame,
            canvas,
            background: crate::foundation::color::Color::BLACK,
            root: VisualNode::circle("dot", clock.f(), 32.0, 2.0),
        })
    }
}

fn range(a: u64, b: u64) -> FrameRange {
    FrameRange::new(FrameIndex(a), FrameIndex(b)).unwrap()
}

#[test]
fn builtin_lists_all_compositions() {
    let reg = Registry::builtin().unwrap();
    let ids: Vec<_> = reg.list().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["alphabet", "intro", "promo", "logo"]);
    let frames: Vec<_> = reg.list().map(|m| m.duration_in_frames).collect();
    assert_eq!(frames, vec![180, 150, 450, 1]);
}

#[test]
fn render_checks_bounds_and_ids() {
    let reg = Registry::builtin().unwrap();
    assert_eq!(reg.render("alphabet", FrameIndex(179)).unwrap().frame, FrameIndex(179));
    assert!(matches!(
        reg.render("alphabet", FrameIndex(180)),
        Err(GearersError::Evaluation(_))
    ));
    assert!(matches!(
        reg.render("nope", FrameIndex(0)),
        Err(GearersError::Evaluation(_))
    ));
}

#[test]
fn register_rejects_duplicates() {
    let mut reg = Registry::new();
    reg.register(Box::new(Dots::new("dots", 4))).unwrap();
    assert!(reg.register(Box::new(Dots::new("dots", 8))).is_err());
}

#[test]
fn format_rounds_to_whole_frames() {
    let meta = Format::default().lasting(0.01).meta("x").unwrap();
    assert_eq!(meta.duration_in_frames, 1);
    assert!(Format::default().lasting(0.0).meta("x").is_err());
    let empty = Format {
        width: 0,
        ..Format::default()
    };
    assert!(empty.meta("x").is_err());
}

#[test]
fn render_range_keeps_frame_order() {
    let scene = Dots::new("dots", 16);
    let seq = render_range(&scene, range(2, 12), &RenderThreading::default()).unwrap();
    let par = render_range(
        &scene,
        range(2, 12),
        &RenderThreading {
            parallel: true,
            threads: Some(3),
        },
    )
    .unwrap();
    assert_eq!(seq.len(), 10);
    assert_eq!(seq, par);
    let frames: Vec<_> = par.iter().map(|t| t.frame.0).collect();
    assert_eq!(frames, (2..12).collect::<Vec<_>>());
}

#[test]
fn meta_range_covers_every_frame() {
    let reg = Registry::builtin().unwrap();
    let r = reg.get("promo").unwrap().meta().range();
    assert_eq!(r.start, FrameIndex(0));
    assert_eq!(r.len_frames(), 450);
    assert!(r.contains(FrameIndex(449)));
    assert!(!r.contains(FrameIndex(450)));
}

#[test]
fn render_range_with_feeds_every_frame_to_sink() {
    let scene = Dots::new("dots", 16);
    for threading in [
        RenderThreading::default(),
        RenderThreading {
            parallel: true,
            threads: Some(3),
        },
    ] {
        let seen = Mutex::new(Vec::new());
        render_range_with(&scene, scene.meta().range(), &threading, |tree| {
            seen.lock().unwrap().push(tree.frame.0);
            Ok(())
        })
        .unwrap();
        let mut seen = seen.into_inner().unwrap();
        seen.sort_unstable();
        assert_eq!(seen, (0..16).collect::<Vec<_>>());
    }
}

#[test]
fn render_range_with_stops_on_sink_error() {
    let scene = Dots::new("dots", 8);
    let res = render_range_with(&scene, range(0, 8), &RenderThreading::default(), |tree| {
        if tree.frame.0 == 3 {
            return Err(GearersError::evaluation("disk full"));
        }
        Ok(())
    });
    assert!(matches!(res, Err(GearersError::Evaluation(_))));

    let zero = RenderThreading {
        parallel: true,
        threads: Some(0),
    };
    assert!(matches!(
        render_range_with(&scene, range(0, 8), &zero, |_| Ok(())),
        Err(GearersError::Validation(_))
    ));
    assert!(matches!(
        render_range_with(&scene, range(0, 9), &RenderThreading::default(), |_| Ok(())),
        Err(GearersError::Evaluation(_))
    ));
}

#[test]
fn render_range_rejects_bad_requests() {
    let scene = Dots::new("dots", 4);
    let seq = RenderThreading::default();
    assert!(matches!(
        render_range(&scene, range(2, 2), &seq),
        Err(GearersError::Validation(_))
    ));
    assert!(matches!(
        render_range(&scene, range(0, 5), &seq),
        Err(GearersError::Evaluation(_))
    ));
    let zero = RenderThreading {
        parallel: true,
        threads: Some(0),
    };
    assert!(matches!(
        render_range(&scene, range(0, 4), &zero),
        Err(GearersError::Validation(_))
    ));
}

#[test]
fn configs_override_defaults_from_json() {
    let dir = PathBuf::from("target").join("registry_configs");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("alphabet.json"),
        r#"{"text": "xyz", "format": {"duration_secs": 3.0}}"#,
    )
    .unwrap();
    let _ = std::fs::remove_file(dir.join("intro.json"));

    let reg = Registry::with_configs(&dir).unwrap();
    assert_eq!(reg.get("alphabet").unwrap().meta().duration_in_frames, 90);
    assert_eq!(reg.get("intro").unwrap().meta().duration_in_frames, 150);

    std::fs::write(dir.join("promo.json"), "{not json").unwrap();
    assert!(matches!(
        Registry::with_configs(&dir),
        Err(GearersError::Serde(_))
    ));
    std::fs::remove_file(dir.join("promo.json")).unwrap();
}
