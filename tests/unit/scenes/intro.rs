use super::*;
use crate::foundation::core::{FrameIndex, Fps};

fn scene() -> IntroScene {
    IntroScene::new(IntroConfig::default()).unwrap()
}

fn at(frame: u64) -> VisualTree {
    let s = scene();
    let clock = FrameClock::new(FrameIndex(frame), Fps::new(30, 1).unwrap());
    s.render(clock, s.meta().canvas).unwrap()
}

#[test]
fn registered_length() {
    assert_eq!(scene().meta().duration_in_frames, 150);
}

#[test]
fn opening_frame_has_small_gears_and_hidden_title() {
    let t = at(0);
    let left = t.find("gear-left").unwrap();
    assert!((left.style.transform.scale.x - 0.2).abs() < 1e-12);
    assert!(left.style.transform.translate.x < 0.0);
    assert!(t.find("lightning").is_none());
    assert!(t.find("chroma-red").is_none());
    assert!(t.find("rule-top").is_none());
    assert_eq!(t.find("title-0").unwrap().style.opacity, 0.0);
    assert_eq!(t.find("subtitle").unwrap().style.opacity, 0.0);
    assert_eq!(t.find("bg-gears").unwrap().children.len(), 8);
}

#[test]
fn flash_peaks_three_frames_after_trigger() {
    assert_eq!(at(60).find("flash").unwrap().style.opacity, 0.0);
    assert_eq!(at(63).find("flash").unwrap().style.opacity, 1.0);
    assert_eq!(at(80).find("flash").unwrap().style.opacity, 0.0);
    let lightning = at(60);
    assert_eq!(lightning.find("lightning").unwrap().style.opacity, 1.0);
    assert_eq!(lightning.find("lightning").unwrap().children.len(), 6);
}

#[test]
fn glitch_window_adds_chromatic_copies() {
    let t = at(70);
    assert!(t.find("chroma-red").is_some());
    assert!(t.find("chroma-cyan").is_some());
    assert!(t.find("rule-top").is_some());
    assert!(at(66).find("chroma-red").is_none());
    assert!(at(90).find("chroma-red").is_none());
}

#[test]
fn subtitle_and_particles_arrive_later() {
    assert!(at(100).find("subtitle").unwrap().style.opacity > 0.0);
    assert!(at(63).find("particle-0").is_some());
    assert!(at(40).find("particle-0").is_none());
    assert_eq!(
        at(149).find("title-6").unwrap().text_content(),
        "S".to_owned()
    );
}

#[test]
fn frames_are_independent() {
    let s = scene();
    let fps = Fps::new(30, 1).unwrap();
    let a = s.render(FrameClock::new(FrameIndex(72), fps), s.meta().canvas).unwrap();
    let _ = s.render(FrameClock::new(FrameIndex(10), fps), s.meta().canvas).unwrap();
    let b = s.render(FrameClock::new(FrameIndex(72), fps), s.meta().canvas).unwrap();
    assert_eq!(a, b);
}
