//! Gearers motion is a frame-indexed motion graphics engine for the Gearers brand animations.
//!
//! Every composition is a pure function of the frame index:
//!
//! - Easing primitives: [`interpolate`], [`spring`] and [`pseudo_random`]
//! - Procedural shapes: the toothed [`GearSpec`] and the split-gear [`LogoSpec`]
//! - Scenes built from [`Timeline`] segments and reusable blocks, producing a [`VisualTree`]
//! - A [`Registry`] of the built-in compositions (`alphabet`, `intro`, `promo`, `logo`)
//! - Exporters: [`to_svg`] for vector output and [`rasterize`]/[`write_png`] for pixels
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod export;
pub(crate) mod scene;
pub(crate) mod scenes;
pub(crate) mod shapes;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameClock, FrameIndex, FrameRange, Point, Transform2D, Vec2,
};
pub use crate::foundation::error::{GearersError, GearersResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::interpolate::{
    Extrapolate, InterpolateOpts, interpolate, interpolate_color,
};
pub use crate::animation::random::{Seed, pseudo_random};
pub use crate::animation::spring::{
    DEFAULT_REST_THRESHOLD, SpringConfig, SpringOpts, measure_spring, spring,
};

pub use crate::shapes::gear::{BORE_FILL, GearLayout, GearSpec, Tooth, gear_node};
pub use crate::shapes::logo::{GEAR_BLUE, LogoSpec, SWOOSH_GRAY, WORDMARK_INK};

pub use crate::scene::blocks::{
    AngleMode, BurstMotion, BurstSeeds, Glyph, GlyphRow, OpacityCurve, Particle, ParticleBurst,
    ParticleShape, accent_rule, estimate_advance, estimate_width, grid, light_rays, radial_glow,
    scanline, vignette,
};
pub use crate::scene::registry::{
    CompositionMeta, Format, Registry, RenderThreading, Scene, load_config, render_frame,
    render_range, render_range_with,
};
pub use crate::scene::timeline::{Motion, Segment, Timeline};
pub use crate::scene::tree::{
    BlendMode, Filter, Font, GradientStop, LineCap, NodeKind, Paint, Stroke, Style, TextAnchor,
    TextSpan, VisualNode, VisualTree, full_frame,
};

pub use crate::scenes::alphabet::{AlphabetConfig, AlphabetScene};
pub use crate::scenes::intro::{IntroConfig, IntroScene};
pub use crate::scenes::logo::{LogoConfig, LogoScene};
pub use crate::scenes::promo::{FeatureCard, PhraseRun, PromoConfig, PromoScene};

pub use crate::export::raster::{FrameRGBA, rasterize, rasterize_svg, write_png};
pub use crate::export::svg::to_svg;
