use serde::{Deserialize, Serialize};

use crate::{
    animation::{
        interpolate::{InterpolateOpts, interpolate},
        spring::{SpringConfig, SpringOpts, spring},
    },
    foundation::{
        color::Color,
        core::{Canvas, FrameClock, Transform2D},
        error::{GearersError, GearersResult},
    },
    scene::{
        blocks::GlyphRow,
        registry::{CompositionMeta, Format, Scene},
        tree::{Filter, Font, VisualNode, VisualTree},
    },
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Letters dropping in one after another, cycling through hues.
pub struct AlphabetConfig {
    /// Rate, size and length.
    pub format: Format,
    /// Letters to animate.
    pub text: String,
    /// The letter entrances are spread evenly over this many seconds.
    pub window_secs: f64,
    /// Glyph font.
    pub font: Font,
    /// Space between glyph boxes.
    pub gap: f64,
    /// Frame background.
    pub background: Color,
    /// Scale-in spring.
    pub scale_spring: SpringConfig,
    /// Drop-in spring.
    pub drop_spring: SpringConfig,
    /// Frames for the opacity ramp.
    pub fade_frames: f64,
    /// Starting height above the rest position.
    pub drop_px: f64,
    /// Hue offset between neighbouring letters, degrees.
    pub hue_step: f64,
    /// Hue drift per frame, degrees.
    pub hue_per_frame: f64,
    /// Glyph saturation.
    pub saturation: f64,
    /// Glyph lightness.
    pub lightness: f64,
    /// Glow lightness.
    pub glow_lightness: f64,
    /// Glow radius in pixels.
    pub glow_radius: f64,
}

impl Default for AlphabetConfig {
    fn default() -> Self {
        Self {
            format: Format::default().lasting(6.0),
            text: "abcdefg".to_owned(),
            window_secs: 6.0,
            font: Font::new("Arial, sans-serif", 120.0).weight(700),
            gap: 20.0,
            background: Color::rgba8(0x1a, 0x1a, 0x2e, 1.0),
            scale_spring: SpringConfig::new(12.0, 200.0),
            drop_spring: SpringConfig::with_damping(15.0),
            fade_frames: 10.0,
            drop_px: 100.0,
            hue_step: 50.0,
            hue_per_frame: 2.0,
            saturation: 0.8,
            lightness: 0.6,
            glow_lightness: 0.5,
            glow_radius: 20.0,
        }
    }
}

/// Composition `alphabet`.
pub struct AlphabetScene {
    meta: CompositionMeta,
    config: AlphabetConfig,
}

impl AlphabetScene {
    /// Registry id.
    pub const ID: &'static str = "alphabet";

    /// Validate `config` and build the scene.
    pub fn new(config: AlphabetConfig) -> GearersResult<Self> {
        if config.text.is_empty() {
            return Err(GearersError::validation("alphabet text must not be empty"));
        }
        if !(config.window_secs.is_finite() && config.window_secs >= 0.0) {
            return Err(GearersError::validation("alphabet window must be >= 0"));
        }
        if !(config.fade_frames.is_finite() && config.fade_frames > 0.0) {
            return Err(GearersError::validation("alphabet fade must be > 0 frames"));
        }
        config.scale_spring.validate()?;
        config.drop_spring.validate()?;
        Ok(Self {
            meta: config.format.meta(Self::ID)?,
            config,
        })
    }

    /// Whole frames between two letter entrances.
    pub fn frames_per_letter(&self, clock: FrameClock) -> f64 {
        let letters = self.config.text.chars().count() as f64;
        (clock.secs(self.config.window_secs) / letters).floor()
    }

    fn glyph_row(&self, clock: FrameClock, canvas: Canvas) -> GlyphRow {
        GlyphRow::new(&*self.config.text, self.config.font.clone(), canvas.center())
            .with_gap(self.config.gap)
            .staggered(0.0, self.frames_per_letter(clock))
    }
}

impl Scene for AlphabetScene {
    fn meta(&self) -> &CompositionMeta {
        &self.meta
    }

    #[tracing::instrument(name = "alphabet", skip(self))]
    fn render(&self, clock: FrameClock, canvas: Canvas) -> GearersResult<VisualTree> {
        let cfg = &self.config;
        let frame = clock.f();
        let row = self.glyph_row(clock, canvas);
        let scale_opts = SpringOpts::from(cfg.scale_spring);
        let drop_opts = SpringOpts::from(cfg.drop_spring);

        let mut glyphs = Vec::new();
        for g in row.glyphs() {
            let local = frame - g.start;
            let scale = spring(local, clock.fps, &scale_opts)?;
            let opacity = interpolate(
                frame,
                &[g.start, g.start + cfg.fade_frames],
                &[0.0, 1.0],
                InterpolateOpts::CLAMP,
            )?;
            let drop = interpolate(
                spring(local, clock.fps, &drop_opts)?,
                &[0.0, 1.0],
                &[-cfg.drop_px, 0.0],
                InterpolateOpts::EXTEND,
            )?;
            let hue = (g.index as f64 * cfg.hue_step + frame * cfg.hue_per_frame).rem_euclid(360.0);
            let fill = Color::hsl(hue, cfg.saturation, cfg.lightness);
            let glow = Color::hsl(hue, cfg.saturation, cfg.glow_lightness);

            // The drop is applied inside the scale, so it shrinks with the glyph.
            glyphs.push(
                row.glyph_node(format!("glyph-{}", g.index), &g, fill)
                    .filter(Filter::glow(cfg.glow_radius / 2.0, glow))
                    .transform(Transform2D::translate(g.at.x, g.at.y + scale * drop).scaled(scale))
                    .opacity(opacity),
            );
        }

        Ok(VisualTree {
            composition: Self::ID.to_owned(),
            frame: clock.frame,
            canvas,
            background: cfg.background,
            root: VisualNode::group("alphabet").children(glyphs),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/alphabet.rs"]
mod tests;
