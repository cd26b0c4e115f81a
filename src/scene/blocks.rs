//! Reusable scene building blocks: staggered glyph rows, particle bursts and backdrops.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::{
    animation::{
        interpolate::{InterpolateOpts, interpolate},
        random::pseudo_random,
        spring::{SpringConfig, SpringOpts, spring},
    },
    foundation::{
        color::Color,
        core::{Canvas, Fps, Point, Transform2D},
        error::{GearersError, GearersResult},
    },
    scene::tree::{Filter, Font, GradientStop, LineCap, Paint, TextSpan, VisualNode, full_frame},
};

/// Estimated horizontal advance of `ch` in `font`, letter spacing included.
///
/// Proportions approximate Arial; wide scripts advance a full em.
pub fn estimate_advance(ch: char, font: &Font) -> f64 {
    let ratio = match ch {
        ' ' => 0.28,
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '!' | '\'' | '|' => 0.28,
        'f' | 't' | 'r' | 'I' => 0.36,
        'm' | 'w' => 0.84,
        'M' | 'W' => 0.9,
        c if c.is_ascii_lowercase() => 0.56,
        c if c.is_ascii_uppercase() => 0.7,
        c if c.is_ascii_digit() => 0.56,
        c if c.is_ascii() => 0.6,
        _ => 1.0,
    };
    let heavy = if font.weight >= 800 { 1.15 } else { 1.0 };
    font.size * ratio * heavy + font.letter_spacing
}

/// Estimated width of a single line of `text`.
pub fn estimate_width(text: &str, font: &Font) -> f64 {
    text.chars().map(|c| estimate_advance(c, font)).sum()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Characters of a string laid out in a centered row, each with its own start frame.
pub struct GlyphRow {
    /// Characters to lay out.
    pub text: String,
    /// Shared font.
    pub font: Font,
    /// Extra space between glyph boxes, pixels.
    pub gap: f64,
    /// Row center.
    pub center: Point,
    /// Start frame of the first glyph.
    pub start: f64,
    /// Frames between consecutive glyph starts.
    pub stagger: f64,
}

impl Default for GlyphRow {
    fn default() -> Self {
        Self {
            text: String::new(),
            font: Font::default(),
            gap: 0.0,
            center: Point::ZERO,
            start: 0.0,
            stagger: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// One laid-out character.
pub struct Glyph {
    /// Position in the row.
    pub index: usize,
    /// Character.
    pub ch: char,
    /// Center of the glyph box.
    pub at: Point,
    /// Box width.
    pub advance: f64,
    /// `start + index * stagger`.
    pub start: f64,
}

impl GlyphRow {
    /// Row of `text` centered on `center`, all glyphs starting at frame 0.
    pub fn new(text: impl Into<String>, font: Font, center: Point) -> Self {
        Self {
            text: text.into(),
            font,
            center,
            ..Self::default()
        }
    }

    /// Same row with glyph `i` starting at `start + i * stagger`.
    pub fn staggered(mut self, start: f64, stagger: f64) -> Self {
        self.start = start;
        self.stagger = stagger;
        self
    }

    /// Same row with spacing between glyph boxes.
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Total row width.
    pub fn width(&self) -> f64 {
        let n = self.text.chars().count();
        if n == 0 {
            return 0.0;
        }
        estimate_width(&self.text, &self.font) + self.gap * (n - 1) as f64
    }

    /// Laid-out glyphs in reading order.
    pub fn glyphs(&self) -> Vec<Glyph> {
        let mut x = self.center.x - self.width() / 2.0;
        self.text
            .chars()
            .enumerate()
            .map(|(index, ch)| {
                let advance = estimate_advance(ch, &self.font);
                let g = Glyph {
                    index,
                    ch,
                    at: Point::new(x + advance / 2.0, self.center.y),
                    advance,
                    start: self.start + index as f64 * self.stagger,
                };
                x += advance + self.gap;
                g
            })
            .collect()
    }

    /// Text node for one glyph at its resting position. Callers layer motion on top.
    pub fn glyph_node(&self, id: impl Into<String>, glyph: &Glyph, fill: Color) -> VisualNode {
        VisualNode::text(
            id,
            0.0,
            0.0,
            vec![TextSpan::plain(glyph.ch.to_string())],
            self.font.clone(),
        )
        .fill_color(fill)
        .transform(Transform2D::translate(glyph.at.x, glyph.at.y))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Progress curve of each particle.
pub enum BurstMotion {
    /// Spring from 0 toward 1; may overshoot.
    Spring {
        /// Physics.
        config: SpringConfig,
    },
    /// Linear 0 to 1 over `life` frames; the particle is hidden at both ends.
    Linear {
        /// Lifetime in frames.
        life: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Emission direction of each particle.
pub enum AngleMode {
    /// `360 / count * i` plus up to `jitter_deg` of random offset.
    Spread {
        /// Maximum random offset in degrees.
        jitter_deg: f64,
    },
    /// Uniformly random direction.
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Opacity as a function of particle progress.
pub enum OpacityCurve {
    /// 0 to 1 by `peak`, then back to 0 at progress 1.
    PeakThenFade {
        /// Progress of full opacity.
        peak: f64,
    },
    /// `1 - progress`.
    FadeOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Particle geometry, drawn pointing away from the origin.
pub enum ParticleShape {
    /// Circle whose diameter is the particle size.
    Dot,
    /// Rounded bar of fixed size.
    Streak {
        /// Bar width.
        width: f64,
        /// Bar length.
        height: f64,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Seed prefixes; particle `i` draws from `"{prefix}-{i}"`.
pub struct BurstSeeds {
    /// Angle jitter seed prefix.
    pub angle: String,
    /// Distance jitter seed prefix.
    pub distance: String,
    /// Size seed prefix.
    pub size: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Radial burst of particles emitted from one point.
pub struct ParticleBurst {
    /// Number of particles.
    pub count: u32,
    /// Emission point.
    pub origin: Point,
    /// Frame the first particle launches.
    pub trigger: f64,
    /// Extra delay per particle index, frames.
    pub delay_per_particle: f64,
    /// Progress curve.
    pub motion: BurstMotion,
    /// Direction rule.
    pub angle: AngleMode,
    /// Distance at progress 1.
    pub distance: f64,
    /// Random extra distance at progress 1.
    pub distance_jitter: f64,
    /// Opacity rule.
    pub opacity: OpacityCurve,
    /// Smallest particle size.
    pub size_min: f64,
    /// Largest particle size.
    pub size_max: f64,
    /// Colors cycled by index.
    pub palette: Vec<Color>,
    /// Glow colors cycled by index.
    pub glow: Vec<Color>,
    /// Glow radius as a multiple of particle size.
    pub glow_scale: f64,
    /// Geometry.
    pub shape: ParticleShape,
    /// Visible only for frames strictly inside `(after, until)`.
    pub after: f64,
    /// Exclusive upper bound of the visible window.
    pub until: Option<f64>,
    /// Random key prefixes.
    pub seeds: BurstSeeds,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// Resolved state of one particle at one frame.
pub struct Particle {
    /// Index in the burst.
    pub index: u32,
    /// Direction, degrees clockwise from straight up.
    pub angle_deg: f64,
    /// Distance from the origin.
    pub distance: f64,
    /// Size used by [`ParticleShape::Dot`].
    pub size: f64,
    /// Opacity, may fall outside `[0, 1]` before clamping.
    pub opacity: f64,
    /// Fill.
    pub color: Color,
    /// Glow tint.
    pub glow: Color,
}

impl ParticleBurst {
    fn validate(&self) -> GearersResult<()> {
        if self.palette.is_empty() {
            return Err(GearersError::validation("particle palette must not be empty"));
        }
        if let BurstMotion::Linear { life } = self.motion
            && !(life.is_finite() && life > 0.0)
        {
            return Err(GearersError::validation("particle life must be > 0"));
        }
        Ok(())
    }

    fn progress(&self, local: f64, fps: Fps) -> GearersResult<Option<f64>> {
        match &self.motion {
            BurstMotion::Spring { config } => {
                Ok(Some(spring(local, fps, &SpringOpts::from(*config))?))
            }
            BurstMotion::Linear { life } => {
                let p = (local / life).clamp(0.0, 1.0);
                Ok((p > 0.0 && p < 1.0).then_some(p))
            }
        }
    }

    /// Particles visible at `frame`, in index order.
    pub fn particles(&self, frame: f64, fps: Fps) -> GearersResult<Vec<Particle>> {
        self.validate()?;
        let visible = frame > self.after && self.until.is_none_or(|u| frame < u);
        if !visible {
            return Ok(Vec::new());
        }

        let mut out = Vec::with_capacity(self.count as usize);
        for i in 0..self.count {
            let local = frame - self.trigger - f64::from(i) * self.delay_per_particle;
            let Some(p) = self.progress(local, fps)? else {
                continue;
            };

            let angle_deg = match self.angle {
                AngleMode::Spread { jitter_deg } => {
                    360.0 / f64::from(self.count) * f64::from(i)
                        + pseudo_random(format!("{}-{i}", self.seeds.angle).as_str()) * jitter_deg
                }
                AngleMode::Random => {
                    pseudo_random(format!("{}-{i}", self.seeds.angle).as_str()) * 360.0
                }
            };
            let reach = self.distance
                + pseudo_random(format!("{}-{i}", self.seeds.distance).as_str())
                    * self.distance_jitter;
            let opacity = match self.opacity {
                OpacityCurve::PeakThenFade { peak } => interpolate(
                    p,
                    &[0.0, peak, 1.0],
                    &[0.0, 1.0, 0.0],
                    InterpolateOpts::EXTEND,
                )?,
                OpacityCurve::FadeOut => 1.0 - p,
            };
            let size = self.size_min
                + pseudo_random(format!("{}-{i}", self.seeds.size).as_str())
                    * (self.size_max - self.size_min);
            let idx = i as usize;
            out.push(Particle {
                index: i,
                angle_deg,
                distance: p * reach,
                size,
                opacity,
                color: self.palette[idx % self.palette.len()],
                glow: self
                    .glow
                    .get(idx % self.glow.len().max(1))
                    .copied()
                    .unwrap_or(self.palette[idx % self.palette.len()]),
            });
        }
        Ok(out)
    }

    /// Group of particle nodes at `frame`; ids are `{id}-{index}`.
    pub fn node(&self, id: &str, frame: f64, fps: Fps) -> GearersResult<VisualNode> {
        let particles = self.particles(frame, fps)?;
        let nodes = particles.into_iter().filter(|p| p.opacity > 0.0).map(|p| {
            let pid = format!("{id}-{}", p.index);
            let (shape, glow_radius) = match self.shape {
                ParticleShape::Dot => (
                    VisualNode::circle(pid, 0.0, -p.distance, p.size / 2.0),
                    p.size * self.glow_scale,
                ),
                ParticleShape::Streak { width, height } => (
                    VisualNode::rect(pid, -width / 2.0, -p.distance - height, width, height)
                        .corner_radius(width / 2.0),
                    height * self.glow_scale,
                ),
            };
            shape
                .fill_color(p.color)
                .opacity(p.opacity)
                .filter(Filter::glow(glow_radius / 2.0, p.glow))
                .transform(
                    Transform2D::translate(self.origin.x, self.origin.y).rotated(p.angle_deg),
                )
        });
        Ok(VisualNode::group(id).children(nodes))
    }
}

/// Square grid of 1px lines covering `area` (x, y, width, height), shifted down by `offset`.
pub fn grid(
    id: impl Into<String>,
    area: (f64, f64, f64, f64),
    spacing: f64,
    offset: f64,
    color: Color,
) -> GearersResult<VisualNode> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(GearersError::validation("grid spacing must be > 0"));
    }
    let (x0, y0, w, h) = area;
    let mut d = String::new();
    let mut x = x0;
    while x <= x0 + w {
        let _ = write!(d, "M{x} {y0}V{} ", y0 + h);
        x += spacing;
    }
    let shift = offset.rem_euclid(spacing);
    let mut y = y0 + shift;
    while y <= y0 + h {
        let _ = write!(d, "M{x0} {y}H{} ", x0 + w);
        y += spacing;
    }
    Ok(VisualNode::path(id, d.trim_end().to_owned()).stroke(color, 1.0, LineCap::Butt))
}

/// Full-frame radial gradient centered at `center` (fractions of the canvas).
pub fn radial_glow(
    id: impl Into<String>,
    canvas: Canvas,
    center: Point,
    radius: f64,
    stops: Vec<GradientStop>,
) -> VisualNode {
    full_frame(id, canvas).fill(Paint::radial(center, radius, stops))
}

/// Darkened corners; clear up to 40% of the radius, `intensity` black at the corners.
pub fn vignette(id: impl Into<String>, canvas: Canvas, intensity: f64) -> VisualNode {
    radial_glow(
        id,
        canvas,
        Point::new(0.5, 0.5),
        std::f64::consts::FRAC_1_SQRT_2,
        vec![
            GradientStop::new(0.4, Color::TRANSPARENT),
            GradientStop::new(1.0, Color::BLACK.with_alpha(intensity.clamp(0.0, 1.0))),
        ],
    )
}

/// Full-width band at `y` whose color fades out toward both sides.
pub fn scanline(
    id: impl Into<String>,
    canvas: Canvas,
    y: f64,
    height: f64,
    color: Color,
) -> VisualNode {
    VisualNode::rect(id, 0.0, y, canvas.w(), height).fill(Paint::horizontal(vec![
        GradientStop::new(0.0, color.with_alpha(0.0)),
        GradientStop::new(0.5, color),
        GradientStop::new(1.0, color.with_alpha(0.0)),
    ]))
}

/// Horizontal rule centered on `center_x` with transparent ends and a solid middle.
pub fn accent_rule(
    id: impl Into<String>,
    center_x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: Color,
    solid_from: f64,
) -> VisualNode {
    let mut stops = vec![GradientStop::new(0.0, color.with_alpha(0.0))];
    if solid_from > 0.0 && solid_from < 0.5 {
        stops.push(GradientStop::new(solid_from, color));
        stops.push(GradientStop::new(1.0 - solid_from, color));
    } else {
        stops.push(GradientStop::new(0.5, color));
    }
    stops.push(GradientStop::new(1.0, color.with_alpha(0.0)));
    VisualNode::rect(id, center_x - width / 2.0, y, width.max(0.0), height)
        .fill(Paint::horizontal(stops))
}

/// Thin light wedges fanning out of `center`, one every `360 / count` degrees.
///
/// Angles are clockwise from straight up; each wedge spans `width_deg` starting at its angle.
pub fn light_rays(
    id: impl Into<String>,
    center: Point,
    radius: f64,
    rotation_deg: f64,
    count: u32,
    width_deg: f64,
    color: Color,
) -> VisualNode {
    let id = id.into();
    let dir = |deg: f64| {
        let r = deg.to_radians();
        Point::new(center.x + radius * r.sin(), center.y - radius * r.cos())
    };
    let step = 360.0 / f64::from(count.max(1));
    let wedges = (0..count).map(|k| {
        let a0 = rotation_deg + step * f64::from(k);
        let (p0, p1) = (dir(a0), dir(a0 + width_deg));
        VisualNode::path(
            format!("{id}-{k}"),
            format!(
                "M{} {}L{} {}L{} {}Z",
                center.x, center.y, p0.x, p0.y, p1.x, p1.y
            ),
        )
        .fill_color(color)
    }).collect::<Vec<_>>();
    VisualNode::group(id).children(wedges)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/blocks.rs"]
mod tests;
