use serde::{Deserialize, Serialize};

use crate::{
    animation::{
        interpolate::{InterpolateOpts, interpolate},
        random::pseudo_random,
        spring::{SpringConfig, SpringOpts, spring},
    },
    foundation::{
        color::Color,
        core::{Canvas, FrameClock, Point, Transform2D, Vec2},
        error::{GearersError, GearersResult},
    },
    scene::{
        blocks::{
            AngleMode, BurstMotion, BurstSeeds, GlyphRow, OpacityCurve, ParticleBurst,
            ParticleShape, accent_rule, grid, light_rays, radial_glow, scanline, vignette,
        },
        registry::{CompositionMeta, Format, Scene},
        timeline::{Motion, Segment, Timeline},
        tree::{
            BlendMode, Filter, Font, GradientStop, LineCap, TextSpan, VisualNode, VisualTree,
            full_frame,
        },
    },
    shapes::gear::{GearSpec, gear_node},
};

/// Typical line box height as a multiple of font size.
const LINE_HEIGHT: f64 = 1.15;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Two gears slam together, the screen flashes and the wordmark bursts in.
pub struct IntroConfig {
    /// Rate, size and length.
    pub format: Format,
    /// Frame background.
    pub background: Color,
    /// Primary accent; left gear, glows, grid.
    pub gold: Color,
    /// Secondary accent; right gear.
    pub copper: Color,
    /// Spark fill.
    pub spark: Color,
    /// Wordmark.
    pub title: String,
    /// Line under the wordmark, shown upper-cased.
    pub subtitle: String,
    /// Wordmark font.
    pub title_font: Font,
    /// Subtitle font.
    pub subtitle_font: Font,
    /// Hero gear diameter.
    pub gear_size: f64,
    /// Hero gear tooth count.
    pub gear_teeth: u32,
    /// Hero gear slide-in spring, stretched to `move_secs`.
    pub gear_spring: SpringConfig,
    /// Seconds for the hero gears to meet.
    pub move_secs: f64,
    /// Seconds until the flash.
    pub flash_secs: f64,
    /// Seconds until the wordmark starts.
    pub title_secs: f64,
    /// Seconds until the subtitle starts.
    pub subtitle_secs: f64,
    /// Length of the glitch after the wordmark starts.
    pub glitch_secs: f64,
    /// Frames between wordmark letters.
    pub letter_delay: f64,
    /// Wordmark letter spring.
    pub title_spring: SpringConfig,
    /// Chromatic aberration letter spring.
    pub chroma_spring: SpringConfig,
    /// Subtitle spring.
    pub subtitle_spring: SpringConfig,
    /// Number of blurred background gears.
    pub background_gears: u32,
    /// Number of burst particles after the flash.
    pub particles: u32,
    /// Burst particle spring.
    pub particle_spring: SpringConfig,
    /// Number of contact sparks.
    pub sparks: u32,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            format: Format::default().lasting(5.0),
            background: Color::rgba8(3, 3, 5, 1.0),
            gold: Color::rgba8(0xc9, 0xa2, 0x27, 1.0),
            copper: Color::rgba8(0xb8, 0x73, 0x33, 1.0),
            spark: Color::rgba8(0xff, 0xdd, 0x44, 1.0),
            title: "GEARERS".to_owned(),
            subtitle: "Video Generation".to_owned(),
            title_font: Font::new("Arial Black, Impact, sans-serif", 150.0)
                .weight(900)
                .spacing(7.5),
            subtitle_font: Font::new("Arial, sans-serif", 32.0).spacing(25.6),
            gear_size: 500.0,
            gear_teeth: 20,
            gear_spring: SpringConfig::new(80.0, 40.0),
            move_secs: 2.0,
            flash_secs: 2.0,
            title_secs: 2.2,
            subtitle_secs: 3.0,
            glitch_secs: 0.4,
            letter_delay: 2.0,
            title_spring: SpringConfig::new(10.0, 180.0),
            chroma_spring: SpringConfig::new(12.0, 150.0),
            subtitle_spring: SpringConfig::new(25.0, 120.0),
            background_gears: 8,
            particles: 24,
            particle_spring: SpringConfig::new(8.0, 60.0),
            sparks: 12,
        }
    }
}

/// Composition `intro`.
pub struct IntroScene {
    meta: CompositionMeta,
    config: IntroConfig,
    timeline: Timeline,
}

/// Per-frame values shared by several layers.
struct Frame {
    clock: FrameClock,
    canvas: Canvas,
    f: f64,
    glow_pulse: f64,
    glitch: bool,
    glitch_offset: f64,
}

impl IntroScene {
    /// Registry id.
    pub const ID: &'static str = "intro";

    /// Validate `config` and build the scene.
    pub fn new(config: IntroConfig) -> GearersResult<Self> {
        if config.title.is_empty() {
            return Err(GearersError::validation("intro title must not be empty"));
        }
        for spring in [
            &config.gear_spring,
            &config.title_spring,
            &config.chroma_spring,
            &config.subtitle_spring,
            &config.particle_spring,
        ] {
            spring.validate()?;
        }
        GearSpec::new(config.gear_size, config.gold)
            .with_teeth(config.gear_teeth)
            .validate()?;
        let meta = config.format.meta(Self::ID)?;
        let timeline = Self::timeline(&config, &meta)?;
        Ok(Self {
            meta,
            config,
            timeline,
        })
    }

    fn timeline(cfg: &IntroConfig, meta: &CompositionMeta) -> GearersResult<Timeline> {
        let fps = meta.fps;
        let flash = fps.secs_to_frames(cfg.flash_secs);
        let move_end = fps.secs_to_frames(cfg.move_secs);
        Timeline::new()
            .with(
                Segment::secs("gears", fps, 0.0, cfg.move_secs)?.with_motion(Motion::Spring {
                    config: cfg.gear_spring,
                    stretch: true,
                }),
            )?
            .with(Segment::new("flash", flash, 12.0)?.with_motion(Motion::Keyframes {
                input: vec![0.0, 3.0, 8.0, 12.0],
                output: vec![0.0, 1.0, 0.3, 0.0],
                opts: InterpolateOpts::CLAMP,
            }))?
            .with(Segment::new("shake", flash, 10.0)?)?
            .with(
                Segment::new("lightning", flash - 5.0, 20.0)?.with_motion(Motion::Keyframes {
                    input: vec![0.0, 5.0, 10.0, 20.0],
                    output: vec![0.0, 1.0, 0.5, 0.0],
                    opts: InterpolateOpts::CLAMP,
                }),
            )?
            .with(Segment::new("sparks", move_end - 10.0, flash + 40.0 - move_end)?)?
            .with(Segment::secs("title", fps, cfg.title_secs, 0.3)?)?
            .with(Segment::secs("glitch", fps, cfg.title_secs, cfg.glitch_secs)?)?
            .with(
                Segment::secs("subtitle", fps, cfg.subtitle_secs, 0.0)?
                    .with_motion(Motion::spring(cfg.subtitle_spring)),
            )
    }

    fn seg(&self, name: &str) -> GearersResult<&Segment> {
        self.timeline.get(name)
    }

    fn camera(&self, fr: &Frame) -> GearersResult<Transform2D> {
        let flash = self.seg("flash")?.start;
        let zoom = if fr.f < flash + 20.0 {
            interpolate(fr.f, &[flash, flash + 20.0], &[1.0, 1.05], InterpolateOpts::CLAMP)?
        } else {
            interpolate(
                fr.f,
                &[flash + 20.0, flash + 40.0],
                &[1.05, 1.0],
                InterpolateOpts::CLAMP,
            )?
        };
        let intensity = if self.seg("shake")?.strictly_contains(fr.f) {
            8.0
        } else {
            0.0
        };
        let shake = Vec2::new(
            intensity * (fr.f * 50.0).sin() * pseudo_random("shakeX"),
            intensity * (fr.f * 50.0).cos() * pseudo_random("shakeY"),
        );
        // Shake is applied inside the zoom.
        Ok(Transform2D {
            translate: shake * zoom,
            rotation_deg: 0.0,
            scale: Vec2::new(zoom, zoom),
            anchor: fr.canvas.center().to_vec2(),
        })
    }

    fn backdrop(&self, fr: &Frame) -> GearersResult<Vec<VisualNode>> {
        let cfg = &self.config;
        let (w, h) = (fr.canvas.w(), fr.canvas.h());
        let center = fr.canvas.center();

        let rays = light_rays(
            "rays",
            center,
            w.hypot(h),
            fr.f * 0.5,
            4,
            20.0,
            cfg.gold.with_alpha(0.03),
        )
        .opacity(0.5);

        let grid = grid(
            "grid",
            (-w / 2.0, -h / 2.0, 2.0 * w, 2.0 * h),
            40.0,
            0.0,
            cfg.gold.with_alpha(0.08),
        )?
        .opacity(0.6)
        .transform(Transform2D {
            translate: Vec2::new(0.0, (fr.f * 3.0).rem_euclid(50.0)),
            anchor: center.to_vec2(),
            // Flattened as if tilted back 60 degrees.
            scale: Vec2::new(1.0, 0.5),
            rotation_deg: 0.0,
        });

        let mut gears = Vec::new();
        for i in 0..cfg.background_gears {
            let r = |what: &str| pseudo_random(format!("bgGear-{what}-{i}").as_str());
            let size = 60.0 + r("size") * 100.0;
            let speed = 0.3 + r("speed") * 0.7;
            let dir = if i % 2 == 0 { 1.0 } else { -1.0 };
            let color = if i % 2 == 0 { cfg.gold } else { cfg.copper };
            let spec = GearSpec::new(size, color)
                .rotated(fr.f * speed * dir)
                .with_teeth(8 + i);
            let at = Point::new(r("x") * w + size / 2.0, r("y") * h + size / 2.0);
            gears.push(
                gear_node(&format!("bg-gear-{i}"), &spec, at)?
                    .opacity(0.1 + r("opacity") * 0.15)
                    .filter(Filter::Blur { std_dev: 2.0 }),
            );
        }

        let glow = radial_glow(
            "glow",
            fr.canvas,
            Point::new(0.5, 0.5),
            std::f64::consts::FRAC_1_SQRT_2,
            vec![
                GradientStop::new(0.0, cfg.gold.with_alpha(0.2 * fr.glow_pulse)),
                GradientStop::new(0.3, cfg.copper.with_alpha(0.1)),
                GradientStop::new(0.7, cfg.background),
            ],
        );

        Ok(vec![
            rays,
            grid,
            VisualNode::group("bg-gears").children(gears),
            glow,
        ])
    }

    fn lightning(&self, fr: &Frame) -> GearersResult<Option<VisualNode>> {
        let seg = self.seg("lightning")?;
        if !seg.strictly_contains(fr.f) {
            return Ok(None);
        }
        let cfg = &self.config;
        let c = fr.canvas.center();
        let bolts = (0..6u32).map(|i| {
            let start_x =
                c.x + (pseudo_random(format!("lightning-sx-{i}").as_str()) - 0.5) * 100.0;
            let points = (0..8u32)
                .map(|j| {
                    let jx = pseudo_random(format!("l-{i}-{j}-x").as_str());
                    let jy = pseudo_random(format!("l-{i}-{j}-y").as_str());
                    Point::new(
                        start_x + (jx - 0.5) * 300.0,
                        c.y + (f64::from(j) - 4.0) * 50.0 + (jy - 0.5) * 30.0,
                    )
                })
                .collect();
            let color = if i % 2 == 0 { cfg.gold } else { Color::WHITE };
            VisualNode::polyline(format!("lightning-{i}"), points)
                .stroke(color, 2.0 - f64::from(i) * 0.2, LineCap::Butt)
                .opacity(0.6 + pseudo_random(format!("l-opacity-{i}").as_str()) * 0.4)
        });
        Ok(Some(
            VisualNode::group("lightning")
                .opacity(seg.sample(fr.clock)?)
                .children(bolts),
        ))
    }

    fn hero_gears(&self, fr: &Frame) -> GearersResult<Vec<VisualNode>> {
        let cfg = &self.config;
        let progress = self.seg("gears")?.sample(fr.clock)?;
        let scale = interpolate(
            progress,
            &[0.0, 1.0],
            &[0.2, 1.0],
            InterpolateOpts::CLAMP_RIGHT,
        )?;
        let start = fr.canvas.w() / 2.0 + cfg.gear_size;
        let end = cfg.gear_size * 0.32;
        let offset = interpolate(progress, &[0.0, 1.0], &[start, end], InterpolateOpts::EXTEND)?;
        let rotation = interpolate(
            fr.f,
            &[0.0, fr.clock.secs(4.0)],
            &[0.0, 900.0],
            InterpolateOpts::EXTEND,
        )?;
        let c = fr.canvas.center();

        let mut out = Vec::with_capacity(2);
        for (id, color, side) in [
            ("gear-left", cfg.gold, -1.0),
            ("gear-right", cfg.copper, 1.0),
        ] {
            let spec = GearSpec::new(cfg.gear_size, color)
                .with_teeth(cfg.gear_teeth)
                .rotated(side * rotation);
            let mut node = gear_node(id, &spec, Point::new(c.x + side * offset, c.y))?;
            node.style.transform = node.style.transform.scaled(scale);
            out.push(
                node.filter(Filter::glow(20.0, color.with_alpha(0.8)))
                    .filter(Filter::glow(40.0, color.with_alpha(0.4))),
            );
        }
        Ok(out)
    }

    fn bursts(&self) -> GearersResult<(ParticleBurst, ParticleBurst)> {
        let cfg = &self.config;
        let c = self.meta.canvas.center();
        let sparks_seg = self.seg("sparks")?;
        let sparks = ParticleBurst {
            count: cfg.sparks,
            origin: c,
            trigger: sparks_seg.start,
            delay_per_particle: 2.0,
            motion: BurstMotion::Linear { life: 20.0 },
            angle: AngleMode::Random,
            distance: 50.0,
            distance_jitter: 100.0,
            opacity: OpacityCurve::FadeOut,
            size_min: 4.0,
            size_max: 4.0,
            palette: vec![cfg.spark],
            glow: vec![cfg.spark],
            glow_scale: 8.0 / 12.0,
            shape: ParticleShape::Streak {
                width: 4.0,
                height: 12.0,
            },
            after: sparks_seg.start,
            until: Some(sparks_seg.end()),
            seeds: BurstSeeds {
                angle: "spark-angle".to_owned(),
                distance: "spark-dist".to_owned(),
                size: "spark-size".to_owned(),
            },
        };
        let flash = self.seg("flash")?.start;
        let particles = ParticleBurst {
            count: cfg.particles,
            origin: c,
            trigger: flash,
            delay_per_particle: 1.5,
            motion: BurstMotion::Spring {
                config: cfg.particle_spring,
            },
            angle: AngleMode::Spread { jitter_deg: 30.0 },
            distance: 400.0,
            distance_jitter: 150.0,
            opacity: OpacityCurve::PeakThenFade { peak: 0.15 },
            size_min: 3.0,
            size_max: 11.0,
            palette: vec![Color::WHITE, cfg.gold, cfg.spark],
            glow: vec![Color::WHITE, cfg.gold, cfg.gold],
            glow_scale: 3.0,
            shape: ParticleShape::Dot,
            after: flash,
            until: None,
            seeds: BurstSeeds {
                angle: "particle".to_owned(),
                distance: "dist".to_owned(),
                size: "size".to_owned(),
            },
        };
        Ok((sparks, particles))
    }

    fn title_row(&self, center: Point) -> GearersResult<GlyphRow> {
        Ok(
            GlyphRow::new(&*self.config.title, self.config.title_font.clone(), center)
                .staggered(self.seg("title")?.start, self.config.letter_delay),
        )
    }

    fn letter_progress(&self, fr: &Frame, start: f64, config: SpringConfig) -> GearersResult<f64> {
        spring(fr.f - start, fr.clock.fps, &SpringOpts::from(config))
    }

    fn chroma(&self, fr: &Frame) -> GearersResult<Vec<VisualNode>> {
        if !fr.glitch {
            return Ok(Vec::new());
        }
        let row = self.title_row(fr.canvas.center())?;
        let mut out = Vec::with_capacity(2);
        for (id, color, dx) in [
            ("chroma-red", Color::rgba(1.0, 0.0, 0.0, 1.0), -4.0),
            ("chroma-cyan", Color::rgba(0.0, 1.0, 1.0, 1.0), 4.0),
        ] {
            let mut glyphs = Vec::new();
            for g in row.glyphs() {
                let p = self.letter_progress(fr, g.start, self.config.chroma_spring)?;
                let o = interpolate(p, &[0.0, 0.5], &[0.0, 1.0], InterpolateOpts::CLAMP_RIGHT)?;
                glyphs.push(
                    row.glyph_node(format!("{id}-{}", g.index), &g, color)
                        .opacity(o * 0.7),
                );
            }
            out.push(
                VisualNode::group(id)
                    .transform(Transform2D::translate(dx, 0.0))
                    .blend(BlendMode::Screen)
                    .opacity(0.5)
                    .children(glyphs),
            );
        }
        Ok(out)
    }

    fn title(&self, fr: &Frame) -> GearersResult<VisualNode> {
        let cfg = &self.config;
        let row = self.title_row(fr.canvas.center())?;
        let slice =
            fr.glitch && pseudo_random(format!("glitch-{}", fr.clock.frame.0).as_str()) > 0.6;
        let pulse = fr.glow_pulse;

        let mut glyphs = Vec::new();
        for g in row.glyphs() {
            let p = self.letter_progress(fr, g.start, cfg.title_spring)?;
            let scale = interpolate(p, &[0.0, 1.0], &[0.0, 1.0], InterpolateOpts::CLAMP_RIGHT)?;
            let opacity = interpolate(p, &[0.0, 0.3], &[0.0, 1.0], InterpolateOpts::CLAMP_RIGHT)?;
            let y = interpolate(p, &[0.0, 1.0], &[-150.0, 0.0], InterpolateOpts::CLAMP_RIGHT)?;
            let rot = interpolate(p, &[0.0, 1.0], &[90.0, 0.0], InterpolateOpts::CLAMP_RIGHT)?;
            let slice_offset = if slice && g.index % 2 == 0 {
                pseudo_random(format!("slice-{}-{}", g.index, fr.clock.frame.0).as_str()) * 10.0
                    - 5.0
            } else {
                0.0
            };
            glyphs.push(
                row.glyph_node(format!("title-{}", g.index), &g, Color::WHITE)
                    .filter(Filter::glow(12.5 * pulse, cfg.gold))
                    .filter(Filter::glow(25.0 * pulse, cfg.gold.with_alpha(0.8)))
                    .filter(Filter::glow(37.5 * pulse, cfg.gold.with_alpha(0.6)))
                    .filter(Filter::glow(50.0 * pulse, cfg.gold.with_alpha(0.4)))
                    .filter(Filter::DropShadow {
                        dx: 4.0,
                        dy: 4.0,
                        std_dev: 0.0,
                        color: cfg.gold,
                    })
                    .filter(Filter::DropShadow {
                        dx: -2.0,
                        dy: -2.0,
                        std_dev: 0.0,
                        color: cfg.copper,
                    })
                    .transform(
                        Transform2D::translate(
                            g.at.x + fr.glitch_offset,
                            g.at.y + y + slice_offset,
                        )
                        .rotated(rot)
                        .scaled(scale),
                    )
                    .opacity(opacity),
            );
        }
        Ok(VisualNode::group("title").children(glyphs))
    }

    fn reflection(&self, fr: &Frame) -> GearersResult<VisualNode> {
        let cfg = &self.config;
        let at = Point::new(
            fr.canvas.center().x,
            fr.canvas.h() * 0.58 + cfg.title_font.size * LINE_HEIGHT / 2.0,
        );
        let row = self.title_row(at)?;
        let mut glyphs = Vec::new();
        for g in row.glyphs() {
            let p = self.letter_progress(fr, g.start, cfg.title_spring)?;
            let o = interpolate(p, &[0.0, 0.3], &[0.0, 1.0], InterpolateOpts::CLAMP_RIGHT)?;
            glyphs.push(
                row.glyph_node(format!("reflection-{}", g.index), &g, cfg.gold)
                    .opacity(o),
            );
        }
        Ok(VisualNode::group("reflection")
            .transform(Transform2D {
                translate: Vec2::new(fr.glitch_offset, 0.0),
                rotation_deg: 0.0,
                scale: Vec2::new(1.0, -1.0),
                anchor: at.to_vec2(),
            })
            .opacity(0.15)
            .filter(Filter::Blur { std_dev: 2.0 })
            .children(glyphs))
    }

    fn subtitle(&self, fr: &Frame) -> GearersResult<VisualNode> {
        let cfg = &self.config;
        let p = self.seg("subtitle")?.sample(fr.clock)?;
        let opacity = interpolate(p, &[0.0, 1.0], &[0.0, 1.0], InterpolateOpts::CLAMP_RIGHT)?;
        let dy = interpolate(p, &[0.0, 1.0], &[30.0, 0.0], InterpolateOpts::CLAMP_RIGHT)?;
        let y = fr.canvas.h() * 0.68 + cfg.subtitle_font.size * LINE_HEIGHT / 2.0;
        Ok(VisualNode::text(
            "subtitle",
            0.0,
            0.0,
            vec![TextSpan::plain(cfg.subtitle.to_uppercase())],
            cfg.subtitle_font.clone(),
        )
        .fill_color(cfg.gold)
        .filter(Filter::glow(7.5, cfg.gold))
        .filter(Filter::glow(15.0, cfg.gold.with_alpha(0.6)))
        .transform(Transform2D::translate(fr.canvas.center().x, y + dy))
        .opacity(opacity))
    }

    fn rules(&self, fr: &Frame) -> GearersResult<Vec<VisualNode>> {
        let seg = self.seg("title")?;
        if fr.f <= seg.start {
            return Ok(Vec::new());
        }
        let gold = self.config.gold;
        let width = fr.canvas.w() * seg.progress(fr.f);
        let cx = fr.canvas.center().x;
        Ok([("rule-top", 0.38), ("rule-bottom", 0.62)]
            .into_iter()
            .map(|(id, y)| {
                accent_rule(id, cx, fr.canvas.h() * y, width, 3.0, gold, 0.2)
                    .opacity(0.8)
                    .filter(Filter::glow(5.0, gold))
            })
            .collect())
    }
}

impl Scene for IntroScene {
    fn meta(&self) -> &CompositionMeta {
        &self.meta
    }

    #[tracing::instrument(name = "intro", skip(self))]
    fn render(&self, clock: FrameClock, canvas: Canvas) -> GearersResult<VisualTree> {
        let f = clock.f();
        let glitch = self.seg("glitch")?.strictly_contains(f);
        let fr = Frame {
            clock,
            canvas,
            f,
            glow_pulse: interpolate(
                (f * 0.3).sin(),
                &[-1.0, 1.0],
                &[0.6, 1.2],
                InterpolateOpts::EXTEND,
            )?,
            glitch,
            glitch_offset: if glitch { (f * 15.0).sin() * 8.0 } else { 0.0 },
        };
        let flash_seg = self.seg("flash")?;
        let flash = flash_seg.start;
        let (sparks, particles) = self.bursts()?;
        let vignette_level = interpolate(
            f,
            &[0.0, flash, flash + 10.0],
            &[0.8, 0.3, 0.6],
            InterpolateOpts::CLAMP_RIGHT,
        )?;

        let root = VisualNode::group("intro")
            .transform(self.camera(&fr)?)
            .children(self.backdrop(&fr)?)
            .maybe_child(self.lightning(&fr)?)
            .children(self.hero_gears(&fr)?)
            .child(sparks.node("spark", f, clock.fps)?)
            .child(
                full_frame("flash", canvas)
                    .fill_color(Color::WHITE)
                    .opacity(flash_seg.sample(clock)?)
                    .blend(BlendMode::Overlay),
            )
            .child(particles.node("particle", f, clock.fps)?)
            .children(self.rules(&fr)?)
            .child(scanline(
                "scanline",
                canvas,
                (f * 8.0).rem_euclid(canvas.h()),
                4.0,
                Color::WHITE.with_alpha(0.1),
            ))
            .child(vignette("vignette", canvas, vignette_level))
            // Stacked above the overlays.
            .child(self.reflection(&fr)?)
            .children(self.chroma(&fr)?)
            .child(self.title(&fr)?)
            .child(self.subtitle(&fr)?);

        Ok(VisualTree {
            composition: Self::ID.to_owned(),
            frame: clock.frame,
            canvas,
            background: self.config.background,
            root,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/intro.rs"]
mod tests;
