use serde::{Deserialize, Serialize};

use crate::{
    animation::{
        interpolate::{InterpolateOpts, interpolate},
        spring::SpringConfig,
    },
    foundation::{
        color::Color,
        core::{Canvas, FrameClock, Point, Transform2D, Vec2},
        error::{GearersError, GearersResult},
    },
    scene::{
        blocks::{accent_rule, estimate_width, grid},
        registry::{CompositionMeta, Format, Scene},
        timeline::{Motion, Segment, Timeline},
        tree::{
            Filter, Font, GradientStop, Paint, TextAnchor, TextSpan, VisualNode, VisualTree,
        },
    },
    shapes::logo::LogoSpec,
};

const LINE_HEIGHT: f64 = 1.15;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// A run of the catchphrase; accented runs use the primary color.
pub struct PhraseRun {
    /// Text.
    pub text: String,
    /// Draw in the accent color.
    #[serde(default)]
    pub accent: bool,
}

impl PhraseRun {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            accent: false,
        }
    }

    fn accent(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            accent: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// One selling point: round badge with an icon, a title and a caption.
pub struct FeatureCard {
    /// Badge glyph.
    pub icon: String,
    /// Headline.
    pub title: String,
    /// Line under the headline.
    pub caption: String,
    /// Seconds into the video when the card enters.
    pub start_secs: f64,
}

impl FeatureCard {
    fn new(icon: &str, title: &str, caption: &str, start_secs: f64) -> Self {
        Self {
            icon: icon.to_owned(),
            title: title.to_owned(),
            caption: caption.to_owned(),
            start_secs,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Logo reveal, catchphrase, three feature cards, call to action and end card.
pub struct PromoConfig {
    /// Rate, size and length.
    pub format: Format,
    /// Frame background.
    pub background: Color,
    /// Brand blue.
    pub primary: Color,
    /// Secondary text.
    pub muted: Color,
    /// Catchphrase runs.
    pub catchphrase: Vec<PhraseRun>,
    /// Catchphrase start, seconds.
    pub catchphrase_secs: f64,
    /// Catchphrase end, seconds.
    pub catchphrase_end_secs: f64,
    /// Feature cards in order of appearance.
    pub features: Vec<FeatureCard>,
    /// Call to action label.
    pub cta: String,
    /// Call to action start, seconds.
    pub cta_secs: f64,
    /// End card start, seconds.
    pub end_secs: f64,
    /// End card link text.
    pub url: String,
    /// Opening logo size.
    pub logo_size: f64,
    /// End card logo size.
    pub end_logo_size: f64,
    /// Opening logo spring.
    pub logo_spring: SpringConfig,
    /// Feature card spring.
    pub feature_spring: SpringConfig,
    /// Call to action spring.
    pub cta_spring: SpringConfig,
    /// End card spring.
    pub end_spring: SpringConfig,
}

impl Default for PromoConfig {
    fn default() -> Self {
        Self {
            format: Format::default().lasting(15.0),
            background: Color::rgba8(0x0d, 0x11, 0x17, 1.0),
            primary: Color::rgba8(0x1a, 0x5a, 0x9c, 1.0),
            muted: Color::rgba8(0x8b, 0x94, 0x9e, 1.0),
            catchphrase: vec![
                PhraseRun::plain("下地は"),
                PhraseRun::accent("AI"),
                PhraseRun::plain("、仕上げは"),
                PhraseRun::accent("人力"),
                PhraseRun::plain("。"),
            ],
            catchphrase_secs: 3.0,
            catchphrase_end_secs: 5.0,
            features: vec![
                FeatureCard::new("⚡", "大量生成で量産可能", "AIが下地を高速生成", 5.0),
                FeatureCard::new(
                    "🔄",
                    "即時初稿で修正依頼",
                    "すぐに確認、すぐにフィードバック",
                    7.0,
                ),
                FeatureCard::new("✅", "人力編集で品質保証", "プロが最終仕上げを担当", 9.0),
            ],
            cta: "今すぐ始めよう".to_owned(),
            cta_secs: 11.0,
            end_secs: 13.0,
            url: "gearers.com".to_owned(),
            logo_size: 450.0,
            end_logo_size: 350.0,
            logo_spring: SpringConfig::new(15.0, 80.0),
            feature_spring: SpringConfig::new(15.0, 100.0),
            cta_spring: SpringConfig::new(12.0, 150.0),
            end_spring: SpringConfig::new(20.0, 80.0),
        }
    }
}

/// Composition `promo`.
pub struct PromoScene {
    meta: CompositionMeta,
    config: PromoConfig,
    timeline: Timeline,
}

impl PromoScene {
    /// Registry id.
    pub const ID: &'static str = "promo";

    /// Validate `config` and build the scene.
    pub fn new(config: PromoConfig) -> GearersResult<Self> {
        for spring in [
            &config.logo_spring,
            &config.feature_spring,
            &config.cta_spring,
            &config.end_spring,
        ] {
            spring.validate()?;
        }
        let meta = config.format.meta(Self::ID)?;
        let timeline = Self::timeline(&config, &meta)?;
        Ok(Self {
            meta,
            config,
            timeline,
        })
    }

    fn timeline(cfg: &PromoConfig, meta: &CompositionMeta) -> GearersResult<Timeline> {
        let fps = meta.fps;
        let secs = |s: f64| fps.secs_to_frames(s);
        if cfg.catchphrase_end_secs < cfg.catchphrase_secs + 25.0 / fps.as_f64() {
            return Err(GearersError::validation(
                "promo catchphrase must last longer than its fades",
            ));
        }
        if cfg.end_secs < cfg.cta_secs + 15.0 / fps.as_f64() {
            return Err(GearersError::validation(
                "promo end card must start after the call to action fades in",
            ));
        }

        let mut tl = Timeline::new()
            .with(
                Segment::new("logo", 0.0, secs(cfg.catchphrase_secs) + 15.0)?
                    .with_motion(Motion::spring(cfg.logo_spring)),
            )?
            .with(Segment::secs(
                "catchphrase",
                fps,
                cfg.catchphrase_secs,
                cfg.catchphrase_end_secs - cfg.catchphrase_secs,
            )?)?
            .with(
                Segment::new(
                    "cta",
                    secs(cfg.cta_secs),
                    secs(cfg.end_secs) - secs(cfg.cta_secs),
                )?
                .with_motion(Motion::spring(cfg.cta_spring)),
            )?
            .with(
                Segment::new("end", secs(cfg.end_secs), 0.0)?
                    .with_motion(Motion::spring(cfg.end_spring)),
            )?;
        for (i, card) in cfg.features.iter().enumerate() {
            tl.push(
                Segment::secs(format!("feature-{i}"), fps, card.start_secs, 60.0 / fps.as_f64())?
                    .with_motion(Motion::spring(cfg.feature_spring)),
            )?;
        }
        Ok(tl)
    }

    fn seg(&self, name: &str) -> GearersResult<&Segment> {
        self.timeline.get(name)
    }

    fn scaled_about(center: Point, scale: f64) -> Transform2D {
        Transform2D {
            translate: Vec2::ZERO,
            rotation_deg: 0.0,
            scale: Vec2::new(scale, scale),
            anchor: center.to_vec2(),
        }
    }

    fn backdrop(&self, clock: FrameClock, canvas: Canvas) -> GearersResult<Vec<VisualNode>> {
        let cfg = &self.config;
        let f = clock.f();
        let (w, h) = (canvas.w(), canvas.h());

        // The glow lives on a box twice the canvas size, offset so its center is the canvas origin.
        let drift = interpolate(
            f,
            &[0.0, clock.secs(15.0)],
            &[0.0, 100.0],
            InterpolateOpts::EXTEND,
        )?;
        let px = (30.0 + drift * 0.4) / 100.0;
        let py = (40.0 + (f * 0.02).sin() * 10.0) / 100.0;
        let at = Point::new(-w + 2.0 * w * px, -h + 2.0 * h * py);
        let far = [(-w, -h), (w, -h), (-w, h), (w, h)]
            .into_iter()
            .map(|(x, y)| (x - at.x).hypot(y - at.y))
            .fold(0.0, f64::max);
        let r = far * 0.5;
        let glow = VisualNode::circle("glow", at.x, at.y, r).fill(Paint::radial(
            Point::new(0.5, 0.5),
            0.5,
            vec![
                GradientStop::new(0.0, cfg.primary.with_alpha(0.15)),
                GradientStop::new(1.0, cfg.primary.with_alpha(0.0)),
            ],
        ));

        let grid = grid("grid", (0.0, 0.0, w, h), 60.0, 0.0, cfg.primary.with_alpha(0.05))?
            .opacity(0.5);
        Ok(vec![glow, grid])
    }

    fn logo(&self, clock: FrameClock, canvas: Canvas) -> GearersResult<Option<VisualNode>> {
        let seg = self.seg("logo")?;
        let f = clock.f();
        if !seg.contains(f) {
            return Ok(None);
        }
        let cfg = &self.config;
        let p = seg.sample(clock)?;
        let scale = interpolate(p, &[0.0, 1.0], &[0.5, 1.0], InterpolateOpts::CLAMP_RIGHT)?;
        let opacity = interpolate(p, &[0.0, 0.5], &[0.0, 1.0], InterpolateOpts::CLAMP_RIGHT)?;
        let phrase = self.seg("catchphrase")?.start;
        let fade_out = interpolate(
            f,
            &[phrase, phrase + 10.0],
            &[1.0, 0.0],
            InterpolateOpts::CLAMP,
        )?;
        let c = canvas.center();
        Ok(Some(
            VisualNode::group("logo")
                .transform(Self::scaled_about(c, scale))
                .opacity(opacity * fade_out)
                .filter(Filter::glow(15.0, cfg.primary.with_alpha(0.5)))
                .child(LogoSpec::new(cfg.logo_size).to_node("logo-mark", c)?),
        ))
    }

    fn catchphrase(&self, clock: FrameClock, canvas: Canvas) -> GearersResult<Option<VisualNode>> {
        let seg = self.seg("catchphrase")?;
        let f = clock.f();
        let first_feature = self
            .config
            .features
            .first()
            .map(|c| clock.secs(c.start_secs))
            .unwrap_or(seg.end());
        if f < seg.start || f >= first_feature + 10.0 {
            return Ok(None);
        }
        let cfg = &self.config;
        let spans = cfg
            .catchphrase
            .iter()
            .map(|run| {
                if run.accent {
                    TextSpan::colored(run.text.clone(), cfg.primary)
                } else {
                    TextSpan::plain(run.text.clone())
                }
            })
            .collect();
        let c = canvas.center();
        Ok(Some(
            VisualNode::text(
                "catchphrase",
                c.x,
                c.y,
                spans,
                Font::new("Arial, sans-serif", 72.0).weight(700).spacing(3.6),
            )
            .fill_color(Color::WHITE)
            .opacity(seg.fade(f, 15.0, 10.0)),
        ))
    }

    fn feature(
        &self,
        i: usize,
        card: &FeatureCard,
        clock: FrameClock,
        canvas: Canvas,
    ) -> GearersResult<Option<VisualNode>> {
        let cfg = &self.config;
        let seg = self.seg(&format!("feature-{i}"))?;
        let f = clock.f();
        let until = match cfg.features.get(i + 1) {
            Some(next) => clock.secs(next.start_secs) + 30.0,
            None => self.seg("cta")?.start + 15.0,
        };
        if f < seg.start || f >= until {
            return Ok(None);
        }
        let p = seg.sample(clock)?;
        let dx = interpolate(p, &[0.0, 1.0], &[-100.0, 0.0], InterpolateOpts::CLAMP_RIGHT)?;

        let title_font = Font::new("Arial, sans-serif", 56.0).weight(700);
        let caption_font = Font::new("Arial, sans-serif", 28.0);
        let badge = 80.0;
        let gap = 30.0;
        let text_w = estimate_width(&card.title, &title_font)
            .max(estimate_width(&card.caption, &caption_font));
        let c = canvas.center();
        let left = c.x - (badge + gap + text_w) / 2.0;
        let title_h = title_font.size * LINE_HEIGHT;
        let caption_h = caption_font.size * LINE_HEIGHT;
        let top = c.y - (title_h + 10.0 + caption_h) / 2.0;
        let text_x = left + badge + gap;

        let id = format!("feature-{i}");
        Ok(Some(
            VisualNode::group(id.clone())
                .transform(Transform2D::translate(dx, 0.0))
                .opacity(seg.fade(f, 10.0, 10.0))
                .child(
                    VisualNode::circle(format!("{id}-badge"), left + badge / 2.0, c.y, badge / 2.0)
                        .fill_color(cfg.primary),
                )
                .child(
                    VisualNode::text(
                        format!("{id}-icon"),
                        left + badge / 2.0,
                        c.y,
                        vec![TextSpan::plain(card.icon.clone())],
                        Font::new("Arial, sans-serif", 40.0),
                    )
                    .fill_color(Color::WHITE),
                )
                .child(
                    VisualNode::text(
                        format!("{id}-title"),
                        text_x,
                        top + title_h / 2.0,
                        vec![TextSpan::plain(card.title.clone())],
                        title_font,
                    )
                    .anchor(TextAnchor::Start)
                    .fill_color(Color::WHITE),
                )
                .child(
                    VisualNode::text(
                        format!("{id}-caption"),
                        text_x,
                        top + title_h + 10.0 + caption_h / 2.0,
                        vec![TextSpan::plain(card.caption.clone())],
                        caption_font,
                    )
                    .anchor(TextAnchor::Start)
                    .fill_color(cfg.muted),
                ),
        ))
    }

    fn cta(&self, clock: FrameClock, canvas: Canvas) -> GearersResult<Option<VisualNode>> {
        let seg = self.seg("cta")?;
        let f = clock.f();
        if f < seg.start || f >= seg.end() + 10.0 {
            return Ok(None);
        }
        let cfg = &self.config;
        let p = seg.sample(clock)?;
        let scale = interpolate(p, &[0.0, 1.0], &[0.8, 1.0], InterpolateOpts::CLAMP_RIGHT)?;
        let font = Font::new("Arial, sans-serif", 48.0).weight(700);
        let w = estimate_width(&cfg.cta, &font) + 160.0;
        let h = font.size * LINE_HEIGHT + 50.0;
        let c = canvas.center();
        Ok(Some(
            VisualNode::group("cta")
                .transform(Self::scaled_about(c, scale))
                .opacity(seg.fade(f, 10.0, 5.0))
                .child(
                    VisualNode::rect("cta-pill", c.x - w / 2.0, c.y - h / 2.0, w, h)
                        .corner_radius(60.0_f64.min(h / 2.0))
                        .fill_color(cfg.primary)
                        .filter(Filter::glow(20.0, cfg.primary.with_alpha(0.6))),
                )
                .child(
                    VisualNode::text(
                        "cta-label",
                        c.x,
                        c.y,
                        vec![TextSpan::plain(cfg.cta.clone())],
                        font,
                    )
                    .fill_color(Color::WHITE),
                ),
        ))
    }

    fn end_card(&self, clock: FrameClock, canvas: Canvas) -> GearersResult<Option<VisualNode>> {
        let seg = self.seg("end")?;
        if clock.f() < seg.start {
            return Ok(None);
        }
        let cfg = &self.config;
        let p = seg.sample(clock)?;
        let opacity = interpolate(p, &[0.0, 1.0], &[0.0, 1.0], InterpolateOpts::CLAMP_RIGHT)?;
        let url_font = Font::new("Arial, sans-serif", 36.0).weight(500).spacing(3.6);
        let url_h = url_font.size * LINE_HEIGHT;
        let total = cfg.end_logo_size + 20.0 + url_h;
        let c = canvas.center();
        let top = c.y - total / 2.0;
        Ok(Some(
            VisualNode::group("end")
                .opacity(opacity)
                .filter(Filter::glow(10.0, cfg.primary.with_alpha(0.4)))
                .child(
                    LogoSpec::new(cfg.end_logo_size)
                        .to_node("end-logo", Point::new(c.x, top + cfg.end_logo_size / 2.0))?,
                )
                .child(
                    VisualNode::text(
                        "end-url",
                        c.x,
                        top + cfg.end_logo_size + 20.0 + url_h / 2.0,
                        vec![TextSpan::plain(cfg.url.clone())],
                        url_font,
                    )
                    .fill_color(cfg.muted),
                ),
        ))
    }
}

impl Scene for PromoScene {
    fn meta(&self) -> &CompositionMeta {
        &self.meta
    }

    #[tracing::instrument(name = "promo", skip(self))]
    fn render(&self, clock: FrameClock, canvas: Canvas) -> GearersResult<VisualTree> {
        let cfg = &self.config;
        let f = clock.f();
        let mut features = Vec::new();
        for (i, card) in cfg.features.iter().enumerate() {
            features.extend(self.feature(i, card, clock, canvas)?);
        }
        let accent_w = canvas.w()
            * interpolate(f, &[0.0, clock.secs(2.0)], &[0.0, 80.0], InterpolateOpts::CLAMP_RIGHT)?
            / 100.0;

        let root = VisualNode::group("promo")
            .children(self.backdrop(clock, canvas)?)
            .maybe_child(self.logo(clock, canvas)?)
            .maybe_child(self.catchphrase(clock, canvas)?)
            .children(features)
            .maybe_child(self.cta(clock, canvas)?)
            .maybe_child(self.end_card(clock, canvas)?)
            .child(
                accent_rule(
                    "accent",
                    canvas.center().x,
                    canvas.h() - 64.0,
                    accent_w,
                    4.0,
                    cfg.primary,
                    0.0,
                )
                .opacity(0.6),
            );

        Ok(VisualTree {
            composition: Self::ID.to_owned(),
            frame: clock.frame,
            canvas,
            background: cfg.background,
            root,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/promo.rs"]
mod tests;
