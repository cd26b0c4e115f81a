use kurbo::{Arc, BezPath, Shape};
use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        color::Color,
        core::{Point, Transform2D, Vec2},
        error::{GearersError, GearersResult},
    },
    scene::tree::{Font, LineCap, TextSpan, VisualNode},
};

/// Brand blue used for the gear halves.
pub const GEAR_BLUE: Color = Color::rgba(26.0 / 255.0, 90.0 / 255.0, 156.0 / 255.0, 1.0);
/// Swoosh gray.
pub const SWOOSH_GRAY: Color = Color::rgba(107.0 / 255.0, 114.0 / 255.0, 128.0 / 255.0, 1.0);
/// Wordmark color.
pub const WORDMARK_INK: Color = Color::rgba(45.0 / 255.0, 55.0 / 255.0, 72.0 / 255.0, 1.0);

const LOGO_TEETH: u32 = 18;
const ARC_TOLERANCE: f64 = 0.1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Split-gear brand logo.
pub struct LogoSpec {
    /// Bounding square edge in pixels.
    pub size: f64,
    /// Draw the "GEARERS" wordmark across the middle.
    pub show_text: bool,
}

impl Default for LogoSpec {
    fn default() -> Self {
        Self {
            size: 400.0,
            show_text: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Half {
    Upper,
    Lower,
}

impl Half {
    fn tag(self) -> &'static str {
        match self {
            Half::Upper => "upper",
            Half::Lower => "lower",
        }
    }

    // Half-circle sweep from the left end, through the top (upper) or bottom (lower).
    fn sweep(self) -> f64 {
        match self {
            Half::Upper => std::f64::consts::PI,
            Half::Lower => -std::f64::consts::PI,
        }
    }

    // The two halves share the teeth around the seam at 0 and 180 degrees.
    fn has_tooth(self, angle: f64) -> bool {
        match self {
            Half::Upper => (160.0..=380.0).contains(&angle),
            Half::Lower => angle <= 200.0 || angle >= 520.0,
        }
    }
}

fn half_arc(radius: f64, half: Half) -> BezPath {
    Arc::new(
        Point::ZERO,
        Vec2::new(radius, radius),
        std::f64::consts::PI,
        half.sweep(),
        0.0,
    )
    .into_path(ARC_TOLERANCE)
}

fn swoosh(size: f64, dir: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((-size * 0.45, dir * size * 0.02));
    p.quad_to((-size * 0.2, dir * size * 0.08), (0.0, dir * size * 0.08));
    p.quad_to((size * 0.2, dir * size * 0.08), (size * 0.45, dir * size * 0.02));
    p
}

impl LogoSpec {
    /// Logo of `size` with the wordmark.
    pub fn new(size: f64) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Same logo without the wordmark.
    pub fn without_text(mut self) -> Self {
        self.show_text = false;
        self
    }

    /// Tooth angles of one half, in degrees.
    fn tooth_angles(half: Half) -> impl Iterator<Item = f64> {
        let step = 360.0 / f64::from(LOGO_TEETH);
        (0..LOGO_TEETH)
            .map(move |i| step * f64::from(i))
            .filter(move |a| half.has_tooth(*a))
    }

    fn half_node(&self, id: &str, half: Half) -> VisualNode {
        let s = self.size;
        let radius = s * 0.4;
        let (tw, th) = (s * 0.04, s * 0.06);
        let tag = half.tag();

        let teeth = Self::tooth_angles(half).map(|angle| {
            VisualNode::rect(
                format!("{id}-{tag}-tooth-{}", angle.round() as i64),
                -tw / 2.0,
                -radius - th,
                tw,
                th,
            )
            .corner_radius(2.0)
            .fill_color(GEAR_BLUE)
            .transform(Transform2D::default().rotated(angle))
        });

        VisualNode::group(format!("{id}-{tag}"))
            .children(teeth)
            .child(
                VisualNode::path(format!("{id}-{tag}-rim"), half_arc(radius, half).to_svg())
                    .stroke(GEAR_BLUE, s * 0.06, LineCap::Butt),
            )
            .child(
                VisualNode::path(
                    format!("{id}-{tag}-inner"),
                    half_arc(radius * 0.75, half).to_svg(),
                )
                .stroke(GEAR_BLUE, s * 0.02, LineCap::Butt),
            )
    }

    /// Visual subtree centered at `center`.
    pub fn to_node(&self, id: &str, center: Point) -> GearersResult<VisualNode> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(GearersError::validation(format!(
                "logo size must be finite and > 0, got {}",
                self.size
            )));
        }
        let s = self.size;
        let wordmark = self.show_text.then(|| {
            VisualNode::text(
                format!("{id}-wordmark"),
                0.0,
                s * 0.02,
                vec![TextSpan::plain("GEARERS")],
                Font::new("Arial, sans-serif", s * 0.12)
                    .weight(700)
                    .spacing(s * 0.01),
            )
            .fill_color(WORDMARK_INK)
        });

        Ok(VisualNode::group(id)
            .transform(Transform2D::translate(center.x, center.y))
            .child(self.half_node(id, Half::Upper))
            .child(self.half_node(id, Half::Lower))
            .child(
                VisualNode::path(format!("{id}-swoosh-top"), swoosh(s, -1.0).to_svg())
                    .stroke(SWOOSH_GRAY, s * 0.015, LineCap::Round),
            )
            .child(
                VisualNode::path(format!("{id}-swoosh-bottom"), swoosh(s, 1.0).to_svg())
                    .stroke(SWOOSH_GRAY, s * 0.015, LineCap::Round),
            )
            .maybe_child(wordmark))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shapes/logo.rs"]
mod tests;
