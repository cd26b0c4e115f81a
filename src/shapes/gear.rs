use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        color::Color,
        core::{Point, Transform2D},
        error::{GearersError, GearersResult},
    },
    scene::tree::{LineCap, VisualNode},
};

/// Fill of the bore, drawn as a near-black hole.
pub const BORE_FILL: Color = Color::rgba(10.0 / 255.0, 10.0 / 255.0, 10.0 / 255.0, 1.0);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Inputs for one procedural gear.
pub struct GearSpec {
    /// Overall diameter in pixels, tooth tips included.
    pub size: f64,
    /// Body, tooth and axle color.
    pub color: Color,
    /// Rotation of the whole assembly in degrees.
    pub rotation_deg: f64,
    /// Number of teeth.
    pub teeth: u32,
}

impl Default for GearSpec {
    fn default() -> Self {
        Self {
            size: 200.0,
            color: Color::WHITE,
            rotation_deg: 0.0,
            teeth: 12,
        }
    }
}

impl GearSpec {
    /// Gear of `size` and `color` with default tooth count and no rotation.
    pub fn new(size: f64, color: Color) -> Self {
        Self {
            size,
            color,
            ..Self::default()
        }
    }

    /// Same gear rotated by `deg`.
    pub fn rotated(mut self, deg: f64) -> Self {
        self.rotation_deg = deg;
        self
    }

    /// Same gear with `n` teeth.
    pub fn with_teeth(mut self, n: u32) -> Self {
        self.teeth = n;
        self
    }

    /// Reject non-positive sizes and toothless gears.
    pub fn validate(&self) -> GearersResult<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(GearersError::validation(format!(
                "gear size must be finite and > 0, got {}",
                self.size
            )));
        }
        if self.teeth == 0 {
            return Err(GearersError::validation("gear must have at least one tooth"));
        }
        if !self.rotation_deg.is_finite() {
            return Err(GearersError::validation("gear rotation must be finite"));
        }
        Ok(())
    }

    /// Resolve the geometry.
    pub fn layout(&self) -> GearersResult<GearLayout> {
        self.validate()?;
        let s = self.size;
        let step = 360.0 / f64::from(self.teeth);
        let teeth = (0..self.teeth)
            .map(|i| Tooth {
                index: i,
                angle_deg: step * f64::from(i),
            })
            .collect();
        Ok(GearLayout {
            size: s,
            color: self.color,
            rotation_deg: self.rotation_deg,
            body_radius: s * 0.35,
            bore_radius: s * 0.35,
            bore_border: s * 0.05,
            axle_radius: s * 0.075,
            tooth_width: s * 0.12,
            tooth_height: s * 0.15,
            tooth_corner: 4.0,
            teeth,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// One tooth, placed by rotating the 12 o'clock tooth about the gear center.
pub struct Tooth {
    /// Position in the tooth ring.
    pub index: u32,
    /// `360 / teeth * index`.
    pub angle_deg: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Resolved gear geometry, centered on the origin.
pub struct GearLayout {
    /// Overall diameter.
    pub size: f64,
    /// Paint color.
    pub color: Color,
    /// Assembly rotation.
    pub rotation_deg: f64,
    /// Solid disc radius.
    pub body_radius: f64,
    /// Hole radius, inside the border.
    pub bore_radius: f64,
    /// Ring drawn around the hole.
    pub bore_border: f64,
    /// Center hub radius.
    pub axle_radius: f64,
    /// Tooth width.
    pub tooth_width: f64,
    /// Tooth height, measured inward from the tip.
    pub tooth_height: f64,
    /// Tooth corner radius.
    pub tooth_corner: f64,
    /// Teeth in ring order.
    pub teeth: Vec<Tooth>,
}

impl GearLayout {
    /// Visual subtree with the gear center at `center`.
    ///
    /// Child ids are `{id}-tooth-{i}`, `{id}-body`, `{id}-bore` and `{id}-axle`.
    pub fn to_node(&self, id: &str, center: Point) -> VisualNode {
        let half = self.size / 2.0;
        let teeth = self.teeth.iter().map(|t| {
            VisualNode::rect(
                format!("{id}-tooth-{}", t.index),
                -self.tooth_width / 2.0,
                -half,
                self.tooth_width,
                self.tooth_height,
            )
            .corner_radius(self.tooth_corner)
            .fill_color(self.color)
            .transform(Transform2D::default().rotated(t.angle_deg))
        });

        // The border sits outside the hole, so the stroke is centered half a border out.
        let bore = VisualNode::circle(
            format!("{id}-bore"),
            0.0,
            0.0,
            self.bore_radius + self.bore_border / 2.0,
        )
        .fill_color(BORE_FILL)
        .stroke(self.color, self.bore_border, LineCap::Butt);

        VisualNode::group(id)
            .transform(Transform2D::translate(center.x, center.y).rotated(self.rotation_deg))
            .children(teeth)
            .child(
                VisualNode::circle(format!("{id}-body"), 0.0, 0.0, self.body_radius)
                    .fill_color(self.color),
            )
            .child(bore)
            .child(
                VisualNode::circle(format!("{id}-axle"), 0.0, 0.0, self.axle_radius)
                    .fill_color(self.color),
            )
    }
}

/// Validate, lay out and convert in one step.
pub fn gear_node(id: &str, spec: &GearSpec, center: Point) -> GearersResult<VisualNode> {
    Ok(spec.layout()?.to_node(id, center))
}

#[cfg(test)]
#[path = "../../tests/unit/shapes/gear.rs"]
mod tests;
