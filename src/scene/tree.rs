//! Declarative per-frame output: a tree of positioned, styled primitives.
//!
//! Geometry is expressed in node-local coordinates; [`Style::transform`] places the node inside its
//! parent. Exporters (see [`crate::to_svg`]) translate the tree without evaluating any animation.

use serde::Serialize;

use crate::foundation::{
    color::Color,
    core::{Canvas, FrameIndex, Point, Transform2D},
};

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Everything a host needs to draw one frame.
pub struct VisualTree {
    /// Composition this frame belongs to.
    pub composition: String,
    /// Frame index the tree was computed for.
    pub frame: FrameIndex,
    /// Output size.
    pub canvas: Canvas,
    /// Solid fill behind all nodes.
    pub background: Color,
    /// Root group.
    pub root: VisualNode,
}

impl VisualTree {
    /// Depth-first lookup by node id.
    pub fn find(&self, id: &str) -> Option<&VisualNode> {
        self.root.find(id)
    }

    /// Total number of nodes including the root.
    pub fn node_count(&self) -> usize {
        self.root.count()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// One primitive or group.
pub struct VisualNode {
    /// Stable identifier, unique within a frame.
    pub id: String,
    /// Geometry.
    pub kind: NodeKind,
    /// Presentation attributes.
    pub style: Style,
    /// Children drawn in order on top of this node.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VisualNode>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Node geometry in local coordinates.
pub enum NodeKind {
    /// Container without geometry of its own.
    Group,
    /// Axis-aligned rectangle with optional rounded corners.
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Corner radius.
        corner_radius: f64,
    },
    /// Ellipse (circle when `rx == ry`).
    Ellipse {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Horizontal radius.
        rx: f64,
        /// Vertical radius.
        ry: f64,
    },
    /// SVG path data.
    Path {
        /// `d` attribute.
        d: String,
    },
    /// Open polyline through the points.
    Polyline {
        /// Vertices.
        points: Vec<Point>,
    },
    /// Single line of text made of styled spans.
    Text {
        /// Anchor x.
        x: f64,
        /// Baseline-center y.
        y: f64,
        /// Runs of text; a run without fill uses the node fill.
        spans: Vec<TextSpan>,
        /// Font settings shared by all spans.
        font: Font,
        /// Horizontal alignment relative to `x`.
        anchor: TextAnchor,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// A run of text with an optional fill override.
pub struct TextSpan {
    /// Characters.
    pub text: String,
    /// Fill override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
}

impl TextSpan {
    /// Span inheriting the node fill.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fill: None,
        }
    }

    /// Span with its own fill.
    pub fn colored(text: impl Into<String>, fill: Color) -> Self {
        Self {
            text: text.into(),
            fill: Some(fill),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, serde::Deserialize)]
#[serde(default)]
/// Font settings.
pub struct Font {
    /// CSS-style family list.
    pub family: String,
    /// Size in pixels.
    pub size: f64,
    /// Weight, 100..=900.
    pub weight: u16,
    /// Extra spacing between glyphs, pixels.
    pub letter_spacing: f64,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "Arial, sans-serif".to_owned(),
            size: 16.0,
            weight: 400,
            letter_spacing: 0.0,
        }
    }
}

impl Font {
    /// Family and size at normal weight.
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            ..Self::default()
        }
    }

    /// Same font at another weight.
    pub fn weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    /// Same font with letter spacing.
    pub fn spacing(mut self, px: f64) -> Self {
        self.letter_spacing = px;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Horizontal text alignment.
pub enum TextAnchor {
    /// Left-aligned at `x`.
    Start,
    /// Centered on `x`.
    #[default]
    Middle,
    /// Right-aligned at `x`.
    End,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Presentation attributes of a node.
pub struct Style {
    /// Placement inside the parent.
    pub transform: Transform2D,
    /// Group opacity in `[0, 1]`.
    pub opacity: f64,
    /// Interior paint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Paint>,
    /// Outline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    /// Filter chain applied to the rendered node.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
    /// How the node composites onto what is below it.
    pub blend: BlendMode,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            transform: Transform2D::default(),
            opacity: 1.0,
            fill: None,
            stroke: None,
            filters: Vec::new(),
            blend: BlendMode::Normal,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Fill or stroke paint.
pub enum Paint {
    /// Flat color.
    Solid {
        /// Color.
        color: Color,
    },
    /// Linear gradient in object-bounding-box units.
    Linear {
        /// Start point, fractions of the bounding box.
        start: Point,
        /// End point, fractions of the bounding box.
        end: Point,
        /// Color stops.
        stops: Vec<GradientStop>,
    },
    /// Radial gradient in object-bounding-box units.
    Radial {
        /// Center, fractions of the bounding box.
        center: Point,
        /// Radius, fraction of the bounding box.
        radius: f64,
        /// Color stops.
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    /// Flat color.
    pub fn solid(color: Color) -> Self {
        Self::Solid { color }
    }

    /// Left-to-right gradient.
    pub fn horizontal(stops: Vec<GradientStop>) -> Self {
        Self::Linear {
            start: Point::new(0.0, 0.5),
            end: Point::new(1.0, 0.5),
            stops,
        }
    }

    /// Radial gradient centered at `center` (bounding-box fractions).
    pub fn radial(center: Point, radius: f64, stops: Vec<GradientStop>) -> Self {
        Self::Radial {
            center,
            radius,
            stops,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// One gradient color stop.
pub struct GradientStop {
    /// Position in `[0, 1]`.
    pub offset: f64,
    /// Color at the stop.
    pub color: Color,
}

impl GradientStop {
    /// Stop at `offset` (clamped to `[0, 1]`).
    pub fn new(offset: f64, color: Color) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Stroke end caps.
pub enum LineCap {
    /// Flat.
    #[default]
    Butt,
    /// Rounded.
    Round,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Outline settings.
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Width in pixels.
    pub width: f64,
    /// End caps.
    pub cap: LineCap,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Raster filter.
pub enum Filter {
    /// Gaussian blur.
    Blur {
        /// Standard deviation in pixels.
        std_dev: f64,
    },
    /// Offset, blurred, tinted copy behind the node.
    DropShadow {
        /// Horizontal offset.
        dx: f64,
        /// Vertical offset.
        dy: f64,
        /// Blur standard deviation.
        std_dev: f64,
        /// Shadow color.
        color: Color,
    },
}

impl Filter {
    /// Centered glow (zero-offset drop shadow).
    pub fn glow(std_dev: f64, color: Color) -> Self {
        Self::DropShadow {
            dx: 0.0,
            dy: 0.0,
            std_dev,
            color,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Compositing mode.
pub enum BlendMode {
    /// Source over.
    #[default]
    Normal,
    /// Lighten by inverse multiply.
    Screen,
    /// Multiply or screen depending on the backdrop.
    Overlay,
}

impl VisualNode {
    fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            style: Style::default(),
            children: Vec::new(),
        }
    }

    /// Empty group.
    pub fn group(id: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Group)
    }

    /// Rectangle with top-left corner at `(x, y)`.
    pub fn rect(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            id,
            NodeKind::Rect {
                x,
                y,
                width,
                height,
                corner_radius: 0.0,
            },
        )
    }

    /// Circle centered at `(cx, cy)`.
    pub fn circle(id: impl Into<String>, cx: f64, cy: f64, r: f64) -> Self {
        Self::new(
            id,
            NodeKind::Ellipse {
                cx,
                cy,
                rx: r,
                ry: r,
            },
        )
    }

    /// Path from SVG path data.
    pub fn path(id: impl Into<String>, d: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Path { d: d.into() })
    }

    /// Open polyline.
    pub fn polyline(id: impl Into<String>, points: Vec<Point>) -> Self {
        Self::new(id, NodeKind::Polyline { points })
    }

    /// One line of text.
    pub fn text(id: impl Into<String>, x: f64, y: f64, spans: Vec<TextSpan>, font: Font) -> Self {
        Self::new(
            id,
            NodeKind::Text {
                x,
                y,
                spans,
                font,
                anchor: TextAnchor::Middle,
            },
        )
    }

    /// Round the corners of a rect; no-op for other kinds.
    pub fn corner_radius(mut self, r: f64) -> Self {
        if let NodeKind::Rect { corner_radius, .. } = &mut self.kind {
            *corner_radius = r;
        }
        self
    }

    /// Change text alignment; no-op for other kinds.
    pub fn anchor(mut self, a: TextAnchor) -> Self {
        if let NodeKind::Text { anchor, .. } = &mut self.kind {
            *anchor = a;
        }
        self
    }

    /// Set the fill paint.
    pub fn fill(mut self, paint: Paint) -> Self {
        self.style.fill = Some(paint);
        self
    }

    /// Set a flat fill color.
    pub fn fill_color(self, color: Color) -> Self {
        self.fill(Paint::solid(color))
    }

    /// Set the outline.
    pub fn stroke(mut self, color: Color, width: f64, cap: LineCap) -> Self {
        self.style.stroke = Some(Stroke { color, width, cap });
        self
    }

    /// Set opacity; clamped into `[0, 1]`, NaN becomes 0.
    pub fn opacity(mut self, v: f64) -> Self {
        self.style.opacity = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        self
    }

    /// Set the local transform.
    pub fn transform(mut self, t: Transform2D) -> Self {
        self.style.transform = t;
        self
    }

    /// Append a filter.
    pub fn filter(mut self, f: Filter) -> Self {
        self.style.filters.push(f);
        self
    }

    /// Set the blend mode.
    pub fn blend(mut self, b: BlendMode) -> Self {
        self.style.blend = b;
        self
    }

    /// Append one child.
    pub fn child(mut self, node: VisualNode) -> Self {
        self.children.push(node);
        self
    }

    /// Append several children.
    pub fn children(mut self, nodes: impl IntoIterator<Item = VisualNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    /// Append a child only when present.
    pub fn maybe_child(mut self, node: Option<VisualNode>) -> Self {
        self.children.extend(node);
        self
    }

    /// Depth-first lookup by id.
    pub fn find(&self, id: &str) -> Option<&VisualNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Number of nodes in this subtree.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(VisualNode::count).sum::<usize>()
    }

    /// Concatenated text of a text node; empty for other kinds.
    pub fn text_content(&self) -> String {
        match &self.kind {
            NodeKind::Text { spans, .. } => spans.iter().map(|s| s.text.as_str()).collect(),
            _ => String::new(),
        }
    }
}

/// Full-canvas rectangle, the usual base for overlays.
pub fn full_frame(id: impl Into<String>, canvas: Canvas) -> VisualNode {
    VisualNode::rect(id, 0.0, 0.0, canvas.w(), canvas.h())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/tree.rs"]
mod tests;
