//! Visual tree to SVG 1.1 text.
//!
//! Output is deterministic: gradients and filters are numbered in document order and every
//! number is rounded to three decimals, so identical trees give byte-identical documents.

use std::fmt::Write;

use crate::{
    foundation::{color::Color, core::Point},
    scene::tree::{
        BlendMode, Filter, LineCap, NodeKind, Paint, Stroke, Style, TextAnchor, TextSpan,
        VisualNode, VisualTree,
    },
};

/// Serialize `tree` as a standalone SVG document of the canvas size.
pub fn to_svg(tree: &VisualTree) -> String {
    let mut w = SvgWriter::default();
    w.node(&tree.root);

    let (width, height) = (tree.canvas.width, tree.canvas.height);
    let mut out = String::with_capacity(w.body.len() + w.defs.len() + 256);
    // Writing into a String is infallible; the fmt::Result is discarded throughout.
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    if !w.defs.is_empty() {
        let _ = write!(out, "<defs>{}</defs>", w.defs);
    }
    let _ = write!(
        out,
        r#"<rect width="{width}" height="{height}"{}/>"#,
        paint_attrs("fill", tree.background)
    );
    out.push_str(&w.body);
    out.push_str("</svg>");
    out
}

#[derive(Default)]
struct SvgWriter {
    defs: String,
    body: String,
    gradients: usize,
    filters: usize,
}

impl SvgWriter {
    fn node(&mut self, n: &VisualNode) {
        let common = self.common_attrs(n);
        match (&n.kind, n.children.is_empty()) {
            (NodeKind::Group, _) => {
                let _ = write!(self.body, "<g{common}>");
                self.children(n);
                self.body.push_str("</g>");
            }
            (_, true) => self.shape(n, &common),
            (_, false) => {
                let _ = write!(self.body, "<g{common}>");
                self.shape(n, "");
                self.children(n);
                self.body.push_str("</g>");
            }
        }
    }

    fn children(&mut self, n: &VisualNode) {
        for c in &n.children {
            self.node(c);
        }
    }

    fn common_attrs(&mut self, n: &VisualNode) -> String {
        let style = &n.style;
        let mut a = format!(r#" id="{}""#, escape(&n.id));
        if !style.transform.is_identity() {
            let [m0, m1, m2, m3, m4, m5] = style.transform.to_affine().as_coeffs();
            let _ = write!(
                a,
                r#" transform="matrix({} {} {} {} {} {})""#,
                num(m0),
                num(m1),
                num(m2),
                num(m3),
                num(m4),
                num(m5)
            );
        }
        if style.opacity < 1.0 {
            let _ = write!(a, r#" opacity="{}""#, num(style.opacity));
        }
        if !style.filters.is_empty() {
            let id = self.filter(&style.filters);
            let _ = write!(a, r#" filter="url(#{id})""#);
        }
        match style.blend {
            BlendMode::Normal => {}
            BlendMode::Screen => a.push_str(r#" style="mix-blend-mode:screen""#),
            BlendMode::Overlay => a.push_str(r#" style="mix-blend-mode:overlay""#),
        }
        a
    }

    fn shape(&mut self, n: &VisualNode, common: &str) {
        let paint = self.style_paint(&n.style, matches!(n.kind, NodeKind::Text { .. }));
        match &n.kind {
            NodeKind::Group => {}
            NodeKind::Rect {
                x,
                y,
                width,
                height,
                corner_radius,
            } => {
                let _ = write!(
                    self.body,
                    r#"<rect{common} x="{}" y="{}" width="{}" height="{}""#,
                    num(*x),
                    num(*y),
                    num(*width),
                    num(*height)
                );
                if *corner_radius > 0.0 {
                    let r = num(*corner_radius);
                    let _ = write!(self.body, r#" rx="{r}" ry="{r}""#);
                }
                let _ = write!(self.body, "{paint}/>");
            }
            NodeKind::Ellipse { cx, cy, rx, ry } => {
                let _ = write!(
                    self.body,
                    r#"<ellipse{common} cx="{}" cy="{}" rx="{}" ry="{}"{paint}/>"#,
                    num(*cx),
                    num(*cy),
                    num(*rx),
                    num(*ry)
                );
            }
            NodeKind::Path { d } => {
                let _ = write!(self.body, r#"<path{common} d="{}"{paint}/>"#, escape(d));
            }
            NodeKind::Polyline { points } => {
                let _ = write!(
                    self.body,
                    r#"<polyline{common} points="{}"{paint}/>"#,
                    points_attr(points)
                );
            }
            NodeKind::Text {
                x,
                y,
                spans,
                font,
                anchor,
            } => {
                let anchor = match anchor {
                    TextAnchor::Start => "start",
                    TextAnchor::Middle => "middle",
                    TextAnchor::End => "end",
                };
                let _ = write!(
                    self.body,
                    r#"<text{common} x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" text-anchor="{anchor}" dominant-baseline="central""#,
                    num(*x),
                    num(*y),
                    escape(&font.family),
                    num(font.size),
                    font.weight
                );
                if font.letter_spacing != 0.0 {
                    let _ = write!(self.body, r#" letter-spacing="{}""#, num(font.letter_spacing));
                }
                let _ = write!(self.body, "{paint}>");
                for span in spans {
                    self.span(span);
                }
                self.body.push_str("</text>");
            }
        }
    }

    fn span(&mut self, span: &TextSpan) {
        match span.fill {
            Some(c) => {
                let _ = write!(
                    self.body,
                    "<tspan{}>{}</tspan>",
                    paint_attrs("fill", c),
                    escape(&span.text)
                );
            }
            None => {
                let _ = write!(self.body, "<tspan>{}</tspan>", escape(&span.text));
            }
        }
    }

    // Text without a fill keeps the SVG default; other shapes get `fill="none"`.
    fn style_paint(&mut self, style: &Style, is_text: bool) -> String {
        let mut a = match &style.fill {
            Some(Paint::Solid { color }) => paint_attrs("fill", *color),
            Some(gradient) => {
                let id = self.gradient(gradient);
                format!(r#" fill="url(#{id})""#)
            }
            None if is_text => String::new(),
            None => r#" fill="none""#.to_owned(),
        };
        if let Some(Stroke { color, width, cap }) = &style.stroke {
            a.push_str(&paint_attrs("stroke", *color));
            let _ = write!(a, r#" stroke-width="{}""#, num(*width));
            if *cap == LineCap::Round {
                a.push_str(r#" stroke-linecap="round""#);
            }
        }
        a
    }

    fn gradient(&mut self, paint: &Paint) -> String {
        let id = format!("paint-{}", self.gradients);
        self.gradients += 1;
        let (open, close, stops) = match paint {
            Paint::Solid { .. } => return id,
            Paint::Linear { start, end, stops } => (
                format!(
                    r#"<linearGradient id="{id}" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                    num(start.x),
                    num(start.y),
                    num(end.x),
                    num(end.y)
                ),
                "</linearGradient>",
                stops,
            ),
            Paint::Radial {
                center,
                radius,
                stops,
            } => (
                format!(
                    r#"<radialGradient id="{id}" cx="{}" cy="{}" r="{}">"#,
                    num(center.x),
                    num(center.y),
                    num(*radius)
                ),
                "</radialGradient>",
                stops,
            ),
        };
        self.defs.push_str(&open);
        for stop in stops {
            let _ = write!(
                self.defs,
                r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
                num(stop.offset),
                stop.color.to_hex_rgb(),
                num(stop.color.alpha())
            );
        }
        self.defs.push_str(close);
        id
    }

    fn filter(&mut self, chain: &[Filter]) -> String {
        let id = format!("fx-{}", self.filters);
        self.filters += 1;
        let _ = write!(
            self.defs,
            r#"<filter id="{id}" x="-50%" y="-50%" width="200%" height="200%" color-interpolation-filters="sRGB">"#
        );
        let mut prev = "SourceGraphic".to_owned();
        for (i, f) in chain.iter().enumerate() {
            let out = format!("r{i}");
            match f {
                Filter::Blur { std_dev } => {
                    let _ = write!(
                        self.defs,
                        r#"<feGaussianBlur in="{prev}" stdDeviation="{}" result="{out}"/>"#,
                        num(*std_dev)
                    );
                }
                Filter::DropShadow {
                    dx,
                    dy,
                    std_dev,
                    color,
                } => {
                    let _ = write!(
                        self.defs,
                        concat!(
                            r#"<feGaussianBlur in="{prev}" stdDeviation="{sd}" result="b{i}"/>"#,
                            r#"<feOffset in="b{i}" dx="{dx}" dy="{dy}" result="o{i}"/>"#,
                            r#"<feFlood flood-color="{c}" flood-opacity="{a}" result="c{i}"/>"#,
                            r#"<feComposite in="c{i}" in2="o{i}" operator="in" result="s{i}"/>"#,
                            r#"<feMerge result="{out}"><feMergeNode in="s{i}"/><feMergeNode in="{prev}"/></feMerge>"#,
                        ),
                        prev = prev,
                        sd = num(*std_dev),
                        i = i,
                        dx = num(*dx),
                        dy = num(*dy),
                        c = color.to_hex_rgb(),
                        a = num(color.alpha()),
                        out = out,
                    );
                }
            }
            prev = out;
        }
        self.defs.push_str("</filter>");
        id
    }
}

fn paint_attrs(attr: &str, c: Color) -> String {
    let mut a = format!(r#" {attr}="{}""#, c.to_hex_rgb());
    if c.alpha() < 1.0 {
        let _ = write!(a, r#" {attr}-opacity="{}""#, num(c.alpha()));
    }
    a
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 {
        return "0".to_owned();
    }
    format!("{r}")
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/export/svg.rs"]
mod tests;
