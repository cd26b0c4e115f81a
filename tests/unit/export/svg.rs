use super::*;
use crate::foundation::core::{Canvas, FrameIndex, Transform2D};
use crate::scene::tree::{Font, GradientStop};

fn tree(root: VisualNode) -> VisualTree {
    VisualTree {
        composition: "test".to_owned(),
        frame: FrameIndex(0),
        canvas: Canvas {
            width: 100,
            height: 50,
        },
        background: Color::rgba8(0x1a, 0x1a, 0x2e, 1.0),
        root,
    }
}

#[test]
fn document_header_and_background() {
    let svg = to_svg(&tree(VisualNode::group("root")));
    assert!(svg.starts_with(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50" viewBox="0 0 100 50">"#
    ));
    assert!(svg.contains(r##"<rect width="100" height="50" fill="#1a1a2e"/>"##));
    assert!(svg.contains(r#"<g id="root"></g>"#));
    assert!(!svg.contains("<defs>"));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn shapes_carry_style_attributes() {
    let root = VisualNode::group("root")
        .child(
            VisualNode::rect("box", 1.0, 2.0, 10.0, 5.0)
                .corner_radius(2.0)
                .fill_color(Color::WHITE.with_alpha(0.5))
                .opacity(0.25)
                .transform(Transform2D::translate(3.0, 4.0))
                .blend(BlendMode::Screen),
        )
        .child(VisualNode::circle("dot", 5.0, 5.0, 1.5).stroke(Color::BLACK, 2.0, LineCap::Round));
    let svg = to_svg(&tree(root));
    assert!(svg.contains(
        r##"<rect id="box" transform="matrix(1 0 0 1 3 4)" opacity="0.25" style="mix-blend-mode:screen" x="1" y="2" width="10" height="5" rx="2" ry="2" fill="#ffffff" fill-opacity="0.5"/>"##
    ));
    assert!(svg.contains(
        r##"<ellipse id="dot" cx="5" cy="5" rx="1.5" ry="1.5" fill="none" stroke="#000000" stroke-width="2" stroke-linecap="round"/>"##
    ));
}

#[test]
fn gradients_and_filters_get_sequential_ids() {
    let root = VisualNode::group("root")
        .filter(Filter::Blur { std_dev: 2.0 })
        .child(
            VisualNode::rect("a", 0.0, 0.0, 10.0, 10.0).fill(Paint::horizontal(vec![
                GradientStop::new(0.0, Color::TRANSPARENT),
                GradientStop::new(1.0, Color::WHITE),
            ])),
        )
        .child(
            VisualNode::rect("b", 0.0, 0.0, 10.0, 10.0)
                .fill(Paint::radial(Point::new(0.5, 0.5), 0.5, vec![]))
                .filter(Filter::glow(4.0, Color::WHITE)),
        );
    let svg = to_svg(&tree(root));
    assert!(svg.contains(r#"<g id="root" filter="url(#fx-0)">"#));
    assert!(svg.contains(r#"fill="url(#paint-0)""#));
    assert!(svg.contains(r#"<radialGradient id="paint-1" cx="0.5" cy="0.5" r="0.5">"#));
    assert!(svg.contains(r#"filter="url(#fx-1)""#));
    assert!(svg.contains(r#"<feGaussianBlur in="SourceGraphic" stdDeviation="2" result="r0"/>"#));
    assert!(svg.contains(r#"<feMerge result="r0"><feMergeNode in="s0"/><feMergeNode in="SourceGraphic"/></feMerge>"#));
    assert!(svg.contains(r##"<stop offset="0" stop-color="#000000" stop-opacity="0"/>"##));
}

#[test]
fn text_spans_are_escaped_and_colored() {
    let root = VisualNode::text(
        "t",
        50.0,
        25.0,
        vec![
            TextSpan::plain("a<b & "),
            TextSpan::colored("AI", Color::rgba8(0x1a, 0x5a, 0x9c, 1.0)),
        ],
        Font::new("Arial, sans-serif", 20.0).weight(700).spacing(1.5),
    )
    .fill_color(Color::WHITE);
    let svg = to_svg(&tree(root));
    assert!(svg.contains(
        r##"<text id="t" x="50" y="25" font-family="Arial, sans-serif" font-size="20" font-weight="700" text-anchor="middle" dominant-baseline="central" letter-spacing="1.5" fill="#ffffff">"##
    ));
    assert!(svg.contains("<tspan>a&lt;b &amp; </tspan>"));
    assert!(svg.contains(r##"<tspan fill="#1a5a9c">AI</tspan>"##));
}

#[test]
fn numbers_are_rounded_and_non_finite_is_zero() {
    assert_eq!(num(1.0 / 3.0), "0.333");
    assert_eq!(num(-0.0001), "0");
    assert_eq!(num(f64::NAN), "0");
    assert_eq!(num(12.0), "12");
}
