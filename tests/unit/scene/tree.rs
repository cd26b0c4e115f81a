use super::*;

fn sample_tree() -> VisualTree {
    let root = VisualNode::group("root")
        .child(
            VisualNode::group("row")
                .child(VisualNode::text(
                    "glyph-0",
                    0.0,
                    0.0,
                    vec![TextSpan::plain("a")],
                    Font::default(),
                ))
                .child(VisualNode::circle("dot", 5.0, 5.0, 2.0).opacity(0.5)),
        )
        .maybe_child(None);
    VisualTree {
        composition: "test".to_owned(),
        frame: FrameIndex(3),
        canvas: Canvas {
            width: 10,
            height: 10,
        },
        background: Color::BLACK,
        root,
    }
}

#[test]
fn find_walks_depth_first() {
    let tree = sample_tree();
    assert_eq!(tree.node_count(), 4);
    assert_eq!(tree.find("glyph-0").unwrap().text_content(), "a");
    assert_eq!(tree.find("dot").unwrap().style.opacity, 0.5);
    assert!(tree.find("missing").is_none());
}

#[test]
fn opacity_is_clamped() {
    assert_eq!(VisualNode::group("g").opacity(1.7).style.opacity, 1.0);
    assert_eq!(VisualNode::group("g").opacity(-0.2).style.opacity, 0.0);
    assert_eq!(VisualNode::group("g").opacity(f64::NAN).style.opacity, 0.0);
}

#[test]
fn kind_specific_setters_ignore_other_kinds() {
    let g = VisualNode::group("g").corner_radius(4.0).anchor(TextAnchor::Start);
    assert_eq!(g.kind, NodeKind::Group);
    let r = VisualNode::rect("r", 0.0, 0.0, 1.0, 1.0).corner_radius(4.0);
    assert!(matches!(r.kind, NodeKind::Rect { corner_radius, .. } if corner_radius == 4.0));
}

#[test]
fn serializes_with_type_tags() {
    let v = serde_json::to_value(sample_tree()).unwrap();
    assert_eq!(v["root"]["children"][0]["children"][0]["kind"]["type"], "text");
    assert_eq!(v["root"]["children"][0]["children"][1]["kind"]["type"], "ellipse");
    assert_eq!(v["frame"], 3);
}
