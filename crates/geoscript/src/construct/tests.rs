use super::*;
use crate::error::GeoError;
use crate::geom2::Coord;
use crate::registry::{Ref, StrokeStyle};
use crate::session::SessionCfg;
use nalgebra::vector;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn close(a: Coord, b: Coord, tol: f64) -> bool {
    (a - b).norm() < tol
}

fn point_at(s: &Session, name: &str) -> Coord {
    match s.registry().get(name) {
        Some(Entity::Point(p)) => p.coord,
        other => panic!("expected point {}, got {:?}", name, other),
    }
}

fn curve_at<'a>(s: &'a Session, name: &str) -> &'a crate::registry::Curve {
    s.registry().curve(name).unwrap()
}

fn with_points(pts: &[(&str, f64, f64)]) -> Session {
    let mut s = Session::default();
    for &(n, x, y) in pts {
        s.point(&Ref::xy(x, y), Some(n)).unwrap();
    }
    s
}

#[test]
fn points_get_generated_names() {
    let mut s = Session::default();
    assert_eq!(s.point(&Ref::xy(1.0, 2.0), None).unwrap(), "P1");
    assert_eq!(s.point(&Ref::xy(3.0, 4.0), None).unwrap(), "P2");
    assert_eq!(s.point(&Ref::xy(5.0, 6.0), Some("A")).unwrap(), "A");
    assert_eq!(point_at(&s, "P2"), vector![3.0, 4.0]);
    assert!(matches!(
        s.point(&Ref::name("A"), None),
        Err(GeoError::InvalidReference { .. })
    ));
}

#[test]
fn collision_leaves_existing_entity_untouched() {
    let mut s = with_points(&[("A", 1.0, 2.0)]);
    let err = s.point(&Ref::xy(5.0, 5.0), Some("A")).unwrap_err();
    assert_eq!(err.colliding_name(), Some("A"));
    assert_eq!(point_at(&s, "A"), vector![1.0, 2.0]);
    assert_eq!(s.registry().len(), 1);

    let err = s.line(&Ref::xy(0.0, 0.0), &Ref::xy(1.0, 1.0), Some("A")).unwrap_err();
    assert_eq!(err.colliding_name(), Some("A"));
    assert!(matches!(s.registry().get("A"), Some(Entity::Point(_))));
}

#[test]
fn line_is_black_and_solid_with_endpoint_tooltip() {
    let mut s = with_points(&[("A", 0.0, 0.0), ("B", 2.0, 1.0)]);
    let name = s.line(&Ref::name("A"), &Ref::name("B"), None).unwrap();
    assert_eq!(name, "Line1");
    let c = curve_at(&s, "Line1");
    assert_eq!(c.vertices(), &[vector![0.0, 0.0], vector![2.0, 1.0]]);
    assert_eq!(c.stroke.color, "#000");
    assert_eq!(c.stroke.style, StrokeStyle::Solid);
    assert_eq!(
        c.tooltip.as_deref(),
        Some("<strong>Line1</strong><br>Start: (0, 0)<br>End: (2, 1)")
    );
}

#[test]
fn segment_by_length_materializes_end_point() {
    let mut s = with_points(&[("A", 1.0, 1.0)]);
    let name = s.segment(&Ref::name("A"), &Ref::Number(3.0), Some("s")).unwrap();
    assert_eq!(name, "s");
    assert_eq!(curve_at(&s, "s").vertices()[1], vector![4.0, 1.0]);
    assert_eq!(point_at(&s, "P_end_s"), vector![4.0, 1.0]);
    match s.registry().get("P_end_s") {
        Some(Entity::Point(p)) => assert_eq!(p.color, "blue"),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(s.registry().names().collect::<Vec<_>>(), vec!["A", "s", "P_end_s"]);
    assert!(matches!(
        s.segment(&Ref::name("A"), &Ref::Number(0.0), None),
        Err(GeoError::InvalidParameter { .. })
    ));
}

#[test]
fn segment_from_literal_materializes_start_point() {
    let mut s = Session::default();
    let name = s.segment(&Ref::xy(1.0, 1.0), &Ref::xy(2.0, 2.0), None).unwrap();
    assert_eq!(name, "Segment1");
    assert_eq!(
        s.registry().names().collect::<Vec<_>>(),
        vec!["P_start_Segment1", "Segment1"]
    );
    assert_eq!(curve_at(&s, "Segment1").stroke.color, "#F00");
}

#[test]
fn failed_operations_do_not_mutate() {
    let mut s = Session::default();
    assert!(matches!(
        s.segment(&Ref::xy(0.0, 0.0), &Ref::name("missing"), None),
        Err(GeoError::NotFound { .. })
    ));
    assert!(s.registry().is_empty());
    assert!(matches!(
        s.polygon(&[Ref::xy(0.0, 0.0), Ref::xy(1.0, 0.0), Ref::name("nope")], None),
        Err(GeoError::NotFound { .. })
    ));
    assert!(s.registry().is_empty());
}

#[test]
fn infinite_line_is_clipped_to_default_window() {
    let mut s = Session::default();
    let name = s.infinite_line(&Ref::xy(0.0, 0.0), &Ref::xy(1.0, 1.0), None).unwrap();
    assert_eq!(name, "InfLine1");
    let c = curve_at(&s, "InfLine1");
    assert!(close(c.vertices()[0], vector![-10.0, -10.0], 1e-9));
    assert!(close(c.vertices()[1], vector![10.0, 10.0], 1e-9));
    assert_eq!(c.stroke.style, StrokeStyle::Dashed);
}

#[test]
fn infinite_line_uses_axis_override_and_line_direction() {
    let mut s = Session::default();
    s.set_axis_limits(-5.0, 5.0, -5.0, 5.0).unwrap();
    s.infinite_line(&Ref::xy(0.0, 0.0), &Ref::vector(1.0, 1.0), Some("g")).unwrap();
    let c = curve_at(&s, "g");
    assert!(close(c.vertices()[0], vector![-5.0, -5.0], 1e-9));
    assert!(close(c.vertices()[1], vector![5.0, 5.0], 1e-9));

    s.line(&Ref::xy(0.0, 0.0), &Ref::xy(1.0, 0.0), Some("L")).unwrap();
    s.infinite_line(&Ref::xy(0.0, 2.0), &Ref::name("L"), Some("h")).unwrap();
    let c = curve_at(&s, "h");
    assert!(close(c.vertices()[0], vector![-5.0, 2.0], 1e-9));
    assert!(close(c.vertices()[1], vector![5.0, 2.0], 1e-9));
}

#[test]
fn vector_defaults_to_origin() {
    let mut s = Session::default();
    s.vector(None, &Ref::xy(3.0, 4.0), None).unwrap();
    let c = curve_at(&s, "Vector1");
    assert_eq!(c.vertices(), &[vector![0.0, 0.0], vector![3.0, 4.0]]);
    assert_eq!(c.stroke.color, "#FF4500");
    assert!(c.tooltip.as_deref().unwrap().contains("Length: 5.00"));
}

#[test]
fn intersection_of_parallel_lines_fails_atomically() {
    let mut s = Session::default();
    s.line(&Ref::xy(0.0, 0.0), &Ref::xy(1.0, 1.0), Some("g")).unwrap();
    s.line(&Ref::xy(0.0, 1.0), &Ref::xy(1.0, 2.0), Some("h")).unwrap();
    assert_eq!(
        s.intersection(&Ref::name("g"), &Ref::name("h"), None),
        Err(GeoError::ParallelLines)
    );
    assert_eq!(s.registry().len(), 2);

    s.line(&Ref::xy(0.0, 2.0), &Ref::xy(2.0, 0.0), Some("k")).unwrap();
    let name = s.intersection(&Ref::name("g"), &Ref::name("k"), None).unwrap();
    assert_eq!(name, "SP1");
    assert!(close(point_at(&s, "SP1"), vector![1.0, 1.0], 1e-12));
}

#[test]
fn perpendicular_handles_vertical_base_line() {
    let mut s = Session::default();
    s.line(&Ref::xy(1.0, 0.0), &Ref::xy(1.0, 5.0), Some("v")).unwrap();
    s.perpendicular(&Ref::xy(3.0, 3.0), &Ref::name("v"), None).unwrap();
    let c = curve_at(&s, "Perpendicular1");
    assert_eq!(c.vertices()[0], vector![3.0, 3.0]);
    assert!(close(c.vertices()[1], vector![1.0, 3.0], 1e-12));
    assert_eq!(c.stroke.color, "#A0A");
}

#[test]
fn parallel_copies_direction_without_clipping() {
    let mut s = Session::default();
    s.line(&Ref::xy(0.0, 0.0), &Ref::xy(2.0, 1.0), Some("g")).unwrap();
    s.parallel(&Ref::xy(1.0, 1.0), &Ref::name("g"), None).unwrap();
    let c = curve_at(&s, "Parallel1");
    assert_eq!(c.vertices(), &[vector![1.0, 1.0], vector![3.0, 2.0]]);
    assert!(matches!(
        s.parallel(&Ref::xy(1.0, 1.0), &Ref::name("Parallel1"), Some("g")),
        Err(GeoError::NameCollision { .. })
    ));
}

#[test]
fn midpoint_modes() {
    let mut s = with_points(&[("A", 0.0, 0.0), ("B", 4.0, 0.0), ("C", 4.0, 4.0), ("D", 0.0, 4.0)]);
    s.midpoint(&[Ref::name("A"), Ref::name("B")], None).unwrap();
    assert_eq!(point_at(&s, "M1"), vector![2.0, 0.0]);

    let refs: Vec<Ref> = ["A", "B", "C", "D"].iter().map(|&n| Ref::name(n)).collect();
    s.polygon(&refs, Some("sq")).unwrap();
    s.midpoint(&[Ref::name("sq")], None).unwrap();
    assert!(close(point_at(&s, "M2"), vector![2.0, 2.0], 1e-12));

    s.midpoint(&[Ref::name("A"), Ref::name("B"), Ref::name("D")], None).unwrap();
    assert!(close(point_at(&s, "M3"), vector![4.0 / 3.0, 4.0 / 3.0], 1e-12));

    assert!(matches!(
        s.midpoint(&[Ref::name("A")], None),
        Err(GeoError::InvalidReference { .. })
    ));
}

#[test]
fn polygon_is_closed_and_filled() {
    let mut s = Session::default();
    assert_eq!(
        s.polygon(&[Ref::xy(0.0, 0.0), Ref::xy(1.0, 0.0)], None),
        Err(GeoError::TooFewVertices { needed: 3, got: 2 })
    );
    s.polygon(&[Ref::xy(0.0, 0.0), Ref::xy(1.0, 0.0), Ref::xy(0.0, 1.0)], None)
        .unwrap();
    let c = curve_at(&s, "Polygon1");
    assert!(c.is_closed());
    assert_eq!(c.vertices().len(), 4);
    assert_eq!(c.fill.as_deref(), Some("rgba(0,170,0,0.3)"));
    assert_eq!(s.registry().get("Polygon1").unwrap().kind(), "polygon");
}

#[test]
fn regular_polygon_from_vertex_and_direction() {
    let mut s = Session::default();
    s.regular_polygon(&Ref::xy(0.0, 0.0), &Ref::xy(1.0, 0.0), 4, None, None).unwrap();
    let ring = curve_at(&s, "RegularPolygon1").ring().to_vec();
    assert_eq!(ring.len(), 4);
    assert!(close(ring[0], vector![1.0, 0.0], 1e-12));
    assert!(close(ring[1], vector![0.0, 1.0], 1e-12));

    s.regular_polygon(
        &Ref::xy(0.0, 0.0),
        &Ref::xy(2.0, 0.0),
        3,
        Some(&Ref::vector(0.0, 1.0)),
        Some("tri"),
    )
    .unwrap();
    assert!(close(curve_at(&s, "tri").vertices()[0], vector![0.0, 2.0], 1e-12));

    assert_eq!(
        s.regular_polygon(&Ref::xy(0.0, 0.0), &Ref::xy(1.0, 0.0), 2, None, None),
        Err(GeoError::TooFewVertices { needed: 3, got: 2 })
    );
}

#[test]
fn circle_radius_modes() {
    let mut s = with_points(&[("M", 1.0, 1.0), ("Q", 1.0, 4.0)]);
    s.circle(&Ref::name("M"), &CircleSpec::Radius(2.0), None).unwrap();
    let c = curve_at(&s, "Circle1");
    assert_eq!(c.vertices().len(), 101);
    assert!(c.is_closed());
    assert!(c
        .vertices()
        .iter()
        .all(|v| ((v - vector![1.0, 1.0]).norm() - 2.0).abs() < 1e-12));

    s.segment(&Ref::name("M"), &Ref::name("Q"), Some("r")).unwrap();
    s.circle(&Ref::name("M"), &CircleSpec::Segment("r".into()), None).unwrap();
    s.circle(&Ref::name("M"), &CircleSpec::Through(Ref::name("Q")), None).unwrap();
    for name in ["Circle2", "Circle3"] {
        let v = curve_at(&s, name).vertices()[0];
        assert!(close(v, vector![4.0, 1.0], 1e-12));
    }

    for bad in [0.0, -1.0, f64::NAN] {
        assert!(matches!(
            s.circle(&Ref::name("M"), &CircleSpec::Radius(bad), None),
            Err(GeoError::InvalidParameter { .. })
        ));
    }
}

#[test]
fn circle_through_three_points() {
    let mut s = Session::default();
    s.circle_through(&Ref::xy(0.0, 0.0), &Ref::xy(2.0, 0.0), &Ref::xy(0.0, 2.0), None)
        .unwrap();
    let c = curve_at(&s, "Circle1");
    let r = 2f64.sqrt();
    assert!(c
        .vertices()
        .iter()
        .all(|v| ((v - vector![1.0, 1.0]).norm() - r).abs() < 1e-9));
    // Only the circle is registered.
    assert_eq!(s.registry().len(), 1);

    assert_eq!(
        s.circle_through(&Ref::xy(0.0, 0.0), &Ref::xy(1.0, 1.0), &Ref::xy(2.0, 2.0), None),
        Err(GeoError::ParallelLines)
    );
}

#[test]
fn ellipse_axes_and_rotation() {
    let mut s = Session::default();
    s.ellipse(&Ref::xy(0.0, 0.0), 3.0, 1.0, 90.0, None).unwrap();
    let c = curve_at(&s, "Ellipse1");
    assert_eq!(c.vertices().len(), 101);
    assert!(close(c.vertices()[0], vector![0.0, 3.0], 1e-12));
    assert_eq!(c.stroke.color, "#800080");
    assert!(matches!(
        s.ellipse(&Ref::xy(0.0, 0.0), 0.0, 1.0, 0.0, None),
        Err(GeoError::InvalidParameter { .. })
    ));
}

#[test]
fn distance_registers_ruler_and_label() {
    let mut s = with_points(&[("A", 0.0, 0.0), ("B", 3.0, 4.0)]);
    let d = s.distance(&Ref::name("A"), &Ref::name("B")).unwrap();
    assert_eq!(d, 5.0);
    let ruler = curve_at(&s, "Ruler_A_B");
    assert_eq!(ruler.stroke.width, 1.0);
    assert_eq!(ruler.stroke.style, StrokeStyle::Dashed);
    match s.registry().get("Distance_A_B") {
        Some(Entity::Text(t)) => {
            assert_eq!(t.content, "5.00");
            assert_eq!(t.coord, vector![1.5, 2.0]);
        }
        other => panic!("unexpected {:?}", other),
    }

    // Repeated measurement gets fresh names instead of overwriting.
    s.distance(&Ref::name("A"), &Ref::name("B")).unwrap();
    assert!(s.registry().contains("Ruler_A_B2"));
    assert!(s.registry().contains("Distance_A_B2"));

    s.distance(&Ref::xy(0.0, 0.0), &Ref::name("B")).unwrap();
    assert!(s.registry().contains("Ruler1"));
    assert!(s.registry().contains("Distance1"));
}

#[test]
fn right_angle_reads_ninety() {
    let mut s = Session::default();
    let m = s
        .angle(&Ref::xy(1.0, 0.0), &Ref::xy(0.0, 0.0), &Ref::xy(0.0, 1.0), None)
        .unwrap();
    assert_eq!(m.display, "90.00");
    assert!(s.registry().contains("Angle1_arc"));
    match s.registry().get("Angle1_label") {
        Some(Entity::Text(t)) => {
            assert_eq!(t.content, "90.00°");
            let h = 1.5 / 2f64.sqrt();
            assert!(close(t.coord, vector![h, h], 1e-12));
        }
        other => panic!("unexpected {:?}", other),
    }
    let arc = curve_at(&s, "Angle1_arc");
    assert_eq!(arc.vertices().len(), 21);
    assert!(close(*arc.vertices().last().unwrap(), vector![0.0, 1.0], 1e-12));

    // Second angle gets a fresh base name.
    s.angle(&Ref::xy(0.0, 1.0), &Ref::xy(0.0, 0.0), &Ref::xy(1.0, 0.0), None)
        .unwrap();
    assert!(s.registry().contains("Angle2_arc"));
}

#[test]
fn angle_is_at_most_180_and_rejects_zero_legs() {
    let mut s = Session::default();
    let m = s
        .angle(&Ref::xy(1.0, 0.0), &Ref::xy(0.0, 0.0), &Ref::xy(-1.0, -0.001), Some("w"))
        .unwrap();
    assert!(m.degrees <= 180.0 && m.degrees > 179.0);
    assert!(matches!(
        s.angle(&Ref::xy(0.0, 0.0), &Ref::xy(0.0, 0.0), &Ref::xy(1.0, 0.0), None),
        Err(GeoError::DegenerateLine { .. })
    ));
    assert!(matches!(
        s.angle(&Ref::xy(1.0, 0.0), &Ref::xy(0.0, 0.0), &Ref::xy(0.0, 1.0), Some("w")),
        Err(GeoError::NameCollision { .. })
    ));
}

#[test]
fn text_label_uses_configured_font() {
    let mut s = Session::default();
    s.text(&Ref::xy(1.0, 1.0), "hello", None).unwrap();
    match s.registry().get("Text1") {
        Some(Entity::Text(t)) => {
            assert_eq!(t.content, "hello");
            assert_eq!(t.font_size, 14.0);
            assert!(t.background.is_some());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn transforms_in_place_and_as_copy() {
    let mut s = with_points(&[("A", 1.0, 0.0)]);
    assert_eq!(s.translate("A", 1.0, 2.0, None).unwrap(), "A");
    assert_eq!(point_at(&s, "A"), vector![2.0, 2.0]);

    s.line(&Ref::xy(0.0, 0.0), &Ref::xy(1.0, 0.0), Some("g")).unwrap();
    assert_eq!(s.rotate("g", &Ref::xy(0.0, 0.0), 90.0, Some("g2")).unwrap(), "g2");
    let g2 = curve_at(&s, "g2");
    assert!(close(g2.vertices()[1], vector![0.0, 1.0], 1e-12));
    assert!(g2.tooltip.as_deref().unwrap().starts_with("<strong>g2</strong>"));
    // The original stays in place.
    assert_eq!(curve_at(&s, "g").vertices()[1], vector![1.0, 0.0]);

    let err = s.reflect("g", &Ref::name("A"), Some("A")).unwrap_err();
    assert_eq!(err.colliding_name(), Some("A"));
    assert_eq!(point_at(&s, "A"), vector![2.0, 2.0]);

    s.text(&Ref::xy(1.0, 1.0), "t", Some("T")).unwrap();
    s.reflect("T", &Ref::xy(0.0, 0.0), None).unwrap();
    match s.registry().get("T") {
        Some(Entity::Text(t)) => assert_eq!(t.coord, vector![-1.0, -1.0]),
        other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(
        s.translate("missing", 1.0, 1.0, None),
        Err(GeoError::NotFound { .. })
    ));
}

#[test]
fn recolor_touches_stroke_and_fill() {
    let mut s = Session::default();
    s.circle(&Ref::xy(0.0, 0.0), &CircleSpec::Radius(1.0), Some("k")).unwrap();
    s.line(&Ref::xy(0.0, 0.0), &Ref::xy(1.0, 0.0), Some("g")).unwrap();
    s.recolor("k", "#123").unwrap();
    s.recolor("g", "#456").unwrap();
    let k = curve_at(&s, "k");
    assert_eq!(k.stroke.color, "#123");
    assert_eq!(k.fill.as_deref(), Some("#123"));
    let g = curve_at(&s, "g");
    assert_eq!(g.stroke.color, "#456");
    assert_eq!(g.fill, None);
    assert!(matches!(s.recolor("nope", "#000"), Err(GeoError::NotFound { .. })));
}

#[test]
fn session_settings_and_init_reset() {
    let mut s = with_points(&[("A", 0.0, 0.0)]);
    s.set_title("Demo");
    s.set_axes_visible(false);
    assert!(matches!(
        s.set_axis_limits(5.0, -5.0, -5.0, 5.0),
        Err(GeoError::InvalidParameter { .. })
    ));
    assert!(s.axis_override().is_none());
    s.set_axis_limits(-5.0, 5.0, -5.0, 5.0).unwrap();
    assert_eq!(s.rename("A", "B").unwrap(), "B");

    s.init();
    assert!(s.registry().is_empty());
    assert_eq!(s.title(), "");
    assert!(s.axis_override().is_none());
    assert!(s.axes_visible());
}

#[test]
fn random_distances_match_kernel() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut s = Session::default();
    for i in 0..50 {
        let a = vector![rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)];
        let b = vector![rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)];
        let an = format!("a{}", i);
        let bn = format!("b{}", i);
        s.point(&Ref::Coord(a), Some(&an)).unwrap();
        s.point(&Ref::Coord(b), Some(&bn)).unwrap();
        let d = s.distance(&Ref::name(an), &Ref::name(bn)).unwrap();
        assert!((d - (a - b).norm()).abs() < 1e-12);
    }
    // two points, a ruler and a label per round
    assert_eq!(s.registry().len(), 200);
}

#[test]
fn segment_with_negative_length_extends_left() {
    let mut s = with_points(&[("A", 1.0, 1.0)]);
    s.segment(&Ref::name("A"), &Ref::Number(-2.5), Some("s")).unwrap();
    assert_eq!(curve_at(&s, "s").vertices()[1], vector![-1.5, 1.0]);
    assert_eq!(point_at(&s, "P_end_s"), vector![-1.5, 1.0]);
}

#[test]
fn oversized_vertex_counts_are_rejected() {
    let mut s = Session::default();
    let err = s
        .regular_polygon(&Ref::xy(0.0, 0.0), &Ref::xy(1.0, 0.0), 1_000_000, None, None)
        .unwrap_err();
    assert_eq!(err.kind(), "InvalidParameter");
    assert!(s.registry().is_empty());
    s.regular_polygon(&Ref::xy(0.0, 0.0), &Ref::xy(1.0, 0.0), MAX_VERTICES, None, Some("big"))
        .unwrap();
    assert_eq!(curve_at(&s, "big").ring().len(), MAX_VERTICES);

    let mut s = Session::new(SessionCfg {
        curve_segments: MAX_VERTICES + 1,
        arc_segments: MAX_VERTICES + 1,
        ..SessionCfg::default()
    });
    assert!(matches!(
        s.circle(&Ref::xy(0.0, 0.0), &CircleSpec::Radius(1.0), None),
        Err(GeoError::InvalidParameter { .. })
    ));
    assert!(matches!(
        s.ellipse(&Ref::xy(0.0, 0.0), 2.0, 1.0, 0.0, None),
        Err(GeoError::InvalidParameter { .. })
    ));
    assert!(matches!(
        s.angle(&Ref::xy(1.0, 0.0), &Ref::xy(0.0, 0.0), &Ref::xy(0.0, 1.0), None),
        Err(GeoError::InvalidParameter { .. })
    ));
    assert!(s.registry().is_empty());
}

#[test]
fn config_validation_bounds_sampling() {
    assert_eq!(SessionCfg::default().validate(), Ok(()));
    let bad = [
        SessionCfg { curve_segments: 0, ..SessionCfg::default() },
        SessionCfg { arc_segments: MAX_VERTICES + 1, ..SessionCfg::default() },
        SessionCfg { arc_radius: f64::NAN, ..SessionCfg::default() },
        SessionCfg { label_font_size: 0.0, ..SessionCfg::default() },
        SessionCfg { padding: -1.0, ..SessionCfg::default() },
    ];
    for cfg in bad {
        assert!(matches!(cfg.validate(), Err(GeoError::InvalidParameter { .. })), "{:?}", cfg);
    }
}

#[test]
fn transforms_that_overflow_leave_registry_unchanged() {
    let mut s = with_points(&[("A", 1e308, 0.0)]);
    assert!(matches!(
        s.translate("A", 1e308, 0.0, None),
        Err(GeoError::InvalidParameter { .. })
    ));
    assert_eq!(point_at(&s, "A"), vector![1e308, 0.0]);
    assert!(matches!(
        s.translate("A", 1e308, 0.0, Some("A2")),
        Err(GeoError::InvalidParameter { .. })
    ));
    assert!(!s.registry().contains("A2"));

    s.line(&Ref::xy(0.0, 0.0), &Ref::xy(1e300, 0.0), Some("g")).unwrap();
    assert!(matches!(
        s.rotate("g", &Ref::xy(-1e308, 0.0), 180.0, None),
        Err(GeoError::InvalidParameter { .. })
    ));
    assert_eq!(curve_at(&s, "g").vertices()[1], vector![1e300, 0.0]);
    assert!(matches!(
        s.segment(&Ref::name("A"), &Ref::Number(1e308), None),
        Err(GeoError::InvalidParameter { .. })
    ));
    assert_eq!(s.registry().len(), 2);
}

#[test]
fn angle_arc_tooltip_is_titled_by_arc_name() {
    let mut s = Session::default();
    s.angle(&Ref::xy(1.0, 0.0), &Ref::xy(0.0, 0.0), &Ref::xy(0.0, 1.0), None)
        .unwrap();
    let tip = curve_at(&s, "Angle1_arc").tooltip.clone().unwrap();
    assert_eq!(tip, "<strong>Angle1_arc</strong><br>Angle: 90.00°");

    s.rename("Angle1_arc", "corner").unwrap();
    let tip = curve_at(&s, "corner").tooltip.clone().unwrap();
    assert!(tip.starts_with("<strong>corner</strong>"));
}

fn coord() -> impl Strategy<Value = (f64, f64)> {
    (-100.0..100.0f64, -100.0..100.0f64)
}

proptest! {
    #[test]
    fn distance_is_symmetric(a in coord(), b in coord()) {
        let mut s = with_points(&[("A", a.0, a.1), ("B", b.0, b.1)]);
        let ab = s.distance(&Ref::name("A"), &Ref::name("B")).unwrap();
        let ba = s.distance(&Ref::name("B"), &Ref::name("A")).unwrap();
        prop_assert!(ab >= 0.0);
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn rotate_then_unrotate_restores_polygon(
        a in coord(), b in coord(), c in coord(), pivot in coord(), deg in -360.0..360.0f64
    ) {
        let mut s = Session::default();
        s.polygon(&[a.into(), b.into(), c.into()], Some("poly")).unwrap();
        let before = curve_at(&s, "poly").vertices().to_vec();
        s.rotate("poly", &pivot.into(), deg, None).unwrap();
        s.rotate("poly", &pivot.into(), -deg, None).unwrap();
        for (p, q) in before.iter().zip(curve_at(&s, "poly").vertices()) {
            prop_assert!(close(*p, *q, 1e-6));
        }
    }

    #[test]
    fn reflect_twice_is_identity(p in coord(), mirror in coord()) {
        let mut s = with_points(&[("A", p.0, p.1)]);
        s.reflect("A", &mirror.into(), None).unwrap();
        s.reflect("A", &mirror.into(), None).unwrap();
        prop_assert!(close(point_at(&s, "A"), vector![p.0, p.1], 1e-9));
    }

    #[test]
    fn collision_never_mutates(p in coord(), q in coord()) {
        let mut s = with_points(&[("X", p.0, p.1)]);
        let err = s.circle(&q.into(), &CircleSpec::Radius(1.0), Some("X")).unwrap_err();
        prop_assert_eq!(err.colliding_name(), Some("X"));
        prop_assert_eq!(point_at(&s, "X"), vector![p.0, p.1]);
        prop_assert_eq!(s.registry().len(), 1);
    }
}
