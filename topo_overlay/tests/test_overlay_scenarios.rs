mod test_utils;

use test_utils::*;
use topo_overlay::{
    Coord, Dimension, Geometry, LineString, NodingStrategy, OverlayError, OverlayNg, OverlayOp,
    PrecisionModel, assert_fuzzy_eq,
    core::traits::FuzzyEq,
    overlay, polygon,
    robust::{LadderStep, ladder_steps},
};

#[test]
fn difference_of_equal_polygons_is_empty() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let result = overlay_floating(&a, &a.clone(), OverlayOp::Difference);
    assert!(result.is_empty());
    assert_eq!(result.dimension(), Dimension::Area);
}

#[test]
fn disjoint_intersection_is_empty() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(5.0, 5.0, 6.0, 6.0);
    let result = overlay_floating(&a, &b, OverlayOp::Intersection);
    assert!(result.is_empty());
    assert_eq!(result.dimension(), Dimension::Area);
}

#[test]
fn disjoint_union_keeps_both() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(5.0, 5.0, 6.0, 6.0);
    let result = overlay_floating(&a, &b, OverlayOp::Union);
    assert!(matches!(result, Geometry::MultiPolygon(ref polys) if polys.len() == 2));
    assert_fuzzy_eq!(result.area(), 2.0);

    let diff = overlay_floating(&a, &b, OverlayOp::Difference);
    assert_equals_norm(&diff, &a);
}

#[test]
fn shared_edge_is_dissolved() {
    let a = rect(0.0, 0.0, 2.0, 2.0);
    let b = Geometry::Polygon(polygon![[
        (2.0, 0.0),
        (4.0, 0.0),
        (4.0, 2.0),
        (2.0, 2.0),
        (2.0, 0.0)
    ]]);
    let result = overlay_floating(&a, &b, OverlayOp::Union);
    let expected = Geometry::Polygon(polygon![[
        (0.0, 0.0),
        (2.0, 0.0),
        (4.0, 0.0),
        (4.0, 2.0),
        (2.0, 2.0),
        (0.0, 2.0),
        (0.0, 0.0)
    ]]);
    assert_equals_norm(&result, &expected);
}

#[test]
fn nearly_coincident_boundaries_union() {
    // the shared side differs by about an ulp at both ends
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = Geometry::Polygon(polygon![[
        (1.0 + f64::EPSILON, 0.0),
        (2.0, 0.0),
        (2.0, 1.0),
        (1.0 - f64::EPSILON / 2.0, 1.0),
        (1.0 + f64::EPSILON, 0.0)
    ]]);
    let result = overlay(&a, Some(&b), OverlayOp::Union, PrecisionModel::Floating)
        .expect("robust overlay must not fail");
    assert_eq!(result.dimension(), Dimension::Area);
    assert_fuzzy_eq!(result.area(), 2.0, 1e-9);
    for p in result.polygons() {
        assert!(p.exterior.is_closed());
    }
}

#[test]
fn floating_noding_failure_escalates_to_snap_rounding() {
    // three lines through (0.9, 0.6) in decimal, their binary intersections are ulps apart
    let a = line(&[(0.6, 0.4), (1.2, 0.8)]);
    let b = Geometry::MultiLineString(vec![
        LineString::from_xy(&[(0.8, 0.6), (1.0, 0.6)]),
        LineString::from_xy(&[(0.6, 0.5), (1.2, 0.7)]),
    ]);

    let floating = OverlayNg::new(&a, Some(&b), OverlayOp::Union)
        .with_strategy(NodingStrategy::Floating)
        .result();
    assert!(
        matches!(floating, Err(OverlayError::NodingFailure { .. })),
        "{floating:?}"
    );

    let steps = ladder_steps(&a, Some(&b));
    let pm = match steps[1] {
        LadderStep::SnapRounding(pm) => pm,
        other => panic!("unexpected step {other:?}"),
    };
    let snapped = OverlayNg::new(&a, Some(&b), OverlayOp::Union)
        .with_strategy(NodingStrategy::SnapRounding(pm))
        .result()
        .expect("snap rounding must node the lines");

    let result = overlay(&a, Some(&b), OverlayOp::Union, PrecisionModel::Floating)
        .expect("robust overlay must not fail");
    assert_equals_norm(&result, &snapped);
    // every line is split at the shared node
    assert_eq!(result.line_strings().len(), 6);
    assert_fuzzy_eq!(result.length(), a.length() + b.length(), 1e-9);
}

#[test]
fn heterogeneous_collection_union() {
    let a = Geometry::GeometryCollection(vec![
        point(0.0, 0.0),
        line(&[(1.0, 1.0), (2.0, 2.0)]),
    ]);
    let b = Geometry::GeometryCollection(vec![point(10.0, 10.0)]);
    let result = overlay_floating(&a, &b, OverlayOp::Union);
    let expected = Geometry::GeometryCollection(vec![
        point(0.0, 0.0),
        line(&[(1.0, 1.0), (2.0, 2.0)]),
        point(10.0, 10.0),
    ]);
    assert_equals_norm(&result, &expected);
}

#[test]
fn heterogeneous_collection_points_inside_area_are_absorbed() {
    let a = Geometry::GeometryCollection(vec![
        rect(0.0, 0.0, 4.0, 4.0),
        point(1.0, 1.0),
        line(&[(2.0, 2.0), (6.0, 2.0)]),
    ]);
    let b = point(8.0, 8.0);
    let result = overlay_floating(&a, &b, OverlayOp::Union);
    assert_properties(
        &result,
        &[
            ComponentProperties::polygon(0, 16.0, 16.0, [0.0, 0.0, 4.0, 4.0]),
            ComponentProperties::line(2.0, [4.0, 2.0, 6.0, 2.0]),
            ComponentProperties::point(8.0, 8.0),
        ],
    );
}

#[test]
fn heterogeneous_collection_intersection() {
    let a = Geometry::GeometryCollection(vec![
        rect(0.0, 0.0, 4.0, 4.0),
        line(&[(10.0, 0.0), (10.0, 4.0)]),
    ]);
    let b = rect(2.0, 2.0, 12.0, 3.0);
    let result = overlay_floating(&a, &b, OverlayOp::Intersection);
    assert_properties(
        &result,
        &[
            ComponentProperties::polygon(0, 2.0, 6.0, [2.0, 2.0, 4.0, 3.0]),
            ComponentProperties::line(1.0, [10.0, 2.0, 10.0, 3.0]),
        ],
    );
}

#[test]
fn heterogeneous_collection_difference() {
    let a = Geometry::GeometryCollection(vec![
        rect(0.0, 0.0, 4.0, 4.0),
        point(10.0, 10.0),
    ]);
    let b = Geometry::GeometryCollection(vec![
        rect(2.0, 0.0, 4.0, 4.0),
        point(10.0, 10.0),
    ]);
    let result = overlay_floating(&a, &b, OverlayOp::Difference);
    assert_properties(
        &result,
        &[ComponentProperties::polygon(0, 8.0, 12.0, [0.0, 0.0, 2.0, 4.0])],
    );
}

#[test]
fn polygon_with_hole() {
    let a = Geometry::Polygon(polygon![
        [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
        [(2.0, 2.0), (2.0, 8.0), (8.0, 8.0), (8.0, 2.0), (2.0, 2.0)],
    ]);
    let b = rect(5.0, -1.0, 6.0, 11.0);

    let diff = overlay_floating(&a, &b, OverlayOp::Difference);
    assert_properties(
        &diff,
        &[
            ComponentProperties::polygon(0, 32.0, 36.0, [0.0, 0.0, 5.0, 10.0]),
            ComponentProperties::polygon(0, 28.0, 32.0, [6.0, 0.0, 10.0, 10.0]),
        ],
    );

    let union = overlay_floating(&a, &b, OverlayOp::Union);
    assert_eq!(union.polygons().len(), 1);
    assert_eq!(union.polygons()[0].interiors.len(), 2);
    assert_fuzzy_eq!(union.area(), 64.0 + 6.0 + 2.0);
    for hole in union.polygons()[0].interiors.iter() {
        assert!(hole.signed_area() < 0.0);
    }
}

#[test]
fn union_fills_hole() {
    let a = Geometry::Polygon(polygon![
        [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
        [(2.0, 2.0), (2.0, 8.0), (8.0, 8.0), (8.0, 2.0), (2.0, 2.0)],
    ]);
    let b = rect(2.0, 2.0, 8.0, 8.0);
    let result = overlay_floating(&a, &b, OverlayOp::Union);
    assert_properties(
        &result,
        &[ComponentProperties::polygon(0, 100.0, 40.0, [0.0, 0.0, 10.0, 10.0])],
    );
}

#[test]
fn input_with_z_gives_result_z() {
    let a = Geometry::Polygon(topo_overlay::Polygon::new(
        LineString::new(vec![
            Coord::new_z(0.0, 0.0, 5.0),
            Coord::new_z(2.0, 0.0, 5.0),
            Coord::new_z(2.0, 2.0, 5.0),
            Coord::new_z(0.0, 2.0, 5.0),
            Coord::new_z(0.0, 0.0, 5.0),
        ]),
        vec![],
    ));
    let b = rect(1.0, 1.0, 3.0, 3.0);
    let result = overlay_floating(&a, &b, OverlayOp::Intersection);
    assert_fuzzy_eq!(result.area(), 1.0);
    result.visit_coords(&mut |c| {
        assert_eq!(c.z, Some(5.0));
    });
}
