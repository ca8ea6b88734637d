mod test_utils;

use test_utils::*;
use topo_overlay::{
    Geometry, LineString, OverlayError, OverlayOp, Polygon, PrecisionModel, overlay, union_self,
};

fn assert_invalid(result: Result<Geometry<f64>, OverlayError>) {
    match result {
        Err(e @ OverlayError::InvalidInput(_)) => assert!(!e.is_retryable()),
        other => panic!("expected invalid input error, got {other:?}"),
    }
}

#[test]
fn ring_with_too_few_points() {
    let bad = Geometry::Polygon(Polygon::new(
        LineString::from_xy(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]),
        vec![],
    ));
    assert_invalid(try_overlay(&bad, &rect(0.0, 0.0, 1.0, 1.0), OverlayOp::Union));
    assert_invalid(try_overlay(&rect(0.0, 0.0, 1.0, 1.0), &bad, OverlayOp::Union));
}

#[test]
fn ring_not_closed() {
    let bad = Geometry::Polygon(Polygon::new(
        LineString::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
        vec![],
    ));
    assert_invalid(try_overlay(&bad, &rect(0.0, 0.0, 1.0, 1.0), OverlayOp::Intersection));
}

#[test]
fn non_finite_coordinate() {
    let bad = line(&[(0.0, 0.0), (f64::NAN, 1.0)]);
    assert_invalid(try_overlay(&bad, &rect(0.0, 0.0, 1.0, 1.0), OverlayOp::Intersection));
    let bad = point(f64::INFINITY, 0.0);
    assert_invalid(try_overlay(&rect(0.0, 0.0, 1.0, 1.0), &bad, OverlayOp::Union));
}

#[test]
fn single_point_line() {
    let bad = line(&[(0.0, 0.0)]);
    assert_invalid(try_overlay(&bad, &rect(0.0, 0.0, 1.0, 1.0), OverlayOp::Union));
}

#[test]
fn invalid_input_is_rejected_for_fixed_precision() {
    let bad = line(&[(0.0, 0.0)]);
    assert_invalid(overlay(
        &bad,
        Some(&rect(0.0, 0.0, 1.0, 1.0)),
        OverlayOp::Union,
        PrecisionModel::fixed(10.0),
    ));
}

#[test]
fn self_overlay_requires_union() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    for op in [
        OverlayOp::Intersection,
        OverlayOp::Difference,
        OverlayOp::SymDifference,
    ] {
        assert_invalid(overlay(&a, None, op, PrecisionModel::Floating));
    }
    let dissolved = union_self(&a, PrecisionModel::Floating).unwrap();
    assert_equals_norm(&dissolved, &a);
}

#[test]
fn empty_inputs_are_valid() {
    let empty = Geometry::GeometryCollection(vec![]);
    let result = try_overlay(&empty, &rect(0.0, 0.0, 1.0, 1.0), OverlayOp::Union).unwrap();
    assert_equals_norm(&result, &rect(0.0, 0.0, 1.0, 1.0));

    let result = try_overlay(&empty, &empty, OverlayOp::Union).unwrap();
    assert!(result.is_empty());
}

#[test]
fn error_messages() {
    let e = OverlayError::UnassignedHole {
        location: (1.0, 2.0),
    };
    assert_eq!(
        e.to_string(),
        "unable to assign free hole to a shell at or near (1 2)"
    );
    assert!(e.is_retryable());

    let e = OverlayError::NodingFailure {
        message: "found non-noded intersection".to_string(),
        location: Some((0.5, 3.0)),
    };
    assert_eq!(
        e.to_string(),
        "noding failure: found non-noded intersection at or near (0.5 3)"
    );
    match e.into_surfaced() {
        OverlayError::Topology { message, location } => {
            assert_eq!(message, "found non-noded intersection");
            assert_eq!(location, Some((0.5, 3.0)));
        }
        other => panic!("unexpected {other:?}"),
    }
}
