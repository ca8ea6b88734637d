mod test_utils;

use test_utils::*;
use topo_overlay::{
    Dimension, Geometry, OverlayOp, OverlayOptions, PrecisionModel, assert_fuzzy_eq, core::traits::FuzzyEq,
    overlay_with_options,
};

fn strict() -> OverlayOptions {
    OverlayOptions {
        strict: true,
        ..OverlayOptions::new()
    }
}

fn run(
    a: &Geometry<f64>,
    b: &Geometry<f64>,
    op: OverlayOp,
    pm: PrecisionModel,
    options: OverlayOptions,
) -> Geometry<f64> {
    overlay_with_options(a, Some(b), op, pm, options).expect("overlay failed")
}

#[test]
fn corner_touch_point_dropped_when_strict() {
    let a = rect(0.0, 0.0, 2.0, 1.0);
    let b = Geometry::MultiPolygon(vec![
        rect_polygon(0.0, 0.0, 1.0, 1.0),
        rect_polygon(2.0, 1.0, 3.0, 2.0),
    ]);

    let lenient = run(&a, &b, OverlayOp::Intersection, PrecisionModel::Floating, OverlayOptions::new());
    assert_properties(
        &lenient,
        &[
            ComponentProperties::polygon(0, 1.0, 4.0, [0.0, 0.0, 1.0, 1.0]),
            ComponentProperties::point(2.0, 1.0),
        ],
    );

    let result = run(&a, &b, OverlayOp::Intersection, PrecisionModel::Floating, strict());
    assert!(matches!(result, Geometry::Polygon(_)));
    assert_fuzzy_eq!(result.area(), 1.0);
}

#[test]
fn touching_areas_when_strict() {
    let a = rect(0.0, 0.0, 1.0, 1.0);

    // areas touching at a corner have an empty strict intersection
    let corner = rect(1.0, 1.0, 2.0, 2.0);
    let result = run(&a, &corner, OverlayOp::Intersection, PrecisionModel::Floating, OverlayOptions::new());
    assert_eq!(result, point(1.0, 1.0));
    let result = run(&a, &corner, OverlayOp::Intersection, PrecisionModel::Floating, strict());
    assert!(result.is_empty());
    assert_eq!(result.dimension(), Dimension::Area);

    // a shared side is linework of both inputs and survives
    let side = rect(1.0, 0.0, 2.0, 1.0);
    let result = run(&a, &side, OverlayOp::Intersection, PrecisionModel::Floating, strict());
    assert_equals_norm(&result, &line(&[(1.0, 0.0), (1.0, 1.0)]));
}

#[test]
fn collapsed_area_line_dropped_when_strict() {
    // the thin polygon collapses to a line on the unit grid
    let thin = rect(0.0, 0.0, 4.0, 0.2);
    let square = rect(10.0, 10.0, 11.0, 11.0);
    let pm = PrecisionModel::fixed(1.0);

    let lenient = run(&thin, &square, OverlayOp::Union, pm, OverlayOptions::new());
    assert_properties(
        &lenient,
        &[
            ComponentProperties::polygon(0, 1.0, 4.0, [10.0, 10.0, 11.0, 11.0]),
            ComponentProperties::line(4.0, [0.0, 0.0, 4.0, 0.0]),
        ],
    );

    let result = run(&thin, &square, OverlayOp::Union, pm, strict());
    assert_properties(
        &result,
        &[ComponentProperties::polygon(0, 1.0, 4.0, [10.0, 10.0, 11.0, 11.0])],
    );
}
