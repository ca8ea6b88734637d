#![allow(dead_code)]

mod debug;
mod geometry_properties;

pub use debug::to_debug_wkt_str;
pub use geometry_properties::*;

use topo_overlay::{
    Coord, Geometry, LineString, NodingStrategy, OverlayError, OverlayNg, OverlayOp, Polygon,
    PrecisionModel, overlay,
};

/// Axis aligned rectangle polygon with a counter clockwise shell.
pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry<f64> {
    Geometry::Polygon(rect_polygon(x0, y0, x1, y1))
}

pub fn rect_polygon(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::from_xy(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
        vec![],
    )
}

pub fn line(pts: &[(f64, f64)]) -> Geometry<f64> {
    Geometry::LineString(LineString::from_xy(pts))
}

pub fn point(x: f64, y: f64) -> Geometry<f64> {
    Geometry::Point(Coord::new(x, y))
}

pub fn multi_point(pts: &[(f64, f64)]) -> Geometry<f64> {
    Geometry::MultiPoint(pts.iter().map(|&(x, y)| Coord::new(x, y)).collect())
}

/// Overlay with floating precision, panicking with both inputs on failure.
pub fn overlay_floating(
    a: &Geometry<f64>,
    b: &Geometry<f64>,
    op: OverlayOp,
) -> Geometry<f64> {
    overlay_pm(a, b, op, PrecisionModel::Floating)
}

/// Single overlay attempt with floating noding and no retries, panicking on failure.
pub fn overlay_floating_noder(
    a: &Geometry<f64>,
    b: &Geometry<f64>,
    op: OverlayOp,
) -> Geometry<f64> {
    match OverlayNg::new(a, Some(b), op)
        .with_strategy(NodingStrategy::Floating)
        .result()
    {
        Ok(g) => g,
        Err(e) => panic!(
            "floating {op} failed: {e}\n a: {}\n b: {}",
            to_debug_wkt_str(a),
            to_debug_wkt_str(b)
        ),
    }
}

pub fn overlay_pm(
    a: &Geometry<f64>,
    b: &Geometry<f64>,
    op: OverlayOp,
    pm: PrecisionModel,
) -> Geometry<f64> {
    match overlay(a, Some(b), op, pm) {
        Ok(g) => g,
        Err(e) => panic!(
            "{op} failed: {e}\n a: {}\n b: {}",
            to_debug_wkt_str(a),
            to_debug_wkt_str(b)
        ),
    }
}

pub fn try_overlay(
    a: &Geometry<f64>,
    b: &Geometry<f64>,
    op: OverlayOp,
) -> Result<Geometry<f64>, OverlayError> {
    overlay(a, Some(b), op, PrecisionModel::Floating)
}

/// Asserts the geometries are equal after normalization, printing both on failure.
pub fn assert_equals_norm(result: &Geometry<f64>, expected: &Geometry<f64>) {
    assert!(
        result.equals_norm(expected),
        "result:\n{}\nexpected:\n{}",
        to_debug_wkt_str(result),
        to_debug_wkt_str(expected)
    );
}

/// Every coordinate of `g` scaled by `scale` is an integer.
pub fn is_on_grid(g: &Geometry<f64>, scale: f64) -> bool {
    let mut on_grid = true;
    g.visit_coords(&mut |c| {
        for v in [c.x, c.y] {
            let scaled = v * scale;
            if (scaled - scaled.round()).abs() > 1e-9 {
                on_grid = false;
            }
        }
    });
    on_grid
}
