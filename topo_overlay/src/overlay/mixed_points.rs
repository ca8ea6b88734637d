use super::{NodingStrategy, OverlayNg, OverlayOp};
use crate::{
    algorithm::{PointInAreaLocator, PointOnLineLocator},
    core::traits::Real,
    error::OverlayResult,
    geometry::{Coord, CoordKey, Dimension, Geometry, Location, Polygon},
};
use std::collections::BTreeSet;

enum Locator<T>
where
    T: Real,
{
    Area(PointInAreaLocator<T>),
    Line(PointOnLineLocator<T>),
}

impl<T> Locator<T>
where
    T: Real,
{
    fn new(g: &Geometry<T>) -> Self {
        if g.dimension() == Dimension::Area {
            Locator::Area(PointInAreaLocator::new(g))
        } else {
            Locator::Line(PointOnLineLocator::new(g))
        }
    }

    fn locate(&self, p: &Coord<T>) -> Location {
        match self {
            Locator::Area(l) => l.locate(p),
            Locator::Line(l) => l.locate(p),
        }
    }
}

/// Overlay of a punctual input with a linear or areal input.
///
/// Points are located against the non-point input rather than noded with it. The non-point
/// input is first unioned with itself under the same noding so it is valid and rounded
/// consistently with the points, unless the result holds only points.
pub fn overlay_mixed_points<T>(
    op: OverlayOp,
    a: &Geometry<T>,
    b: &Geometry<T>,
    strategy: NodingStrategy,
) -> OverlayResult<Geometry<T>>
where
    T: Real,
{
    let is_point_rhs = b.dimension() == Dimension::Point;
    let (geom_point, geom_non_point_input) = if is_point_rhs { (b, a) } else { (a, b) };

    let result_dim = op.result_dimension(a.dimension(), b.dimension());
    let geom_non_point = if result_dim == Dimension::Point {
        geom_non_point_input.clone()
    } else {
        OverlayNg::new(geom_non_point_input, None, OverlayOp::Union)
            .with_strategy(strategy)
            .result()?
    };

    let pm = strategy.precision();
    let coords: Vec<Coord<T>> = geom_point
        .points()
        .iter()
        .map(|p| pm.make_precise(p))
        .collect();
    let locator = Locator::new(&geom_non_point);
    let find_points = |is_covered: bool| -> Vec<Coord<T>> {
        let found: BTreeSet<CoordKey<T>> = coords
            .iter()
            .filter(|p| {
                let is_exterior = locator.locate(p) == Location::Exterior;
                is_covered != is_exterior
            })
            .map(|p| CoordKey(*p))
            .collect();
        found.into_iter().map(|k| k.0).collect()
    };

    let result = match op {
        OverlayOp::Intersection => point_result(find_points(true)),
        OverlayOp::Union | OverlayOp::SymDifference => {
            let points = find_points(false);
            let (polygons, lines) = match geom_non_point.dimension() {
                Dimension::Area => (
                    geom_non_point
                        .polygons()
                        .into_iter()
                        .cloned()
                        .collect::<Vec<Polygon<T>>>(),
                    Vec::new(),
                ),
                Dimension::Line => (
                    Vec::new(),
                    geom_non_point.line_strings().into_iter().cloned().collect(),
                ),
                _ => (Vec::new(), Vec::new()),
            };
            Geometry::build(polygons, lines, points)
        }
        OverlayOp::Difference => {
            if is_point_rhs {
                geom_non_point.clone()
            } else {
                point_result(find_points(false))
            }
        }
    };
    Ok(result)
}

fn point_result<T>(points: Vec<Coord<T>>) -> Geometry<T>
where
    T: Real,
{
    if points.is_empty() {
        return Geometry::empty(Dimension::Point);
    }
    Geometry::from_points(points)
}
