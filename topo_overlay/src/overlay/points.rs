use super::OverlayOp;
use crate::{
    core::traits::Real,
    geometry::{Coord, CoordKey, Dimension, Geometry},
    precision::PrecisionModel,
};
use std::collections::BTreeMap;

/// Overlay of two punctual inputs, computed directly on sets of rounded points without any
/// noding.
///
/// Points are identified by their coordinate rounded to the precision model. The first input
/// point mapping to a coordinate is the one kept (along with its z and m). Results are in
/// lexicographic order.
pub fn overlay_points<T>(
    op: OverlayOp,
    a: &Geometry<T>,
    b: &Geometry<T>,
    pm: &PrecisionModel,
) -> Geometry<T>
where
    T: Real,
{
    let map_a = build_point_map(a, pm);
    let map_b = build_point_map(b, pm);

    let not_in = |from: &BTreeMap<CoordKey<T>, Coord<T>>, other: &BTreeMap<CoordKey<T>, Coord<T>>| {
        from.iter()
            .filter(|(k, _)| !other.contains_key(k))
            .map(|(_, c)| *c)
            .collect::<Vec<_>>()
    };

    let mut result: Vec<Coord<T>> = match op {
        OverlayOp::Intersection => map_a
            .iter()
            .filter(|(k, _)| map_b.contains_key(k))
            .map(|(_, c)| *c)
            .collect(),
        OverlayOp::Union => {
            let mut pts: Vec<Coord<T>> = map_a.values().copied().collect();
            pts.extend(not_in(&map_b, &map_a));
            pts
        }
        OverlayOp::Difference => not_in(&map_a, &map_b),
        OverlayOp::SymDifference => {
            let mut pts = not_in(&map_a, &map_b);
            pts.extend(not_in(&map_b, &map_a));
            pts
        }
    };

    if result.is_empty() {
        return Geometry::empty(Dimension::Point);
    }
    result.sort_by(|p, q| p.compare_2d(q));
    Geometry::from_points(result)
}

fn build_point_map<T>(g: &Geometry<T>, pm: &PrecisionModel) -> BTreeMap<CoordKey<T>, Coord<T>>
where
    T: Real,
{
    let mut map = BTreeMap::new();
    for p in g.points() {
        let rounded = pm.make_precise(&p);
        map.entry(CoordKey(rounded)).or_insert(rounded);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(xy: &[(f64, f64)]) -> Geometry<f64> {
        Geometry::MultiPoint(xy.iter().map(|&(x, y)| Coord::new(x, y)).collect())
    }

    fn xy(g: &Geometry<f64>) -> Vec<(f64, f64)> {
        g.points().iter().map(|c| (c.x, c.y)).collect()
    }

    #[test]
    fn set_operations() {
        let a = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        let b = pts(&[(2.0, 2.0), (3.0, 3.0), (1.0, 1.0)]);
        let pm = PrecisionModel::Floating;
        assert_eq!(
            xy(&overlay_points(OverlayOp::Intersection, &a, &b, &pm)),
            vec![(1.0, 1.0), (2.0, 2.0)]
        );
        assert_eq!(
            xy(&overlay_points(OverlayOp::Union, &a, &b, &pm)),
            vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]
        );
        assert_eq!(
            xy(&overlay_points(OverlayOp::Difference, &a, &b, &pm)),
            vec![(0.0, 0.0)]
        );
        assert_eq!(
            xy(&overlay_points(OverlayOp::SymDifference, &a, &b, &pm)),
            vec![(0.0, 0.0), (3.0, 3.0)]
        );
    }

    #[test]
    fn rounding_merges_points() {
        let a = pts(&[(0.4, 0.4), (0.1, -0.2)]);
        let b = pts(&[(0.0, 0.0)]);
        let pm = PrecisionModel::fixed(1.0);
        let result = overlay_points(OverlayOp::Intersection, &a, &b, &pm);
        assert!(matches!(result, Geometry::Point(_)));
        assert_eq!(xy(&result), vec![(0.0, 0.0)]);
    }

    #[test]
    fn empty_result_has_point_dimension() {
        let a = pts(&[(0.0, 0.0)]);
        let b = pts(&[(5.0, 5.0)]);
        let result = overlay_points(OverlayOp::Intersection, &a, &b, &PrecisionModel::Floating);
        assert!(result.is_empty());
        assert_eq!(result.dimension(), Dimension::Point);
    }
}
