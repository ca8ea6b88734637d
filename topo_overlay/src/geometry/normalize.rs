use super::{Coord, Geometry, LineString, Polygon};
use crate::core::traits::Real;
use std::cmp::Ordering;

fn cmp_coords<T>(a: &[Coord<T>], b: &[Coord<T>]) -> Ordering
where
    T: Real,
{
    for (ca, cb) in a.iter().zip(b.iter()) {
        let ord = ca.compare_2d(cb);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

/// Rotate a closed ring to start at its smallest coordinate and orient it.
fn normalize_ring<T>(ring: &LineString<T>, ccw: bool) -> LineString<T>
where
    T: Real,
{
    if ring.len() < 2 || !ring.is_closed() {
        return ring.clone();
    }

    let open = &ring.coords[..ring.len() - 1];
    let start = open
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.compare_2d(b))
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut coords: Vec<Coord<T>> = open[start..].iter().chain(open[..start].iter()).copied().collect();
    coords.push(coords[0]);
    let mut result = LineString::new(coords);
    let is_ccw = result.signed_area() > T::zero();
    if is_ccw != ccw {
        result.coords.reverse();
    }
    result
}

fn normalize_line<T>(line: &LineString<T>) -> LineString<T>
where
    T: Real,
{
    let n = line.len();
    for i in 0..n / 2 {
        match line.coords[i].compare_2d(&line.coords[n - 1 - i]) {
            Ordering::Less => return line.clone(),
            Ordering::Greater => return line.reversed(),
            Ordering::Equal => {}
        }
    }
    line.clone()
}

fn normalize_polygon<T>(poly: &Polygon<T>) -> Polygon<T>
where
    T: Real,
{
    let exterior = normalize_ring(&poly.exterior, true);
    let mut interiors: Vec<_> = poly
        .interiors
        .iter()
        .map(|r| normalize_ring(r, false))
        .collect();
    interiors.sort_by(|a, b| cmp_coords(&a.coords, &b.coords));
    Polygon::new(exterior, interiors)
}

fn kind_order<T>(g: &Geometry<T>) -> u8 {
    match g {
        Geometry::Point(_) => 0,
        Geometry::MultiPoint(_) => 1,
        Geometry::LineString(_) => 2,
        Geometry::MultiLineString(_) => 3,
        Geometry::Polygon(_) => 4,
        Geometry::MultiPolygon(_) => 5,
        Geometry::GeometryCollection(_) => 6,
    }
}

fn first_coords<T>(g: &Geometry<T>) -> Vec<Coord<T>>
where
    T: Real,
{
    let mut coords = Vec::new();
    g.visit_coords(&mut |c| coords.push(*c));
    coords
}

fn cmp_geometry<T>(a: &Geometry<T>, b: &Geometry<T>) -> Ordering
where
    T: Real,
{
    kind_order(a)
        .cmp(&kind_order(b))
        .then_with(|| cmp_coords(&first_coords(a), &first_coords(b)))
}

impl<T> Geometry<T>
where
    T: Real,
{
    /// Canonical form used for comparing results.
    ///
    /// Shells are counter clockwise and holes clockwise, rings start at their smallest
    /// coordinate, lines run from their smaller end, and components are sorted.
    pub fn normalized(&self) -> Geometry<T> {
        match self {
            Geometry::Point(c) => Geometry::Point(*c),
            Geometry::MultiPoint(pts) => {
                let mut pts = pts.clone();
                pts.sort_by(|a, b| a.compare_2d(b));
                Geometry::MultiPoint(pts)
            }
            Geometry::LineString(l) => Geometry::LineString(normalize_line(l)),
            Geometry::MultiLineString(lines) => {
                let mut lines: Vec<_> = lines.iter().map(normalize_line).collect();
                lines.sort_by(|a, b| cmp_coords(&a.coords, &b.coords));
                Geometry::MultiLineString(lines)
            }
            Geometry::Polygon(p) => Geometry::Polygon(normalize_polygon(p)),
            Geometry::MultiPolygon(polys) => {
                let mut polys: Vec<_> = polys.iter().map(normalize_polygon).collect();
                polys.sort_by(|a, b| cmp_coords(&a.exterior.coords, &b.exterior.coords));
                Geometry::MultiPolygon(polys)
            }
            Geometry::GeometryCollection(parts) => {
                let mut parts: Vec<_> = parts.iter().map(|g| g.normalized()).collect();
                parts.sort_by(cmp_geometry);
                Geometry::GeometryCollection(parts)
            }
        }
    }

    /// 2D structural equality after normalization, ignoring z and m.
    pub fn equals_norm(&self, other: &Geometry<T>) -> bool {
        fn strip<T: Real>(g: &Geometry<T>) -> Vec<(T, T)> {
            let mut coords = Vec::new();
            g.visit_coords(&mut |c| coords.push((c.x, c.y)));
            coords
        }

        let a = self.normalized();
        let b = other.normalized();
        std::mem::discriminant(&a) == std::mem::discriminant(&b)
            && a.num_components() == b.num_components()
            && strip(&a) == strip(&b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_rotation_and_orientation() {
        let cw = Polygon::new(
            LineString::from_xy(&[(2.0, 2.0), (2.0, 0.0), (0.0, 0.0), (0.0, 2.0), (2.0, 2.0)]),
            vec![],
        );
        let n = Geometry::Polygon(cw).normalized();
        let expected = LineString::from_xy(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]);
        match n {
            Geometry::Polygon(p) => assert_eq!(p.exterior, expected),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn line_direction_is_canonical() {
        let l = Geometry::LineString(LineString::from_xy(&[(5.0, 5.0), (1.0, 1.0)]));
        let r = Geometry::LineString(LineString::from_xy(&[(1.0, 1.0), (5.0, 5.0)]));
        assert!(l.equals_norm(&r));
    }
}
