use super::{envelope_of, merge_opt, Coord, Dimension, LineString, Polygon};
use crate::{core::traits::Real, error::OverlayError};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use static_aabb2d_index::AABB;

/// Closed set of geometry kinds the overlay accepts and produces.
///
/// Empty geometries are represented by empty multi variants (or an empty collection), which
/// keeps the nominal dimension of an empty result.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry<T = f64> {
    Point(Coord<T>),
    LineString(LineString<T>),
    Polygon(Polygon<T>),
    MultiPoint(Vec<Coord<T>>),
    MultiLineString(Vec<LineString<T>>),
    MultiPolygon(Vec<Polygon<T>>),
    GeometryCollection(Vec<Geometry<T>>),
}

impl<T> Geometry<T>
where
    T: Real,
{
    /// Empty geometry with the nominal dimension given.
    pub fn empty(dim: Dimension) -> Self {
        match dim {
            Dimension::Point => Geometry::MultiPoint(Vec::new()),
            Dimension::Line => Geometry::MultiLineString(Vec::new()),
            Dimension::Area => Geometry::MultiPolygon(Vec::new()),
            Dimension::Empty => Geometry::GeometryCollection(Vec::new()),
        }
    }

    /// Build the most specific geometry holding all the parts given.
    ///
    /// A single part becomes that part, several parts of one kind become the matching multi
    /// geometry, and parts of different kinds become a collection ordered polygons, lines,
    /// then points.
    pub fn build(
        polygons: Vec<Polygon<T>>,
        lines: Vec<LineString<T>>,
        points: Vec<Coord<T>>,
    ) -> Self {
        let kinds = [!polygons.is_empty(), !lines.is_empty(), !points.is_empty()]
            .iter()
            .filter(|k| **k)
            .count();

        if kinds == 0 {
            return Geometry::GeometryCollection(Vec::new());
        }

        if kinds == 1 {
            if !polygons.is_empty() {
                return Self::from_polygons(polygons);
            }
            if !lines.is_empty() {
                return Self::from_lines(lines);
            }
            return Self::from_points(points);
        }

        let mut parts = Vec::with_capacity(polygons.len() + lines.len() + points.len());
        parts.extend(polygons.into_iter().map(Geometry::Polygon));
        parts.extend(lines.into_iter().map(Geometry::LineString));
        parts.extend(points.into_iter().map(Geometry::Point));
        Geometry::GeometryCollection(parts)
    }

    pub fn from_polygons(mut polygons: Vec<Polygon<T>>) -> Self {
        if polygons.len() == 1 {
            return Geometry::Polygon(polygons.remove(0));
        }
        Geometry::MultiPolygon(polygons)
    }

    pub fn from_lines(mut lines: Vec<LineString<T>>) -> Self {
        if lines.len() == 1 {
            return Geometry::LineString(lines.remove(0));
        }
        Geometry::MultiLineString(lines)
    }

    pub fn from_points(points: Vec<Coord<T>>) -> Self {
        if points.len() == 1 {
            return Geometry::Point(points[0]);
        }
        Geometry::MultiPoint(points)
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Dimension::Point,
            Geometry::LineString(_) | Geometry::MultiLineString(_) => Dimension::Line,
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Dimension::Area,
            Geometry::GeometryCollection(parts) => parts
                .iter()
                .map(|g| g.dimension())
                .max()
                .unwrap_or(Dimension::Empty),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::LineString(ls) => ls.is_empty(),
            Geometry::Polygon(p) => p.is_empty(),
            Geometry::MultiPoint(pts) => pts.is_empty(),
            Geometry::MultiLineString(lines) => lines.iter().all(|l| l.is_empty()),
            Geometry::MultiPolygon(polys) => polys.iter().all(|p| p.is_empty()),
            Geometry::GeometryCollection(parts) => parts.iter().all(|g| g.is_empty()),
        }
    }

    /// `true` if every non-empty component has the same dimension.
    pub fn is_homogeneous(&self) -> bool {
        let mut dim = None;
        let mut homogeneous = true;
        self.visit_components(&mut |g| {
            if g.is_empty() {
                return;
            }
            let d = g.dimension();
            match dim {
                None => dim = Some(d),
                Some(existing) if existing != d => homogeneous = false,
                _ => {}
            }
        });
        homogeneous
    }

    /// Visit every non-collection component, recursing into collections.
    pub fn visit_components<F>(&self, visitor: &mut F)
    where
        F: FnMut(&Geometry<T>),
    {
        match self {
            Geometry::GeometryCollection(parts) => {
                for g in parts {
                    g.visit_components(&mut *visitor);
                }
            }
            other => visitor(other),
        }
    }

    /// Visit every coordinate of the geometry.
    pub fn visit_coords<F>(&self, visitor: &mut F)
    where
        F: FnMut(&Coord<T>),
    {
        match self {
            Geometry::Point(c) => visitor(c),
            Geometry::MultiPoint(pts) => pts.iter().for_each(visitor),
            Geometry::LineString(ls) => ls.coords.iter().for_each(visitor),
            Geometry::MultiLineString(lines) => lines
                .iter()
                .flat_map(|l| l.coords.iter())
                .for_each(visitor),
            Geometry::Polygon(p) => p.rings().flat_map(|r| r.coords.iter()).for_each(visitor),
            Geometry::MultiPolygon(polys) => polys
                .iter()
                .flat_map(|p| p.rings())
                .flat_map(|r| r.coords.iter())
                .for_each(visitor),
            Geometry::GeometryCollection(parts) => {
                for g in parts {
                    g.visit_coords(&mut *visitor);
                }
            }
        }
    }

    /// Visit every coordinate of the geometry mutably.
    pub fn visit_coords_mut<F>(&mut self, visitor: &mut F)
    where
        F: FnMut(&mut Coord<T>),
    {
        fn visit_poly<T, F: FnMut(&mut Coord<T>)>(p: &mut Polygon<T>, visitor: &mut F) {
            p.exterior.coords.iter_mut().for_each(&mut *visitor);
            for hole in p.interiors.iter_mut() {
                hole.coords.iter_mut().for_each(&mut *visitor);
            }
        }

        match self {
            Geometry::Point(c) => visitor(c),
            Geometry::MultiPoint(pts) => pts.iter_mut().for_each(visitor),
            Geometry::LineString(ls) => ls.coords.iter_mut().for_each(visitor),
            Geometry::MultiLineString(lines) => lines
                .iter_mut()
                .flat_map(|l| l.coords.iter_mut())
                .for_each(visitor),
            Geometry::Polygon(p) => visit_poly(p, visitor),
            Geometry::MultiPolygon(polys) => {
                for p in polys.iter_mut() {
                    visit_poly(p, visitor);
                }
            }
            Geometry::GeometryCollection(parts) => {
                for g in parts {
                    g.visit_coords_mut(&mut *visitor);
                }
            }
        }
    }

    /// All point components.
    pub fn points(&self) -> Vec<Coord<T>> {
        let mut result = Vec::new();
        self.visit_components(&mut |g| match g {
            Geometry::Point(c) => result.push(*c),
            Geometry::MultiPoint(pts) => result.extend_from_slice(pts),
            _ => {}
        });
        result
    }

    /// All line string components.
    pub fn line_strings(&self) -> Vec<&LineString<T>> {
        let mut result = Vec::new();
        self.collect_lines(&mut result);
        result
    }

    fn collect_lines<'a>(&'a self, result: &mut Vec<&'a LineString<T>>) {
        match self {
            Geometry::LineString(ls) => result.push(ls),
            Geometry::MultiLineString(lines) => result.extend(lines.iter()),
            Geometry::GeometryCollection(parts) => {
                for g in parts {
                    g.collect_lines(result);
                }
            }
            _ => {}
        }
    }

    /// All polygon components.
    pub fn polygons(&self) -> Vec<&Polygon<T>> {
        let mut result = Vec::new();
        self.collect_polygons(&mut result);
        result
    }

    fn collect_polygons<'a>(&'a self, result: &mut Vec<&'a Polygon<T>>) {
        match self {
            Geometry::Polygon(p) => result.push(p),
            Geometry::MultiPolygon(polys) => result.extend(polys.iter()),
            Geometry::GeometryCollection(parts) => {
                for g in parts {
                    g.collect_polygons(result);
                }
            }
            _ => {}
        }
    }

    /// Number of non-empty components.
    pub fn num_components(&self) -> usize {
        let mut count = 0;
        self.visit_components(&mut |g| {
            count += match g {
                Geometry::MultiPoint(pts) => pts.len(),
                Geometry::MultiLineString(lines) => lines.iter().filter(|l| !l.is_empty()).count(),
                Geometry::MultiPolygon(polys) => polys.iter().filter(|p| !p.is_empty()).count(),
                other => usize::from(!other.is_empty()),
            }
        });
        count
    }

    pub fn envelope(&self) -> Option<AABB<T>> {
        match self {
            Geometry::GeometryCollection(parts) => parts
                .iter()
                .fold(None, |acc, g| merge_opt(acc, g.envelope())),
            _ => {
                let mut coords = Vec::new();
                self.visit_coords(&mut |c| coords.push(*c));
                envelope_of(coords.iter())
            }
        }
    }

    /// Total area of the polygonal components.
    pub fn area(&self) -> T {
        self.polygons()
            .iter()
            .fold(T::zero(), |acc, p| acc + p.area())
    }

    /// Total length of the linear components plus the perimeter of polygonal components.
    pub fn length(&self) -> T {
        let lines = self
            .line_strings()
            .iter()
            .fold(T::zero(), |acc, l| acc + l.length());
        self.polygons()
            .iter()
            .flat_map(|p| p.rings())
            .fold(lines, |acc, r| acc + r.length())
    }

    /// Check the geometry is well formed enough to be overlaid.
    ///
    /// Rejects non-finite coordinates, lines with a single point, and polygon rings that are
    /// not closed or have fewer than 4 points.
    pub fn validate(&self) -> Result<(), OverlayError> {
        let mut bad_coord = None;
        self.visit_coords(&mut |c| {
            if bad_coord.is_none() && !c.is_finite() {
                bad_coord = Some(*c);
            }
        });
        if let Some(c) = bad_coord {
            return Err(OverlayError::InvalidInput(format!(
                "non-finite coordinate ({:?} {:?})",
                c.x, c.y
            )));
        }

        for line in self.line_strings() {
            if line.len() == 1 {
                return Err(OverlayError::InvalidInput(
                    "line string must have 0 or at least 2 points".to_string(),
                ));
            }
        }

        for poly in self.polygons() {
            if poly.exterior.is_empty() {
                if !poly.interiors.is_empty() {
                    return Err(OverlayError::InvalidInput(
                        "polygon with holes has an empty shell".to_string(),
                    ));
                }
                continue;
            }
            for ring in poly.rings() {
                if ring.len() < 4 {
                    return Err(OverlayError::InvalidInput(format!(
                        "polygon ring must have at least 4 points, found {}",
                        ring.len()
                    )));
                }
                if !ring.is_closed() {
                    return Err(OverlayError::InvalidInput(
                        "polygon ring is not closed".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }
}

impl<T> From<Polygon<T>> for Geometry<T> {
    fn from(p: Polygon<T>) -> Self {
        Geometry::Polygon(p)
    }
}

impl<T> From<LineString<T>> for Geometry<T> {
    fn from(l: LineString<T>) -> Self {
        Geometry::LineString(l)
    }
}

impl<T> From<Coord<T>> for Geometry<T> {
    fn from(c: Coord<T>) -> Self {
        Geometry::Point(c)
    }
}
