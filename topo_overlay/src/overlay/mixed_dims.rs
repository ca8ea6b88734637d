//! Overlay of heterogeneous collections.
//!
//! A collection mixing dimensions is split into strata: its areas, the lines not covered by
//! the areas, and the points covered by neither. Every stratum is homogeneous, so operations
//! are composed from overlays of single strata.
use super::OverlayOp;
use crate::{
    core::traits::Real,
    error::OverlayResult,
    geometry::{Coord, Dimension, Geometry, LineString, Polygon},
};

/// Homogeneous parts of a geometry, with lower dimension parts never covered by higher ones.
#[derive(Debug, Clone, Default)]
struct Strata<T> {
    areas: Vec<Polygon<T>>,
    lines: Vec<LineString<T>>,
    points: Vec<Coord<T>>,
}

impl<T> Strata<T>
where
    T: Real,
{
    fn geometries(&self) -> Vec<Geometry<T>> {
        let mut result = Vec::new();
        if !self.areas.is_empty() {
            result.push(Geometry::MultiPolygon(self.areas.clone()));
        }
        if !self.lines.is_empty() {
            result.push(Geometry::MultiLineString(self.lines.clone()));
        }
        if !self.points.is_empty() {
            result.push(Geometry::MultiPoint(self.points.clone()));
        }
        result
    }

    fn into_geometry(self) -> Geometry<T> {
        Geometry::build(self.areas, self.lines, self.points)
    }
}

/// Overlays `a` and `b` when either is a heterogeneous collection, using `overlay_fn` for the
/// overlays of homogeneous strata.
pub fn overlay_heterogeneous<T, F>(
    a: &Geometry<T>,
    b: Option<&Geometry<T>>,
    op: OverlayOp,
    overlay_fn: &mut F,
) -> OverlayResult<Geometry<T>>
where
    T: Real,
    F: FnMut(&Geometry<T>, Option<&Geometry<T>>, OverlayOp) -> OverlayResult<Geometry<T>>,
{
    let Some(b) = b else {
        return combine(&[a], overlay_fn).map(Strata::into_geometry);
    };

    let result = match op {
        OverlayOp::Union => combine(&[a, b], overlay_fn)?,
        OverlayOp::Intersection => {
            let strata_a = combine(&[a], overlay_fn)?.geometries();
            let strata_b = combine(&[b], overlay_fn)?.geometries();
            let mut parts = Vec::new();
            for sa in strata_a.iter() {
                for sb in strata_b.iter() {
                    parts.push(overlay_fn(sa, Some(sb), OverlayOp::Intersection)?);
                }
            }
            combine(&parts.iter().collect::<Vec<_>>(), overlay_fn)?
        }
        OverlayOp::Difference => {
            let diff = difference(a, b, overlay_fn)?;
            combine(&[&diff], overlay_fn)?
        }
        OverlayOp::SymDifference => {
            let diff_ab = difference(a, b, overlay_fn)?;
            let diff_ba = difference(b, a, overlay_fn)?;
            combine(&[&diff_ab, &diff_ba], overlay_fn)?
        }
    };

    let result = result.into_geometry();
    if result.is_empty() {
        return Ok(Geometry::empty(
            op.result_dimension(a.dimension(), b.dimension()),
        ));
    }
    Ok(result)
}

/// Subtract from every stratum of `a` the strata of `b` of equal or higher dimension. Lower
/// dimensions cannot remove anything.
fn difference<T, F>(a: &Geometry<T>, b: &Geometry<T>, overlay_fn: &mut F) -> OverlayResult<Geometry<T>>
where
    T: Real,
    F: FnMut(&Geometry<T>, Option<&Geometry<T>>, OverlayOp) -> OverlayResult<Geometry<T>>,
{
    let strata_a = combine(&[a], overlay_fn)?.geometries();
    let strata_b = combine(&[b], overlay_fn)?.geometries();
    let mut parts = Vec::new();
    for sa in strata_a {
        let dim = sa.dimension();
        let mut part = sa;
        for sb in strata_b.iter().filter(|sb| sb.dimension() >= dim) {
            if part.is_empty() {
                break;
            }
            part = overlay_fn(&part, Some(sb), OverlayOp::Difference)?;
        }
        parts.push(part);
    }
    Ok(Geometry::GeometryCollection(parts))
}

/// Union all parts into strata.
fn combine<T, F>(parts: &[&Geometry<T>], overlay_fn: &mut F) -> OverlayResult<Strata<T>>
where
    T: Real,
    F: FnMut(&Geometry<T>, Option<&Geometry<T>>, OverlayOp) -> OverlayResult<Geometry<T>>,
{
    let mut polygons = Vec::new();
    let mut lines = Vec::new();
    let mut points = Vec::new();
    for part in parts {
        polygons.extend(part.polygons().into_iter().filter(|p| !p.is_empty()).cloned());
        lines.extend(part.line_strings().into_iter().filter(|l| !l.is_empty()).cloned());
        points.extend(part.points());
    }

    // polygons of one input may overlap, so they are unioned one at a time
    let mut areas: Option<Geometry<T>> = None;
    for poly in polygons {
        let poly = Geometry::Polygon(poly);
        areas = Some(match areas {
            None => overlay_fn(&poly, None, OverlayOp::Union)?,
            Some(acc) => overlay_fn(&acc, Some(&poly), OverlayOp::Union)?,
        });
    }
    let areas = areas.filter(|g| !g.is_empty());

    let mut line_geom = None;
    if !lines.is_empty() {
        let mut unioned = overlay_fn(&Geometry::MultiLineString(lines), None, OverlayOp::Union)?;
        if let Some(areas) = &areas {
            unioned = overlay_fn(&unioned, Some(areas), OverlayOp::Difference)?;
        }
        line_geom = Some(unioned).filter(|g| !g.is_empty());
    }

    let mut point_geom = None;
    if !points.is_empty() {
        // a union against no points rounds and removes duplicates
        let no_points = Geometry::empty(Dimension::Point);
        let mut unioned = overlay_fn(&Geometry::MultiPoint(points), Some(&no_points), OverlayOp::Union)?;
        for cover in [&line_geom, &areas].into_iter().flatten() {
            if unioned.is_empty() {
                break;
            }
            unioned = overlay_fn(&unioned, Some(cover), OverlayOp::Difference)?;
        }
        point_geom = Some(unioned);
    }

    Ok(Strata {
        areas: areas
            .map(|g| g.polygons().into_iter().cloned().collect())
            .unwrap_or_default(),
        lines: line_geom
            .map(|g| g.line_strings().into_iter().cloned().collect())
            .unwrap_or_default(),
        points: point_geom.map(|g| g.points()).unwrap_or_default(),
    })
}
