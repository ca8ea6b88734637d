use crate::{
    algorithm::PointInAreaLocator,
    core::traits::Real,
    geometry::{Coord, Dimension, Geometry, Location},
};
use static_aabb2d_index::AABB;
use std::cell::OnceCell;

/// The (one or two) input geometries of an overlay along with state discovered about them
/// while the overlay runs.
pub struct InputGeometry<'a, T>
where
    T: Real,
{
    geoms: [Option<&'a Geometry<T>>; 2],
    is_collapsed: [bool; 2],
    locators: [OnceCell<PointInAreaLocator<T>>; 2],
}

impl<'a, T> InputGeometry<'a, T>
where
    T: Real,
{
    pub fn new(a: &'a Geometry<T>, b: Option<&'a Geometry<T>>) -> Self {
        InputGeometry {
            geoms: [Some(a), b],
            is_collapsed: [false; 2],
            locators: [OnceCell::new(), OnceCell::new()],
        }
    }

    /// `true` for a self overlay (a single input).
    pub fn is_single(&self) -> bool {
        self.geoms[1].is_none()
    }

    pub fn geometry(&self, index: usize) -> Option<&'a Geometry<T>> {
        self.geoms[index]
    }

    pub fn dimension(&self, index: usize) -> Dimension {
        self.geoms[index]
            .map(|g| g.dimension())
            .unwrap_or(Dimension::Empty)
    }

    pub fn is_empty(&self, index: usize) -> bool {
        self.geoms[index].map_or(true, |g| g.is_empty())
    }

    pub fn envelope(&self, index: usize) -> Option<AABB<T>> {
        self.geoms[index].and_then(|g| g.envelope())
    }

    pub fn is_area(&self, index: usize) -> bool {
        self.dimension(index) == Dimension::Area
    }

    pub fn is_line(&self, index: usize) -> bool {
        self.dimension(index) == Dimension::Line
    }

    /// Index of an areal input, preferring the first.
    pub fn area_index(&self) -> Option<usize> {
        (0..2).find(|&i| self.is_area(i))
    }

    pub fn is_all_points(&self) -> bool {
        !self.is_single()
            && self.dimension(0) == Dimension::Point
            && self.dimension(1) == Dimension::Point
    }

    pub fn has_points(&self) -> bool {
        self.dimension(0) == Dimension::Point || self.dimension(1) == Dimension::Point
    }

    /// `true` if the input can contribute edges (it is linear or areal, possibly empty).
    pub fn has_edges(&self, index: usize) -> bool {
        self.dimension(index) > Dimension::Point
    }

    /// Record that the input's linework vanished completely during noding.
    pub fn set_collapsed(&mut self, index: usize, is_collapsed: bool) {
        self.is_collapsed[index] = is_collapsed;
    }

    pub fn is_collapsed(&self, index: usize) -> bool {
        self.is_collapsed[index]
    }

    /// Locate a point in an areal input. A collapsed input has no interior.
    pub fn locate_point_in_area(&self, index: usize, pt: &Coord<T>) -> Location {
        if self.is_collapsed[index] {
            return Location::Exterior;
        }
        let Some(geom) = self.geoms[index] else {
            return Location::Exterior;
        };
        self.locators[index]
            .get_or_init(|| PointInAreaLocator::new(geom))
            .locate(pt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{LineString, Polygon};

    fn square() -> Geometry<f64> {
        Geometry::Polygon(Polygon::new(
            LineString::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]),
            vec![],
        ))
    }

    #[test]
    fn classification() {
        let a = square();
        let b = Geometry::MultiPoint(vec![Coord::new(1.0, 1.0)]);
        let input = InputGeometry::new(&a, Some(&b));
        assert!(input.is_area(0));
        assert_eq!(input.area_index(), Some(0));
        assert!(input.has_points());
        assert!(!input.is_all_points());
        assert!(input.has_edges(0));
        assert!(!input.has_edges(1));

        let single = InputGeometry::new(&a, None);
        assert!(single.is_single());
        assert!(single.is_empty(1));
        assert_eq!(single.dimension(1), Dimension::Empty);
    }

    #[test]
    fn collapsed_input_is_exterior() {
        let a = square();
        let mut input = InputGeometry::new(&a, None);
        let p = Coord::new(2.0, 2.0);
        assert_eq!(input.locate_point_in_area(0, &p), Location::Interior);
        input.set_collapsed(0, true);
        assert_eq!(input.locate_point_in_area(0, &p), Location::Exterior);
    }
}
