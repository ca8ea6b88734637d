use super::LineString;
use crate::core::traits::Real;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use static_aabb2d_index::AABB;

/// A polygon: one exterior ring (shell) and zero or more interior rings (holes).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon<T = f64> {
    pub exterior: LineString<T>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub interiors: Vec<LineString<T>>,
}

impl<T> Polygon<T>
where
    T: Real,
{
    #[inline]
    pub fn new(exterior: LineString<T>, interiors: Vec<LineString<T>>) -> Self {
        Polygon {
            exterior,
            interiors,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }

    /// Exterior ring followed by the interior rings.
    pub fn rings(&self) -> impl Iterator<Item = &LineString<T>> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    /// Area enclosed by the shell minus the area of the holes (orientation independent).
    pub fn area(&self) -> T {
        let holes = self
            .interiors
            .iter()
            .fold(T::zero(), |acc, r| acc + r.signed_area().abs());
        self.exterior.signed_area().abs() - holes
    }

    #[inline]
    pub fn envelope(&self) -> Option<AABB<T>> {
        self.exterior.envelope()
    }
}
