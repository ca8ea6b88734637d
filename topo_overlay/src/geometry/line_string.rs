use super::{envelope_of, Coord};
use crate::core::traits::Real;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use static_aabb2d_index::AABB;

/// An ordered list of coordinates. Used both for open lines and closed rings.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString<T = f64> {
    pub coords: Vec<Coord<T>>,
}

impl<T> LineString<T>
where
    T: Real,
{
    #[inline]
    pub fn new(coords: Vec<Coord<T>>) -> Self {
        LineString { coords }
    }

    /// Create from (x, y) pairs.
    pub fn from_xy(pts: &[(T, T)]) -> Self {
        LineString::new(pts.iter().map(|&(x, y)| Coord::new(x, y)).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// `true` if non-empty and the first and last coordinates are equal.
    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(first), Some(last)) => first.equals_2d(last),
            _ => false,
        }
    }

    pub fn envelope(&self) -> Option<AABB<T>> {
        envelope_of(self.coords.iter())
    }

    pub fn length(&self) -> T {
        self.coords
            .windows(2)
            .fold(T::zero(), |acc, w| acc + w[0].distance(&w[1]))
    }

    /// Signed area of the ring formed by the coordinates (positive when counter clockwise).
    ///
    /// The ring is assumed closed, the result is meaningless for open lines.
    pub fn signed_area(&self) -> T {
        let n = self.coords.len();
        if n < 3 {
            return T::zero();
        }

        // shoelace relative to the first point to reduce cancellation
        let x0 = self.coords[0].x;
        let mut sum = T::zero();
        for i in 1..n - 1 {
            let x = self.coords[i].x - x0;
            let y1 = self.coords[i + 1].y;
            let y2 = self.coords[i - 1].y;
            sum = sum + x * (y2 - y1);
        }
        -sum / T::two()
    }

    pub fn reversed(&self) -> Self {
        let mut coords = self.coords.clone();
        coords.reverse();
        LineString::new(coords)
    }
}

impl<T> From<Vec<Coord<T>>> for LineString<T>
where
    T: Real,
{
    fn from(coords: Vec<Coord<T>>) -> Self {
        LineString::new(coords)
    }
}
