use crate::core::{math::Vector2, traits::Real};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A coordinate: an (x, y) position plus optional z and m ordinates.
///
/// Topological decisions only ever look at x and y. The z and m ordinates are carried through
/// when an input vertex survives into the result.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Coord<T = f64> {
    pub x: T,
    pub y: T,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub z: Option<T>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub m: Option<T>,
}

impl<T> Coord<T>
where
    T: Real,
{
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Coord {
            x,
            y,
            z: None,
            m: None,
        }
    }

    #[inline]
    pub fn new_z(x: T, y: T, z: T) -> Self {
        Coord {
            x,
            y,
            z: Some(z),
            m: None,
        }
    }

    #[inline]
    pub fn from_xy(v: Vector2<T>) -> Self {
        Coord::new(v.x, v.y)
    }

    #[inline]
    pub fn xy(&self) -> Vector2<T> {
        Vector2::new(self.x, self.y)
    }

    /// Same coordinate with the position replaced, z and m are kept.
    #[inline]
    pub fn with_xy(&self, x: T, y: T) -> Self {
        Coord { x, y, ..*self }
    }

    /// Exact equality of the x and y ordinates.
    #[inline]
    pub fn equals_2d(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Lexicographic comparison by x then y.
    #[inline]
    pub fn compare_2d(&self, other: &Self) -> Ordering {
        match self.x.partial_cmp(&other.x) {
            Some(Ordering::Equal) | None => {}
            Some(ord) => return ord,
        }
        self.y.partial_cmp(&other.y).unwrap_or(Ordering::Equal)
    }

    #[inline]
    pub fn distance(&self, other: &Self) -> T {
        (self.xy() - other.xy()).length()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite_value() && self.y.is_finite_value()
    }

    #[inline]
    pub(crate) fn to_f64_pair(self) -> (f64, f64) {
        (self.x.to_f64_lossy(), self.y.to_f64_lossy())
    }
}

/// Ordered map/set key for a coordinate using [Coord::compare_2d] and [Coord::equals_2d].
#[derive(Debug, Copy, Clone)]
pub struct CoordKey<T>(pub Coord<T>);

impl<T> PartialEq for CoordKey<T>
where
    T: Real,
{
    fn eq(&self, other: &Self) -> bool {
        self.0.equals_2d(&other.0)
    }
}

impl<T> Eq for CoordKey<T> where T: Real {}

impl<T> PartialOrd for CoordKey<T>
where
    T: Real,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for CoordKey<T>
where
    T: Real,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.compare_2d(&other.0)
    }
}

/// Removes consecutive points that are equal in 2D.
pub fn remove_repeated_points<T>(coords: &[Coord<T>]) -> Vec<Coord<T>>
where
    T: Real,
{
    let mut result: Vec<Coord<T>> = Vec::with_capacity(coords.len());
    for c in coords {
        if result.last().is_some_and(|last| last.equals_2d(c)) {
            continue;
        }
        result.push(*c);
    }
    result
}

/// Appends `c` to `coords` unless it equals the current last point.
#[inline]
pub(crate) fn push_distinct<T>(coords: &mut Vec<Coord<T>>, c: Coord<T>)
where
    T: Real,
{
    if coords.last().is_some_and(|last| last.equals_2d(&c)) {
        return;
    }
    coords.push(c);
}
