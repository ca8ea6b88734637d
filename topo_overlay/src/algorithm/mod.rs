//! Basic computational geometry algorithms on coordinates and rings.
mod locate;
mod ring;

pub use locate::{locate_point_in_ring, PointInAreaLocator, PointOnLineLocator, RayCrossingCounter};
pub use ring::{is_ccw, orientation};

use crate::{
    core::{
        math::{self, Orientation},
        traits::Real,
    },
    geometry::Coord,
};

/// Orientation of `q` relative to the directed segment `p1` to `p2`.
#[inline]
pub fn orientation_index<T>(p1: &Coord<T>, p2: &Coord<T>, q: &Coord<T>) -> Orientation
where
    T: Real,
{
    math::orientation_index(p1.xy(), p2.xy(), q.xy())
}
