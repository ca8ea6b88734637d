//! Minimal in-memory geometry model consumed and produced by the overlay.
mod coord;
mod envelope;
mod geom;
mod line_string;
mod normalize;
mod polygon;

pub use coord::{remove_repeated_points, Coord, CoordKey};
pub(crate) use coord::push_distinct;
pub use envelope::*;
pub(crate) use envelope::build_index;
pub use geom::Geometry;
pub use line_string::LineString;
pub use polygon::Polygon;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Topological dimension of a geometry. Ordered so that `max`/`min` give the dimension of
/// unions and intersections.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Empty,
    Point,
    Line,
    Area,
}

/// Location of a point relative to a geometry.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}
