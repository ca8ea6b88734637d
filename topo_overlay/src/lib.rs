//! Boolean overlay (intersection, union, difference and symmetric difference) of 2D points,
//! lines, polygons and collections of them.
//!
//! The overlay nodes the linework of both inputs, merges coincident edges into a topology graph,
//! labels the graph with the location of every edge relative to each input and extracts the
//! result polygons, lines and points from the labels. Noding is done either in floating
//! precision or by snap rounding onto a fixed grid; [robust::overlay] retries failed floating
//! attempts with snap rounding until one succeeds.
//!
//! # Examples
//!
//! ```
//! use topo_overlay::{overlay, polygon, Geometry, OverlayOp, PrecisionModel};
//! let a = Geometry::Polygon(polygon![[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]]);
//! let b = Geometry::Polygon(polygon![[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0), (1.0, 1.0)]]);
//! let result = overlay(&a, Some(&b), OverlayOp::Intersection, PrecisionModel::Floating).unwrap();
//! assert_eq!(result.area(), 1.0);
//! ```
extern crate static_aabb2d_index;

#[macro_use]
mod macros;

pub mod algorithm;
pub mod core;
pub mod error;
pub mod geometry;
pub mod noding;
pub mod overlay;
pub mod precision;
pub mod robust;

pub use static_aabb2d_index::AABB;

pub use crate::error::{OverlayError, OverlayResult};
pub use crate::geometry::{Coord, Dimension, Geometry, LineString, Location, Polygon};
pub use crate::overlay::{NodingStrategy, OverlayNg, OverlayOp, OverlayOptions};
pub use crate::precision::PrecisionModel;
pub use crate::robust::{overlay, overlay_with_options, union_self};
