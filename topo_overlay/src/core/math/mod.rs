//! Core/common math functions for working with 2D space and robust predicates.
mod base_math;
mod dd;
mod orientation;
mod vector2;

pub use base_math::*;
pub use dd::DD;
pub use orientation::{intersection_point, orientation_index, Orientation};
pub use vector2::{vec2, Vector2};
