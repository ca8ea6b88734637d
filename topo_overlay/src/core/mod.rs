//! Core module has common/shared math, numeric traits, and robust predicates.
pub mod math;
pub mod traits;
