//! Precision model (the rounding grid applied to computed coordinates) and helpers for
//! choosing a robust grid for a pair of geometries.
use crate::{
    core::traits::Real,
    geometry::{max_bound_magnitude, merge_opt, Coord, Geometry},
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of decimal digits which can be represented robustly in an `f64`.
pub const MAX_ROBUST_DP_DIGITS: i32 = 14;

/// Grid that coordinates are rounded to.
///
/// The model is a plain value: callers pass it into every overlay call and it may be freely
/// copied across threads.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum PrecisionModel {
    /// Full floating point precision, rounding is the identity.
    #[default]
    Floating,
    /// Coordinates are rounded to multiples of `1 / scale`.
    Fixed { scale: f64 },
}

/// Round half up (towards positive infinity), so rounding is uniform regardless of sign.
#[inline]
pub fn round_half_up(val: f64) -> f64 {
    let f = val.floor();
    if val - f >= 0.5 {
        f + 1.0
    } else {
        f
    }
}

impl PrecisionModel {
    /// Fixed precision model with the given scale factor, e.g. 1000 rounds to 3 decimal places.
    #[inline]
    pub fn fixed(scale: f64) -> Self {
        PrecisionModel::Fixed { scale }
    }

    /// Fixed precision model with cells of `grid_size` on each side.
    #[inline]
    pub fn fixed_grid(grid_size: f64) -> Self {
        PrecisionModel::Fixed {
            scale: 1.0 / grid_size,
        }
    }

    #[inline]
    pub fn is_floating(&self) -> bool {
        matches!(self, PrecisionModel::Floating)
    }

    /// Scale factor, 0 for floating precision.
    #[inline]
    pub fn scale(&self) -> f64 {
        match self {
            PrecisionModel::Floating => 0.0,
            PrecisionModel::Fixed { scale } => *scale,
        }
    }

    /// Size of a grid cell, 0 for floating precision.
    #[inline]
    pub fn grid_size(&self) -> f64 {
        match self {
            PrecisionModel::Floating => 0.0,
            PrecisionModel::Fixed { scale } => 1.0 / scale,
        }
    }

    /// Round a single value to the grid.
    #[inline]
    pub fn make_precise_value(&self, val: f64) -> f64 {
        match *self {
            PrecisionModel::Floating => val,
            PrecisionModel::Fixed { scale } => {
                if scale < 1.0 {
                    // large grid cells, divide by the grid size to keep the result exact
                    let grid = 1.0 / scale;
                    round_half_up(val / grid) * grid
                } else {
                    round_half_up(val * scale) / scale
                }
            }
        }
    }

    /// Round the x and y of a coordinate to the grid, z and m are kept.
    #[inline]
    pub fn make_precise<T>(&self, c: &Coord<T>) -> Coord<T>
    where
        T: Real,
    {
        if self.is_floating() {
            return *c;
        }
        let x = self.make_precise_value(c.x.to_f64_lossy());
        let y = self.make_precise_value(c.y.to_f64_lossy());
        c.with_xy(T::from_f64_lossy(x), T::from_f64_lossy(y))
    }
}

/// Scale factor which gives `precision_digits` significant digits for numbers of the magnitude
/// of `value`.
pub fn precision_scale(value: f64, precision_digits: i32) -> f64 {
    let magnitude = value.log10().ceil() as i32;
    let prec_digits = precision_digits - magnitude;
    10f64.powi(prec_digits)
}

/// Largest scale that keeps all coordinates of magnitude `value` within the robust number of
/// decimal digits.
pub fn safe_scale_value(value: f64) -> f64 {
    precision_scale(value, MAX_ROBUST_DP_DIGITS)
}

/// Safe scale for the combined extent of `a` and (optionally) `b`.
pub fn safe_scale<T>(a: &Geometry<T>, b: Option<&Geometry<T>>) -> f64
where
    T: Real,
{
    let env = merge_opt(a.envelope(), b.and_then(|g| g.envelope()));
    let max_bnd = env
        .map(|e| max_bound_magnitude(&e).to_f64_lossy())
        .unwrap_or(0.0);
    // avoid an infinite scale for geometries at the origin
    safe_scale_value(max_bnd.max(1.0))
}

/// Number of decimal places in the shortest representation of `value`.
pub fn number_of_decimals(value: f64) -> i32 {
    let s = format!("{value}");
    match s.split_once('.') {
        Some((_, frac)) => frac.trim_end_matches('0').len() as i32,
        None => 0,
    }
}

/// Scale factor given by the number of decimal places in `value`.
pub fn inherent_scale_value(value: f64) -> f64 {
    10f64.powi(number_of_decimals(value))
}

/// Largest inherent scale over all coordinate ordinates of the inputs.
pub fn inherent_scale<T>(a: &Geometry<T>, b: Option<&Geometry<T>>) -> f64
where
    T: Real,
{
    let mut scale = 0.0f64;
    let mut visit = |c: &Coord<T>| {
        scale = scale
            .max(inherent_scale_value(c.x.to_f64_lossy()))
            .max(inherent_scale_value(c.y.to_f64_lossy()));
    };
    a.visit_coords(&mut visit);
    if let Some(b) = b {
        b.visit_coords(&mut visit);
    }
    scale
}

/// The inherent scale if it is representable robustly, otherwise the safe scale.
pub fn robust_scale<T>(a: &Geometry<T>, b: Option<&Geometry<T>>) -> f64
where
    T: Real,
{
    let inherent = inherent_scale(a, b);
    let safe = safe_scale(a, b);
    if inherent <= safe {
        return inherent;
    }
    safe
}

/// Fixed precision model using [robust_scale].
pub fn robust_precision_model<T>(a: &Geometry<T>, b: Option<&Geometry<T>>) -> PrecisionModel
where
    T: Real,
{
    PrecisionModel::fixed(robust_scale(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::LineString;

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        let pm = PrecisionModel::fixed(10.0);
        assert_eq!(pm.make_precise_value(1.25), 1.3);
        assert_eq!(pm.make_precise_value(1.24), 1.2);
        assert_eq!(PrecisionModel::Floating.make_precise_value(1.2345), 1.2345);
    }

    #[test]
    fn large_grid_rounding() {
        let pm = PrecisionModel::fixed_grid(100.0);
        assert_eq!(pm.make_precise_value(149.0), 100.0);
        assert_eq!(pm.make_precise_value(150.0), 200.0);
        assert_eq!(pm.grid_size(), 100.0);
    }

    #[test]
    fn make_precise_keeps_z() {
        let pm = PrecisionModel::fixed(1.0);
        let c = pm.make_precise(&Coord::new_z(1.4, 2.6, 7.0));
        assert_eq!((c.x, c.y, c.z), (1.0, 3.0, Some(7.0)));
    }

    #[test]
    fn scale_estimates() {
        assert_eq!(number_of_decimals(1.25), 2);
        assert_eq!(number_of_decimals(100.0), 0);
        assert_eq!(safe_scale_value(1234.5), 1e10);

        let g = Geometry::LineString(LineString::from_xy(&[(1.5, 2.25), (3.0, 4.0)]));
        assert_eq!(inherent_scale(&g, None), 100.0);
        assert_eq!(robust_scale(&g, None), 100.0);
    }
}
