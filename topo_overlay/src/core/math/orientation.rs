use super::{Vector2, DD};
use crate::core::traits::Real;

/// Orientation of a point relative to a directed line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Point is to the right of the line.
    Clockwise,
    /// Point lies on the line.
    Collinear,
    /// Point is to the left of the line.
    CounterClockwise,
}

impl Orientation {
    #[inline]
    fn from_sign(sign: i32) -> Self {
        match sign {
            s if s > 0 => Orientation::CounterClockwise,
            s if s < 0 => Orientation::Clockwise,
            _ => Orientation::Collinear,
        }
    }

    /// Signed integer form: -1 (clockwise), 0 (collinear) or 1 (counter clockwise).
    #[inline]
    pub fn as_i32(self) -> i32 {
        match self {
            Orientation::Clockwise => -1,
            Orientation::Collinear => 0,
            Orientation::CounterClockwise => 1,
        }
    }

    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::Collinear => Orientation::Collinear,
            Orientation::CounterClockwise => Orientation::Clockwise,
        }
    }
}

/// Relative error bound used by the floating point filter.
const DP_SAFE_EPSILON: f64 = 1e-15;

/// Fast orientation test that returns `None` when rounding error could change the sign.
#[inline]
fn orientation_filter(pa: Vector2<f64>, pb: Vector2<f64>, pc: Vector2<f64>) -> Option<i32> {
    let det_left = (pa.x - pc.x) * (pb.y - pc.y);
    let det_right = (pa.y - pc.y) * (pb.x - pc.x);
    let det = det_left - det_right;

    let det_sum = if det_left > 0.0 {
        if det_right <= 0.0 {
            return Some(signum(det));
        }
        det_left + det_right
    } else if det_left < 0.0 {
        if det_right >= 0.0 {
            return Some(signum(det));
        }
        -det_left - det_right
    } else {
        return Some(signum(det));
    };

    let err_bound = DP_SAFE_EPSILON * det_sum;
    if det >= err_bound || -det >= err_bound {
        return Some(signum(det));
    }

    None
}

#[inline]
fn signum(v: f64) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Orientation of point `q` relative to the directed segment `p1` to `p2`.
///
/// The result is exact for all finite inputs: a floating point filter decides most cases and
/// double-double arithmetic decides the rest.
///
/// # Examples
///
/// ```
/// # use topo_overlay::core::math::*;
/// let p1 = vec2(0.0, 0.0);
/// let p2 = vec2(10.0, 0.0);
/// assert_eq!(orientation_index(p1, p2, vec2(5.0, 1.0)), Orientation::CounterClockwise);
/// assert_eq!(orientation_index(p1, p2, vec2(5.0, -1.0)), Orientation::Clockwise);
/// assert_eq!(orientation_index(p1, p2, vec2(20.0, 0.0)), Orientation::Collinear);
/// ```
pub fn orientation_index<T>(p1: Vector2<T>, p2: Vector2<T>, q: Vector2<T>) -> Orientation
where
    T: Real,
{
    let (p1, p2, q) = (p1.to_f64(), p2.to_f64(), q.to_f64());
    if let Some(sign) = orientation_filter(p1, p2, q) {
        return Orientation::from_sign(sign);
    }

    let dx1 = DD::new(p2.x) - p1.x;
    let dy1 = DD::new(p2.y) - p1.y;
    let dx2 = DD::new(q.x) - p2.x;
    let dy2 = DD::new(q.y) - p2.y;
    let det = dx1 * dy2 - dy1 * dx2;
    Orientation::from_sign(det.signum())
}

/// Intersection point of the infinite lines through `p1`-`p2` and `q1`-`q2`, computed with
/// double-double homogeneous coordinates.
///
/// Returns `None` for parallel lines or when the result is not finite.
pub fn intersection_point<T>(
    p1: Vector2<T>,
    p2: Vector2<T>,
    q1: Vector2<T>,
    q2: Vector2<T>,
) -> Option<Vector2<T>>
where
    T: Real,
{
    let (p1, p2, q1, q2) = (p1.to_f64(), p2.to_f64(), q1.to_f64(), q2.to_f64());

    let px = DD::new(p1.y) - p2.y;
    let py = DD::new(p2.x) - p1.x;
    let pw = DD::new(p1.x) * p2.y - DD::new(p2.x) * p1.y;

    let qx = DD::new(q1.y) - q2.y;
    let qy = DD::new(q2.x) - q1.x;
    let qw = DD::new(q1.x) * q2.y - DD::new(q2.x) * q1.y;

    let x = py * qw - qy * pw;
    let y = qx * pw - px * qw;
    let w = px * qy - qx * py;

    if w.signum() == 0 {
        return None;
    }

    let x_int = (x / w).value();
    let y_int = (y / w).value();
    if !x_int.is_finite() || !y_int.is_finite() {
        return None;
    }

    Some(Vector2::new(T::from_f64_lossy(x_int), T::from_f64_lossy(y_int)))
}
