use super::Vector2;
use crate::core::traits::Real;

/// Returns the (min, max) values from `v1` and `v2`.
///
/// # Examples
///
/// ```
/// # use topo_overlay::core::math::*;
/// let (min_val, max_val) = min_max(8, 4);
/// assert_eq!(min_val, 4);
/// assert_eq!(max_val, 8);
/// ```
#[inline]
pub fn min_max<T>(v1: T, v2: T) -> (T, T)
where
    T: PartialOrd,
{
    if v1 < v2 {
        (v1, v2)
    } else {
        (v2, v1)
    }
}

/// Distance squared between the points `p0` and `p1`.
#[inline]
pub fn dist_squared<T>(p0: Vector2<T>, p1: Vector2<T>) -> T
where
    T: Real,
{
    let d = p0 - p1;
    d.dot(d)
}

/// Returns the closest point on the line segment from `p0` to `p1` to the `point` given.
///
/// Unlike a fuzzy closest point this uses exact parametric clamping, degenerate segments
/// return `p0`.
#[inline]
pub fn line_seg_closest_point<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> Vector2<T>
where
    T: Real,
{
    // Dot product used to find angles
    // See: http://geomalgorithms.com/a02-_lines.html
    let v = p1 - p0;
    let w = point - p0;
    let c1 = w.dot(v);
    if c1 <= T::zero() {
        return p0;
    }

    let c2 = v.length_squared();
    if c2 <= c1 {
        return p1;
    }

    let b = c1 / c2;
    p0 + v.scale(b)
}

/// Distance from `point` to the closest point on the segment `p0` to `p1`.
#[inline]
pub fn point_seg_dist<T>(point: Vector2<T>, p0: Vector2<T>, p1: Vector2<T>) -> T
where
    T: Real,
{
    dist_squared(point, line_seg_closest_point(p0, p1, point)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;
    use crate::core::traits::FuzzyEq;

    #[test]
    fn closest_point_clamps_to_segment() {
        let p0 = vec2(0.0f64, 0.0);
        let p1 = vec2(10.0f64, 0.0);
        assert_eq!(line_seg_closest_point(p0, p1, vec2(-5.0, 3.0)), p0);
        assert_eq!(line_seg_closest_point(p0, p1, vec2(15.0, 3.0)), p1);
        assert!(line_seg_closest_point(p0, p1, vec2(4.0, 3.0)).fuzzy_eq(vec2(4.0, 0.0)));
        assert!(point_seg_dist(vec2(4.0, 3.0), p0, p1).fuzzy_eq(3.0));
        // degenerate segment
        assert!(point_seg_dist(vec2(3.0, 4.0), p0, p0).fuzzy_eq(5.0));
    }
}
