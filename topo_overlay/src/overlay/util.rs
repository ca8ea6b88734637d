//! Heuristics and helpers shared by the overlay stages.
use super::{clip::robust_clip_envelope, input::InputGeometry, OverlayOp};
use crate::{
    core::traits::Real,
    geometry::{expand_by, height, intersection, intersects, width, Dimension, Geometry},
    precision::PrecisionModel,
};
use static_aabb2d_index::AABB;

/// Fraction of the envelope size used to expand envelopes for floating precision.
const SAFE_ENV_BUFFER_FACTOR: f64 = 0.1;
/// Multiple of the grid size used to expand envelopes for fixed precision.
const SAFE_ENV_GRID_FACTOR: f64 = 3.0;
/// Tolerance of the result area checks.
const AREA_HEURISTIC_TOLERANCE: f64 = 0.1;

fn safe_expand_distance<T>(env: &AABB<T>, pm: &PrecisionModel) -> T
where
    T: Real,
{
    match pm {
        PrecisionModel::Floating => {
            let w = width(env).to_f64_lossy();
            let h = height(env).to_f64_lossy();
            let mut min_size = w.min(h);
            // zero width extents must still be expanded
            if min_size <= 0.0 {
                min_size = w.max(h);
            }
            T::from_f64_lossy(SAFE_ENV_BUFFER_FACTOR * min_size)
        }
        PrecisionModel::Fixed { .. } => T::from_f64_lossy(SAFE_ENV_GRID_FACTOR * pm.grid_size()),
    }
}

/// Envelope expanded enough that precision reduction cannot move linework across it.
pub fn safe_env<T>(env: &AABB<T>, pm: &PrecisionModel) -> AABB<T>
where
    T: Real,
{
    expand_by(env, safe_expand_distance(env, pm))
}

/// Envelope known to contain the whole overlay result, `None` when the result may lie anywhere
/// within the inputs.
fn result_envelope<T>(op: OverlayOp, input: &InputGeometry<'_, T>, pm: &PrecisionModel) -> Option<AABB<T>>
where
    T: Real,
{
    match op {
        OverlayOp::Intersection => {
            let env_a = safe_env(&input.envelope(0)?, pm);
            let env_b = safe_env(&input.envelope(1)?, pm);
            intersection(&env_a, &env_b)
        }
        OverlayOp::Difference => Some(safe_env(&input.envelope(0)?, pm)),
        OverlayOp::Union | OverlayOp::SymDifference => None,
    }
}

/// Envelope the input linework may be clipped to without changing the overlay result.
pub fn clipping_envelope<T>(
    op: OverlayOp,
    input: &InputGeometry<'_, T>,
    pm: &PrecisionModel,
) -> Option<AABB<T>>
where
    T: Real,
{
    let result_env = result_envelope(op, input, pm)?;
    let a = input.geometry(0)?;
    let clip_env = robust_clip_envelope(a, input.geometry(1), &result_env);
    Some(safe_env(&clip_env, pm))
}

fn is_env_disjoint<T>(a: &Geometry<T>, b: &Geometry<T>, pm: &PrecisionModel) -> bool
where
    T: Real,
{
    let (Some(env_a), Some(env_b)) = (a.envelope(), b.envelope()) else {
        return true;
    };
    if pm.is_floating() {
        return !intersects(&env_a, &env_b);
    }
    let p = |v: T| pm.make_precise_value(v.to_f64_lossy());
    p(env_b.min_x) > p(env_a.max_x)
        || p(env_b.max_x) < p(env_a.min_x)
        || p(env_b.min_y) > p(env_a.max_y)
        || p(env_b.max_y) < p(env_a.min_y)
}

/// Tests whether the result is known to be empty without computing it.
pub fn is_empty_result<T>(
    op: OverlayOp,
    a: &Geometry<T>,
    b: Option<&Geometry<T>>,
    pm: &PrecisionModel,
) -> bool
where
    T: Real,
{
    let is_empty = |g: Option<&Geometry<T>>| g.map_or(true, |g| g.is_empty());
    match op {
        OverlayOp::Intersection => match b {
            Some(b) => a.is_empty() || b.is_empty() || is_env_disjoint(a, b, pm),
            None => true,
        },
        OverlayOp::Difference => a.is_empty(),
        OverlayOp::Union | OverlayOp::SymDifference => a.is_empty() && is_empty(b),
    }
}

/// Checks the area of a result against the input areas, catching gross labelling failures
/// caused by invalid noding.
pub fn is_result_area_consistent<T>(
    a: &Geometry<T>,
    b: Option<&Geometry<T>>,
    op: OverlayOp,
    result: &Geometry<T>,
) -> bool
where
    T: Real,
{
    let Some(b) = b else {
        return true;
    };
    if result.dimension() < Dimension::Area {
        return true;
    }

    let area_result = result.area().to_f64_lossy();
    let area_a = a.area().to_f64_lossy();
    let area_b = b.area().to_f64_lossy();
    let tol = AREA_HEURISTIC_TOLERANCE;

    match op {
        OverlayOp::Intersection => {
            is_less(area_result, area_a, tol) && is_less(area_result, area_b, tol)
        }
        OverlayOp::Difference => {
            is_less(area_result, area_a, tol) && area_result > area_a - area_b - tol * area_a
        }
        OverlayOp::SymDifference => is_less(area_result, area_a + area_b, tol),
        OverlayOp::Union => {
            is_less(area_a, area_result, tol)
                && is_less(area_b, area_result, tol)
                && is_greater(area_result, area_a - area_b, tol)
        }
    }
}

fn is_less(v1: f64, v2: f64, tol: f64) -> bool {
    v1 <= v2 * (1.0 + tol)
}

fn is_greater(v1: f64, v2: f64, tol: f64) -> bool {
    v1 >= v2 * (1.0 - tol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{LineString, Polygon};

    fn square(x: f64, y: f64, size: f64) -> Geometry<f64> {
        Geometry::Polygon(Polygon::new(
            LineString::from_xy(&[
                (x, y),
                (x + size, y),
                (x + size, y + size),
                (x, y + size),
                (x, y),
            ]),
            vec![],
        ))
    }

    #[test]
    fn empty_result_shortcuts() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(5.0, 5.0, 1.0);
        let pm = PrecisionModel::Floating;
        assert!(is_empty_result(OverlayOp::Intersection, &a, Some(&b), &pm));
        assert!(!is_empty_result(OverlayOp::Union, &a, Some(&b), &pm));
        let empty = Geometry::<f64>::empty(Dimension::Area);
        assert!(is_empty_result(OverlayOp::Difference, &empty, Some(&b), &pm));
        assert!(is_empty_result(OverlayOp::SymDifference, &empty, Some(&empty), &pm));
    }

    #[test]
    fn disjoint_test_uses_rounded_envelopes() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(1.2, 0.0, 1.0);
        assert!(is_empty_result(OverlayOp::Intersection, &a, Some(&b), &PrecisionModel::Floating));
        assert!(!is_empty_result(OverlayOp::Intersection, &a, Some(&b), &PrecisionModel::fixed(1.0)));
    }

    #[test]
    fn safe_env_expansion() {
        let env = AABB::new(0.0, 0.0, 10.0, 0.0);
        let safe = safe_env(&env, &PrecisionModel::Floating);
        assert_eq!((safe.min_x, safe.min_y, safe.max_x, safe.max_y), (-1.0, -1.0, 11.0, 1.0));
        let safe = safe_env(&env, &PrecisionModel::fixed(2.0));
        assert_eq!((safe.min_x, safe.max_y), (-1.5, 1.5));
    }

    #[test]
    fn area_consistency() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        let good = square(1.0, 1.0, 1.0);
        let bad = square(0.0, 0.0, 3.0);
        assert!(is_result_area_consistent(&a, Some(&b), OverlayOp::Intersection, &good));
        assert!(!is_result_area_consistent(&a, Some(&b), OverlayOp::Intersection, &bad));
        assert!(!is_result_area_consistent(&a, Some(&b), OverlayOp::Union, &good));
    }
}
