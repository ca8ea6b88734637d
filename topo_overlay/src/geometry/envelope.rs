//! Helpers for working with [AABB] values as geometry envelopes.
use super::Coord;
use crate::{
    core::traits::Real,
    error::{OverlayError, OverlayResult},
};
use static_aabb2d_index::{
    StaticAABB2DIndex, StaticAABB2DIndexBuildError, StaticAABB2DIndexBuilder, AABB,
};

/// Envelope of a set of coordinates, `None` if the set is empty.
pub fn envelope_of<'a, T, I>(coords: I) -> Option<AABB<T>>
where
    T: Real,
    I: IntoIterator<Item = &'a Coord<T>>,
{
    let mut result: Option<AABB<T>> = None;
    for c in coords {
        match result.as_mut() {
            Some(env) => expand_to_include(env, c.x, c.y),
            None => result = Some(AABB::new(c.x, c.y, c.x, c.y)),
        }
    }
    result
}

#[inline]
pub fn expand_to_include<T>(env: &mut AABB<T>, x: T, y: T)
where
    T: Real,
{
    if x < env.min_x {
        env.min_x = x;
    }
    if x > env.max_x {
        env.max_x = x;
    }
    if y < env.min_y {
        env.min_y = y;
    }
    if y > env.max_y {
        env.max_y = y;
    }
}

/// Smallest envelope containing both `a` and `b`.
#[inline]
pub fn merge<T>(a: &AABB<T>, b: &AABB<T>) -> AABB<T>
where
    T: Real,
{
    let mut result = *a;
    expand_to_include(&mut result, b.min_x, b.min_y);
    expand_to_include(&mut result, b.max_x, b.max_y);
    result
}

/// Merge of two optional envelopes.
pub fn merge_opt<T>(a: Option<AABB<T>>, b: Option<AABB<T>>) -> Option<AABB<T>>
where
    T: Real,
{
    match (a, b) {
        (Some(a), Some(b)) => Some(merge(&a, &b)),
        (a, None) => a,
        (None, b) => b,
    }
}

#[inline]
pub fn intersects<T>(a: &AABB<T>, b: &AABB<T>) -> bool
where
    T: Real,
{
    !(b.min_x > a.max_x || b.max_x < a.min_x || b.min_y > a.max_y || b.max_y < a.min_y)
}

#[inline]
pub fn contains_point<T>(env: &AABB<T>, c: &Coord<T>) -> bool
where
    T: Real,
{
    c.x >= env.min_x && c.x <= env.max_x && c.y >= env.min_y && c.y <= env.max_y
}

/// `true` if `env` fully contains `other`.
#[inline]
pub fn covers<T>(env: &AABB<T>, other: &AABB<T>) -> bool
where
    T: Real,
{
    other.min_x >= env.min_x
        && other.max_x <= env.max_x
        && other.min_y >= env.min_y
        && other.max_y <= env.max_y
}

/// `true` if the envelope of the segment `p0` to `p1` intersects `env`.
#[inline]
pub fn intersects_segment<T>(env: &AABB<T>, p0: &Coord<T>, p1: &Coord<T>) -> bool
where
    T: Real,
{
    intersects(env, &segment_envelope(p0, p1))
}

#[inline]
pub fn segment_envelope<T>(p0: &Coord<T>, p1: &Coord<T>) -> AABB<T>
where
    T: Real,
{
    let (min_x, max_x) = crate::core::math::min_max(p0.x, p1.x);
    let (min_y, max_y) = crate::core::math::min_max(p0.y, p1.y);
    AABB::new(min_x, min_y, max_x, max_y)
}

/// Intersection of two envelopes, `None` if they are disjoint.
pub fn intersection<T>(a: &AABB<T>, b: &AABB<T>) -> Option<AABB<T>>
where
    T: Real,
{
    if !intersects(a, b) {
        return None;
    }
    Some(AABB::new(
        num_traits::real::Real::max(a.min_x, b.min_x),
        num_traits::real::Real::max(a.min_y, b.min_y),
        num_traits::real::Real::min(a.max_x, b.max_x),
        num_traits::real::Real::min(a.max_y, b.max_y),
    ))
}

/// Expands the envelope by `distance` on every side.
#[inline]
pub fn expand_by<T>(env: &AABB<T>, distance: T) -> AABB<T>
where
    T: Real,
{
    AABB::new(
        env.min_x - distance,
        env.min_y - distance,
        env.max_x + distance,
        env.max_y + distance,
    )
}

#[inline]
pub fn width<T>(env: &AABB<T>) -> T
where
    T: Real,
{
    env.max_x - env.min_x
}

#[inline]
pub fn height<T>(env: &AABB<T>) -> T
where
    T: Real,
{
    env.max_y - env.min_y
}

/// Largest absolute value of any envelope bound.
pub fn max_bound_magnitude<T>(env: &AABB<T>) -> T
where
    T: Real,
{
    let m1 = num_traits::real::Real::max(env.min_x.abs(), env.max_x.abs());
    let m2 = num_traits::real::Real::max(env.min_y.abs(), env.max_y.abs());
    num_traits::real::Real::max(m1, m2)
}

/// Builds a static spatial index over `boxes`, the item index is the position in the iterator.
pub(crate) fn build_index<T, I>(boxes: I) -> OverlayResult<StaticAABB2DIndex<T>>
where
    T: Real,
    I: ExactSizeIterator<Item = AABB<T>>,
{
    let mut builder = StaticAABB2DIndexBuilder::new(boxes.len());
    for b in boxes {
        builder.add(b.min_x, b.min_y, b.max_x, b.max_y);
    }
    builder.build().map_err(|e| match e {
        StaticAABB2DIndexBuildError::ItemCountError { .. } => {
            OverlayError::topology("spatial index item count mismatch")
        }
        StaticAABB2DIndexBuildError::NumericCastError => {
            OverlayError::InvalidInput(format!("spatial index build failed: {e}"))
        }
    })
}
