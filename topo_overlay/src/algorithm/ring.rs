use super::orientation_index;
use crate::{
    core::{math::Orientation, traits::Real},
    geometry::Coord,
};

/// Tests if a closed ring is oriented counter clockwise.
///
/// Uses the highest vertex of the ring and its neighbours, so it is robust to flat segments
/// and collapsed spikes. Returns `false` for degenerate rings (fewer than 3 distinct points,
/// or no area at the top vertex).
pub fn is_ccw<T>(ring: &[Coord<T>]) -> bool
where
    T: Real,
{
    if ring.len() < 4 {
        return false;
    }
    // number of points without the closing point
    let n_pts = ring.len() - 1;

    // find the first highest point reached by an upward segment
    let mut up_hi_pt = ring[0];
    let mut up_low_pt = ring[0];
    let mut prev_y = up_hi_pt.y;
    let mut i_up_hi = 0;
    for i in 1..=n_pts {
        let py = ring[i].y;
        if py > prev_y && py >= up_hi_pt.y {
            i_up_hi = i;
            up_hi_pt = ring[i];
            up_low_pt = ring[i - 1];
        }
        prev_y = py;
    }

    // flat ring
    if i_up_hi == 0 {
        return false;
    }

    // find the next lower point after the high point, skipping flat segments
    let mut i_down_low = i_up_hi;
    loop {
        i_down_low = (i_down_low + 1) % n_pts;
        if i_down_low == i_up_hi || ring[i_down_low].y != up_hi_pt.y {
            break;
        }
    }

    let down_low_pt = ring[i_down_low];
    let i_down_hi = if i_down_low > 0 { i_down_low - 1 } else { n_pts - 1 };
    let down_hi_pt = ring[i_down_hi];

    if up_hi_pt.equals_2d(&down_hi_pt) {
        // a single high vertex, orientation is given by the turn at that vertex
        if up_low_pt.equals_2d(&up_hi_pt)
            || down_low_pt.equals_2d(&up_hi_pt)
            || up_low_pt.equals_2d(&down_low_pt)
        {
            return false;
        }
        return orientation_index(&up_low_pt, &up_hi_pt, &down_low_pt)
            == Orientation::CounterClockwise;
    }

    // a flat top, ring is CCW if the top is traversed right to left
    down_hi_pt.x < up_hi_pt.x
}

/// Orientation of a ring as [Orientation::CounterClockwise] or [Orientation::Clockwise].
pub fn orientation<T>(ring: &[Coord<T>]) -> Orientation
where
    T: Real,
{
    if is_ccw(ring) {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}
