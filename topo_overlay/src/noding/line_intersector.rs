use crate::{
    algorithm::orientation_index,
    core::{
        math::{self, point_seg_dist, Orientation},
        traits::Real,
    },
    geometry::{contains_point, intersects, segment_envelope, Coord},
    precision::PrecisionModel,
};

/// Kind of intersection found between two segments.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IntersectionKind {
    None,
    /// Segments meet in a single point.
    Point,
    /// Segments overlap along a sub segment.
    Collinear,
}

/// Computes the intersection of two line segments robustly.
///
/// Orientation tests decide whether the segments intersect, the intersection point itself is
/// only computed for proper intersections. Computed points may optionally be rounded to a
/// precision model.
#[derive(Debug, Clone)]
pub struct LineIntersector<T> {
    precision: PrecisionModel,
    kind: IntersectionKind,
    is_proper: bool,
    int_pts: [Coord<T>; 2],
    input: [[Coord<T>; 2]; 2],
}

impl<T> Default for LineIntersector<T>
where
    T: Real,
{
    fn default() -> Self {
        Self::new(PrecisionModel::Floating)
    }
}

impl<T> LineIntersector<T>
where
    T: Real,
{
    pub fn new(precision: PrecisionModel) -> Self {
        let zero = Coord::new(T::zero(), T::zero());
        LineIntersector {
            precision,
            kind: IntersectionKind::None,
            is_proper: false,
            int_pts: [zero; 2],
            input: [[zero; 2]; 2],
        }
    }

    #[inline]
    pub fn kind(&self) -> IntersectionKind {
        self.kind
    }

    #[inline]
    pub fn has_intersection(&self) -> bool {
        self.kind != IntersectionKind::None
    }

    /// Number of intersection points found (0, 1 or 2).
    #[inline]
    pub fn intersection_num(&self) -> usize {
        match self.kind {
            IntersectionKind::None => 0,
            IntersectionKind::Point => 1,
            IntersectionKind::Collinear => 2,
        }
    }

    #[inline]
    pub fn intersection(&self, index: usize) -> &Coord<T> {
        &self.int_pts[index]
    }

    /// `true` if the segments meet in a single point interior to both.
    #[inline]
    pub fn is_proper(&self) -> bool {
        self.has_intersection() && self.is_proper
    }

    /// `true` if any intersection point is interior to either input segment.
    pub fn is_interior_intersection(&self) -> bool {
        self.is_interior_intersection_of(0) || self.is_interior_intersection_of(1)
    }

    /// `true` if any intersection point is interior to input segment `input_index`.
    pub fn is_interior_intersection_of(&self, input_index: usize) -> bool {
        let seg = &self.input[input_index];
        self.int_pts[..self.intersection_num()]
            .iter()
            .any(|p| !p.equals_2d(&seg[0]) && !p.equals_2d(&seg[1]))
    }

    /// Computes the intersection of segments `p1`-`p2` and `q1`-`q2`.
    pub fn compute_intersection(
        &mut self,
        p1: &Coord<T>,
        p2: &Coord<T>,
        q1: &Coord<T>,
        q2: &Coord<T>,
    ) {
        self.input = [[*p1, *p2], [*q1, *q2]];
        self.kind = self.compute_intersect(p1, p2, q1, q2);
    }

    fn compute_intersect(
        &mut self,
        p1: &Coord<T>,
        p2: &Coord<T>,
        q1: &Coord<T>,
        q2: &Coord<T>,
    ) -> IntersectionKind {
        self.is_proper = false;

        if !intersects(&segment_envelope(p1, p2), &segment_envelope(q1, q2)) {
            return IntersectionKind::None;
        }

        let pq1 = orientation_index(p1, p2, q1).as_i32();
        let pq2 = orientation_index(p1, p2, q2).as_i32();
        if pq1 * pq2 > 0 {
            return IntersectionKind::None;
        }

        let qp1 = orientation_index(q1, q2, p1).as_i32();
        let qp2 = orientation_index(q1, q2, p2).as_i32();
        if qp1 * qp2 > 0 {
            return IntersectionKind::None;
        }

        if pq1 == 0 && pq2 == 0 && qp1 == 0 && qp2 == 0 {
            return self.compute_collinear_intersection(p1, p2, q1, q2);
        }

        if pq1 == 0 || pq2 == 0 || qp1 == 0 || qp2 == 0 {
            // an endpoint lies on the other segment, use it exactly
            let p = if p1.equals_2d(q1) || p1.equals_2d(q2) {
                *p1
            } else if p2.equals_2d(q1) || p2.equals_2d(q2) {
                *p2
            } else if pq1 == 0 {
                with_interpolated_z(q1, p1, p2)
            } else if pq2 == 0 {
                with_interpolated_z(q2, p1, p2)
            } else if qp1 == 0 {
                with_interpolated_z(p1, q1, q2)
            } else {
                with_interpolated_z(p2, q1, q2)
            };
            self.int_pts[0] = p;
        } else {
            self.is_proper = true;
            self.int_pts[0] = self.proper_intersection(p1, p2, q1, q2);
        }

        IntersectionKind::Point
    }

    fn compute_collinear_intersection(
        &mut self,
        p1: &Coord<T>,
        p2: &Coord<T>,
        q1: &Coord<T>,
        q2: &Coord<T>,
    ) -> IntersectionKind {
        let p_env = segment_envelope(p1, p2);
        let q_env = segment_envelope(q1, q2);
        let q1_in_p = contains_point(&p_env, q1);
        let q2_in_p = contains_point(&p_env, q2);
        let p1_in_q = contains_point(&q_env, p1);
        let p2_in_q = contains_point(&q_env, p2);

        let mut set = |a: &Coord<T>, b: &Coord<T>, single: bool| {
            self.int_pts = [*a, *b];
            if single {
                IntersectionKind::Point
            } else {
                IntersectionKind::Collinear
            }
        };

        if q1_in_p && q2_in_p {
            return set(q1, q2, false);
        }
        if p1_in_q && p2_in_q {
            return set(p1, p2, false);
        }
        if q1_in_p && p1_in_q {
            return set(q1, p1, q1.equals_2d(p1) && !q2_in_p && !p2_in_q);
        }
        if q1_in_p && p2_in_q {
            return set(q1, p2, q1.equals_2d(p2) && !q2_in_p && !p1_in_q);
        }
        if q2_in_p && p1_in_q {
            return set(q2, p1, q2.equals_2d(p1) && !q1_in_p && !p2_in_q);
        }
        if q2_in_p && p2_in_q {
            return set(q2, p2, q2.equals_2d(p2) && !q1_in_p && !p1_in_q);
        }
        IntersectionKind::None
    }

    fn proper_intersection(
        &self,
        p1: &Coord<T>,
        p2: &Coord<T>,
        q1: &Coord<T>,
        q2: &Coord<T>,
    ) -> Coord<T> {
        let computed = math::intersection_point(p1.xy(), p2.xy(), q1.xy(), q2.xy())
            .map(Coord::from_xy)
            .filter(|c| {
                contains_point(&segment_envelope(p1, p2), c)
                    && contains_point(&segment_envelope(q1, q2), c)
            });

        let mut pt = match computed {
            Some(c) => c,
            // round off pushed the point outside the segments, fall back to an endpoint
            None => nearest_endpoint(p1, p2, q1, q2),
        };
        pt.z = interpolate_z_pair(&pt, p1, p2, q1, q2);
        self.precision.make_precise(&pt)
    }
}

/// Endpoint of either segment which is nearest the other segment.
fn nearest_endpoint<T>(p1: &Coord<T>, p2: &Coord<T>, q1: &Coord<T>, q2: &Coord<T>) -> Coord<T>
where
    T: Real,
{
    let candidates = [
        (p1, point_seg_dist(p1.xy(), q1.xy(), q2.xy())),
        (p2, point_seg_dist(p2.xy(), q1.xy(), q2.xy())),
        (q1, point_seg_dist(q1.xy(), p1.xy(), p2.xy())),
        (q2, point_seg_dist(q2.xy(), p1.xy(), p2.xy())),
    ];
    let mut best = candidates[0];
    for c in &candidates[1..] {
        if c.1 < best.1 {
            best = *c;
        }
    }
    *best.0
}

/// `p` with a z taken from itself or interpolated along `p0`-`p1`.
fn with_interpolated_z<T>(p: &Coord<T>, p0: &Coord<T>, p1: &Coord<T>) -> Coord<T>
where
    T: Real,
{
    if p.z.is_some() {
        return *p;
    }
    Coord {
        z: interpolate_z(p, p0, p1),
        ..*p
    }
}

/// Linear interpolation of z at `p` along the segment `p0`-`p1`.
pub(crate) fn interpolate_z<T>(p: &Coord<T>, p0: &Coord<T>, p1: &Coord<T>) -> Option<T>
where
    T: Real,
{
    let (z0, z1) = match (p0.z, p1.z) {
        (None, z) | (z, None) => return z,
        (Some(z0), Some(z1)) => (z0, z1),
    };
    if p.equals_2d(p0) {
        return Some(z0);
    }
    if p.equals_2d(p1) || z0 == z1 {
        return Some(z1);
    }
    let seg_len = (p1.xy() - p0.xy()).length_squared();
    let p_len = (p.xy() - p0.xy()).length_squared();
    let frac = num_traits::real::Real::min((p_len / seg_len).sqrt(), T::one());
    Some(z0 + frac * (z1 - z0))
}

fn interpolate_z_pair<T>(
    p: &Coord<T>,
    p1: &Coord<T>,
    p2: &Coord<T>,
    q1: &Coord<T>,
    q2: &Coord<T>,
) -> Option<T>
where
    T: Real,
{
    match (interpolate_z(p, p1, p2), interpolate_z(p, q1, q2)) {
        (Some(a), Some(b)) => Some((a + b) / T::two()),
        (a, None) => a,
        (None, b) => b,
    }
}

/// `true` if `p` lies on the segment `p1`-`p2`.
pub fn point_on_segment<T>(p: &Coord<T>, p1: &Coord<T>, p2: &Coord<T>) -> bool
where
    T: Real,
{
    contains_point(&segment_envelope(p1, p2), p)
        && orientation_index(p1, p2, p) == Orientation::Collinear
}
