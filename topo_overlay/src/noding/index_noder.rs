use super::{LineIntersector, SegmentString};
use crate::{
    core::traits::Real,
    error::OverlayResult,
    geometry::{build_index, segment_envelope},
};
use static_aabb2d_index as aabb_index;

/// Receives every pair of segments whose envelopes intersect.
pub trait SegmentIntersector<T>
where
    T: Real,
{
    /// Process segment `i0` of string `s0` against segment `i1` of string `s1`.
    fn process_intersections(
        &mut self,
        strings: &mut [SegmentString<T>],
        s0: usize,
        i0: usize,
        s1: usize,
        i1: usize,
    );

    /// Return `true` to stop processing any further segment pairs.
    fn is_done(&self) -> bool {
        false
    }
}

/// Finds candidate segment pairs with a static spatial index of all segments and passes each
/// pair once to a [SegmentIntersector].
pub fn compute_intersections<T, S>(
    strings: &mut [SegmentString<T>],
    intersector: &mut S,
) -> OverlayResult<()>
where
    T: Real,
    S: SegmentIntersector<T>,
{
    let mut segments = Vec::new();
    for (s, ss) in strings.iter().enumerate() {
        for i in 0..ss.segment_count() {
            segments.push((s, i));
        }
    }
    if segments.is_empty() {
        return Ok(());
    }

    let index = build_index(
        segments
            .iter()
            .map(|&(s, i)| segment_envelope(strings[s].coord(i), strings[s].coord(i + 1))),
    )?;

    let mut query_stack = Vec::with_capacity(8);
    let mut hits = Vec::new();
    for (j, &(s0, i0)) in segments.iter().enumerate() {
        let env = segment_envelope(strings[s0].coord(i0), strings[s0].coord(i0 + 1));
        hits.clear();
        let mut query_visitor = |k: usize| {
            // each unordered pair is processed once
            if k > j {
                hits.push(k);
            }
            aabb_index::Control::<()>::Continue
        };
        index.visit_query_with_stack(
            env.min_x,
            env.min_y,
            env.max_x,
            env.max_y,
            &mut query_visitor,
            &mut query_stack,
        );

        for &k in hits.iter() {
            let (s1, i1) = segments[k];
            intersector.process_intersections(strings, s0, i0, s1, i1);
            if intersector.is_done() {
                return Ok(());
            }
        }
    }

    Ok(())
}

/// `true` if the two segments are adjacent in the same string, or are the first and last
/// segment of a closed string, so a single shared vertex intersection is expected.
fn is_adjacent_segments<T>(ss: &SegmentString<T>, i0: usize, i1: usize) -> bool
where
    T: Real,
{
    if i0.abs_diff(i1) == 1 {
        return true;
    }
    if ss.is_closed() {
        let max_seg = ss.segment_count() - 1;
        if (i0 == 0 && i1 == max_seg) || (i1 == 0 && i0 == max_seg) {
            return true;
        }
    }
    false
}

/// Adds a node to both strings for every non trivial intersection found.
#[derive(Debug, Clone)]
pub struct IntersectionAdder<T> {
    li: LineIntersector<T>,
    /// Number of intersections which were not trivial shared vertices.
    pub num_intersections: usize,
    pub num_proper: usize,
    pub num_tests: usize,
}

impl<T> IntersectionAdder<T>
where
    T: Real,
{
    pub fn new(li: LineIntersector<T>) -> Self {
        IntersectionAdder {
            li,
            num_intersections: 0,
            num_proper: 0,
            num_tests: 0,
        }
    }

    fn is_trivial_intersection(&self, same_string: bool, ss: &SegmentString<T>, i0: usize, i1: usize) -> bool {
        same_string && self.li.intersection_num() == 1 && is_adjacent_segments(ss, i0, i1)
    }
}

impl<T> SegmentIntersector<T> for IntersectionAdder<T>
where
    T: Real,
{
    fn process_intersections(
        &mut self,
        strings: &mut [SegmentString<T>],
        s0: usize,
        i0: usize,
        s1: usize,
        i1: usize,
    ) {
        if s0 == s1 && i0 == i1 {
            return;
        }
        self.num_tests += 1;
        let (p00, p01) = (*strings[s0].coord(i0), *strings[s0].coord(i0 + 1));
        let (p10, p11) = (*strings[s1].coord(i1), *strings[s1].coord(i1 + 1));
        self.li.compute_intersection(&p00, &p01, &p10, &p11);
        if !self.li.has_intersection() {
            return;
        }
        if self.is_trivial_intersection(s0 == s1, &strings[s0], i0, i1) {
            return;
        }

        self.num_intersections += 1;
        if self.li.is_proper() {
            self.num_proper += 1;
        }
        for k in 0..self.li.intersection_num() {
            let p = *self.li.intersection(k);
            strings[s0].add_intersection(p, i0);
            strings[s1].add_intersection(p, i1);
        }
    }
}
