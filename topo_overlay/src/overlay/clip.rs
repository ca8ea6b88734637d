//! Reducing input linework to the part near the region where the result can lie.
use crate::{
    core::traits::Real,
    geometry::{
        contains_point, expand_to_include, intersects_segment, push_distinct, Coord, Geometry,
    },
};
use static_aabb2d_index::AABB;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum BoxEdge {
    Bottom,
    Right,
    Top,
    Left,
}

const BOX_EDGES: [BoxEdge; 4] = [BoxEdge::Bottom, BoxEdge::Right, BoxEdge::Top, BoxEdge::Left];

/// Clips a ring to a rectangle, one rectangle side at a time.
///
/// The clipped ring keeps the ring's topology relative to the rectangle but may contain
/// collapsed segments lying along the rectangle sides. Those become collapse edges and are
/// handled by the overlay, which is why clipping must only be used with a rectangle which
/// contains the whole result.
#[derive(Debug, Copy, Clone)]
pub struct RingClipper<T> {
    env: AABB<T>,
}

impl<T> RingClipper<T>
where
    T: Real,
{
    pub fn new(env: AABB<T>) -> Self {
        RingClipper { env }
    }

    /// Clip a closed ring, the result is closed or empty.
    pub fn clip(&self, pts: &[Coord<T>]) -> Vec<Coord<T>> {
        let mut result = pts.to_vec();
        for edge in BOX_EDGES {
            let close_ring = edge == BoxEdge::Left;
            result = self.clip_to_box_edge(&result, edge, close_ring);
            if result.is_empty() {
                break;
            }
        }
        result
    }

    fn clip_to_box_edge(&self, pts: &[Coord<T>], edge: BoxEdge, close_ring: bool) -> Vec<Coord<T>> {
        let mut result: Vec<Coord<T>> = Vec::with_capacity(pts.len());
        let Some(mut p0) = pts.last().copied() else {
            return result;
        };

        for p1 in pts.iter().copied() {
            if self.is_inside_edge(&p1, edge) {
                if !self.is_inside_edge(&p0, edge) {
                    push_distinct(&mut result, self.intersection(&p0, &p1, edge));
                }
                push_distinct(&mut result, p1);
            } else if self.is_inside_edge(&p0, edge) {
                push_distinct(&mut result, self.intersection(&p0, &p1, edge));
            }
            p0 = p1;
        }

        if close_ring {
            if let (Some(start), Some(end)) = (result.first().copied(), result.last()) {
                if !start.equals_2d(end) {
                    result.push(start);
                }
            }
        }
        result
    }

    fn intersection(&self, a: &Coord<T>, b: &Coord<T>, edge: BoxEdge) -> Coord<T> {
        let env = &self.env;
        match edge {
            BoxEdge::Bottom => Coord::new(intersection_line_y(a, b, env.min_y), env.min_y),
            BoxEdge::Right => Coord::new(env.max_x, intersection_line_x(a, b, env.max_x)),
            BoxEdge::Top => Coord::new(intersection_line_y(a, b, env.max_y), env.max_y),
            BoxEdge::Left => Coord::new(env.min_x, intersection_line_x(a, b, env.min_x)),
        }
    }

    fn is_inside_edge(&self, p: &Coord<T>, edge: BoxEdge) -> bool {
        let env = &self.env;
        match edge {
            BoxEdge::Bottom => p.y > env.min_y,
            BoxEdge::Right => p.x < env.max_x,
            BoxEdge::Top => p.y < env.max_y,
            BoxEdge::Left => p.x > env.min_x,
        }
    }
}

fn intersection_line_y<T>(a: &Coord<T>, b: &Coord<T>, y: T) -> T
where
    T: Real,
{
    let m = (b.x - a.x) / (b.y - a.y);
    a.x + (y - a.y) * m
}

fn intersection_line_x<T>(a: &Coord<T>, b: &Coord<T>, x: T) -> T
where
    T: Real,
{
    let m = (b.y - a.y) / (b.x - a.x);
    a.y + (x - a.x) * m
}

/// Limits a line to the sections which intersect a rectangle.
///
/// Each section keeps the vertex just outside the rectangle at either end so the segments
/// crossing into the rectangle are preserved exactly. Unlike clipping no new vertices are
/// created, so the output only ever contains input vertices.
#[derive(Debug, Clone)]
pub struct LineLimiter<T> {
    env: AABB<T>,
    last_outside: Option<Coord<T>>,
    section: Option<Vec<Coord<T>>>,
    sections: Vec<Vec<Coord<T>>>,
}

impl<T> LineLimiter<T>
where
    T: Real,
{
    pub fn new(env: AABB<T>) -> Self {
        LineLimiter {
            env,
            last_outside: None,
            section: None,
            sections: Vec::new(),
        }
    }

    pub fn limit(mut self, pts: &[Coord<T>]) -> Vec<Vec<Coord<T>>> {
        for p in pts {
            if contains_point(&self.env, p) {
                self.add_point(*p);
            } else {
                self.add_outside(*p);
            }
        }
        self.finish_section();
        self.sections
    }

    fn add_point(&mut self, p: Coord<T>) {
        self.start_section();
        if let Some(section) = self.section.as_mut() {
            push_distinct(section, p);
        }
    }

    fn add_outside(&mut self, p: Coord<T>) {
        if self.is_last_segment_intersecting(&p) {
            if let Some(last) = self.last_outside {
                self.add_point(last);
            }
            self.add_point(p);
        } else {
            self.finish_section();
        }
        self.last_outside = Some(p);
    }

    fn is_last_segment_intersecting(&self, p: &Coord<T>) -> bool {
        match &self.last_outside {
            // first point outside after being inside the rectangle
            None => self.section.is_some(),
            Some(last) => intersects_segment(&self.env, last, p),
        }
    }

    fn start_section(&mut self) {
        let section = self.section.get_or_insert_with(Vec::new);
        if let Some(last) = self.last_outside.take() {
            push_distinct(section, last);
        }
    }

    fn finish_section(&mut self) {
        let Some(mut section) = self.section.take() else {
            return;
        };
        if let Some(last) = self.last_outside.take() {
            push_distinct(&mut section, last);
        }
        self.sections.push(section);
    }
}

/// Envelope for clipping polygon rings to `target` without introducing new vertices near the
/// result.
///
/// Every ring segment touching `target` is included completely, so clipping only ever cuts
/// segments that lie well away from the region where the result can be.
pub fn robust_clip_envelope<T>(
    a: &Geometry<T>,
    b: Option<&Geometry<T>>,
    target: &AABB<T>,
) -> AABB<T>
where
    T: Real,
{
    let mut clip_env = *target;
    for g in std::iter::once(a).chain(b) {
        for poly in g.polygons() {
            for ring in poly.rings() {
                for seg in ring.coords.windows(2) {
                    if intersects_segment(target, &seg[0], &seg[1]) {
                        expand_to_include(&mut clip_env, seg[0].x, seg[0].y);
                        expand_to_include(&mut clip_env, seg[1].x, seg[1].y);
                    }
                }
            }
        }
    }
    clip_env
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{LineString, Polygon};

    fn pts(xy: &[(f64, f64)]) -> Vec<Coord<f64>> {
        xy.iter().map(|&(x, y)| Coord::new(x, y)).collect()
    }

    fn xy(pts: &[Coord<f64>]) -> Vec<(f64, f64)> {
        pts.iter().map(|c| (c.x, c.y)).collect()
    }

    #[test]
    fn ring_inside_is_unchanged() {
        let clipper = RingClipper::new(AABB::new(-10.0, -10.0, 10.0, 10.0));
        let ring = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        assert_eq!(xy(&clipper.clip(&ring)), xy(&ring));
    }

    #[test]
    fn ring_is_clipped_to_box() {
        let clipper = RingClipper::new(AABB::new(0.0, 0.0, 2.0, 2.0));
        let ring = pts(&[(-1.0, -1.0), (3.0, -1.0), (3.0, 3.0), (-1.0, 3.0), (-1.0, -1.0)]);
        let clipped = clipper.clip(&ring);
        assert!(clipped.first().unwrap().equals_2d(clipped.last().unwrap()));
        assert!(clipped
            .iter()
            .all(|c| c.x >= 0.0 && c.x <= 2.0 && c.y >= 0.0 && c.y <= 2.0));
        let area = LineString::new(clipped).signed_area().abs();
        assert!((area - 4.0).abs() < 1e-12);
    }

    #[test]
    fn ring_outside_is_removed() {
        let clipper = RingClipper::new(AABB::new(0.0, 0.0, 2.0, 2.0));
        let ring = pts(&[(5.0, 5.0), (6.0, 5.0), (6.0, 6.0), (5.0, 5.0)]);
        assert!(clipper.clip(&ring).is_empty());
    }

    #[test]
    fn line_limiter_keeps_crossing_sections() {
        let limiter = LineLimiter::new(AABB::new(0.0, 0.0, 10.0, 10.0));
        let line = pts(&[
            (-20.0, 5.0),
            (-10.0, 5.0),
            (5.0, 5.0),
            (20.0, 5.0),
            (30.0, 5.0),
            (30.0, 30.0),
            (5.0, 30.0),
            (5.0, 8.0),
            (6.0, 8.0),
        ]);
        let sections = limiter.limit(&line);
        assert_eq!(sections.len(), 2);
        assert_eq!(xy(&sections[0]), vec![(-10.0, 5.0), (5.0, 5.0), (20.0, 5.0)]);
        assert_eq!(xy(&sections[1]), vec![(5.0, 30.0), (5.0, 8.0), (6.0, 8.0)]);
    }

    #[test]
    fn line_limiter_keeps_segment_passing_through() {
        let limiter = LineLimiter::new(AABB::new(0.0, 0.0, 10.0, 10.0));
        let line = pts(&[(-5.0, 5.0), (15.0, 5.0), (15.0, 20.0)]);
        let sections = limiter.limit(&line);
        assert_eq!(sections.len(), 1);
        assert_eq!(xy(&sections[0]), vec![(-5.0, 5.0), (15.0, 5.0)]);
    }

    #[test]
    fn robust_envelope_includes_whole_segments() {
        let poly = Geometry::Polygon(Polygon::new(
            LineString::from_xy(&[(0.0, 0.0), (100.0, 0.0), (100.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
            vec![],
        ));
        let target = AABB::new(40.0, -5.0, 60.0, 5.0);
        let env = robust_clip_envelope(&poly, None, &target);
        assert_eq!(
            (env.min_x, env.min_y, env.max_x, env.max_y),
            (0.0, -5.0, 100.0, 5.0)
        );
    }
}
