use super::orientation_index;
use crate::{
    core::{math::Orientation, traits::Real},
    geometry::{segment_envelope, Coord, Geometry, Location},
};
use static_aabb2d_index::{StaticAABB2DIndex, StaticAABB2DIndexBuilder};

/// Counts the crossings of a horizontal ray from a point with a set of ring segments, and
/// detects when the point lies exactly on a segment.
///
/// Segments may be supplied in any order and from several rings; the parity of the crossing
/// count of a valid polygonal geometry gives the location of the point.
#[derive(Debug, Clone)]
pub struct RayCrossingCounter<T> {
    p: Coord<T>,
    crossing_count: usize,
    is_point_on_segment: bool,
}

impl<T> RayCrossingCounter<T>
where
    T: Real,
{
    pub fn new(p: Coord<T>) -> Self {
        RayCrossingCounter {
            p,
            crossing_count: 0,
            is_point_on_segment: false,
        }
    }

    /// Counts one segment (`p1` to `p2`) of a ring.
    pub fn count_segment(&mut self, p1: &Coord<T>, p2: &Coord<T>) {
        let p = self.p;
        // segment strictly to the left of the test point cannot cross the ray
        if p1.x < p.x && p2.x < p.x {
            return;
        }

        if p.equals_2d(p2) {
            self.is_point_on_segment = true;
            return;
        }

        // horizontal segment, only need to check if the point lies on it
        if p1.y == p.y && p2.y == p.y {
            let (min_x, max_x) = crate::core::math::min_max(p1.x, p2.x);
            if p.x >= min_x && p.x <= max_x {
                self.is_point_on_segment = true;
            }
            return;
        }

        // segments crossing the ray height (half open in y so vertices are counted once)
        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            let mut orient = orientation_index(p1, p2, &p);
            if orient == Orientation::Collinear {
                self.is_point_on_segment = true;
                return;
            }
            // make the effective segment direction upwards
            if p2.y < p1.y {
                orient = orient.reversed();
            }
            if orient == Orientation::CounterClockwise {
                self.crossing_count += 1;
            }
        }
    }

    pub fn is_on_segment(&self) -> bool {
        self.is_point_on_segment
    }

    pub fn location(&self) -> Location {
        if self.is_point_on_segment {
            return Location::Boundary;
        }
        if self.crossing_count % 2 == 1 {
            return Location::Interior;
        }
        Location::Exterior
    }
}

/// Location of `p` relative to a single closed ring.
pub fn locate_point_in_ring<T>(p: &Coord<T>, ring: &[Coord<T>]) -> Location
where
    T: Real,
{
    let mut counter = RayCrossingCounter::new(*p);
    for w in ring.windows(2) {
        counter.count_segment(&w[0], &w[1]);
        if counter.is_on_segment() {
            break;
        }
    }
    counter.location()
}

/// Locates points relative to the polygonal components of a geometry using a spatial index of
/// all ring segments.
pub struct PointInAreaLocator<T>
where
    T: Real,
{
    segments: Vec<(Coord<T>, Coord<T>)>,
    index: Option<StaticAABB2DIndex<T>>,
}

impl<T> PointInAreaLocator<T>
where
    T: Real,
{
    pub fn new(geom: &Geometry<T>) -> Self {
        let mut segments = Vec::new();
        for poly in geom.polygons() {
            for ring in poly.rings() {
                for w in ring.coords.windows(2) {
                    segments.push((w[0], w[1]));
                }
            }
        }

        let index = if segments.is_empty() {
            None
        } else {
            let mut builder = StaticAABB2DIndexBuilder::new(segments.len());
            for (p0, p1) in segments.iter() {
                let env = segment_envelope(p0, p1);
                builder.add(env.min_x, env.min_y, env.max_x, env.max_y);
            }
            builder.build().ok()
        };

        PointInAreaLocator { segments, index }
    }

    /// Location of `p`: interior, on a ring (boundary), or exterior.
    pub fn locate(&self, p: &Coord<T>) -> Location {
        let mut counter = RayCrossingCounter::new(*p);
        match &self.index {
            Some(index) => {
                let max_x = index
                    .bounds()
                    .map_or(p.x, |b| num_traits::real::Real::max(b.max_x, p.x));
                for i in index.query(p.x, p.y, max_x, p.y) {
                    let (p0, p1) = &self.segments[i];
                    counter.count_segment(p0, p1);
                    if counter.is_on_segment() {
                        break;
                    }
                }
            }
            None => {
                // index could not be built, test every segment
                for (p0, p1) in self.segments.iter() {
                    counter.count_segment(p0, p1);
                }
            }
        }
        counter.location()
    }
}

/// Locates points relative to the linear components of a geometry. Points on any segment
/// (including line endpoints) are interior.
pub struct PointOnLineLocator<T>
where
    T: Real,
{
    segments: Vec<(Coord<T>, Coord<T>)>,
    index: Option<StaticAABB2DIndex<T>>,
}

impl<T> PointOnLineLocator<T>
where
    T: Real,
{
    pub fn new(geom: &Geometry<T>) -> Self {
        let mut segments = Vec::new();
        for line in geom.line_strings() {
            for w in line.coords.windows(2) {
                segments.push((w[0], w[1]));
            }
        }

        let index = if segments.is_empty() {
            None
        } else {
            let mut builder = StaticAABB2DIndexBuilder::new(segments.len());
            for (p0, p1) in segments.iter() {
                let env = segment_envelope(p0, p1);
                builder.add(env.min_x, env.min_y, env.max_x, env.max_y);
            }
            builder.build().ok()
        };

        PointOnLineLocator { segments, index }
    }

    fn on_segment(p: &Coord<T>, p0: &Coord<T>, p1: &Coord<T>) -> bool {
        let env = segment_envelope(p0, p1);
        crate::geometry::contains_point(&env, p)
            && orientation_index(p0, p1, p) == Orientation::Collinear
    }

    pub fn locate(&self, p: &Coord<T>) -> Location {
        let hit = match &self.index {
            Some(index) => index
                .query(p.x, p.y, p.x, p.y)
                .into_iter()
                .any(|i| Self::on_segment(p, &self.segments[i].0, &self.segments[i].1)),
            None => self
                .segments
                .iter()
                .any(|(p0, p1)| Self::on_segment(p, p0, p1)),
        };
        if hit {
            Location::Interior
        } else {
            Location::Exterior
        }
    }
}
