use super::HotPixel;
use crate::{
    core::traits::Real,
    error::OverlayResult,
    geometry::{build_index, expand_by, segment_envelope, Coord, CoordKey},
    precision::PrecisionModel,
};
use static_aabb2d_index::{StaticAABB2DIndex, AABB};
use std::collections::{btree_map::Entry, BTreeMap};

/// Collects the distinct hot pixels of a snap rounding pass and answers segment queries
/// against them once frozen.
#[derive(Debug, Clone)]
pub struct HotPixelIndex<T> {
    precision: PrecisionModel,
    scale: f64,
    pixels: BTreeMap<CoordKey<T>, HotPixel<T>>,
}

impl<T> HotPixelIndex<T>
where
    T: Real,
{
    pub fn new(precision: PrecisionModel) -> Self {
        HotPixelIndex {
            precision,
            scale: precision.scale(),
            pixels: BTreeMap::new(),
        }
    }

    /// Adds the pixel containing `p`.
    ///
    /// A pixel added more than once holds more than one vertex, so it is marked as a node.
    pub fn add(&mut self, p: &Coord<T>) -> &mut HotPixel<T> {
        let rounded = self.precision.make_precise(p);
        match self.pixels.entry(CoordKey(rounded)) {
            Entry::Occupied(entry) => {
                let hp = entry.into_mut();
                hp.set_to_node();
                hp
            }
            Entry::Vacant(entry) => entry.insert(HotPixel::new(rounded, self.scale)),
        }
    }

    /// Adds pixels which are nodes from the start, such as segment intersections.
    pub fn add_nodes<'a, I>(&mut self, pts: I)
    where
        I: IntoIterator<Item = &'a Coord<T>>,
    {
        for p in pts {
            self.add(p).set_to_node();
        }
    }

    pub fn add_all<'a, I>(&mut self, pts: I)
    where
        I: IntoIterator<Item = &'a Coord<T>>,
    {
        for p in pts {
            self.add(p);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Builds the spatial index over all pixels added so far.
    pub fn freeze(self) -> OverlayResult<FrozenHotPixelIndex<T>> {
        let pixels: Vec<HotPixel<T>> = self.pixels.into_values().collect();
        let index = if pixels.is_empty() {
            None
        } else {
            Some(build_index(pixels.iter().map(|hp| {
                let c = hp.coord();
                AABB::new(c.x, c.y, c.x, c.y)
            }))?)
        };
        Ok(FrozenHotPixelIndex {
            pixels,
            index,
            tolerance: T::from_f64_lossy(1.0 / self.scale),
            query_stack: Vec::new(),
        })
    }
}

/// Hot pixels with a spatial index ready for segment queries.
#[derive(Debug)]
pub struct FrozenHotPixelIndex<T>
where
    T: Real,
{
    pixels: Vec<HotPixel<T>>,
    index: Option<StaticAABB2DIndex<T>>,
    tolerance: T,
    query_stack: Vec<usize>,
}

impl<T> FrozenHotPixelIndex<T>
where
    T: Real,
{
    /// Visits every pixel whose center is within one grid cell of the segment envelope.
    pub fn query<F>(&mut self, p0: &Coord<T>, p1: &Coord<T>, visitor: F)
    where
        F: FnMut(&mut HotPixel<T>),
    {
        let env = expand_by(&segment_envelope(p0, p1), self.tolerance);
        self.query_env(&env, visitor);
    }

    /// Visits the pixels centered exactly at `p`.
    pub fn query_point<F>(&mut self, p: &Coord<T>, visitor: F)
    where
        F: FnMut(&mut HotPixel<T>),
    {
        self.query_env(&segment_envelope(p, p), visitor);
    }

    fn query_env<F>(&mut self, env: &AABB<T>, mut visitor: F)
    where
        F: FnMut(&mut HotPixel<T>),
    {
        let Some(index) = self.index.as_ref() else {
            return;
        };
        let hits = index.query_with_stack(
            env.min_x,
            env.min_y,
            env.max_x,
            env.max_y,
            &mut self.query_stack,
        );
        for i in hits {
            visitor(&mut self.pixels[i]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_pixels_become_nodes() {
        let mut index = HotPixelIndex::new(PrecisionModel::fixed(1.0));
        assert!(!index.add(&Coord::new(0.2, 0.1)).is_node());
        assert!(index.add(&Coord::new(-0.1, 0.3)).is_node());
        index.add_nodes([Coord::new(5.0, 5.0)].iter());
        assert!(!index.add(&Coord::new(9.0, 9.0)).is_node());
        assert_eq!(index.len(), 3);

        let mut frozen = index.freeze().unwrap();
        let mut nodes = Vec::new();
        frozen.query(&Coord::new(0.0, 0.0), &Coord::new(10.0, 10.0), |hp| {
            if hp.is_node() {
                nodes.push(hp.coord().to_f64_pair());
            }
        });
        nodes.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(nodes, vec![(0.0, 0.0), (5.0, 5.0)]);

        let mut hits = 0;
        frozen.query_point(&Coord::new(9.0, 9.0), |_| hits += 1);
        assert_eq!(hits, 1);
    }
}
