use super::{FrozenHotPixelIndex, HotPixelIndex, SnapRoundingIntersectionAdder};
use crate::{
    core::traits::Real,
    error::{OverlayError, OverlayResult},
    geometry::{push_distinct, Coord},
    noding::{index_noder, Noder, SegmentString},
    precision::PrecisionModel,
};

/// Nodes linework by snap rounding: every vertex and intersection point defines a hot pixel on
/// the precision grid, and every segment passing through a hot pixel is snapped to its center.
///
/// The output is fully noded and all coordinates lie on the grid. Segments shorter than a grid
/// cell may collapse, collapsed strings are dropped.
#[derive(Debug, Clone)]
pub struct SnapRoundingNoder {
    precision: PrecisionModel,
    /// Number of strings which collapsed completely in the last call.
    pub collapsed_count: usize,
}

impl SnapRoundingNoder {
    pub fn new(precision: PrecisionModel) -> Self {
        SnapRoundingNoder {
            precision,
            collapsed_count: 0,
        }
    }

    #[inline]
    pub fn precision(&self) -> PrecisionModel {
        self.precision
    }

    /// Rounds the noded string and adds a node wherever one of its original segments passes
    /// through a hot pixel. Returns `None` if the string collapses to a point.
    fn snap<T>(
        &self,
        ss: &SegmentString<T>,
        pixels: &mut FrozenHotPixelIndex<T>,
    ) -> Option<SegmentString<T>>
    where
        T: Real,
    {
        let pts = ss.noded_coords();
        let mut pts_round: Vec<Coord<T>> = Vec::with_capacity(pts.len());
        for p in pts.iter() {
            push_distinct(&mut pts_round, self.precision.make_precise(p));
        }
        if pts_round.len() <= 1 {
            return None;
        }

        let mut snapped = SegmentString::new(pts_round, ss.tag);
        let mut snap_index = 0;
        for w in pts.windows(2) {
            let (p0, p1) = (&w[0], &w[1]);
            let curr_snap = *snapped.coord(snap_index);
            if self.precision.make_precise(p1).equals_2d(&curr_snap) {
                // segment collapsed by rounding
                continue;
            }
            // test the original segment, the rounded one may reach pixels the original misses
            pixels.query(p0, p1, |hp| {
                // a pixel holding an end of the segment only nodes it once it is a node
                if !hp.is_node() && (hp.intersects_point(p0) || hp.intersects_point(p1)) {
                    return;
                }
                if hp.intersects_segment(p0, p1) {
                    snapped.add_intersection(*hp.coord(), snap_index);
                    hp.set_to_node();
                }
            });
            snap_index += 1;
        }
        Some(snapped)
    }

    /// Adds a node at every interior vertex lying in a pixel which became a node while
    /// snapping.
    fn add_vertex_node_snaps<T>(&self, ss: &mut SegmentString<T>, pixels: &mut FrozenHotPixelIndex<T>)
    where
        T: Real,
    {
        let n = ss.coords().len();
        for i in 1..n.saturating_sub(1) {
            let p = *ss.coord(i);
            pixels.query_point(&p, |hp| {
                if hp.is_node() && hp.coord().equals_2d(&p) {
                    ss.add_intersection(p, i);
                }
            });
        }
    }
}

impl<T> Noder<T> for SnapRoundingNoder
where
    T: Real,
{
    fn compute_nodes(
        &mut self,
        strings: Vec<SegmentString<T>>,
    ) -> OverlayResult<Vec<SegmentString<T>>> {
        if self.precision.is_floating() {
            return Err(OverlayError::InvalidInput(
                "snap rounding requires a fixed precision model".to_string(),
            ));
        }
        self.collapsed_count = 0;

        // hot pixels are found before rounding so rounding cannot move vertices across edges
        let mut noded = strings.clone();
        let mut adder = SnapRoundingIntersectionAdder::new(self.precision);
        index_noder::compute_intersections(&mut noded, &mut adder)?;

        let mut pixel_index = HotPixelIndex::new(self.precision);
        pixel_index.add_nodes(adder.intersections.iter());
        for ss in strings.iter() {
            pixel_index.add_all(ss.coords());
        }
        let pixel_count = pixel_index.len();
        let mut pixels = pixel_index.freeze()?;

        let mut snapped_strings = Vec::with_capacity(noded.len());
        for ss in noded.iter() {
            match self.snap(ss, &mut pixels) {
                Some(snapped) => snapped_strings.push(snapped),
                None => self.collapsed_count += 1,
            }
        }
        // snapping marks more pixels as nodes, the strings with vertices in them are split too
        let mut result = Vec::with_capacity(snapped_strings.len());
        for mut ss in snapped_strings {
            self.add_vertex_node_snaps(&mut ss, &mut pixels);
            result.extend(ss.into_noded_substrings());
        }

        log::debug!(
            "snap rounding (scale {}): {} strings, {} intersections, {} hot pixels, {} collapsed, {} output strings",
            self.precision.scale(),
            strings.len(),
            adder.intersections.len(),
            pixel_count,
            self.collapsed_count,
            result.len()
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noding::validate_noding;

    fn ss(pts: &[(f64, f64)], tag: usize) -> SegmentString<f64> {
        SegmentString::new(pts.iter().map(|&(x, y)| Coord::new(x, y)).collect(), tag)
    }

    fn on_grid(strings: &[SegmentString<f64>], scale: f64) -> bool {
        strings.iter().flat_map(|s| s.coords()).all(|c| {
            (c.x * scale).round() == c.x * scale && (c.y * scale).round() == c.y * scale
        })
    }

    #[test]
    fn crossing_lines_are_noded_on_grid() {
        let mut noder = SnapRoundingNoder::new(PrecisionModel::fixed(1.0));
        let input = vec![
            ss(&[(0.0, 0.0), (10.0, 3.0)], 0),
            ss(&[(0.0, 3.0), (10.0, 0.0)], 1),
        ];
        let result = noder.compute_nodes(input).unwrap();
        assert_eq!(result.len(), 4);
        assert!(on_grid(&result, 1.0));
        assert!(validate_noding(&result).is_ok());
        assert_eq!(result.iter().filter(|s| s.tag == 0).count(), 2);
    }

    #[test]
    fn short_string_collapses() {
        let mut noder = SnapRoundingNoder::new(PrecisionModel::fixed(1.0));
        let input = vec![
            ss(&[(0.1, 0.1), (0.2, 0.2)], 0),
            ss(&[(0.0, 5.0), (5.0, 5.0)], 1),
        ];
        let result = noder.compute_nodes(input).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(noder.collapsed_count, 1);
        assert_eq!(result[0].tag, 1);
    }

    #[test]
    fn segment_snaps_to_nearby_vertex() {
        let mut noder = SnapRoundingNoder::new(PrecisionModel::fixed(1.0));
        // the vertex (5, 0.3) rounds to (5, 0) which lies in the pixel the horizontal line passes
        let input = vec![
            ss(&[(0.0, 0.0), (10.0, 0.0)], 0),
            ss(&[(5.0, 0.3), (5.0, 5.0)], 1),
        ];
        let result = noder.compute_nodes(input).unwrap();
        assert_eq!(result.iter().filter(|s| s.tag == 0).count(), 2);
        assert!(validate_noding(&result).is_ok());
    }

    #[test]
    fn vertex_in_pixel_noded_later_is_split() {
        let mut noder = SnapRoundingNoder::new(PrecisionModel::fixed(1.0));
        // the bend (5, 0.2) rounds into the pixel (5, 0), which only becomes a node when the
        // second line passes through it
        let input = vec![
            ss(&[(0.0, 0.0), (5.0, 0.2), (5.0, 10.0)], 0),
            ss(&[(4.0, -0.3), (6.0, -0.3)], 1),
        ];
        let result = noder.compute_nodes(input).unwrap();
        assert_eq!(result.iter().filter(|s| s.tag == 0).count(), 3);
        assert_eq!(result.iter().filter(|s| s.tag == 1).count(), 2);
        assert!(on_grid(&result, 1.0));
        assert!(validate_noding(&result).is_ok());
    }

    #[test]
    fn vertex_pixels_do_not_split_their_own_string() {
        let mut noder = SnapRoundingNoder::new(PrecisionModel::fixed(1.0));
        let input = vec![ss(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)], 0)];
        let result = noder.compute_nodes(input).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].coords().len(), 5);
    }

    #[test]
    fn floating_precision_rejected() {
        let mut noder = SnapRoundingNoder::new(PrecisionModel::Floating);
        let result = noder.compute_nodes(vec![ss(&[(0.0, 0.0), (1.0, 1.0)], 0)]);
        assert!(matches!(result, Err(OverlayError::InvalidInput(_))));
    }
}
