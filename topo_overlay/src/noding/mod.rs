//! Noding: splitting linework at every intersection so that segments meet only at endpoints.
mod index_noder;
mod line_intersector;
mod segment_string;
pub mod snap_round;
mod validator;

pub use index_noder::{compute_intersections, IntersectionAdder, SegmentIntersector};
pub use line_intersector::{point_on_segment, IntersectionKind, LineIntersector};
pub use segment_string::{SegmentNode, SegmentString};
pub use snap_round::SnapRoundingNoder;
pub use validator::validate_noding;

use crate::{core::traits::Real, error::OverlayResult};

/// Computes a fully noded set of strings from an input set.
pub trait Noder<T>
where
    T: Real,
{
    /// Nodes the `strings`, returning the split pieces. Each piece keeps the tag of the string
    /// it came from.
    fn compute_nodes(
        &mut self,
        strings: Vec<SegmentString<T>>,
    ) -> OverlayResult<Vec<SegmentString<T>>>;
}

/// Nodes linework at full floating point precision.
///
/// Computed intersection points are not exact, so the result may not be fully noded. With
/// validation enabled the result is checked and a noding failure is reported instead.
#[derive(Debug, Clone)]
pub struct FloatingNoder {
    pub validate: bool,
}

impl FloatingNoder {
    pub fn new(validate: bool) -> Self {
        FloatingNoder { validate }
    }
}

impl Default for FloatingNoder {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<T> Noder<T> for FloatingNoder
where
    T: Real,
{
    fn compute_nodes(
        &mut self,
        mut strings: Vec<SegmentString<T>>,
    ) -> OverlayResult<Vec<SegmentString<T>>> {
        let mut adder = IntersectionAdder::new(LineIntersector::default());
        compute_intersections(&mut strings, &mut adder)?;
        log::debug!(
            "floating noding: {} strings, {} segment tests, {} intersections ({} proper)",
            strings.len(),
            adder.num_tests,
            adder.num_intersections,
            adder.num_proper
        );

        let noded: Vec<SegmentString<T>> = strings
            .into_iter()
            .flat_map(|ss| ss.into_noded_substrings())
            .collect();

        if self.validate {
            validate_noding(&noded)?;
        }
        Ok(noded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::OverlayError, geometry::Coord};

    fn ss(pts: &[(f64, f64)], tag: usize) -> SegmentString<f64> {
        SegmentString::new(pts.iter().map(|&(x, y)| Coord::new(x, y)).collect(), tag)
    }

    #[test]
    fn floating_noder_splits_crossing_squares() {
        let a = ss(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)], 0);
        let b = ss(&[(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0), (5.0, 5.0)], 1);
        let mut noder = FloatingNoder::default();
        let noded = noder.compute_nodes(vec![a, b]).unwrap();
        // each ring is split at its two crossing points
        assert_eq!(noded.iter().filter(|s| s.tag == 0).count(), 3);
        assert_eq!(noded.iter().filter(|s| s.tag == 1).count(), 3);
    }

    #[test]
    fn floating_noder_is_validated() {
        // nearly parallel segments where the computed intersection is not exact
        let a = ss(&[(0.0, 0.0), (1.0, 0.3333333333333333)], 0);
        let b = ss(&[(0.0, 0.1), (1.0, 0.1000000000000001), (3.0, 0.0)], 1);
        let mut noder = FloatingNoder::default();
        match noder.compute_nodes(vec![a, b]) {
            Ok(noded) => assert!(validate_noding(&noded).is_ok()),
            Err(e) => assert!(matches!(e, OverlayError::NodingFailure { .. })),
        }
    }
}
