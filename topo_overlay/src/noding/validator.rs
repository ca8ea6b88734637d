use super::{index_noder, LineIntersector, SegmentIntersector, SegmentString};
use crate::{
    core::traits::Real,
    error::{OverlayError, OverlayResult},
    geometry::Coord,
};

/// Finds the first location where a set of supposedly noded strings is not fully noded: an
/// intersection interior to a segment, or a vertex of one string touching an interior vertex of
/// another.
#[derive(Debug, Clone)]
struct NodingIntersectionFinder<T> {
    li: LineIntersector<T>,
    found: Option<Coord<T>>,
}

impl<T> NodingIntersectionFinder<T>
where
    T: Real,
{
    fn is_interior_vertex_intersection(
        p0: &Coord<T>,
        p1: &Coord<T>,
        is_end0: bool,
        is_end1: bool,
    ) -> bool {
        // shared endpoints of two strings are proper nodes
        if is_end0 && is_end1 {
            return false;
        }
        p0.equals_2d(p1)
    }

    fn has_interior_vertex_intersection(
        p00: &Coord<T>,
        p01: &Coord<T>,
        p10: &Coord<T>,
        p11: &Coord<T>,
        ends: [bool; 4],
    ) -> bool {
        let [is_end00, is_end01, is_end10, is_end11] = ends;
        Self::is_interior_vertex_intersection(p00, p10, is_end00, is_end10)
            || Self::is_interior_vertex_intersection(p00, p11, is_end00, is_end11)
            || Self::is_interior_vertex_intersection(p01, p10, is_end01, is_end10)
            || Self::is_interior_vertex_intersection(p01, p11, is_end01, is_end11)
    }
}

impl<T> SegmentIntersector<T> for NodingIntersectionFinder<T>
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
        let (p00, p01) = (strings[s0].coord(i0), strings[s0].coord(i0 + 1));
        let (p10, p11) = (strings[s1].coord(i1), strings[s1].coord(i1 + 1));

        self.li.compute_intersection(p00, p01, p10, p11);
        if !self.li.has_intersection() {
            return;
        }

        if self.li.is_interior_intersection() {
            self.found = Some(*self.li.intersection(0));
            return;
        }

        // vertices shared by segments of one string are its own nodes
        if s0 == s1 {
            return;
        }
        let ends = [
            i0 == 0,
            i0 + 2 == strings[s0].len(),
            i1 == 0,
            i1 + 2 == strings[s1].len(),
        ];
        if Self::has_interior_vertex_intersection(p00, p01, p10, p11, ends) {
            self.found = Some(*self.li.intersection(0));
        }
    }

    fn is_done(&self) -> bool {
        self.found.is_some()
    }
}

/// Checks that noded strings intersect only at string endpoints, returning a
/// [OverlayError::NodingFailure] at the first interior intersection found.
pub fn validate_noding<T>(strings: &[SegmentString<T>]) -> OverlayResult<()>
where
    T: Real,
{
    let mut finder = NodingIntersectionFinder {
        li: LineIntersector::default(),
        found: None,
    };
    // the finder never adds nodes, so a copy of the coordinates is all that is needed
    let mut check: Vec<SegmentString<T>> = strings
        .iter()
        .map(|ss| SegmentString::new(ss.coords().to_vec(), ss.tag))
        .collect();
    index_noder::compute_intersections(&mut check, &mut finder)?;
    match finder.found {
        Some(p) => {
            let (x, y) = p.to_f64_pair();
            Err(OverlayError::noding_at("found non-noded intersection", x, y))
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ss(pts: &[(f64, f64)]) -> SegmentString<f64> {
        SegmentString::new(pts.iter().map(|&(x, y)| Coord::new(x, y)).collect(), 0)
    }

    #[test]
    fn noded_strings_pass() {
        let strings = vec![
            ss(&[(0.0, 0.0), (5.0, 5.0)]),
            ss(&[(5.0, 5.0), (10.0, 10.0)]),
            ss(&[(0.0, 10.0), (5.0, 5.0)]),
        ];
        assert!(validate_noding(&strings).is_ok());
    }

    #[test]
    fn crossing_strings_fail() {
        let strings = vec![
            ss(&[(0.0, 0.0), (10.0, 10.0)]),
            ss(&[(0.0, 10.0), (10.0, 0.0)]),
        ];
        let err = validate_noding(&strings).unwrap_err();
        assert_eq!(
            err,
            OverlayError::NodingFailure {
                message: "found non-noded intersection".to_string(),
                location: Some((5.0, 5.0)),
            }
        );
    }

    #[test]
    fn vertex_touching_interior_vertex_fails() {
        let strings = vec![
            ss(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]),
            ss(&[(5.0, 0.0), (5.0, 5.0)]),
        ];
        assert!(validate_noding(&strings).is_err());
    }

    #[test]
    fn interior_vertices_of_one_string_pass() {
        let strings = vec![
            ss(&[(2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]),
            ss(&[(1.0, 2.0), (0.0, 2.0), (0.0, 0.0), (2.0, 0.0), (2.0, 1.0)]),
            ss(&[(2.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0), (1.0, 2.0)]),
            ss(&[(1.0, 2.0), (1.0, 1.0), (2.0, 1.0)]),
        ];
        assert!(validate_noding(&strings).is_ok());
    }

    #[test]
    fn self_crossing_string_fails() {
        let strings = vec![ss(&[(0.0, 0.0), (4.0, 4.0), (4.0, 0.0), (0.0, 4.0)])];
        let err = validate_noding(&strings).unwrap_err();
        assert_eq!(
            err,
            OverlayError::NodingFailure {
                message: "found non-noded intersection".to_string(),
                location: Some((2.0, 2.0)),
            }
        );
    }
}
