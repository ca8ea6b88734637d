use crate::geometry::Location;
use std::fmt;

/// Role a topology edge plays for one input geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LabelDim {
    /// The edge is not part of the input.
    NotPart,
    /// The edge is (part of) a line of the input.
    Line,
    /// The edge is part of an area boundary, so it has a left and a right side.
    Boundary,
    /// The edge is an area boundary which collapsed to a line during noding.
    Collapse,
}

/// Position relative to a directed edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Position {
    On,
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct InputLabel {
    dim: LabelDim,
    is_hole: bool,
    loc_left: Option<Location>,
    loc_right: Option<Location>,
    loc_line: Option<Location>,
}

impl InputLabel {
    const NOT_PART: InputLabel = InputLabel {
        dim: LabelDim::NotPart,
        is_hole: false,
        loc_left: None,
        loc_right: None,
        loc_line: None,
    };
}

/// Topological information about an edge for each of the two input geometries.
///
/// Side locations are stored relative to the forward direction of the edge, callers pass the
/// direction of the half-edge they are looking from. A `None` location is not yet known.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OverlayLabel {
    inputs: [InputLabel; 2],
}

impl Default for OverlayLabel {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayLabel {
    /// Label which is not part of either input.
    pub fn new() -> Self {
        OverlayLabel {
            inputs: [InputLabel::NOT_PART; 2],
        }
    }

    /// Initialize input `index` as an area boundary with the given side locations.
    pub fn init_boundary(
        &mut self,
        index: usize,
        loc_left: Location,
        loc_right: Location,
        is_hole: bool,
    ) {
        self.inputs[index] = InputLabel {
            dim: LabelDim::Boundary,
            is_hole,
            loc_left: Some(loc_left),
            loc_right: Some(loc_right),
            loc_line: Some(Location::Interior),
        };
    }

    pub fn init_collapse(&mut self, index: usize, is_hole: bool) {
        let l = &mut self.inputs[index];
        l.dim = LabelDim::Collapse;
        l.is_hole = is_hole;
    }

    pub fn init_line(&mut self, index: usize) {
        let l = &mut self.inputs[index];
        l.dim = LabelDim::Line;
        l.loc_line = None;
    }

    pub fn init_not_part(&mut self, index: usize) {
        self.inputs[index].dim = LabelDim::NotPart;
    }

    pub fn set_location_line(&mut self, index: usize, loc: Location) {
        self.inputs[index].loc_line = Some(loc);
    }

    pub fn set_location_all(&mut self, index: usize, loc: Location) {
        let l = &mut self.inputs[index];
        l.loc_line = Some(loc);
        l.loc_left = Some(loc);
        l.loc_right = Some(loc);
    }

    /// A collapsed hole lies in the interior of its shell, a collapsed shell in the exterior.
    pub fn set_location_collapse(&mut self, index: usize) {
        let l = &mut self.inputs[index];
        l.loc_line = Some(if l.is_hole {
            Location::Interior
        } else {
            Location::Exterior
        });
    }

    #[inline]
    pub fn dim(&self, index: usize) -> LabelDim {
        self.inputs[index].dim
    }

    /// `true` if the edge is a line for either input.
    pub fn is_line(&self) -> bool {
        self.is_line_of(0) || self.is_line_of(1)
    }

    #[inline]
    pub fn is_line_of(&self, index: usize) -> bool {
        self.inputs[index].dim == LabelDim::Line
    }

    /// `true` if the edge is linear (a line or a collapse) for either input.
    pub fn is_linear(&self) -> bool {
        self.is_linear_of(0) || self.is_linear_of(1)
    }

    pub fn is_linear_of(&self, index: usize) -> bool {
        matches!(self.inputs[index].dim, LabelDim::Line | LabelDim::Collapse)
    }

    pub fn is_known(&self, index: usize) -> bool {
        self.inputs[index].dim != LabelDim::NotPart
    }

    pub fn is_not_part(&self, index: usize) -> bool {
        self.inputs[index].dim == LabelDim::NotPart
    }

    pub fn is_boundary_either(&self) -> bool {
        self.is_boundary(0) || self.is_boundary(1)
    }

    pub fn is_boundary_both(&self) -> bool {
        self.is_boundary(0) && self.is_boundary(1)
    }

    #[inline]
    pub fn is_boundary(&self, index: usize) -> bool {
        self.inputs[index].dim == LabelDim::Boundary
    }

    /// The edge is a boundary of one input and a collapse of the other.
    pub fn is_boundary_collapse(&self) -> bool {
        if self.is_line() {
            return false;
        }
        !self.is_boundary_both()
    }

    /// Both inputs have a boundary here, with the interiors on opposite sides.
    pub fn is_boundary_touch(&self) -> bool {
        self.is_boundary_both()
            && self.location(0, Position::Right, true) != self.location(1, Position::Right, true)
    }

    /// The edge is a boundary of one input and not part of the other.
    pub fn is_boundary_singleton(&self) -> bool {
        (self.is_boundary(0) && self.is_not_part(1)) || (self.is_boundary(1) && self.is_not_part(0))
    }

    pub fn is_line_location_unknown(&self, index: usize) -> bool {
        self.inputs[index].loc_line.is_none()
    }

    pub fn is_line_in_area(&self, index: usize) -> bool {
        self.inputs[index].loc_line == Some(Location::Interior)
    }

    pub fn is_hole(&self, index: usize) -> bool {
        self.inputs[index].is_hole
    }

    pub fn is_collapse(&self, index: usize) -> bool {
        self.inputs[index].dim == LabelDim::Collapse
    }

    /// A collapse of either input lying in that input's interior.
    pub fn is_interior_collapse(&self) -> bool {
        (0..2).any(|i| self.is_collapse(i) && self.is_line_in_area(i))
    }

    /// A collapse of one input lying in its interior while not part of the other input.
    pub fn is_collapse_and_not_part_interior(&self) -> bool {
        (self.is_collapse(0) && self.is_not_part(1) && self.is_line_in_area(0))
            || (self.is_collapse(1) && self.is_not_part(0) && self.is_line_in_area(1))
    }

    pub fn line_location(&self, index: usize) -> Option<Location> {
        self.inputs[index].loc_line
    }

    /// `true` if either side location is known.
    pub fn has_sides(&self, index: usize) -> bool {
        let l = &self.inputs[index];
        l.loc_left.is_some() || l.loc_right.is_some()
    }

    /// Location of `position` seen from a half-edge of direction `is_forward`.
    pub fn location(&self, index: usize, position: Position, is_forward: bool) -> Option<Location> {
        let l = &self.inputs[index];
        match position {
            Position::Left => {
                if is_forward {
                    l.loc_left
                } else {
                    l.loc_right
                }
            }
            Position::Right => {
                if is_forward {
                    l.loc_right
                } else {
                    l.loc_left
                }
            }
            Position::On => l.loc_line,
        }
    }

    /// Side location for a boundary, line location otherwise.
    pub fn location_boundary_or_line(
        &self,
        index: usize,
        position: Position,
        is_forward: bool,
    ) -> Option<Location> {
        if self.is_boundary(index) {
            return self.location(index, position, is_forward);
        }
        self.line_location(index)
    }

    fn fmt_input(&self, f: &mut fmt::Formatter<'_>, index: usize, is_forward: bool) -> fmt::Result {
        fn code(loc: Option<Location>) -> char {
            match loc {
                Some(Location::Interior) => 'i',
                Some(Location::Boundary) => 'b',
                Some(Location::Exterior) => 'e',
                None => '-',
            }
        }
        let l = &self.inputs[index];
        let name = if index == 0 { 'A' } else { 'B' };
        match l.dim {
            LabelDim::NotPart => write!(f, "{name}#"),
            LabelDim::Line => write!(f, "{name}:{}L", code(l.loc_line)),
            LabelDim::Collapse => write!(f, "{name}:{}C", code(l.loc_line)),
            LabelDim::Boundary => write!(
                f,
                "{name}:{}{}{}",
                code(self.location(index, Position::Left, is_forward)),
                if l.is_hole { 'h' } else { 's' },
                code(self.location(index, Position::Right, is_forward)),
            ),
        }
    }
}

impl fmt::Display for OverlayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_input(f, 0, true)?;
        write!(f, "/")?;
        self.fmt_input(f, 1, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_locations_follow_direction() {
        let mut label = OverlayLabel::new();
        label.init_boundary(0, Location::Exterior, Location::Interior, false);
        assert_eq!(label.location(0, Position::Right, true), Some(Location::Interior));
        assert_eq!(label.location(0, Position::Right, false), Some(Location::Exterior));
        assert_eq!(label.location(0, Position::Left, false), Some(Location::Interior));
        assert_eq!(label.line_location(0), Some(Location::Interior));
        assert!(label.is_boundary_singleton());
        assert!(!label.is_boundary_both());
        assert_eq!(label.to_string(), "A:esi/B#");
    }

    #[test]
    fn boundary_touch() {
        let mut label = OverlayLabel::new();
        label.init_boundary(0, Location::Exterior, Location::Interior, false);
        label.init_boundary(1, Location::Interior, Location::Exterior, false);
        assert!(label.is_boundary_touch());
        assert!(!label.is_boundary_collapse());

        label.init_boundary(1, Location::Exterior, Location::Interior, false);
        assert!(!label.is_boundary_touch());
    }

    #[test]
    fn collapse_location() {
        let mut label = OverlayLabel::new();
        label.init_collapse(0, true);
        assert!(label.is_line_location_unknown(0));
        label.set_location_collapse(0);
        assert!(label.is_interior_collapse());
        assert!(label.is_collapse_and_not_part_interior());

        let mut label = OverlayLabel::new();
        label.init_collapse(1, false);
        label.set_location_collapse(1);
        assert_eq!(label.line_location(1), Some(Location::Exterior));
        assert!(!label.is_interior_collapse());
        assert!(label.is_linear());
    }

    #[test]
    fn boundary_collapse_requires_no_line() {
        let mut label = OverlayLabel::new();
        label.init_boundary(0, Location::Exterior, Location::Interior, false);
        label.init_collapse(1, false);
        assert!(label.is_boundary_collapse());

        let mut label = OverlayLabel::new();
        label.init_boundary(0, Location::Exterior, Location::Interior, false);
        label.init_line(1);
        assert!(!label.is_boundary_collapse());
        assert_eq!(label.location_boundary_or_line(1, Position::Right, true), None);
    }

    #[test]
    fn set_location_all() {
        let mut label = OverlayLabel::new();
        label.init_line(0);
        label.set_location_all(1, Location::Exterior);
        assert_eq!(label.location(1, Position::Left, true), Some(Location::Exterior));
        assert!(label.has_sides(1));
        assert!(!label.has_sides(0));
    }
}
