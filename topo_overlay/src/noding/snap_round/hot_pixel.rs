use crate::{
    core::{
        math::{orientation_index, vec2, Orientation},
        traits::Real,
    },
    geometry::Coord,
    precision::round_half_up,
};

/// Half the width of a pixel in scaled coordinates.
const TOLERANCE: f64 = 0.5;

/// A grid cell containing a vertex or intersection point. Any segment passing through the cell
/// is snapped to the cell center.
///
/// The cell includes its left and bottom sides and excludes its right and top sides, so
/// adjacent pixels never overlap.
#[derive(Debug, Copy, Clone)]
pub struct HotPixel<T> {
    coord: Coord<T>,
    scale: f64,
    hpx: f64,
    hpy: f64,
    /// Set once the pixel is known to be a node of the output linework.
    is_node: bool,
}

impl<T> HotPixel<T>
where
    T: Real,
{
    /// Pixel centered at `coord`, which should already be rounded to the grid with `scale`.
    pub fn new(coord: Coord<T>, scale: f64) -> Self {
        let (x, y) = coord.to_f64_pair();
        let (hpx, hpy) = if scale == 1.0 {
            (x, y)
        } else {
            (round_half_up(x * scale), round_half_up(y * scale))
        };
        HotPixel {
            coord,
            scale,
            hpx,
            hpy,
            is_node: false,
        }
    }

    #[inline]
    pub fn is_node(&self) -> bool {
        self.is_node
    }

    #[inline]
    pub fn set_to_node(&mut self) {
        self.is_node = true;
    }

    /// Center of the pixel (the rounded point).
    #[inline]
    pub fn coord(&self) -> &Coord<T> {
        &self.coord
    }

    #[inline]
    fn scale_value(&self, v: T) -> f64 {
        v.to_f64_lossy() * self.scale
    }

    /// `true` if `p` lies in the pixel.
    pub fn intersects_point(&self, p: &Coord<T>) -> bool {
        let x = self.scale_value(p.x);
        let y = self.scale_value(p.y);
        x < self.hpx + TOLERANCE
            && x >= self.hpx - TOLERANCE
            && y < self.hpy + TOLERANCE
            && y >= self.hpy - TOLERANCE
    }

    /// `true` if the segment `p0`-`p1` passes through the pixel.
    pub fn intersects_segment(&self, p0: &Coord<T>, p1: &Coord<T>) -> bool {
        self.intersects_scaled(
            self.scale_value(p0.x),
            self.scale_value(p0.y),
            self.scale_value(p1.x),
            self.scale_value(p1.y),
        )
    }

    fn intersects_scaled(&self, p0x: f64, p0y: f64, p1x: f64, p1y: f64) -> bool {
        // orient the segment in the positive x direction
        let (px, py, qx, qy) = if p0x > p1x {
            (p1x, p1y, p0x, p0y)
        } else {
            (p0x, p0y, p1x, p1y)
        };

        let maxx = self.hpx + TOLERANCE;
        if px.min(qx) >= maxx {
            return false;
        }
        let minx = self.hpx - TOLERANCE;
        if px.max(qx) < minx {
            return false;
        }
        let maxy = self.hpy + TOLERANCE;
        if py.min(qy) >= maxy {
            return false;
        }
        let miny = self.hpy - TOLERANCE;
        if py.max(qy) < miny {
            return false;
        }

        // axis aligned segments now hit the interior or the left or bottom side
        if px == qx || py == qy {
            return true;
        }

        let p = vec2(px, py);
        let q = vec2(qx, qy);
        let orient = |x: f64, y: f64| orientation_index(p, q, vec2(x, y));
        let upward = py < qy;

        let orient_ul = orient(minx, maxy);
        if orient_ul == Orientation::Collinear {
            // through the upper left corner, only a downward segment enters the pixel
            return !upward;
        }

        let orient_ur = orient(maxx, maxy);
        if orient_ur == Orientation::Collinear {
            return upward;
        }
        // crosses the top side
        if orient_ul != orient_ur {
            return true;
        }

        let orient_ll = orient(minx, miny);
        if orient_ll == Orientation::Collinear {
            // lower left corner is part of the pixel
            return true;
        }
        // crosses the left side
        if orient_ll != orient_ul {
            return true;
        }

        let orient_lr = orient(maxx, miny);
        if orient_lr == Orientation::Collinear {
            return !upward;
        }

        // crosses the bottom or right side
        orient_ll != orient_lr || orient_lr != orient_ur
    }
}
