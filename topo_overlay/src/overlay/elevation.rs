use crate::{
    core::traits::Real,
    geometry::{height, merge_opt, width, Geometry},
};
use static_aabb2d_index::AABB;

const DEFAULT_CELL_NUM: usize = 3;

#[derive(Debug, Copy, Clone, Default)]
struct ElevationCell {
    sum_z: f64,
    num_z: usize,
}

impl ElevationCell {
    fn add(&mut self, z: f64) {
        self.sum_z += z;
        self.num_z += 1;
    }

    fn z(&self) -> Option<f64> {
        if self.num_z == 0 {
            return None;
        }
        Some(self.sum_z / self.num_z as f64)
    }
}

/// Simple model of the elevation of the inputs, used to give a Z to result coordinates which
/// were created by the overlay (such as segment intersections).
///
/// The extent of the inputs is split into a grid of cells, each cell holding the average Z of
/// the input vertices falling in it. Coordinates in a cell with no vertices get the average of
/// all the non-empty cells.
#[derive(Debug, Clone)]
pub struct ElevationModel<T>
where
    T: Real,
{
    extent: Option<AABB<T>>,
    num_cell_x: usize,
    num_cell_y: usize,
    cell_size_x: f64,
    cell_size_y: f64,
    cells: Vec<ElevationCell>,
    has_z: bool,
}

impl<T> ElevationModel<T>
where
    T: Real,
{
    /// Model of the Z values of `a` and (optionally) `b`.
    pub fn create(a: &Geometry<T>, b: Option<&Geometry<T>>) -> Self {
        let extent = merge_opt(a.envelope(), b.and_then(|g| g.envelope()));
        let mut model = Self::new(extent, DEFAULT_CELL_NUM, DEFAULT_CELL_NUM);
        model.add(a);
        if let Some(b) = b {
            model.add(b);
        }
        model
    }

    pub fn new(extent: Option<AABB<T>>, num_cell_x: usize, num_cell_y: usize) -> Self {
        let (w, h) = extent
            .map(|e| (width(&e).to_f64_lossy(), height(&e).to_f64_lossy()))
            .unwrap_or((0.0, 0.0));
        let mut num_cell_x = num_cell_x;
        let mut num_cell_y = num_cell_y;
        let cell_size_x = w / num_cell_x as f64;
        let cell_size_y = h / num_cell_y as f64;
        if cell_size_x <= 0.0 {
            num_cell_x = 1;
        }
        if cell_size_y <= 0.0 {
            num_cell_y = 1;
        }
        ElevationModel {
            extent,
            num_cell_x,
            num_cell_y,
            cell_size_x,
            cell_size_y,
            cells: vec![ElevationCell::default(); num_cell_x * num_cell_y],
            has_z: false,
        }
    }

    /// `true` if any coordinate added carried a Z value.
    pub fn has_z(&self) -> bool {
        self.has_z
    }

    pub fn add(&mut self, g: &Geometry<T>) {
        g.visit_coords(&mut |c| {
            if let Some(z) = c.z {
                self.add_z(c.x, c.y, z);
            }
        });
    }

    fn add_z(&mut self, x: T, y: T, z: T) {
        let z = z.to_f64_lossy();
        if z.is_nan() {
            return;
        }
        self.has_z = true;
        let i = self.cell_index(x, y);
        self.cells[i].add(z);
    }

    fn cell_index(&self, x: T, y: T) -> usize {
        let Some(extent) = &self.extent else {
            return 0;
        };
        let index = |v: T, min: T, size: f64, count: usize| {
            if count <= 1 {
                return 0;
            }
            let i = ((v.to_f64_lossy() - min.to_f64_lossy()) / size).floor();
            if i.is_nan() || i < 0.0 {
                0
            } else {
                (i as usize).min(count - 1)
            }
        };
        let ix = index(x, extent.min_x, self.cell_size_x, self.num_cell_x);
        let iy = index(y, extent.min_y, self.cell_size_y, self.num_cell_y);
        iy * self.num_cell_x + ix
    }

    fn average_z(&self) -> Option<f64> {
        let (sum, count) = self
            .cells
            .iter()
            .filter_map(|c| c.z())
            .fold((0.0, 0usize), |(sum, count), z| (sum + z, count + 1));
        if count == 0 {
            return None;
        }
        Some(sum / count as f64)
    }

    /// Estimated Z at a location, `None` if the model holds no Z values.
    pub fn z(&self, x: T, y: T) -> Option<f64> {
        self.cells[self.cell_index(x, y)]
            .z()
            .or_else(|| self.average_z())
    }

    /// Give every coordinate of `g` which has no Z the model's estimate. Nothing changes if the
    /// inputs had no Z.
    pub fn populate_z(&self, g: &mut Geometry<T>) {
        if !self.has_z {
            return;
        }
        g.visit_coords_mut(&mut |c| {
            if c.z.is_none() {
                c.z = self.z(c.x, c.y).map(T::from_f64_lossy);
            }
        });
    }
}
