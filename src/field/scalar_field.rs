//! Fixed-size square grid of material density.

use glam::IVec2;

use crate::core::{Error, Result};

/// N x N density grid, every value clamped to `[0, max_weight]`.
///
/// Storage is column-major (`x * size + y`) so iteration visits cells in the
/// same x-outer, y-inner order the region scan and mesher rely on.
/// Out-of-range reads return `None` and out-of-range writes are ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    size: usize,
    max_weight: f32,
    values: Vec<f32>,
}

/// Result of shifting a field by a whole-cell offset.
#[derive(Clone, Debug)]
pub struct ShiftResult {
    /// The shifted field
    pub field: ScalarField,
    /// Cells with density > 0 that fell off the grid
    pub dropped_cells: usize,
    /// Total density that fell off the grid
    pub dropped_density: f32,
}

impl ScalarField {
    /// Create an empty (all zero) field.
    pub fn new(size: usize, max_weight: f32) -> Self {
        Self {
            size,
            max_weight,
            values: vec![0.0; size * size],
        }
    }

    /// Create a field from raw column-major values. Values are clamped.
    pub fn from_values(size: usize, max_weight: f32, values: Vec<f32>) -> Result<Self> {
        if values.len() != size * size {
            return Err(Error::InvalidField(format!(
                "expected {} values for a {}x{} grid, got {}",
                size * size,
                size,
                size,
                values.len()
            )));
        }
        if let Some(bad) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidField(format!(
                "non-finite density at index {}",
                bad
            )));
        }
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, max_weight))
            .collect();
        Ok(Self { size, max_weight, values })
    }

    /// Create a field by evaluating `f(x, y)` for every cell.
    pub fn from_fn(size: usize, max_weight: f32, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut field = Self::new(size, max_weight);
        for x in 0..size {
            for y in 0..size {
                field.values[x * size + y] = f(x, y).clamp(0.0, max_weight);
            }
        }
        field
    }

    /// Cells per side.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Density ceiling.
    #[inline]
    pub fn max_weight(&self) -> f32 {
        self.max_weight
    }

    /// Grid coordinate of the geometric center.
    pub fn center(&self) -> IVec2 {
        IVec2::splat((self.size / 2) as i32)
    }

    /// Check whether a coordinate lies inside `[0, size)` on both axes.
    #[inline]
    pub fn in_range(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_range(x, y)
            .then(|| x as usize * self.size + y as usize)
    }

    /// Density at a cell, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|i| self.values[i])
    }

    /// Density at a cell, zero outside the grid.
    #[inline]
    pub fn get_or_zero(&self, x: i32, y: i32) -> f32 {
        self.get(x, y).unwrap_or(0.0)
    }

    /// Write a clamped density. Returns `false` (and does nothing) outside the grid.
    pub fn set(&mut self, x: i32, y: i32, value: f32) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.values[i] = value.clamp(0.0, self.max_weight);
                true
            }
            None => false,
        }
    }

    /// Set every cell to `value` (clamped).
    pub fn fill(&mut self, value: f32) {
        let value = value.clamp(0.0, self.max_weight);
        self.values.iter_mut().for_each(|v| *v = value);
    }

    /// Fill an inclusive-exclusive rectangle `[min, max)`, clipped to the grid.
    pub fn fill_rect(&mut self, min: IVec2, max: IVec2, value: f32) {
        for x in min.x..max.x {
            for y in min.y..max.y {
                self.set(x, y, value);
            }
        }
    }

    /// Raw column-major values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Iterate `(coordinate, density)` in x-outer, y-inner order.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, f32)> + '_ {
        let size = self.size;
        self.values
            .iter()
            .enumerate()
            .map(move |(i, &v)| (IVec2::new((i / size) as i32, (i % size) as i32), v))
    }

    /// Iterate cells strictly above `surface`.
    pub fn solid_cells(&self, surface: f32) -> impl Iterator<Item = (IVec2, f32)> + '_ {
        self.iter().filter(move |&(_, v)| v > surface)
    }

    /// Sum of all densities.
    pub fn total_density(&self) -> f32 {
        self.values.iter().sum()
    }

    /// Integer-truncated mean coordinate of the solid cells.
    pub fn solid_centroid(&self, surface: f32) -> Option<IVec2> {
        let mut sum = IVec2::ZERO;
        let mut count = 0i32;
        for (coord, _) in self.solid_cells(surface) {
            sum += coord;
            count += 1;
        }
        (count > 0).then(|| sum / count)
    }

    /// Build a field where cell `p` holds this field's cell `p + offset`.
    ///
    /// Content moves by `-offset`. Anything that lands outside the grid is dropped.
    pub fn shifted(&self, offset: IVec2) -> ShiftResult {
        let mut field = Self::new(self.size, self.max_weight);
        let n = self.size as i32;
        for x in 0..n {
            for y in 0..n {
                if let Some(v) = self.get(x + offset.x, y + offset.y) {
                    field.values[x as usize * self.size + y as usize] = v;
                }
            }
        }

        let mut dropped_cells = 0;
        let mut dropped_density = 0.0;
        for (coord, v) in self.iter() {
            let dest = coord - offset;
            if v > 0.0 && !self.in_range(dest.x, dest.y) {
                dropped_cells += 1;
                dropped_density += v;
            }
        }

        ShiftResult { field, dropped_cells, dropped_density }
    }

    /// Move the given cells into a new field of the same size, zeroing them here.
    pub fn take_cells(&mut self, cells: &[IVec2]) -> ScalarField {
        let mut taken = Self::new(self.size, self.max_weight);
        for cell in cells {
            if let Some(i) = self.index(cell.x, cell.y) {
                taken.values[i] = self.values[i];
                self.values[i] = 0.0;
            }
        }
        taken
    }
}
