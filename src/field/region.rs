//! Connected-component analysis over solid cells.

use std::collections::VecDeque;

use glam::IVec2;

use super::scalar_field::ScalarField;

/// Maximal set of orthogonally connected solid cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    /// Cells in breadth-first discovery order, seed first
    pub cells: Vec<IVec2>,
}

impl Region {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        self.cells.contains(&cell)
    }
}

/// Flood-fills a field into regions of cells above a threshold.
#[derive(Clone, Copy, Debug)]
pub struct RegionAnalyzer {
    surface: f32,
}

impl RegionAnalyzer {
    pub fn new(surface: f32) -> Self {
        Self { surface }
    }

    /// All regions, ordered by the x-outer, y-inner position of their seed.
    pub fn analyze(&self, field: &ScalarField) -> Vec<Region> {
        let size = field.size();
        let mut visited = vec![false; size * size];
        let mut regions = Vec::new();

        for x in 0..size {
            for y in 0..size {
                if visited[x * size + y] || field.get_or_zero(x as i32, y as i32) <= self.surface {
                    continue;
                }
                let region = self.flood(field, IVec2::new(x as i32, y as i32), &mut visited);
                regions.push(region);
            }
        }

        log::trace!("Region analysis: {} regions", regions.len());
        regions
    }

    /// Breadth-first fill from `start`, marking cells in `visited`.
    fn flood(&self, field: &ScalarField, start: IVec2, visited: &mut [bool]) -> Region {
        let size = field.size();
        let mut cells = Vec::new();
        let mut queue = VecDeque::new();

        visited[start.x as usize * size + start.y as usize] = true;
        queue.push_back(start);

        while let Some(cell) = queue.pop_front() {
            cells.push(cell);

            // Scan the 3x3 block but only follow cells sharing a row or column.
            for nx in cell.x - 1..=cell.x + 1 {
                for ny in cell.y - 1..=cell.y + 1 {
                    if !field.in_range(nx, ny) || (nx != cell.x && ny != cell.y) {
                        continue;
                    }
                    let i = nx as usize * size + ny as usize;
                    if !visited[i] && field.get_or_zero(nx, ny) > self.surface {
                        visited[i] = true;
                        queue.push_back(IVec2::new(nx, ny));
                    }
                }
            }
        }

        Region { cells }
    }
}
