use std::fmt;

use crate::cells::Position;
use crate::grid_dimensions::GridDimensions;

/// Visits every position of the grid in row-major order.
#[derive(Clone)]
pub struct CellIter {
    dimensions: GridDimensions,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub fn new(dimensions: GridDimensions) -> CellIter {
        CellIter {
            dimensions,
            current_cell_number: 0,
            cells_count: dimensions.size().0,
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Position;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = self.dimensions.position_of(self.current_cell_number);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// Yields one row of positions at a time, top row first.
#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    dimensions: GridDimensions,
    current_row: usize,
}

impl RowIter {
    pub fn new(dimensions: GridDimensions) -> RowIter {
        RowIter {
            dimensions,
            current_row: 0,
        }
    }
}

impl ExactSizeIterator for RowIter {}
impl Iterator for RowIter {
    type Item = Vec<Position>;
    fn next(&mut self) -> Option<Self::Item> {
        let rows = self.dimensions.height().0;
        if self.current_row < rows {
            let y = self.current_row as u32;
            let row = (0..self.dimensions.width().0)
                .map(|x| Position::new(x as u32, y))
                .collect();
            self.current_row += 1;
            Some(row)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dimensions.height().0 - self.current_row;
        (remaining, Some(remaining))
    }
}
