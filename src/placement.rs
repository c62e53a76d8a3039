//! Placement legality and commit.
//!
//! Legality is separate from mutation: the same predicate drives a real drop
//! and a non-committing drop-target preview.

use crate::grid::{GridCoord, OccupancyGrid};
use crate::matrix::BinaryMatrix;

/// Grid cells covered by `matrix` with its (0,0) cell at (anchor_col, anchor_row).
pub fn projected_cells(matrix: &BinaryMatrix, anchor_col: i32, anchor_row: i32) -> Vec<GridCoord> {
    matrix
        .filled_cells()
        .map(|(r, c)| GridCoord::new(anchor_col + c as i32, anchor_row + r as i32))
        .collect()
}

/// Every cell on-grid and free. No cells at all is trivially legal.
pub fn can_place(grid: &OccupancyGrid, cells: &[GridCoord]) -> bool {
    cells
        .iter()
        .all(|&cell| grid.contains(cell) && !grid.is_occupied(cell))
}

/// Fills `cells` if the placement is legal; otherwise leaves the grid untouched.
pub fn try_commit(grid: &mut OccupancyGrid, cells: &[GridCoord]) -> bool {
    if !can_place(grid, cells) {
        return false;
    }
    for &cell in cells {
        grid.set_occupied(cell);
    }
    log::debug!("committed {} cells", cells.len());
    true
}

/// Drop-target preview: legality plus the on-grid subset of cells to highlight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub legal: bool,
    pub visible: Vec<GridCoord>,
}

pub fn preview(grid: &OccupancyGrid, cells: &[GridCoord]) -> Preview {
    Preview {
        legal: can_place(grid, cells),
        visible: cells.iter().copied().filter(|&c| grid.contains(c)).collect(),
    }
}
