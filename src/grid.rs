//! Occupancy grid: fixed-size board of filled/empty cells, plus the companion
//! cell → presentation-handle map.

use crate::matrix::BinaryMatrix;
use std::fmt;

/// (column, row), 0-indexed. Negative or too-large values are off-grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    pub col: i32,
    pub row: i32,
}

impl GridCoord {
    #[inline]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// Board state for one phase. Dimensions never change after construction.
///
/// Cells are only written by the placement engine (fill) and the clear
/// resolver (empty); outside the crate the grid is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    /// cells[row * width + col]
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width >= 1 && height >= 1, "grid must be at least 1x1");
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Grid with the matrix's dimensions and occupancy.
    pub fn from_matrix(matrix: &BinaryMatrix) -> Self {
        let mut grid = Self::new(matrix.cols(), matrix.rows());
        for (r, c) in matrix.filled_cells() {
            grid.cells[r * grid.width + c] = true;
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.index(coord).is_some()
    }

    #[inline]
    fn index(&self, coord: GridCoord) -> Option<usize> {
        let col = usize::try_from(coord.col).ok()?;
        let row = usize::try_from(coord.row).ok()?;
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }

    /// Off-grid coordinates report `false`; legality of those is the placement engine's call.
    #[inline]
    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.index(coord).is_some_and(|i| self.cells[i])
    }

    pub(crate) fn set_occupied(&mut self, coord: GridCoord) {
        debug_assert!(self.contains(coord), "set_occupied off-grid: {coord:?}");
        if let Some(i) = self.index(coord) {
            self.cells[i] = true;
        }
    }

    /// Returns whether the cell was occupied before.
    pub(crate) fn clear_occupied(&mut self, coord: GridCoord) -> bool {
        match self.index(coord) {
            Some(i) => std::mem::replace(&mut self.cells[i], false),
            None => false,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.cells.fill(false);
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.contains(&true)
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        row < self.height
            && self.cells[row * self.width..(row + 1) * self.width]
                .iter()
                .all(|&v| v)
    }

    pub fn is_column_full(&self, col: usize) -> bool {
        col < self.width && (0..self.height).all(|row| self.cells[row * self.width + col])
    }

    /// Value copy of the board; later grid mutations do not affect it.
    pub fn snapshot(&self) -> BinaryMatrix {
        BinaryMatrix::from_fn(self.height, self.width, |r, c| self.cells[r * self.width + c])
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}

/// Maps occupied cells to opaque presentation handles (sprites, widget ids, ...)
/// so the right objects can be dropped when cells clear. The core never reads
/// the handles.
#[derive(Debug, Clone)]
pub struct BlockHandles<H> {
    width: usize,
    height: usize,
    slots: Vec<Option<H>>,
}

impl<H> BlockHandles<H> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            slots: std::iter::repeat_with(|| None).take(width * height).collect(),
        }
    }

    pub fn for_grid(grid: &OccupancyGrid) -> Self {
        Self::new(grid.width(), grid.height())
    }

    fn index(&self, coord: GridCoord) -> Option<usize> {
        let col = usize::try_from(coord.col).ok()?;
        let row = usize::try_from(coord.row).ok()?;
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }

    /// Stores `handle` at `coord`, returning the previous one. Off-grid handles are handed back.
    pub fn insert(&mut self, coord: GridCoord, handle: H) -> Option<H> {
        match self.index(coord) {
            Some(i) => self.slots[i].replace(handle),
            None => Some(handle),
        }
    }

    pub fn get(&self, coord: GridCoord) -> Option<&H> {
        self.index(coord).and_then(|i| self.slots[i].as_ref())
    }

    pub fn take(&mut self, coord: GridCoord) -> Option<H> {
        self.index(coord).and_then(|i| self.slots[i].take())
    }

    /// Removes and returns the handles of every listed cell that had one.
    pub fn release(&mut self, cells: &[GridCoord]) -> Vec<H> {
        cells.iter().filter_map(|&c| self.take(c)).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }
}
