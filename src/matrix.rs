//! Binary occupancy matrices: rotation, flip and bounding-box trim.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("matrix has no rows or no columns")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid cell value {value} at ({row}, {col}); expected 0 or 1")]
    InvalidCell { row: usize, col: usize, value: u8 },
    #[error("invalid glyph {glyph:?} at ({row}, {col}); expected '#', '1', '.' or '0'")]
    InvalidGlyph { row: usize, col: usize, glyph: char },
}

/// Rectangular grid of filled/empty cells, stored row-major.
///
/// Always at least 1x1. Transforms return a new matrix and never touch `self`,
/// so a matrix can be shared with a hint snapshot or a placed shape safely.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl BinaryMatrix {
    /// All-empty matrix. Zero dimensions are bumped to 1.
    pub fn empty(rows: usize, cols: usize) -> Self {
        debug_assert!(rows >= 1 && cols >= 1, "matrix must be at least 1x1");
        let (rows, cols) = (rows.max(1), cols.max(1));
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// 1x1 matrix holding one cell.
    pub fn single(filled: bool) -> Self {
        Self {
            rows: 1,
            cols: 1,
            cells: vec![filled],
        }
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut m = Self::empty(rows, cols);
        for r in 0..m.rows {
            for c in 0..m.cols {
                m.cells[r * m.cols + c] = f(r, c);
            }
        }
        m
    }

    /// Checked constructor from 0/1 rows.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, MatrixError> {
        let first = rows.first().ok_or(MatrixError::Empty)?.as_ref();
        let cols = first.len();
        if cols == 0 {
            return Err(MatrixError::Empty);
        }
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MatrixError::Ragged {
                    row: r,
                    expected: cols,
                    found: row.len(),
                });
            }
            for (c, &value) in row.iter().enumerate() {
                match value {
                    0 => cells.push(false),
                    1 => cells.push(true),
                    _ => return Err(MatrixError::InvalidCell { row: r, col: c, value }),
                }
            }
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True if (r, c) is inside the matrix and filled.
    #[inline]
    pub fn is_filled(&self, r: usize, c: usize) -> bool {
        r < self.rows && c < self.cols && self.cells[r * self.cols + c]
    }

    #[inline]
    pub(crate) fn set(&mut self, r: usize, c: usize, filled: bool) {
        debug_assert!(r < self.rows && c < self.cols);
        self.cells[r * self.cols + c] = filled;
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v).count()
    }

    /// Filled cells as (row, col), row-major.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(move |(i, _)| (i / cols, i % cols))
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|&v| u8::from(v)).collect())
            .collect()
    }

    /// 90° clockwise: `out[c][rows-1-r] = self[r][c]`.
    pub fn rotate_cw(&self) -> Self {
        let mut out = Self::empty(self.cols, self.rows);
        for (r, c) in self.filled_cells() {
            out.set(c, self.rows - 1 - r, true);
        }
        out
    }

    /// 90° counter-clockwise: `out[cols-1-c][r] = self[r][c]`.
    pub fn rotate_ccw(&self) -> Self {
        let mut out = Self::empty(self.cols, self.rows);
        for (r, c) in self.filled_cells() {
            out.set(self.cols - 1 - c, r, true);
        }
        out
    }

    /// Mirror each row.
    pub fn flip_horizontal(&self) -> Self {
        let mut out = Self::empty(self.rows, self.cols);
        for (r, c) in self.filled_cells() {
            out.set(r, self.cols - 1 - c, true);
        }
        out
    }

    /// Trim for generated shapes: falls back to a single *filled* cell when nothing is filled.
    pub fn trim_shape(&self) -> Self {
        self.trim_or(true)
    }

    /// Trim for a composed board: falls back to a single *empty* cell when nothing is filled.
    pub fn trim_composition(&self) -> Self {
        self.trim_or(false)
    }

    fn trim_or(&self, fallback: bool) -> Self {
        let Some((top, bottom, left, right)) = self.filled_bounds() else {
            return Self::single(fallback);
        };
        Self::from_fn(bottom - top + 1, right - left + 1, |r, c| {
            self.is_filled(top + r, left + c)
        })
    }

    /// (top, bottom, left, right), inclusive; `None` if no cell is filled.
    fn filled_bounds(&self) -> Option<(usize, usize, usize, usize)> {
        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        for (r, c) in self.filled_cells() {
            bounds = Some(match bounds {
                None => (r, r, c, c),
                Some((t, b, l, rt)) => (t.min(r), b.max(r), l.min(c), rt.max(c)),
            });
        }
        bounds
    }
}

/// Text form: one row per line, `#`/`1` filled and `.`/`0` empty. Blank lines are skipped.
impl FromStr for BinaryMatrix {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<u8>> = Vec::new();
        for line in s.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let r = rows.len();
            let row = line
                .chars()
                .enumerate()
                .map(|(c, glyph)| match glyph {
                    '#' | '1' => Ok(1),
                    '.' | '0' => Ok(0),
                    _ => Err(MatrixError::InvalidGlyph { row: r, col: c, glyph }),
                })
                .collect::<Result<Vec<u8>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(&rows)
    }
}

impl fmt::Display for BinaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.cols).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &v in row {
                f.write_str(if v { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(s: &str) -> BinaryMatrix {
        s.parse().unwrap()
    }

    #[test]
    fn test_rotate_cw_l_piece() {
        let l = m("#.\n#.\n##");
        assert_eq!(l.rotate_cw(), m("###\n#.."));
    }

    #[test]
    fn test_rotate_ccw_l_piece() {
        let l = m("#.\n#.\n##");
        assert_eq!(l.rotate_ccw(), m("..#\n###"));
    }

    #[test]
    fn test_flip_horizontal() {
        assert_eq!(m("##.\n#..").flip_horizontal(), m(".##\n..#"));
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let bar = m("####");
        let r = bar.rotate_cw();
        assert_eq!((r.rows(), r.cols()), (4, 1));
        assert_eq!(r.filled_count(), 4);
    }

    #[test]
    fn test_trim_to_bounding_box() {
        let grid = m("....\n.#..\n.##.\n....");
        assert_eq!(grid.trim_shape(), m("#.\n##"));
        assert_eq!(grid.trim_composition(), m("#.\n##"));
    }

    #[test]
    fn test_trim_fallbacks_differ() {
        let blank = BinaryMatrix::empty(3, 3);
        assert_eq!(blank.trim_shape(), BinaryMatrix::single(true));
        assert_eq!(blank.trim_composition(), BinaryMatrix::single(false));
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        let empty: [[u8; 0]; 0] = [];
        assert_eq!(BinaryMatrix::from_rows(&empty), Err(MatrixError::Empty));
        assert_eq!(
            BinaryMatrix::from_rows(&[vec![1u8, 0], vec![1]]),
            Err(MatrixError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            BinaryMatrix::from_rows(&[[0u8, 2]]),
            Err(MatrixError::InvalidCell {
                row: 0,
                col: 1,
                value: 2
            })
        );
        assert!(matches!(
            "#x".parse::<BinaryMatrix>(),
            Err(MatrixError::InvalidGlyph { glyph: 'x', .. })
        ));
    }

    #[test]
    fn test_display_matches_parse() {
        let text = "#.#\n###";
        assert_eq!(m(text).to_string(), text);
        assert_eq!(m(text).to_rows(), vec![vec![1, 0, 1], vec![1, 1, 1]]);
    }
}
