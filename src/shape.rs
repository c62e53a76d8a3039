//! A shape: a matrix plus its placed/unplaced state.

use crate::grid::GridCoord;
use crate::matrix::BinaryMatrix;
use crate::placement::projected_cells;

/// Player-requested shape transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    RotateCw,
    RotateCcw,
    Flip,
}

impl Transform {
    pub fn apply(self, matrix: &BinaryMatrix) -> BinaryMatrix {
        match self {
            Self::RotateCw => matrix.rotate_cw(),
            Self::RotateCcw => matrix.rotate_ccw(),
            Self::Flip => matrix.flip_horizontal(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    matrix: BinaryMatrix,
    placed: bool,
}

impl Shape {
    pub fn new(matrix: BinaryMatrix) -> Self {
        Self {
            matrix,
            placed: false,
        }
    }

    #[inline]
    pub fn matrix(&self) -> &BinaryMatrix {
        &self.matrix
    }

    #[inline]
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Swaps in the transformed matrix. A placed shape is frozen: returns `false` and changes nothing.
    pub fn transform(&mut self, transform: Transform) -> bool {
        if self.placed {
            return false;
        }
        self.matrix = transform.apply(&self.matrix);
        true
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.transform(Transform::RotateCw)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.transform(Transform::RotateCcw)
    }

    pub fn flip(&mut self) -> bool {
        self.transform(Transform::Flip)
    }

    pub(crate) fn place(&mut self) {
        self.placed = true;
    }

    /// Cells this shape would cover with its top-left at (anchor_col, anchor_row).
    pub fn grid_cells(&self, anchor_col: i32, anchor_row: i32) -> Vec<GridCoord> {
        projected_cells(&self.matrix, anchor_col, anchor_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transforms_replace_matrix() {
        let l: BinaryMatrix = "#.\n#.\n##".parse().unwrap();
        let mut shape = Shape::new(l.clone());
        assert!(shape.rotate_cw());
        assert_eq!(shape.matrix(), &l.rotate_cw());
        assert!(shape.rotate_ccw());
        assert!(shape.flip());
        assert_eq!(shape.matrix(), &l.flip_horizontal());
    }

    #[test]
    fn test_placed_shape_is_frozen() {
        let l: BinaryMatrix = "#.\n##".parse().unwrap();
        let mut shape = Shape::new(l.clone());
        shape.place();
        assert!(!shape.rotate_cw());
        assert!(!shape.rotate_ccw());
        assert!(!shape.flip());
        assert_eq!(shape.matrix(), &l);
        assert!(shape.is_placed());
    }
}
