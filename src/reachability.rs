//! Exhaustive placement search over all 8 orientations, used for game-over detection.

use crate::grid::{GridCoord, OccupancyGrid};
use crate::matrix::BinaryMatrix;
use crate::placement::{can_place, projected_cells};

/// One orientation of a shape: `rotations` clockwise turns, then an optional flip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orientation {
    pub rotations: u8,
    pub flipped: bool,
    pub matrix: BinaryMatrix,
}

/// The 8 candidates in search order: rotation 0..4, each as-is then flipped.
/// Symmetric shapes repeat; that only costs search time.
pub fn orientations(matrix: &BinaryMatrix) -> Vec<Orientation> {
    let mut out = Vec::with_capacity(8);
    let mut current = matrix.clone();
    for rotations in 0..4u8 {
        let flipped = current.flip_horizontal();
        let next = current.rotate_cw();
        out.push(Orientation {
            rotations,
            flipped: false,
            matrix: current,
        });
        out.push(Orientation {
            rotations,
            flipped: true,
            matrix: flipped,
        });
        current = next;
    }
    out
}

/// Every anchor whose bounding box could overlap the grid.
fn anchor_range(grid: &OccupancyGrid, matrix: &BinaryMatrix) -> impl Iterator<Item = (i32, i32)> {
    let min_col = 1 - matrix.cols() as i32;
    let min_row = 1 - matrix.rows() as i32;
    let max_col = grid.width() as i32 - 1;
    let max_row = grid.height() as i32 - 1;
    (min_row..=max_row).flat_map(move |row| (min_col..=max_col).map(move |col| (col, row)))
}

/// Legal anchors (col, row) for one fixed orientation, row-major.
pub fn legal_anchors<'a>(
    grid: &'a OccupancyGrid,
    matrix: &'a BinaryMatrix,
) -> impl Iterator<Item = (i32, i32)> + 'a {
    anchor_range(grid, matrix)
        .filter(move |&(col, row)| can_place(grid, &projected_cells(matrix, col, row)))
}

/// A legal orientation + anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub orientation: Orientation,
    pub anchor_col: i32,
    pub anchor_row: i32,
}

impl Placement {
    pub fn cells(&self) -> Vec<GridCoord> {
        projected_cells(&self.orientation.matrix, self.anchor_col, self.anchor_row)
    }
}

/// First legal placement in search order, or `None` if the shape fits nowhere.
pub fn find_placement(grid: &OccupancyGrid, matrix: &BinaryMatrix) -> Option<Placement> {
    orientations(matrix).into_iter().find_map(|orientation| {
        let (anchor_col, anchor_row) = legal_anchors(grid, &orientation.matrix).next()?;
        Some(Placement {
            orientation,
            anchor_col,
            anchor_row,
        })
    })
}

pub fn can_be_placed_anywhere(grid: &OccupancyGrid, matrix: &BinaryMatrix) -> bool {
    find_placement(grid, matrix).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(s: &str) -> BinaryMatrix {
        s.parse().unwrap()
    }

    #[test]
    fn test_orientation_order() {
        let l = m("#.\n#.\n##");
        let all = orientations(&l);
        assert_eq!(all.len(), 8);
        assert_eq!(all[0].matrix, l);
        assert!(!all[0].flipped);
        assert_eq!(all[1].matrix, l.flip_horizontal());
        assert!(all[1].flipped);
        assert_eq!(all[2].matrix, l.rotate_cw());
        assert_eq!(all[2].rotations, 1);
        assert_eq!(all[7].matrix, l.rotate_cw().rotate_cw().rotate_cw().flip_horizontal());
    }

    #[test]
    fn test_full_grid_rejects_everything() {
        let grid = OccupancyGrid::from_matrix(&m("###\n###\n###"));
        assert!(!can_be_placed_anywhere(&grid, &BinaryMatrix::single(true)));
        assert!(!can_be_placed_anywhere(&grid, &m("##\n#.")));
    }

    #[test]
    fn test_rotation_needed_to_fit() {
        // Only a vertical slot is open.
        let grid = OccupancyGrid::from_matrix(&m("#.#\n#.#\n#.#"));
        let bar = m("###");
        let p = find_placement(&grid, &bar).unwrap();
        assert_eq!(p.orientation.rotations, 1);
        assert_eq!((p.anchor_col, p.anchor_row), (1, 0));
        assert_eq!(
            p.cells(),
            vec![GridCoord::new(1, 0), GridCoord::new(1, 1), GridCoord::new(1, 2)]
        );
    }

    #[test]
    fn test_flip_needed_to_fit() {
        // Free cells form an S; only a flipped Z orientation fits.
        let grid = OccupancyGrid::from_matrix(&m("#.\n..\n.#"));
        let z = m("#.\n##\n.#");
        let p = find_placement(&grid, &z).unwrap();
        assert!(p.orientation.flipped);
        assert!(can_place(&grid, &p.cells()));
    }

    #[test]
    fn test_too_big_for_grid() {
        let grid = OccupancyGrid::new(3, 3);
        assert!(!can_be_placed_anywhere(&grid, &m("####")));
        assert!(can_be_placed_anywhere(&grid, &m("###\n#..")));
    }

    #[test]
    fn test_legal_anchors_include_negative_offsets() {
        // Shape whose (0,0) cell is empty can anchor off-grid.
        let grid = OccupancyGrid::new(2, 2);
        let corner = m("..\n.#");
        let anchors: Vec<_> = legal_anchors(&grid, &corner).collect();
        assert_eq!(anchors, vec![(-1, -1), (0, -1), (-1, 0), (0, 0)]);
    }
}
