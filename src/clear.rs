//! Row/column clear detection, scoring and resolution.

use crate::grid::{GridCoord, OccupancyGrid};
use std::collections::BTreeSet;

/// Points per cleared line and per extra line in the same clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRule {
    pub line_score: u32,
    pub combo_bonus: u32,
}

impl Default for ScoreRule {
    fn default() -> Self {
        Self {
            line_score: 100,
            combo_bonus: 50,
        }
    }
}

impl ScoreRule {
    /// `line_score * total + combo_bonus * (total - 1)`, 0 for no lines.
    pub fn delta(&self, total: usize) -> u32 {
        let total = total as u32;
        self.line_score
            .saturating_mul(total)
            .saturating_add(self.combo_bonus.saturating_mul(total.saturating_sub(1)))
    }
}

/// Full rows and columns, both taken from the same pre-clear board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FullLines {
    pub rows: BTreeSet<usize>,
    pub columns: BTreeSet<usize>,
}

impl FullLines {
    pub fn total(&self) -> usize {
        self.rows.len() + self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

pub fn find_full_lines(grid: &OccupancyGrid) -> FullLines {
    FullLines {
        rows: (0..grid.height()).filter(|&r| grid.is_row_full(r)).collect(),
        columns: (0..grid.width()).filter(|&c| grid.is_column_full(c)).collect(),
    }
}

/// Score for one clear event under the default rule.
pub fn compute_score_delta(lines: &FullLines) -> u32 {
    ScoreRule::default().delta(lines.total())
}

/// Empties every listed row and column. Returns each cell that actually went
/// from occupied to empty, once, even where a row and a column cross.
pub fn apply_clear(grid: &mut OccupancyGrid, lines: &FullLines) -> Vec<GridCoord> {
    let mut cleared = Vec::new();
    for &row in &lines.rows {
        for col in 0..grid.width() {
            let cell = GridCoord::new(col as i32, row as i32);
            if grid.clear_occupied(cell) {
                cleared.push(cell);
            }
        }
    }
    for &col in &lines.columns {
        for row in 0..grid.height() {
            let cell = GridCoord::new(col as i32, row as i32);
            if grid.clear_occupied(cell) {
                cleared.push(cell);
            }
        }
    }
    cleared
}

/// Result of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearOutcome {
    pub lines: FullLines,
    pub cleared: Vec<GridCoord>,
    pub score_delta: u32,
}

impl ClearOutcome {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Single post-commit entry point with the default rule.
pub fn resolve(grid: &mut OccupancyGrid) -> ClearOutcome {
    resolve_with(grid, ScoreRule::default())
}

pub fn resolve_with(grid: &mut OccupancyGrid, rule: ScoreRule) -> ClearOutcome {
    let lines = find_full_lines(grid);
    if lines.is_empty() {
        return ClearOutcome::default();
    }
    let score_delta = rule.delta(lines.total());
    let cleared = apply_clear(grid, &lines);
    log::debug!(
        "cleared rows {:?} columns {:?} ({} cells, +{})",
        lines.rows,
        lines.columns,
        cleared.len(),
        score_delta
    );
    ClearOutcome {
        lines,
        cleared,
        score_delta,
    }
}
