//! Build (composition) and main (placement) phases.

use crate::clear::{ClearOutcome, ScoreRule, resolve_with};
use crate::grid::{GridCoord, OccupancyGrid};
use crate::matrix::BinaryMatrix;
use crate::placement::{Preview, preview, try_commit};
use crate::reachability::can_be_placed_anywhere;
use crate::shape::{Shape, Transform};

/// Main-phase state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseState {
    /// A shape is active and waiting for a legal drop.
    AwaitingPlacement,
    /// Transient: a drop was committed and clears are being resolved.
    Resolving,
    /// Drop resolved; the caller advances to the next build phase.
    PhaseComplete,
    /// No orientation of the presented shape fits. Terminal until reset.
    GameOver,
}

/// Result of dropping a shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Illegal target; nothing changed and the shape is still active.
    Rejected,
    /// No droppable shape (wrong state, bad index, or already placed).
    Ignored,
    Placed {
        cells: Vec<GridCoord>,
        clear: ClearOutcome,
    },
}

impl DropOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed { .. })
    }
}

/// Composition phase: source shapes are arranged on a small board with no
/// clearing. Once every shape is placed, the occupied area becomes the next
/// main-phase shape.
#[derive(Debug, Clone)]
pub struct BuildPhase {
    grid: OccupancyGrid,
    shapes: Vec<Shape>,
}

impl BuildPhase {
    pub fn new(width: usize, height: usize, sources: Vec<BinaryMatrix>) -> Self {
        Self {
            grid: OccupancyGrid::new(width, height),
            shapes: sources.into_iter().map(Shape::new).collect(),
        }
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn transform(&mut self, index: usize, transform: Transform) -> bool {
        self.shapes
            .get_mut(index)
            .is_some_and(|s| s.transform(transform))
    }

    /// `None` for a bad index or an already placed shape.
    pub fn preview(&self, index: usize, anchor_col: i32, anchor_row: i32) -> Option<Preview> {
        let shape = self.shapes.get(index).filter(|s| !s.is_placed())?;
        Some(preview(&self.grid, &shape.grid_cells(anchor_col, anchor_row)))
    }

    pub fn drop_shape(&mut self, index: usize, anchor_col: i32, anchor_row: i32) -> DropOutcome {
        let Some(shape) = self.shapes.get_mut(index).filter(|s| !s.is_placed()) else {
            return DropOutcome::Ignored;
        };
        let cells = shape.grid_cells(anchor_col, anchor_row);
        if !try_commit(&mut self.grid, &cells) {
            return DropOutcome::Rejected;
        }
        shape.place();
        log::debug!("build shape {index} placed at ({anchor_col}, {anchor_row})");
        DropOutcome::Placed {
            cells,
            clear: ClearOutcome::default(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.shapes.iter().all(Shape::is_placed)
    }

    /// Trimmed board, once every source shape is placed.
    pub fn compose(&self) -> Option<BinaryMatrix> {
        self.is_complete()
            .then(|| self.grid.snapshot().trim_composition())
    }
}

/// Placement phase: one active shape dropped onto the persistent main board.
#[derive(Debug, Clone)]
pub struct MainPhase {
    grid: OccupancyGrid,
    active: Option<Shape>,
    state: PhaseState,
    rule: ScoreRule,
}

impl MainPhase {
    pub fn new(width: usize, height: usize, rule: ScoreRule) -> Self {
        Self {
            grid: OccupancyGrid::new(width, height),
            active: None,
            // Nothing to place until a shape is presented.
            state: PhaseState::PhaseComplete,
            rule,
        }
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn state(&self) -> PhaseState {
        self.state
    }

    pub fn active_shape(&self) -> Option<&Shape> {
        self.active.as_ref()
    }

    /// Makes `matrix` the active shape and runs the reachability check.
    pub fn present(&mut self, matrix: BinaryMatrix) -> PhaseState {
        if self.state == PhaseState::GameOver {
            return self.state;
        }
        let fits = can_be_placed_anywhere(&self.grid, &matrix);
        self.active = Some(Shape::new(matrix));
        self.state = if fits {
            PhaseState::AwaitingPlacement
        } else {
            log::info!(
                "game over: no placement for shape on board with {} occupied cells",
                self.grid.occupied_count()
            );
            PhaseState::GameOver
        };
        self.state
    }

    pub fn transform(&mut self, transform: Transform) -> bool {
        if self.state != PhaseState::AwaitingPlacement {
            return false;
        }
        self.active
            .as_mut()
            .is_some_and(|s| s.transform(transform))
    }

    pub fn preview(&self, anchor_col: i32, anchor_row: i32) -> Option<Preview> {
        if self.state != PhaseState::AwaitingPlacement {
            return None;
        }
        let shape = self.active.as_ref()?;
        Some(preview(&self.grid, &shape.grid_cells(anchor_col, anchor_row)))
    }

    /// Commits the active shape at the anchor, then resolves clears.
    pub fn drop_active(&mut self, anchor_col: i32, anchor_row: i32) -> DropOutcome {
        if self.state != PhaseState::AwaitingPlacement {
            return DropOutcome::Ignored;
        }
        let Some(shape) = self.active.as_mut() else {
            return DropOutcome::Ignored;
        };
        let cells = shape.grid_cells(anchor_col, anchor_row);
        if !try_commit(&mut self.grid, &cells) {
            return DropOutcome::Rejected;
        }
        shape.place();

        self.state = PhaseState::Resolving;
        let clear = resolve_with(&mut self.grid, self.rule);
        self.state = PhaseState::PhaseComplete;
        log::debug!(
            "main drop at ({anchor_col}, {anchor_row}): {} cells, {} lines",
            cells.len(),
            clear.lines.total()
        );
        DropOutcome::Placed { cells, clear }
    }

    /// Empty board, no active shape.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.active = None;
        self.state = PhaseState::PhaseComplete;
    }
}
