//! Deterministic bot that plays a session end to end.
//!
//! Build shapes go to the first legal placement (a compact top-left pack);
//! the main shape goes wherever it clears the most lines.

use crate::clear::find_full_lines;
use crate::grid::OccupancyGrid;
use crate::matrix::BinaryMatrix;
use crate::phase::{DropOutcome, PhaseState};
use crate::placement::{projected_cells, try_commit};
use crate::reachability::{Placement, find_placement, legal_anchors, orientations};
use crate::session::{Phase, Session};
use crate::shape::Transform;
use rand::Rng;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rounds: u32,
    pub score: u64,
    pub lines: u64,
    pub game_over: bool,
    /// A build shape had no legal spot; the build phase can never finish.
    pub stalled: bool,
}

/// Placement that clears the most lines; ties go to the earliest in search order.
pub fn best_placement(grid: &OccupancyGrid, matrix: &BinaryMatrix) -> Option<Placement> {
    let mut best: Option<(usize, Placement)> = None;
    for orientation in orientations(matrix) {
        for (col, row) in legal_anchors(grid, &orientation.matrix) {
            let mut trial = grid.clone();
            let committed = try_commit(&mut trial, &projected_cells(&orientation.matrix, col, row));
            debug_assert!(committed, "legal_anchors yielded an illegal anchor");
            let lines = find_full_lines(&trial).total();
            if best.as_ref().is_none_or(|(n, _)| lines > *n) {
                best = Some((
                    lines,
                    Placement {
                        orientation: orientation.clone(),
                        anchor_col: col,
                        anchor_row: row,
                    },
                ));
            }
        }
    }
    best.map(|(_, p)| p)
}

/// Turns a shape into the placement's orientation: clockwise turns, then flip.
fn orient(placement: &Placement, mut apply: impl FnMut(Transform) -> bool) {
    for _ in 0..placement.orientation.rotations {
        apply(Transform::RotateCw);
    }
    if placement.orientation.flipped {
        apply(Transform::Flip);
    }
}

/// Plays one build phase. Returns `false` if some shape fits nowhere.
fn play_build<R: Rng>(session: &mut Session<R>) -> bool {
    for index in 0..session.build().shapes().len() {
        let matrix = session.build().shapes()[index].matrix().clone();
        let Some(placement) = find_placement(session.build().grid(), &matrix) else {
            log::warn!("build shape {index} fits nowhere:\n{matrix}");
            return false;
        };
        orient(&placement, |t| session.transform_build_shape(index, t));
        let outcome = session.drop_build_shape(index, placement.anchor_col, placement.anchor_row);
        debug_assert!(outcome.is_placed());
    }
    true
}

fn play_main<R: Rng>(session: &mut Session<R>) -> Option<DropOutcome> {
    let shape = session.main().active_shape()?.matrix().clone();
    let placement = best_placement(session.main().grid(), &shape)?;
    orient(&placement, |t| session.transform_active(t));
    Some(session.drop_active(placement.anchor_col, placement.anchor_row))
}

/// Plays up to `max_rounds` rounds or until game over. `on_round` sees the
/// session after each completed main drop.
pub fn run<R: Rng>(
    session: &mut Session<R>,
    max_rounds: u32,
    mut on_round: impl FnMut(&Session<R>),
) -> RunSummary {
    let mut summary = RunSummary::default();
    while session.rounds() < max_rounds {
        if session.phase() == Phase::Build {
            if !play_build(session) {
                summary.stalled = true;
                break;
            }
            if session.confirm_composition() == Some(PhaseState::GameOver) {
                break;
            }
        }
        if session.main().state() == PhaseState::AwaitingPlacement {
            match play_main(session) {
                Some(outcome) if outcome.is_placed() => {}
                other => {
                    log::warn!("main drop failed: {other:?}");
                    break;
                }
            }
            on_round(session);
        }
        if !session.advance() {
            break;
        }
    }
    let score = session.score();
    summary.rounds = session.rounds();
    summary.score = score.points();
    summary.lines = score.lines();
    summary.game_over = session.is_game_over();
    summary
}
