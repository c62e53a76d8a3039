//! shapefit: grid engine for a shape-composition and block-placement puzzle.
//!
//! A round has two phases. In the build phase a few random shapes are arranged
//! on a small board, and the occupied area becomes one composed shape. In the
//! main phase that shape is dropped onto a persistent board where full rows
//! and columns clear for points. The game ends when a presented shape fits
//! nowhere in any rotation or flip.
//!
//! Everything here is synchronous and owned by a single caller; rendering and
//! input belong to the frontend.

pub mod autoplay;
pub mod clear;
pub mod config;
pub mod grid;
pub mod matrix;
pub mod phase;
pub mod placement;
pub mod reachability;
pub mod session;
pub mod shape;
pub mod shape_gen;

pub use clear::{ClearOutcome, FullLines, ScoreRule};
pub use config::{ConfigError, GameConfig};
pub use grid::{BlockHandles, GridCoord, OccupancyGrid};
pub use matrix::{BinaryMatrix, MatrixError};
pub use phase::{BuildPhase, DropOutcome, MainPhase, PhaseState};
pub use placement::Preview;
pub use reachability::{Orientation, Placement};
pub use session::{Phase, ScoreState, Session};
pub use shape::{Shape, Transform};
pub use shape_gen::ShapeGenerator;
