//! Game tunables: board sizes, source-shape generation and scoring.

use crate::clear::ScoreRule;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{grid} grid must be at least 1x1, got {width}x{height}")]
    GridSize {
        grid: &'static str,
        width: usize,
        height: usize,
    },
    #[error("shape cell range {min}..={max} is empty or zero")]
    CellRange { min: usize, max: usize },
    #[error("scratch size must be at least 1")]
    ScratchSize,
    #[error("a build phase needs at least one source shape")]
    NoSourceShapes,
}

/// Defaults follow the shipped game: 7x7 build board, 11x11 main board,
/// three 2..=6-cell source shapes grown in a 3x3 scratch grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub build_width: usize,
    pub build_height: usize,
    pub main_width: usize,
    pub main_height: usize,
    /// Source shapes offered per build phase.
    pub source_shapes: usize,
    pub min_cells: usize,
    pub max_cells: usize,
    pub scratch_size: usize,
    pub score: ScoreRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            build_width: 7,
            build_height: 7,
            main_width: 11,
            main_height: 11,
            source_shapes: 3,
            min_cells: 2,
            max_cells: 6,
            scratch_size: 3,
            score: ScoreRule::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.build_width == 0 || self.build_height == 0 {
            return Err(ConfigError::GridSize {
                grid: "build",
                width: self.build_width,
                height: self.build_height,
            });
        }
        if self.main_width == 0 || self.main_height == 0 {
            return Err(ConfigError::GridSize {
                grid: "main",
                width: self.main_width,
                height: self.main_height,
            });
        }
        if self.min_cells == 0 || self.min_cells > self.max_cells {
            return Err(ConfigError::CellRange {
                min: self.min_cells,
                max: self.max_cells,
            });
        }
        if self.scratch_size == 0 {
            return Err(ConfigError::ScratchSize);
        }
        if self.source_shapes == 0 {
            return Err(ConfigError::NoSourceShapes);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_values() {
        let base = GameConfig::default();
        let cases = [
            (
                GameConfig {
                    main_width: 0,
                    ..base.clone()
                },
                ConfigError::GridSize {
                    grid: "main",
                    width: 0,
                    height: 11,
                },
            ),
            (
                GameConfig {
                    min_cells: 5,
                    max_cells: 3,
                    ..base.clone()
                },
                ConfigError::CellRange { min: 5, max: 3 },
            ),
            (
                GameConfig {
                    scratch_size: 0,
                    ..base.clone()
                },
                ConfigError::ScratchSize,
            ),
            (
                GameConfig {
                    source_shapes: 0,
                    ..base.clone()
                },
                ConfigError::NoSourceShapes,
            ),
        ];
        for (cfg, err) in cases {
            assert_eq!(cfg.validate(), Err(err));
        }
    }
}
