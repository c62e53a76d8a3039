//! Play session: owns both phases, the score and the build → main handoff.

use crate::config::{ConfigError, GameConfig};
use crate::matrix::BinaryMatrix;
use crate::phase::{BuildPhase, DropOutcome, MainPhase, PhaseState};
use crate::shape::Transform;
use crate::shape_gen::ShapeGenerator;
use rand::Rng;
use rand::rngs::StdRng;

/// Session score. Only clear resolution adds to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreState {
    points: u64,
    lines: u64,
}

impl ScoreState {
    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn lines(&self) -> u64 {
        self.lines
    }

    fn record(&mut self, outcome: &DropOutcome) {
        if let DropOutcome::Placed { clear, .. } = outcome {
            self.points += u64::from(clear.score_delta);
            self.lines += clear.lines.total() as u64;
        }
    }
}

/// Which phase is accepting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Build,
    Main,
}

/// Shape the main phase starts with when nothing has been composed.
pub fn default_shape() -> BinaryMatrix {
    BinaryMatrix::single(true)
}

#[derive(Debug)]
pub struct Session<R = StdRng> {
    config: GameConfig,
    generator: ShapeGenerator<R>,
    score: ScoreState,
    build: BuildPhase,
    main: MainPhase,
    phase: Phase,
    rounds: u32,
}

impl Session<StdRng> {
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, ShapeGenerator::seeded(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Starts in the build phase with freshly generated source shapes.
    pub fn new(config: GameConfig, mut generator: ShapeGenerator<R>) -> Result<Self, ConfigError> {
        config.validate()?;
        let build = Self::next_build(&config, &mut generator);
        let main = MainPhase::new(config.main_width, config.main_height, config.score);
        Ok(Self {
            config,
            generator,
            score: ScoreState::default(),
            build,
            main,
            phase: Phase::Build,
            rounds: 0,
        })
    }

    fn next_build(config: &GameConfig, generator: &mut ShapeGenerator<R>) -> BuildPhase {
        let sources = (0..config.source_shapes)
            .map(|_| generator.generate(config.min_cells, config.max_cells, config.scratch_size))
            .collect();
        BuildPhase::new(config.build_width, config.build_height, sources)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> ScoreState {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed build + main rounds.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn build(&self) -> &BuildPhase {
        &self.build
    }

    pub fn main(&self) -> &MainPhase {
        &self.main
    }

    pub fn is_game_over(&self) -> bool {
        self.main.state() == PhaseState::GameOver
    }

    /// Detached copy of the main board for the build-phase hint view.
    pub fn hint_snapshot(&self) -> BinaryMatrix {
        self.main.grid().snapshot()
    }

    pub fn transform_build_shape(&mut self, index: usize, transform: Transform) -> bool {
        self.phase == Phase::Build && self.build.transform(index, transform)
    }

    pub fn drop_build_shape(&mut self, index: usize, anchor_col: i32, anchor_row: i32) -> DropOutcome {
        if self.phase != Phase::Build {
            return DropOutcome::Ignored;
        }
        self.build.drop_shape(index, anchor_col, anchor_row)
    }

    /// Hands the composed board to the main phase as its active shape.
    /// `None` until every build shape is placed.
    pub fn confirm_composition(&mut self) -> Option<PhaseState> {
        if self.phase != Phase::Build {
            return None;
        }
        let composed = self.build.compose()?;
        log::debug!("composition confirmed:\n{composed}");
        self.phase = Phase::Main;
        Some(self.main.present(composed))
    }

    pub fn transform_active(&mut self, transform: Transform) -> bool {
        self.phase == Phase::Main && self.main.transform(transform)
    }

    /// Drops the active main shape and adds any clear score.
    pub fn drop_active(&mut self, anchor_col: i32, anchor_row: i32) -> DropOutcome {
        if self.phase != Phase::Main {
            return DropOutcome::Ignored;
        }
        let outcome = self.main.drop_active(anchor_col, anchor_row);
        self.score.record(&outcome);
        outcome
    }

    /// After a completed main drop, starts the next build phase.
    pub fn advance(&mut self) -> bool {
        if self.phase != Phase::Main || self.main.state() != PhaseState::PhaseComplete {
            return false;
        }
        self.rounds += 1;
        self.build = Self::next_build(&self.config, &mut self.generator);
        self.phase = Phase::Build;
        log::info!(
            "round {} complete, score {}",
            self.rounds,
            self.score.points
        );
        true
    }

    /// Empty main board, zero score, new build phase.
    pub fn reset(&mut self) {
        self.main.reset();
        self.score = ScoreState::default();
        self.rounds = 0;
        self.build = Self::next_build(&self.config, &mut self.generator);
        self.phase = Phase::Build;
        log::info!("session reset");
    }

    /// Skips composition and presents `matrix` directly on the main board.
    ///
    /// Abandons the current build phase, including any shapes already
    /// placed on the build board; the next `advance` starts a fresh one.
    pub fn present_main(&mut self, matrix: BinaryMatrix) -> PhaseState {
        if self.phase == Phase::Build && self.build.shapes().iter().any(|s| s.is_placed()) {
            log::warn!("abandoning build phase with placed shapes");
        }
        self.phase = Phase::Main;
        self.main.present(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reachability::{can_be_placed_anywhere, find_placement};

    fn small_config() -> GameConfig {
        GameConfig {
            build_width: 3,
            build_height: 3,
            main_width: 3,
            main_height: 3,
            source_shapes: 1,
            min_cells: 3,
            max_cells: 3,
            scratch_size: 3,
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let cfg = GameConfig {
            source_shapes: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            Session::seeded(cfg, 1),
            Err(ConfigError::NoSourceShapes)
        ));
    }

    #[test]
    fn test_round_trip_build_to_main() {
        let mut s = Session::seeded(small_config(), 3).unwrap();
        assert_eq!(s.config(), &small_config());
        assert_eq!(s.build().shapes().len(), s.config().source_shapes);
        assert_eq!(s.phase(), Phase::Build);
        assert_eq!(s.confirm_composition(), None);
        assert_eq!(s.drop_active(0, 0), DropOutcome::Ignored);

        let shape = s.build().shapes()[0].matrix().clone();
        let p = find_placement(s.build().grid(), &shape).unwrap();
        for _ in 0..p.orientation.rotations {
            assert!(s.transform_build_shape(0, Transform::RotateCw));
        }
        if p.orientation.flipped {
            assert!(s.transform_build_shape(0, Transform::Flip));
        }
        assert!(s.drop_build_shape(0, p.anchor_col, p.anchor_row).is_placed());

        let composed = s.build().compose().unwrap();
        assert_eq!(composed.filled_count(), 3);
        assert_eq!(s.confirm_composition(), Some(PhaseState::AwaitingPlacement));
        assert_eq!(s.main().active_shape().unwrap().matrix(), &composed);
        assert_eq!(s.phase(), Phase::Main);
        assert!(!s.advance());

        let p = find_placement(s.main().grid(), &composed).unwrap();
        for _ in 0..p.orientation.rotations {
            s.transform_active(Transform::RotateCw);
        }
        if p.orientation.flipped {
            s.transform_active(Transform::Flip);
        }
        assert!(s.drop_active(p.anchor_col, p.anchor_row).is_placed());
        assert!(s.advance());
        assert_eq!(s.rounds(), 1);
        assert_eq!(s.phase(), Phase::Build);
        assert!(s.build().grid().is_empty());
    }

    #[test]
    fn test_score_accumulates_from_clears() {
        let mut s = Session::seeded(GameConfig::default(), 9).unwrap();
        s.present_main("###########".parse().unwrap());
        let out = s.drop_active(0, 4);
        assert!(out.is_placed());
        assert_eq!(s.score().points(), 100);
        assert_eq!(s.score().lines(), 1);
        assert!(s.main().grid().is_empty());
    }

    #[test]
    fn test_hint_snapshot_is_a_copy() {
        let mut s = Session::seeded(GameConfig::default(), 5).unwrap();
        s.present_main("##".parse().unwrap());
        s.drop_active(0, 0);
        let hint = s.hint_snapshot();
        assert_eq!(hint.filled_count(), 2);
        s.reset();
        assert_eq!(hint.filled_count(), 2);
        assert!(s.main().grid().is_empty());
    }

    #[test]
    fn test_present_main_abandons_build() {
        let mut s = Session::seeded(GameConfig::default(), 21).unwrap();
        let shape = s.build().shapes()[0].matrix().clone();
        let p = find_placement(s.build().grid(), &shape).unwrap();
        assert_eq!(p.orientation.rotations, 0);
        assert!(s.drop_build_shape(0, p.anchor_col, p.anchor_row).is_placed());

        assert_eq!(s.present_main(default_shape()), PhaseState::AwaitingPlacement);
        assert_eq!(s.phase(), Phase::Main);
        assert_eq!(s.drop_build_shape(1, 0, 0), DropOutcome::Ignored);
        assert!(!s.transform_build_shape(1, Transform::Flip));
        assert_eq!(s.confirm_composition(), None);

        assert!(s.drop_active(0, 0).is_placed());
        assert!(s.advance());
        assert!(s.build().grid().is_empty());
        assert!(s.build().shapes().iter().all(|sh| !sh.is_placed()));
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut s = Session::seeded(small_config(), 11).unwrap();
        s.present_main("#.#\n.#.\n#.#".parse().unwrap());
        assert!(s.drop_active(0, 0).is_placed());
        s.advance();
        assert_eq!(s.present_main("##".parse().unwrap()), PhaseState::GameOver);
        assert!(s.is_game_over());
        assert!(!s.advance());
        assert_eq!(s.drop_active(1, 0), DropOutcome::Ignored);

        s.reset();
        assert!(!s.is_game_over());
        assert_eq!(s.score(), ScoreState::default());
        assert!(s.main().grid().is_empty());
        assert!(can_be_placed_anywhere(s.main().grid(), &default_shape()));
    }
}
