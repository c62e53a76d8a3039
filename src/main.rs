//! shapefit: headless autoplay runner for the shape-composition puzzle.

mod highscores;

use anyhow::{Context, Result};
use clap::Parser;
use shapefit::autoplay::{self, RunSummary};
use shapefit::{GameConfig, ScoreRule, Session, ShapeGenerator};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.game_config();
    let generator = match args.seed {
        Some(seed) => ShapeGenerator::seeded(seed),
        None => ShapeGenerator::from_entropy(),
    };
    let mut session = Session::new(config, generator).context("invalid game configuration")?;

    let quiet = args.quiet;
    let summary = autoplay::run(&mut session, args.rounds, |s| {
        if !quiet {
            println!(
                "round {:>3}  score {:>6}\n{}\n",
                s.rounds() + 1,
                s.score().points(),
                s.main().grid()
            );
        }
    });
    report(&summary, session.config());

    if !args.no_highscore {
        let best = highscores::load_best();
        if summary.score > best {
            highscores::save_best(summary.score).context("saving high score")?;
            println!("new best score!");
        } else {
            println!("best: {best}");
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn report(summary: &RunSummary, config: &GameConfig) {
    let ending = if summary.game_over {
        "game over"
    } else if summary.stalled {
        "stalled in build phase"
    } else {
        "round limit reached"
    };
    println!(
        "{ending} after {} rounds on {}x{}: {} points, {} lines",
        summary.rounds, config.main_width, config.main_height, summary.score, summary.lines
    );
}

/// Shape-composition and block-placement puzzle, played by a built-in bot.
#[derive(Debug, Parser)]
#[command(
    name = "shapefit",
    version,
    about = "Compose shapes on a small board, then fit them onto the main board and clear full rows and columns.",
    long_about = "shapefit runs the puzzle engine headless with a built-in bot.\n\n\
        Each round, random source shapes are packed onto the build board; the packed area \
        becomes one shape that is dropped onto the main board. Full rows and columns clear \
        (100 points per line, +50 per extra line in the same drop). The game ends when the \
        next shape fits nowhere in any rotation or flip."
)]
pub struct Args {
    /// RNG seed for shape generation. Random if not set.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Maximum number of rounds to play.
    #[arg(short, long, default_value = "50", value_name = "N")]
    pub rounds: u32,

    /// Build board width in cells.
    #[arg(long, default_value = "7", value_name = "COLS")]
    pub build_width: usize,

    /// Build board height in cells.
    #[arg(long, default_value = "7", value_name = "ROWS")]
    pub build_height: usize,

    /// Main board width in cells.
    #[arg(long, default_value = "11", value_name = "COLS")]
    pub width: usize,

    /// Main board height in cells.
    #[arg(long, default_value = "11", value_name = "ROWS")]
    pub height: usize,

    /// Source shapes per build phase.
    #[arg(long, default_value = "3", value_name = "N")]
    pub shapes: usize,

    /// Minimum cells per source shape.
    #[arg(long, default_value = "2", value_name = "N")]
    pub min_cells: usize,

    /// Maximum cells per source shape.
    #[arg(long, default_value = "6", value_name = "N")]
    pub max_cells: usize,

    /// Side of the square scratch grid source shapes grow in.
    #[arg(long, default_value = "3", value_name = "N")]
    pub scratch_size: usize,

    /// Points per cleared line.
    #[arg(long, default_value = "100", value_name = "POINTS")]
    pub line_score: u32,

    /// Bonus per extra line cleared by the same drop.
    #[arg(long, default_value = "50", value_name = "POINTS")]
    pub combo_bonus: u32,

    /// Only print the final summary.
    #[arg(short, long)]
    pub quiet: bool,

    /// Do not read or write the persisted best score.
    #[arg(long)]
    pub no_highscore: bool,

    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            build_width: self.build_width,
            build_height: self.build_height,
            main_width: self.width,
            main_height: self.height,
            source_shapes: self.shapes,
            min_cells: self.min_cells,
            max_cells: self.max_cells,
            scratch_size: self.scratch_size,
            score: ScoreRule {
                line_score: self.line_score,
                combo_bonus: self.combo_bonus,
            },
        }
    }
}
