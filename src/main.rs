//! Hop Runner entry point
//!
//! Runs a headless session against the stand-in physics world and logs what
//! the presentation layer would show.

use std::path::PathBuf;

use clap::Parser;

use hop_runner::headless::{Autopilot, HeadlessWorld};
use hop_runner::sim::{FixedStep, Game, GameEvent, Presenter};
use hop_runner::{HighScores, Tuning};

#[derive(Parser)]
#[command(version, about = "Run a headless Hop Runner session")]
struct Cli {
    /// Tuning file (JSON); defaults are used for missing fields
    #[arg(short, long)]
    tuning: Option<PathBuf>,

    /// Override the obstacle seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Longest run to simulate, in seconds
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,

    /// Never tap; the hero just falls
    #[arg(long)]
    no_autopilot: bool,

    /// Best-run table to update (JSON)
    #[arg(long)]
    scores: Option<PathBuf>,
}

/// Presentation that only logs
#[derive(Default)]
struct LogPresenter {
    score: u32,
    restart_visible: bool,
}

impl Presenter for LogPresenter {
    fn show_score(&mut self, score: u32) {
        self.score = score;
        log::info!("Score: {}", score);
    }

    fn set_restart_visible(&mut self, visible: bool) {
        self.restart_visible = visible;
    }

    fn impact_shake(&mut self) {
        log::info!("*shake*");
    }

    fn on_event(&mut self, event: &GameEvent) {
        log::debug!("{:?}", event);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    if let Some(seed) = cli.seed {
        tuning.seed = seed;
    }

    log::info!("Hop Runner (headless) starting...");

    let mut game = Game::new(tuning.clone());
    let mut world = HeadlessWorld::new(&tuning);
    let autopilot = Autopilot::default();
    let mut clock = FixedStep::new(tuning.fixed_dt);
    let mut ui = LogPresenter::default();

    // One rendered frame per tick
    let frames = (cli.seconds / tuning.fixed_dt).ceil() as u64;
    for _ in 0..frames {
        for _ in 0..clock.advance(tuning.fixed_dt) {
            if !cli.no_autopilot && autopilot.wants_flap(&game) {
                game.on_input();
            }
            game.tick(clock.dt());
            world.step(&mut game, clock.dt());
        }
        game.present(&mut ui);

        if ui.restart_visible {
            break;
        }
    }

    let ticks = game.state().time_ticks;
    println!(
        "Run finished: score {} after {:.1}s ({:?})",
        ui.score,
        ticks as f32 * tuning.fixed_dt,
        game.game_state()
    );

    if let Some(path) = &cli.scores {
        let mut scores = HighScores::load(path)?;
        if let Some(rank) = scores.add_score(game.score(), ticks, tuning.seed) {
            println!("New high score, rank #{}", rank);
            scores.save(path)?;
        }
    }

    Ok(())
}
