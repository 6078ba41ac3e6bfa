use std::path::PathBuf;

use bricks_engine::{GameController, GameSeed};
use rand::Rng as _;

use crate::{
    command::play::app::PlayApp,
    config::CliConfig,
    logging,
    tui::{RenderMode, Tui},
    ui::TerminalUi,
};

mod app;

const DEFAULT_FRAME_RATE: f64 = 60.0;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Configuration file (JSON)
    #[clap(long)]
    pub(crate) config: Option<PathBuf>,
    /// Seed for the piece sequence, as 32 hex digits
    #[clap(long)]
    pub(crate) seed: Option<GameSeed>,
    /// Write log records to this file
    #[clap(long)]
    pub(crate) log_file: Option<PathBuf>,
    /// Maximum screen refresh rate; 0 redraws on every change
    #[clap(long, default_value_t = DEFAULT_FRAME_RATE)]
    pub(crate) frame_rate: f64,
    /// Stay on the lost game instead of starting a new one
    #[clap(long)]
    pub(crate) no_auto_restart: bool,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            config: None,
            seed: None,
            log_file: None,
            frame_rate: DEFAULT_FRAME_RATE,
            no_auto_restart: false,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        config,
        seed,
        log_file,
        frame_rate,
        no_auto_restart,
    } = arg;

    logging::init(log_file.as_deref())?;

    let mut config = CliConfig::load(config.as_deref())?;
    if *no_auto_restart {
        config.game.auto_restart = false;
    }
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!("seed: {seed}");

    let ui = TerminalUi::new(config.game.board);
    let game = GameController::with_seed(config.game, ui, seed)?;
    let render_mode = if *frame_rate > 0.0 {
        RenderMode::throttled_from_rate(*frame_rate)
    } else {
        RenderMode::OnDirty
    };
    let mut app = PlayApp::new(game, config.keys, render_mode);

    Tui::new().run(&mut app)?;

    let score = app.final_score();
    println!(
        "score: {}, lines: {}, level: {}",
        score.score(),
        score.lines(),
        score.level()
    );
    Ok(())
}
