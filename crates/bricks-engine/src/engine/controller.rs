use std::time::Duration;

use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::{
    ConfigError,
    config::GameConfig,
    core::{Board, Offset, Piece, StepOutcome},
    engine::{GameSeed, GravityTimer, PieceSpawner, ScoreState, ScoreTracker},
    ui::{self, GameUi},
};

/// Lifecycle state of a [`GameController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameState {
    /// Constructed, no game started yet.
    Idle,
    Running,
    Paused,
    /// The last game was lost and no new one has started.
    GameOver,
}

/// Logical player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Left,
    Right,
    /// Soft drop by one row.
    Down,
    /// Rotate a quarter turn clockwise.
    Rotate,
    /// Toggle pause.
    Pause,
}

impl Command {
    /// Offset this command applies to the falling piece, if it moves it.
    #[must_use]
    pub const fn movement(self) -> Option<Offset> {
        match self {
            Command::Left => Some(Offset::LEFT),
            Command::Right => Some(Offset::RIGHT),
            Command::Down => Some(Offset::DOWN),
            Command::Rotate => Some(Offset::ROTATE),
            Command::Pause => None,
        }
    }
}

/// Drives a game: owns the board, the piece queue, the score and the gravity
/// timer, and reports to a [`GameUi`].
///
/// # State Machine
///
/// ```text
/// Idle --new_game--> Running <--Pause--> Paused
///                     |   ^
///               loss  |   | new_game (automatic when `auto_restart`)
///                     v   |
///                    GameOver
/// ```
///
/// Movement commands are only accepted while `Running`; `Pause` only toggles
/// between `Running` and `Paused`. [`Self::new_game`] is accepted in every
/// state.
///
/// Time is supplied by the caller through [`Self::advance`]; one gravity tick
/// runs per elapsed gravity period.
#[derive(Debug)]
pub struct GameController<U> {
    config: GameConfig,
    board: Option<Board>,
    spawner: PieceSpawner,
    score: ScoreTracker,
    timer: GravityTimer,
    state: GameState,
    ui: U,
}

impl<U> GameController<U>
where
    U: GameUi,
{
    /// Validates `config` and creates an idle controller with a random seed.
    pub fn new(config: GameConfig, ui: U) -> Result<Self, ConfigError> {
        Self::with_seed(config, ui, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    pub fn with_seed(config: GameConfig, ui: U, seed: GameSeed) -> Result<Self, ConfigError> {
        let catalog = config.build_catalog()?;
        let spawner = PieceSpawner::with_seed(catalog, config.palette.clone(), seed);
        log::debug!(
            "game controller ready: {}x{} board, {} shapes, seed {seed}",
            config.board.width(),
            config.board.height(),
            spawner.catalog().count()
        );
        Ok(Self {
            config,
            board: None,
            spawner,
            score: ScoreTracker::new(),
            timer: GravityTimer::new(),
            state: GameState::Idle,
            ui,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> ScoreState {
        self.score.state()
    }

    /// The board of the current or last game, `None` before the first game.
    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        self.spawner.next_piece()
    }

    #[must_use]
    pub fn timer(&self) -> &GravityTimer {
        &self.timer
    }

    #[must_use]
    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    /// Time left until the next gravity tick, or `None` while gravity is stopped.
    #[must_use]
    pub fn time_until_tick(&self) -> Option<Duration> {
        self.timer.remaining()
    }

    /// Discards the current game, if any, and starts a new one.
    pub fn new_game(&mut self) {
        self.timer.stop();
        self.score.reset();
        self.ui.show_score(self.score.state());

        self.spawner.reset_queue();
        let board = Board::new(self.config.board, self.spawner.pop_next());
        let lost = board.is_game_over();
        self.board = Some(board);
        self.state = GameState::Running;
        log::info!("new game started");

        if lost {
            self.game_over();
            return;
        }
        self.timer.start(self.score.gravity_delay());
        self.redraw();
    }

    /// Applies a player command.
    ///
    /// Commands that do not apply to the current state are ignored.
    pub fn handle_command(&mut self, command: Command) {
        match (command, self.state) {
            (Command::Pause, GameState::Running) => {
                self.timer.stop();
                self.state = GameState::Paused;
                log::info!("game paused");
            }
            (Command::Pause, GameState::Paused) => {
                self.timer.start(self.score.gravity_delay());
                self.state = GameState::Running;
                log::info!("game resumed");
            }
            (Command::Down, GameState::Running) => self.step(),
            (_, GameState::Running) => {
                let Some(offset) = command.movement() else {
                    return;
                };
                let Some(board) = &mut self.board else {
                    return;
                };
                if board.try_move(offset) {
                    log::debug!("{command:?}: piece at {:?}", board.current_piece().position());
                    self.redraw();
                }
            }
            (_, state) => log::trace!("{command:?} ignored in {state:?} state"),
        }
    }

    /// Feeds elapsed wall time to the gravity timer and runs every gravity
    /// tick that came due.
    pub fn advance(&mut self, elapsed: Duration) {
        self.timer.advance(elapsed);
        while self.timer.take_due() {
            self.gravity_tick();
        }
    }

    /// Runs one gravity step. Ignored unless the game is running.
    pub fn gravity_tick(&mut self) {
        if self.state.is_running() {
            self.step();
        }
    }

    fn step(&mut self) {
        let Some(board) = &mut self.board else {
            return;
        };
        match board.step_down() {
            StepOutcome::Moved => self.redraw(),
            StepOutcome::Locked { lines_cleared } => self.land(lines_cleared),
        }
    }

    fn land(&mut self, lines_cleared: usize) {
        if lines_cleared > 0 {
            if let Err(e) = self.score.apply_lines_cleared(lines_cleared) {
                log::warn!("score not updated: {e}");
            }
            self.ui.show_score(self.score.state());
        }
        self.timer.restart(self.score.gravity_delay());

        let next = self.spawner.pop_next();
        let Some(board) = &mut self.board else {
            return;
        };
        board.set_current_piece(next);
        if board.is_game_over() {
            self.game_over();
            if self.config.auto_restart {
                self.new_game();
            }
            return;
        }
        self.redraw();
    }

    fn game_over(&mut self) {
        self.timer.stop();
        self.state = GameState::GameOver;
        self.redraw();
        let score = self.score.state();
        log::info!(
            "game over: score {}, lines {}, level {}",
            score.score(),
            score.lines(),
            score.level()
        );
        self.ui.notify_loss(score);
    }

    fn redraw(&mut self) {
        let Some(board) = &self.board else {
            return;
        };
        let result = ui::draw_board(self.ui.board_surface(), board.grid(), board.current_piece())
            .and_then(|()| ui::draw_preview(self.ui.preview_surface(), self.spawner.next_piece()));
        if let Err(e) = &result {
            log::error!("failed to draw game: {e}");
        }
        debug_assert!(result.is_ok(), "drawing stays within the surfaces");
    }
}
