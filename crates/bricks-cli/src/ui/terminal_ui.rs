use bricks_engine::{BoardSize, GameUi, PREVIEW_SIZE, ScoreState};

use crate::ui::CellSurface;

/// [`GameUi`] backed by in-memory surfaces that the widgets render from.
#[derive(Debug)]
pub(crate) struct TerminalUi {
    board: CellSurface,
    preview: CellSurface,
    score: ScoreState,
    last_loss: Option<ScoreState>,
}

impl TerminalUi {
    pub(crate) fn new(size: BoardSize) -> Self {
        Self {
            board: CellSurface::new(size.width(), size.height()),
            preview: CellSurface::new(PREVIEW_SIZE, PREVIEW_SIZE),
            score: ScoreState::INITIAL,
            last_loss: None,
        }
    }

    pub(crate) fn board(&self) -> &CellSurface {
        &self.board
    }

    pub(crate) fn preview(&self) -> &CellSurface {
        &self.preview
    }

    pub(crate) fn score(&self) -> ScoreState {
        self.score
    }

    /// Final score of the last lost game, until dismissed.
    pub(crate) fn last_loss(&self) -> Option<ScoreState> {
        self.last_loss
    }

    pub(crate) fn dismiss_loss(&mut self) {
        self.last_loss = None;
    }
}

impl GameUi for TerminalUi {
    type Surface = CellSurface;

    fn board_surface(&mut self) -> &mut CellSurface {
        &mut self.board
    }

    fn preview_surface(&mut self) -> &mut CellSurface {
        &mut self.preview
    }

    fn show_score(&mut self, score: ScoreState) {
        self.score = score;
    }

    fn notify_loss(&mut self, score: ScoreState) {
        self.last_loss = Some(score);
    }
}
