use bricks_engine::GameState;
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::{
    TerminalUi,
    widgets::{ScoreDisplay, SurfaceDisplay, color, style},
};

/// Whole game screen: score panel, board and the queued piece.
#[derive(Debug)]
pub(crate) struct GameDisplay<'a> {
    ui: &'a TerminalUi,
    state: GameState,
}

impl<'a> GameDisplay<'a> {
    pub(crate) fn new(ui: &'a TerminalUi, state: GameState) -> Self {
        Self { ui, state }
    }

    fn popup(&self) -> Option<(String, Style)> {
        if let Some(score) = self.ui.last_loss() {
            let text = format!("You lose\nscore {}", score.score());
            return Some((text, Style::new().fg(color::WHITE).bg(color::RED)));
        }
        match self.state {
            GameState::Paused => Some((
                "PAUSED".to_owned(),
                Style::new().fg(color::BLACK).bg(color::YELLOW),
            )),
            GameState::Idle | GameState::Running | GameState::GameOver => None,
        }
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block_padding = Padding::horizontal(1);
        let border_style = match self.state {
            GameState::Idle | GameState::Running => color::WHITE,
            GameState::Paused => color::YELLOW,
            GameState::GameOver => color::RED,
        };

        let board = SurfaceDisplay::new(self.ui.board())
            .show_dots(true)
            .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
        let preview = SurfaceDisplay::new(self.ui.preview()).block(
            Block::bordered()
                .title(Line::from("NEXT").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let stats = ScoreDisplay::new(self.ui.score()).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(board.width()),
            Constraint::Length(preview.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(center_column);
        let [preview_area] =
            Layout::vertical([Constraint::Length(preview.height())]).areas(right_column);

        let board_width = board.width();
        stats.render(stats_area, buf);
        board.render(board_area, buf);
        preview.render(preview_area, buf);

        if let Some((text, style)) = self.popup() {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let height = u16::try_from(text.height()).unwrap_or(1);
            let area = board_area.centered(
                Constraint::Length(board_width),
                Constraint::Length(height + 2),
            );
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(height)), buf);
        }
    }
}
