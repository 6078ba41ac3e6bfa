use std::iter;

use bricks_engine::ScoreState;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

#[derive(Debug)]
pub(crate) struct ScoreDisplay<'a> {
    score: ScoreState,
    block: Option<BlockWidget<'a>>,
}

impl<'a> ScoreDisplay<'a> {
    pub(crate) fn new(score: ScoreState) -> Self {
        Self { score, block: None }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        14 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub(crate) fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

const ROWS: &[(&str, fn(&ScoreState) -> usize)] = &[
    ("SCORE:", ScoreState::score),
    ("LINES:", ScoreState::lines),
    ("LEVEL:", ScoreState::level),
];

impl Widget for ScoreDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;
        let row_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for ((label, value), area) in iter::zip(ROWS.iter().copied(), row_areas.iter().copied()) {
            let [label_area, value_area] =
                area.layout(&Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]));
            Line::styled(label, style)
                .left_aligned()
                .render(label_area, buf);
            Line::styled(value(&self.score).to_string(), style)
                .right_aligned()
                .render(value_area, buf);
        }
    }
}
