use std::sync::Arc;

use crate::{
    SurfaceBoundsError,
    core::{Color, Piece, Position, ShapeDefinition, ShapeTemplate},
    engine::ScoreState,
    ui::{GameUi, RenderSink},
};

/// Builds a gold piece from a one-off shape.
pub(crate) fn piece(rows: &[&str], position: Position) -> Piece {
    let base = ShapeDefinition::new(rows.iter().copied()).parse().unwrap();
    Piece::new(Arc::new(ShapeTemplate::new(base)), 0, position, Color::GOLD)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DrawOp {
    Clear,
    Outline(i32, i32, Color),
    Fill(i32, i32, Color),
}

/// Surface that records draw calls and the resulting fill of every cell.
#[derive(Debug)]
pub(crate) struct RecordingSurface {
    width: usize,
    height: usize,
    ops: Vec<DrawOp>,
    fills: Vec<Option<Color>>,
}

impl RecordingSurface {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ops: vec![],
            fills: vec![None; width * height],
        }
    }

    pub(crate) fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub(crate) fn fill_at(&self, row: usize, col: usize) -> Option<Color> {
        self.fills[row * self.width + col]
    }

    pub(crate) fn filled_count(&self) -> usize {
        self.fills.iter().flatten().count()
    }

    fn index(&self, row: i32, col: i32) -> Result<usize, SurfaceBoundsError> {
        let err = SurfaceBoundsError {
            row,
            col,
            width: self.width,
            height: self.height,
        };
        let y = usize::try_from(row).map_err(|_| err)?;
        let x = usize::try_from(col).map_err(|_| err)?;
        if y >= self.height || x >= self.width {
            return Err(err);
        }
        Ok(y * self.width + x)
    }
}

impl RenderSink for RecordingSurface {
    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
        self.fills.fill(None);
    }

    fn draw_outlined_cell(
        &mut self,
        row: i32,
        col: i32,
        border: Color,
    ) -> Result<(), SurfaceBoundsError> {
        self.index(row, col)?;
        self.ops.push(DrawOp::Outline(row, col, border));
        Ok(())
    }

    fn draw_filled_cell(
        &mut self,
        row: i32,
        col: i32,
        fill: Color,
    ) -> Result<(), SurfaceBoundsError> {
        let i = self.index(row, col)?;
        self.ops.push(DrawOp::Fill(row, col, fill));
        self.fills[i] = Some(fill);
        Ok(())
    }
}

/// Front end that records everything reported to it.
#[derive(Debug)]
pub(crate) struct RecordingUi {
    pub(crate) board: RecordingSurface,
    pub(crate) preview: RecordingSurface,
    pub(crate) scores: Vec<ScoreState>,
    pub(crate) losses: Vec<ScoreState>,
}

impl RecordingUi {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            board: RecordingSurface::new(width, height),
            preview: RecordingSurface::new(crate::core::PREVIEW_SIZE, crate::core::PREVIEW_SIZE),
            scores: vec![],
            losses: vec![],
        }
    }
}

impl GameUi for RecordingUi {
    type Surface = RecordingSurface;

    fn board_surface(&mut self) -> &mut RecordingSurface {
        &mut self.board
    }

    fn preview_surface(&mut self) -> &mut RecordingSurface {
        &mut self.preview
    }

    fn show_score(&mut self, score: ScoreState) {
        self.scores.push(score);
    }

    fn notify_loss(&mut self, score: ScoreState) {
        self.losses.push(score);
    }
}
