//! Collaborator interfaces for presenting a game.
//!
//! The engine draws through a [`RenderSink`] in logical cell coordinates and
//! never sees pixels or terminal columns; scaling is the sink's business.

use crate::{
    SurfaceBoundsError,
    core::{Color, Grid, Piece, geometry::coord},
    engine::ScoreState,
};

/// Drawing surface addressed in logical cells.
pub trait RenderSink {
    /// Erases the whole surface.
    fn clear(&mut self);

    /// Draws the outline of the cell at (`row`, `col`).
    fn draw_outlined_cell(
        &mut self,
        row: i32,
        col: i32,
        border: Color,
    ) -> Result<(), SurfaceBoundsError>;

    /// Fills the interior of the cell at (`row`, `col`), leaving its outline.
    fn draw_filled_cell(
        &mut self,
        row: i32,
        col: i32,
        fill: Color,
    ) -> Result<(), SurfaceBoundsError>;
}

/// Front end a [`GameController`](crate::GameController) reports to.
pub trait GameUi {
    type Surface: RenderSink;

    /// Surface the board is drawn on.
    fn board_surface(&mut self) -> &mut Self::Surface;

    /// Surface the queued piece is drawn on.
    fn preview_surface(&mut self) -> &mut Self::Surface;

    /// Called after every change to the score, lines or level.
    fn show_score(&mut self, score: ScoreState);

    /// Called once when a game is lost.
    fn notify_loss(&mut self, score: ScoreState);
}

/// Draws one brick: an outline in [`Color::BORDER`], then the fill.
pub fn draw_brick<S>(
    surface: &mut S,
    row: i32,
    col: i32,
    fill: Color,
) -> Result<(), SurfaceBoundsError>
where
    S: RenderSink + ?Sized,
{
    surface.draw_outlined_cell(row, col, Color::BORDER)?;
    surface.draw_filled_cell(row, col, fill)
}

pub fn draw_piece<S>(surface: &mut S, piece: &Piece) -> Result<(), SurfaceBoundsError>
where
    S: RenderSink + ?Sized,
{
    for (row, col) in piece.cells() {
        draw_brick(surface, row, col, piece.color())?;
    }
    Ok(())
}

/// Draws every occupied cell of the grid.
pub fn draw_grid<S>(surface: &mut S, grid: &Grid) -> Result<(), SurfaceBoundsError>
where
    S: RenderSink + ?Sized,
{
    for (row, col, cell) in grid.occupied_cells() {
        if let Some(color) = cell.color() {
            draw_brick(surface, coord(row), coord(col), color)?;
        }
    }
    Ok(())
}

/// Clears `surface`, then draws the falling piece and the settled cells.
pub fn draw_board<S>(surface: &mut S, grid: &Grid, piece: &Piece) -> Result<(), SurfaceBoundsError>
where
    S: RenderSink + ?Sized,
{
    surface.clear();
    draw_piece(surface, piece)?;
    draw_grid(surface, grid)
}

/// Clears `surface` and draws the queued piece.
pub fn draw_preview<S>(surface: &mut S, piece: &Piece) -> Result<(), SurfaceBoundsError>
where
    S: RenderSink + ?Sized,
{
    surface.clear();
    draw_piece(surface, piece)
}
