use bricks_engine::{Color, RenderSink, SurfaceBoundsError};

/// What has been drawn into one logical cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SurfaceCell {
    pub(crate) border: Option<Color>,
    pub(crate) fill: Option<Color>,
}

impl SurfaceCell {
    pub(crate) fn is_blank(self) -> bool {
        self.border.is_none() && self.fill.is_none()
    }
}

/// In-memory [`RenderSink`] the terminal widgets render from.
///
/// Stores one [`SurfaceCell`] per logical cell; the conversion to terminal
/// columns happens in [`SurfaceDisplay`](super::widgets::SurfaceDisplay).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CellSurface {
    width: usize,
    height: usize,
    cells: Vec<SurfaceCell>,
}

impl CellSurface {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![SurfaceCell::default(); width * height],
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    #[cfg(test)]
    pub(crate) fn cell(&self, row: usize, col: usize) -> SurfaceCell {
        assert!(row < self.height && col < self.width);
        self.cells[row * self.width + col]
    }

    /// Iterates over the rows, top first.
    pub(crate) fn rows(&self) -> impl Iterator<Item = &[SurfaceCell]> {
        self.cells.chunks(self.width)
    }

    fn cell_mut(&mut self, row: i32, col: i32) -> Result<&mut SurfaceCell, SurfaceBoundsError> {
        let index = usize::try_from(row)
            .ok()
            .zip(usize::try_from(col).ok())
            .filter(|&(y, x)| y < self.height && x < self.width)
            .map(|(y, x)| y * self.width + x);
        match index {
            Some(i) => Ok(&mut self.cells[i]),
            None => Err(SurfaceBoundsError {
                row,
                col,
                width: self.width,
                height: self.height,
            }),
        }
    }
}

impl RenderSink for CellSurface {
    fn clear(&mut self) {
        self.cells.fill(SurfaceCell::default());
    }

    fn draw_outlined_cell(
        &mut self,
        row: i32,
        col: i32,
        border: Color,
    ) -> Result<(), SurfaceBoundsError> {
        self.cell_mut(row, col)?.border = Some(border);
        Ok(())
    }

    fn draw_filled_cell(
        &mut self,
        row: i32,
        col: i32,
        fill: Color,
    ) -> Result<(), SurfaceBoundsError> {
        self.cell_mut(row, col)?.fill = Some(fill);
        Ok(())
    }
}
