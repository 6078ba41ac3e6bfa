use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::{
    CellSurface, SurfaceCell,
    widgets::{color, style},
};

/// Terminal columns per logical cell.
pub(crate) const CELL_WIDTH: u16 = 2;

/// Renders a [`CellSurface`], two terminal columns per logical cell.
///
/// A brick is its fill color as background with the border color drawn as
/// `[]` on top.
#[derive(Debug)]
pub(crate) struct SurfaceDisplay<'a> {
    surface: &'a CellSurface,
    show_dots: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SurfaceDisplay<'a> {
    pub(crate) fn new(surface: &'a CellSurface) -> Self {
        Self {
            surface,
            show_dots: false,
            block: None,
        }
    }

    /// Marks empty cells with a dot.
    pub(crate) fn show_dots(self, show_dots: bool) -> Self {
        Self { show_dots, ..self }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        to_u16(self.surface.width()).saturating_mul(CELL_WIDTH)
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub(crate) fn height(&self) -> u16 {
        to_u16(self.surface.height()) + super::block_vertical_margin(self.block.as_ref())
    }

    fn cell_symbols(&self, cell: SurfaceCell) -> ([&'static str; 2], Style) {
        match (cell.border, cell.fill) {
            (border, Some(fill)) => {
                let fg = border.map_or(color::from_engine(fill), color::from_engine);
                (["[", "]"], style::fg_bg(fg, color::from_engine(fill)))
            }
            (Some(border), None) => (
                ["[", "]"],
                style::fg_bg(color::from_engine(border), color::BLACK),
            ),
            (None, None) if self.show_dots => ([" ", "."], style::EMPTY_DOT),
            (None, None) => ([" ", " "], style::EMPTY),
        }
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

impl Widget for SurfaceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SurfaceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area).centered(
            Constraint::Length(to_u16(self.surface.width()).saturating_mul(CELL_WIDTH)),
            Constraint::Length(to_u16(self.surface.height())),
        );

        for (y, row) in (area.top()..area.bottom()).zip(self.surface.rows()) {
            let columns = (area.left()..area.right()).step_by(usize::from(CELL_WIDTH));
            for (x, cell) in columns.zip(row.iter().copied()) {
                let (symbols, style) = self.cell_symbols(cell);
                for (dx, symbol) in (0..CELL_WIDTH).zip(symbols) {
                    if let Some(buf_cell) = buf.cell_mut((x + dx, y)) {
                        buf_cell.set_symbol(symbol).set_style(style);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bricks_engine::{Color, RenderSink as _};

    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_owned())
            .collect()
    }

    #[test]
    fn test_render_cells() {
        let mut surface = CellSurface::new(3, 2);
        bricks_engine::draw_brick(&mut surface, 0, 1, Color::CRIMSON).unwrap();
        surface.draw_outlined_cell(1, 2, Color::WHITE).unwrap();

        let display = SurfaceDisplay::new(&surface).show_dots(true);
        assert_eq!((display.width(), display.height()), (6, 2));

        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 2));
        display.render(buf.area, &mut buf);
        assert_eq!(row_text(&buf, 0), " .[] .");
        assert_eq!(row_text(&buf, 1), " . .[]");
        assert_eq!(buf[(2, 0)].bg, color::from_engine(Color::CRIMSON));
        assert_eq!(buf[(2, 0)].fg, color::from_engine(Color::BORDER));
        assert_eq!(buf[(4, 1)].fg, color::WHITE);
    }

    #[test]
    fn test_size_includes_block() {
        let surface = CellSurface::new(10, 20);
        let display = SurfaceDisplay::new(&surface).block(BlockWidget::bordered());
        assert_eq!((display.width(), display.height()), (22, 22));
    }
}
