use std::collections::VecDeque;

use crate::{
    config::BoardSize,
    core::{
        cell::Cell,
        geometry::{self, Offset},
        piece::Piece,
    },
};

/// A single row of the grid.
///
/// Rows are materialized lazily: a new row holds no cells, and writing column
/// `c` pads it with empty cells up to `c + 1` cells. Columns past the
/// materialized length read as [`Cell::Empty`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub const EMPTY: Self = Self { cells: Vec::new() };

    #[must_use]
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Number of materialized cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn cell(&self, col: usize) -> Cell {
        self.cells.get(col).copied().unwrap_or_default()
    }

    /// Iterates over the materialized cells.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// A row is completed when exactly `width` cells are materialized and all
    /// of them are occupied. A short row is never completed.
    #[must_use]
    pub fn is_completed(&self, width: usize) -> bool {
        self.cells.len() == width && self.cells.iter().all(|cell| cell.is_occupied())
    }

    fn set(&mut self, col: usize, cell: Cell) {
        if self.cells.len() <= col {
            self.cells.resize(col + 1, Cell::Empty);
        }
        self.cells[col] = cell;
    }
}

/// Grid of settled cells, `height` rows of at most `width` cells.
///
/// Row 0 is the top of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: BoardSize,
    rows: VecDeque<Row>,
}

impl Grid {
    #[must_use]
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            rows: (0..size.height()).map(|_| Row::EMPTY).collect(),
        }
    }

    /// Builds a grid from explicit rows, top first.
    ///
    /// # Panics
    ///
    /// Panics if the number of rows differs from the board height or a row is
    /// wider than the board.
    #[must_use]
    pub fn from_rows(size: BoardSize, rows: Vec<Row>) -> Self {
        assert_eq!(rows.len(), size.height(), "row count must match board height");
        assert!(
            rows.iter().all(|row| row.len() <= size.width()),
            "rows must not be wider than the board"
        );
        Self {
            size,
            rows: rows.into(),
        }
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    #[must_use]
    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// Returns the cell at signed coordinates, or `None` when off the grid.
    #[must_use]
    pub fn cell(&self, row: i32, col: i32) -> Option<Cell> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        if col >= self.size.width() {
            return None;
        }
        self.rows.get(row).map(|r| r.cell(col))
    }

    /// Iterates over the (row, col, cell) of every occupied cell.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.cells()
                .enumerate()
                .filter(|(_, cell)| cell.is_occupied())
                .map(move |(x, cell)| (y, x, cell))
        })
    }

    /// Writes a cell.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are off the grid.
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) {
        let (Ok(y), Ok(x)) = (usize::try_from(row), usize::try_from(col)) else {
            panic!("cell ({row}, {col}) is off the grid");
        };
        assert!(
            y < self.size.height() && x < self.size.width(),
            "cell ({row}, {col}) is off the grid"
        );
        self.rows[y].set(x, cell);
    }

    /// Removes every completed row and refills the grid from the top.
    ///
    /// Rows are scanned top to bottom. Each completed row is removed and an
    /// empty row is inserted at index 0, shifting the rows above it down by one.
    ///
    /// # Returns
    ///
    /// The number of rows cleared.
    pub fn clear_completed_lines(&mut self) -> usize {
        let width = self.size.width();
        let mut count = 0;
        for y in 0..self.rows.len() {
            if self.rows[y].is_completed(width) {
                self.rows.remove(y);
                self.rows.push_front(Row::EMPTY);
                count += 1;
            }
        }
        count
    }
}

/// Result of a gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum StepOutcome {
    /// The piece moved down one row.
    Moved,
    /// The piece could not move and was locked into the grid.
    Locked { lines_cleared: usize },
}

/// The settled grid plus the single falling piece.
///
/// All movement goes through [`Board::try_move`], which commits a transform
/// only when [`Board::would_collide`] reports it as legal.
///
/// # Example
///
/// ```
/// use bricks_engine::{Board, BoardSize, Catalog, Offset, Palette, Position, default_shapes};
///
/// let catalog = Catalog::new(&default_shapes()).unwrap();
/// let piece = catalog.instantiate(1, Position::ORIGIN, &Palette::default(), &mut rand::rng());
/// let mut board = Board::new(BoardSize::DEFAULT, piece);
///
/// assert!(board.try_move(Offset::LEFT));
/// assert!(!board.would_collide(board.current_piece(), Offset::DOWN));
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    current: Piece,
}

impl Board {
    /// Creates an empty board with `piece` placed at the top center.
    #[must_use]
    pub fn new(size: BoardSize, piece: Piece) -> Self {
        Self::with_grid(Grid::new(size), piece)
    }

    /// Creates a board over an existing grid with `piece` placed at the top center.
    #[must_use]
    pub fn with_grid(grid: Grid, mut piece: Piece) -> Self {
        piece.place_at_top(grid.size().width());
        Self {
            grid,
            current: piece,
        }
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.grid.size()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    /// Replaces the falling piece and places it at the top center.
    pub fn set_current_piece(&mut self, mut piece: Piece) {
        piece.place_at_top(self.grid.size().width());
        self.current = piece;
    }

    /// Tests whether `piece`, transformed by `offset`, would leave the board
    /// or overlap an occupied cell.
    ///
    /// Neither the board nor the piece is modified.
    #[must_use]
    pub fn would_collide(&self, piece: &Piece, offset: Offset) -> bool {
        piece.cells_with(offset).any(|(row, col)| {
            self.grid
                .cell(row, col)
                .is_none_or(|cell| cell.is_occupied())
        })
    }

    /// Moves the falling piece by `offset` if the result is collision-free.
    ///
    /// # Returns
    ///
    /// `true` if the piece was moved, `false` if it was left untouched.
    pub fn try_move(&mut self, offset: Offset) -> bool {
        if self.would_collide(&self.current, offset) {
            return false;
        }
        self.current.apply(offset);
        true
    }

    /// Writes the falling piece's cells into the grid.
    ///
    /// The piece must be at a collision-free placement.
    pub fn lock_piece(&mut self) {
        debug_assert!(
            !self.would_collide(&self.current, Offset::NONE),
            "locking a piece that overlaps the grid"
        );
        let cell = Cell::Occupied(self.current.color());
        for (row, col) in self.current.cells() {
            self.grid.set(row, col, cell);
        }
    }

    /// Removes completed rows. See [`Grid::clear_completed_lines`].
    pub fn clear_completed_lines(&mut self) -> usize {
        self.grid.clear_completed_lines()
    }

    /// Moves the falling piece down one row, or locks it when it cannot move.
    pub fn step_down(&mut self) -> StepOutcome {
        if self.try_move(Offset::DOWN) {
            return StepOutcome::Moved;
        }
        self.lock_piece();
        let lines_cleared = self.clear_completed_lines();
        log::debug!(
            "piece #{} locked at {:?}, {lines_cleared} line(s) cleared",
            self.current.template_index(),
            self.current.position()
        );
        StepOutcome::Locked { lines_cleared }
    }

    /// A board is lost when the falling piece has no legal placement where it
    /// stands.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.would_collide(&self.current, Offset::NONE)
    }

    /// Row index of the bottom edge of the falling piece.
    #[must_use]
    pub fn piece_bottom(&self) -> i32 {
        self.current.position().y() + geometry::coord(self.current.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{cell::Color, geometry::Position},
        test_util,
    };

    const X: Cell = Cell::Occupied(Color::CRIMSON);
    const E: Cell = Cell::Empty;

    fn full_row(width: usize) -> Row {
        Row::from_cells(vec![X; width])
    }

    fn tagged_row(width: usize, tag: usize) -> Row {
        let mut cells = vec![E; width];
        cells[tag % width] = X;
        Row::from_cells(cells)
    }

    #[test]
    fn test_row_lazy_growth() {
        let mut row = Row::EMPTY;
        assert_eq!(row.len(), 0);
        assert_eq!(row.cell(5), E);
        row.set(3, X);
        assert_eq!(row.len(), 4);
        assert_eq!(row.cell(2), E);
        assert_eq!(row.cell(3), X);
        assert_eq!(row.cell(9), E);
    }

    #[test]
    fn test_row_completion_requires_full_width() {
        let width = 10;
        assert!(full_row(width).is_completed(width));

        let short = Row::from_cells(vec![X; width - 1]);
        assert!(!short.is_completed(width));

        let mut holed = full_row(width);
        holed.set(4, E);
        assert!(!holed.is_completed(width));

        assert!(!Row::EMPTY.is_completed(width));
    }

    #[test]
    fn test_short_row_is_never_cleared() {
        let size = BoardSize::new(4, 3).unwrap();
        let rows = vec![
            Row::EMPTY,
            Row::from_cells(vec![X; 3]),
            Row::from_cells(vec![X, X, X, E]),
        ];
        let mut grid = Grid::from_rows(size, rows.clone());
        assert_eq!(grid.clear_completed_lines(), 0);
        assert_eq!(grid.rows().cloned().collect::<Vec<_>>(), rows);
    }

    #[test]
    fn test_clear_lines_shifts_rows_down() {
        let width = 5;
        let size = BoardSize::new(width, 7).unwrap();
        // rows 2, 4 and 5 are complete
        let rows = vec![
            tagged_row(width, 0),
            tagged_row(width, 1),
            full_row(width),
            tagged_row(width, 3),
            full_row(width),
            full_row(width),
            tagged_row(width, 6),
        ];
        let mut grid = Grid::from_rows(size, rows);
        assert_eq!(grid.clear_completed_lines(), 3);

        let expected = vec![
            Row::EMPTY,
            Row::EMPTY,
            Row::EMPTY,
            tagged_row(width, 0),
            tagged_row(width, 1),
            tagged_row(width, 3),
            tagged_row(width, 6),
        ];
        assert_eq!(grid.rows().cloned().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_clear_all_rows() {
        let size = BoardSize::new(3, 4).unwrap();
        let mut grid = Grid::from_rows(size, vec![full_row(3); 4]);
        assert_eq!(grid.clear_completed_lines(), 4);
        assert!(grid.rows().all(Row::is_empty));
        assert_eq!(grid.occupied_cells().count(), 0);
    }

    #[test]
    fn test_grid_cell_bounds() {
        let mut grid = Grid::new(BoardSize::DEFAULT);
        grid.set(19, 9, X);
        assert_eq!(grid.cell(19, 9), Some(X));
        assert_eq!(grid.cell(0, 0), Some(E));
        assert_eq!(grid.cell(-1, 0), None);
        assert_eq!(grid.cell(0, -1), None);
        assert_eq!(grid.cell(20, 0), None);
        assert_eq!(grid.cell(0, 10), None);
    }

    #[test]
    #[should_panic(expected = "off the grid")]
    fn test_grid_set_off_grid_panics() {
        let mut grid = Grid::new(BoardSize::DEFAULT);
        grid.set(0, 10, X);
    }

    #[test]
    fn test_new_board_centers_piece_on_top_row() {
        let board = Board::new(
            BoardSize::DEFAULT,
            test_util::piece(&["***", " * "], Position::new(8, 8)),
        );
        assert_eq!(board.current_piece().position(), Position::new(4, 0));
    }

    #[test]
    fn test_would_collide_walls_and_floor() {
        let board = Board::new(
            BoardSize::DEFAULT,
            test_util::piece(&["**", "**"], Position::ORIGIN),
        );
        let piece = board.current_piece();
        assert_eq!(piece.position(), Position::new(4, 0));

        assert!(!board.would_collide(piece, Offset::NONE));
        assert!(!board.would_collide(piece, Offset::new(-4, 0, 0)));
        assert!(board.would_collide(piece, Offset::new(-5, 0, 0)));
        assert!(!board.would_collide(piece, Offset::new(4, 0, 0)));
        assert!(board.would_collide(piece, Offset::new(5, 0, 0)));
        assert!(board.would_collide(piece, Offset::new(0, -1, 0)));
        assert!(!board.would_collide(piece, Offset::new(0, 18, 0)));
        assert!(board.would_collide(piece, Offset::new(0, 19, 0)));
    }

    #[test]
    fn test_would_collide_with_settled_cells() {
        let mut grid = Grid::new(BoardSize::DEFAULT);
        grid.set(2, 4, X);
        let board = Board::with_grid(grid, test_util::piece(&["**", "**"], Position::ORIGIN));
        let piece = board.current_piece();
        assert!(!board.would_collide(piece, Offset::NONE));
        assert!(board.would_collide(piece, Offset::DOWN));
        assert!(!board.would_collide(piece, Offset::new(-2, 1, 0)));
    }

    #[test]
    fn test_would_collide_with_rotation() {
        // Vertical bar against the left wall only turns in place.
        let mut board = Board::new(
            BoardSize::DEFAULT,
            test_util::piece(&["****"], Position::ORIGIN),
        );
        assert!(board.try_move(Offset::ROTATE));
        while board.try_move(Offset::LEFT) {}
        assert_eq!(board.current_piece().position().x(), 0);
        assert!(!board.would_collide(board.current_piece(), Offset::new(0, 0, 1)));
        assert!(board.would_collide(board.current_piece(), Offset::new(-1, 0, 1)));
    }

    #[test]
    fn test_would_collide_is_pure() {
        let board = Board::new(
            BoardSize::DEFAULT,
            test_util::piece(&["***", " * "], Position::ORIGIN),
        );
        let before = board.current_piece().clone();
        for offset in [
            Offset::NONE,
            Offset::new(-20, 0, 0),
            Offset::new(0, 40, 3),
            Offset::new(3, 3, -1),
        ] {
            let _ = board.would_collide(board.current_piece(), offset);
            assert_eq!(board.current_piece(), &before);
        }
    }

    #[test]
    fn test_try_move_commits_only_legal_moves() {
        let mut board = Board::new(
            BoardSize::DEFAULT,
            test_util::piece(&["**", "**"], Position::ORIGIN),
        );
        assert!(board.try_move(Offset::RIGHT));
        assert_eq!(board.current_piece().position(), Position::new(5, 0));
        assert!(!board.try_move(Offset::new(0, -1, 0)));
        assert_eq!(board.current_piece().position(), Position::new(5, 0));
        assert!(board.try_move(Offset::ROTATE));
        assert_eq!(board.current_piece().rotation().index(), 1);
    }

    #[test]
    fn test_bottom_row_piece_cannot_move_down() {
        let mut board = Board::new(
            BoardSize::DEFAULT,
            test_util::piece(&["****"], Position::ORIGIN),
        );
        while board.try_move(Offset::DOWN) {}
        assert_eq!(board.current_piece().position().y(), 19);
        assert_eq!(board.piece_bottom(), 20);
        assert!(!board.try_move(Offset::DOWN));

        let outcome = board.step_down();
        assert_eq!(outcome, StepOutcome::Locked { lines_cleared: 0 });
        let row = board.grid().row(19).unwrap();
        assert_eq!(row.cell(3), Cell::Occupied(board.current_piece().color()));
        assert_eq!(row.cell(6), Cell::Occupied(board.current_piece().color()));
        assert_eq!(row.cell(7), E);
    }

    #[test]
    fn test_step_down_moves_then_locks() {
        let size = BoardSize::new(4, 3).unwrap();
        let mut board = Board::new(size, test_util::piece(&["****"], Position::ORIGIN));
        assert_eq!(board.step_down(), StepOutcome::Moved);
        assert_eq!(board.step_down(), StepOutcome::Moved);
        assert_eq!(board.step_down(), StepOutcome::Locked { lines_cleared: 1 });
        assert_eq!(board.grid().occupied_cells().count(), 0);
    }

    #[test]
    fn test_lock_and_clear_keeps_remainder() {
        let size = BoardSize::new(4, 4).unwrap();
        let rows = vec![
            Row::EMPTY,
            Row::EMPTY,
            Row::from_cells(vec![X, E, E, E]),
            Row::from_cells(vec![X, E, X, X]),
        ];
        // Vertical bar dropped into column 1 completes the bottom row only.
        let mut piece = test_util::piece(&["***"], Position::ORIGIN);
        piece.rotate(1);
        let mut board = Board::with_grid(Grid::from_rows(size, rows), piece);
        assert_eq!(board.current_piece().position(), Position::new(2, 0));
        assert!(board.try_move(Offset::LEFT));
        assert!(board.try_move(Offset::DOWN));
        assert_eq!(board.step_down(), StepOutcome::Locked { lines_cleared: 1 });

        let color = board.current_piece().color();
        let cells: Vec<_> = board.grid().occupied_cells().map(|(y, x, _)| (y, x)).collect();
        assert_eq!(cells, [(2, 1), (3, 0), (3, 1)]);
        assert_eq!(board.grid().cell(3, 1), Some(Cell::Occupied(color)));
    }

    #[test]
    fn test_game_over_when_spawn_row_occupied() {
        let mut grid = Grid::new(BoardSize::DEFAULT);
        for col in 0..10 {
            grid.set(0, col, X);
        }
        let board = Board::with_grid(grid, test_util::piece(&["***", " * "], Position::ORIGIN));
        assert!(board.is_game_over());

        let board = Board::new(
            BoardSize::DEFAULT,
            test_util::piece(&["***", " * "], Position::ORIGIN),
        );
        assert!(!board.is_game_over());
    }
}
