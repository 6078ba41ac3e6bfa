use std::sync::Arc;

use crate::{
    AxisLengthError,
    core::{
        AXIS_LENGTH_MAX,
        cell::Color,
        geometry::{self, Offset, Position},
        template::{ShapeMatrix, ShapeTemplate},
    },
};

/// Rotation state of a piece.
///
/// Represents one of four rotation states:
///
/// - `0`: 0° (as defined)
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise (90° counterclockwise)
///
/// Rotation arithmetic wraps around modulo 4 in both directions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rotation(u8);

impl Rotation {
    /// Number of rotation states.
    pub const COUNT: usize = 4;

    /// Builds a rotation from a raw index, wrapping it into `0..4`.
    ///
    /// Out-of-range values are accepted and normalized (`-1` becomes `3`,
    /// `4` becomes `0`).
    ///
    /// # Examples
    ///
    /// ```
    /// use bricks_engine::Rotation;
    ///
    /// assert_eq!(Rotation::from_index(-1).index(), 3);
    /// assert_eq!(Rotation::from_index(4).index(), 0);
    /// ```
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_index(raw: i32) -> Self {
        let wrapped = raw.rem_euclid(4);
        if wrapped != raw {
            log::trace!("rotation {raw} normalized to {wrapped}");
        }
        Self(wrapped as u8)
    }

    #[must_use]
    pub fn offset(self, dr: i32) -> Self {
        Self::from_index(i32::from(self.0) + dr.rem_euclid(4))
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A falling piece: a template in a given rotation, at a position, with a color.
///
/// Movement and rotation are plain mutations with no knowledge of the board;
/// checking that a transform is legal is the [`Board`](super::board::Board)'s job.
///
/// # Example
///
/// ```
/// use bricks_engine::{Catalog, Palette, Position, default_shapes};
///
/// let catalog = Catalog::new(&default_shapes()).unwrap();
/// let palette = Palette::default();
/// let mut piece = catalog.instantiate(0, Position::new(3, 0), &palette, &mut rand::rng());
/// piece.translate(1, 2);
/// piece.rotate(1);
/// assert_eq!(piece.position(), Position::new(4, 2));
/// assert_eq!((piece.width(), piece.height()), (1, 4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    template: Arc<ShapeTemplate>,
    template_index: usize,
    rotation: Rotation,
    position: Position,
    color: Color,
}

impl Piece {
    #[must_use]
    pub fn new(
        template: Arc<ShapeTemplate>,
        template_index: usize,
        position: Position,
        color: Color,
    ) -> Self {
        Self {
            template,
            template_index,
            rotation: Rotation::default(),
            position,
            color,
        }
    }

    #[must_use]
    pub fn template_index(&self) -> usize {
        self.template_index
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Shape matrix of the current rotation.
    #[must_use]
    pub fn matrix(&self) -> &ShapeMatrix {
        self.template.matrix(self.rotation)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.matrix().width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.matrix().height()
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.position = self.position.translated(dx, dy);
    }

    pub fn rotate(&mut self, dr: i32) {
        self.rotation = self.rotation.offset(dr);
    }

    /// Applies a full offset (translation and rotation).
    pub fn apply(&mut self, offset: Offset) {
        self.translate(offset.dx, offset.dy);
        self.rotate(offset.dr);
    }

    /// Iterates over the absolute (row, col) of every filled cell of the
    /// piece as it would be after applying `offset`.
    ///
    /// The piece itself is left untouched.
    pub fn cells_with(&self, offset: Offset) -> impl Iterator<Item = (i32, i32)> + '_ {
        let origin = self.position.translated(offset.dx, offset.dy);
        self.template
            .matrix(self.rotation.offset(offset.dr))
            .filled_cells()
            .map(move |(row, col)| {
                (
                    origin.y() + geometry::coord(row),
                    origin.x() + geometry::coord(col),
                )
            })
    }

    /// Iterates over the absolute (row, col) of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells_with(Offset::NONE)
    }

    /// Centers the piece horizontally on an axis of `axis_len` cells.
    pub fn center_axis_x(&mut self, axis_len: usize) -> Result<(), AxisLengthError> {
        check_axis_len(axis_len)?;
        self.position.set_x(geometry::centered(axis_len, self.width()));
        Ok(())
    }

    /// Centers the piece vertically on an axis of `axis_len` cells.
    pub fn center_axis_y(&mut self, axis_len: usize) -> Result<(), AxisLengthError> {
        check_axis_len(axis_len)?;
        self.position.set_y(geometry::centered(axis_len, self.height()));
        Ok(())
    }

    /// Places the piece centered horizontally on the top row of a board.
    ///
    /// `board_width` comes from a validated [`BoardSize`](crate::BoardSize).
    pub(crate) fn place_at_top(&mut self, board_width: usize) {
        debug_assert!(check_axis_len(board_width).is_ok());
        self.position = Position::new(geometry::centered(board_width, self.width()), 0);
    }
}

fn check_axis_len(len: usize) -> Result<(), AxisLengthError> {
    if (1..=AXIS_LENGTH_MAX).contains(&len) {
        Ok(())
    } else {
        Err(AxisLengthError { len })
    }
}
