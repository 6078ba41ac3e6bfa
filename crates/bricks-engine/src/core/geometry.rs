use serde::{Deserialize, Serialize};

/// Position of a piece on the board, in logical cells.
///
/// The position is the top-left cell of the piece's current shape matrix.
/// Coordinates are signed: a candidate position may lie partly outside the
/// board while it is being tested for collisions.
///
/// - X increases rightward (columns)
/// - Y increases downward (rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub(crate) fn set_x(&mut self, x: i32) {
        self.x = x;
    }

    pub(crate) fn set_y(&mut self, y: i32) {
        self.y = y;
    }
}

/// A candidate transform of a piece: translation plus rotation steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
    /// Number of clockwise quarter turns (negative for counterclockwise).
    pub dr: i32,
}

impl Offset {
    pub const NONE: Self = Self::new(0, 0, 0);
    pub const LEFT: Self = Self::new(-1, 0, 0);
    pub const RIGHT: Self = Self::new(1, 0, 0);
    pub const DOWN: Self = Self::new(0, 1, 0);
    pub const ROTATE: Self = Self::new(0, 0, 1);

    #[must_use]
    pub const fn new(dx: i32, dy: i32, dr: i32) -> Self {
        Self { dx, dy, dr }
    }
}

/// Converts a matrix or board extent into a signed coordinate.
///
/// Extents are bounded by [`AXIS_LENGTH_MAX`](super::AXIS_LENGTH_MAX), so the
/// conversion never truncates.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) const fn coord(extent: usize) -> i32 {
    extent as i32
}

/// Coordinate that centers an item of `extent` cells on an axis of `axis_len` cells.
pub(crate) const fn centered(axis_len: usize, extent: usize) -> i32 {
    coord(axis_len / 2) - coord(extent / 2)
}
