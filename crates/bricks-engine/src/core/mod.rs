pub use self::{board::*, catalog::*, cell::*, geometry::*, piece::*, template::*};

pub(crate) mod board;
pub(crate) mod catalog;
pub(crate) mod cell;
pub(crate) mod geometry;
pub(crate) mod piece;
pub(crate) mod template;

/// Default board width in cells.
pub const DEFAULT_BOARD_WIDTH: usize = 10;
/// Default board height in cells.
pub const DEFAULT_BOARD_HEIGHT: usize = 20;
/// Side length of the square area the queued piece is previewed in.
pub const PREVIEW_SIZE: usize = 4;
/// Largest axis length a piece can be centered on.
pub const AXIS_LENGTH_MAX: usize = 1000;
