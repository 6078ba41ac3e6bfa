//! Simulation core of the Bricks falling-block puzzle.
//!
//! The crate is split into two layers:
//!
//! - [`core`] - board, pieces and the shape catalog (pure data and rules)
//! - [`engine`] - scoring, gravity timer, piece queue and the game controller
//!
//! Rendering, score display and loss notification are external collaborators
//! reached through the traits in [`ui`]. Nothing in this crate performs I/O or
//! reads a clock: elapsed time is fed in by the caller.

pub use self::{config::*, core::*, engine::*, ui::*};

pub mod config;
pub mod core;
pub mod engine;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_util;

/// A logical cell coordinate outside the bounds of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell ({row}, {col}) is outside the {height}x{width} surface")]
pub struct SurfaceBoundsError {
    pub row: i32,
    pub col: i32,
    pub width: usize,
    pub height: usize,
}

/// An axis length outside the accepted `1..=1000` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("axis length {len} is outside 1..={}", crate::core::AXIS_LENGTH_MAX)]
pub struct AxisLengthError {
    pub len: usize,
}

/// A cleared line count that no single piece lock can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cannot score {count} cleared lines at once (expected 0..=4)")]
pub struct LineCountError {
    pub count: usize,
}

/// A palette with no colors in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("palette must contain at least one color")]
pub struct EmptyPaletteError;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeDefinitionError {
    #[display("shape has no rows")]
    NoRows,
    #[display("row {row} is empty")]
    EmptyRow { row: usize },
    #[display("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("shape has no filled cell")]
    NoFilledCell,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("no shape definitions given")]
    NoShapes,
    #[display("invalid shape definition #{index}: {source}")]
    InvalidShape {
        index: usize,
        source: ShapeDefinitionError,
    },
    #[display(
        "shape #{index} ({extent} across) does not fit on a {board_width}x{board_height} board"
    )]
    ShapeTooLarge {
        index: usize,
        extent: usize,
        board_width: usize,
        board_height: usize,
    },
    #[display(
        "shape #{index} ({extent} across) exceeds the {preview_size}x{preview_size} preview"
    )]
    ShapeExceedsPreview {
        index: usize,
        extent: usize,
        preview_size: usize,
    },
}
