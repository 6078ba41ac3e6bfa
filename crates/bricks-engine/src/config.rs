//! Game configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration:
//!
//! ```
//! use bricks_engine::GameConfig;
//!
//! let config: GameConfig = serde_json::from_str("{}").unwrap();
//! assert_eq!(config, GameConfig::default());
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    AxisLengthError, ConfigError,
    core::{
        AXIS_LENGTH_MAX, Catalog, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, PREVIEW_SIZE,
        Palette, ShapeDefinition, default_shapes,
    },
};

/// Dimensions of the board in cells.
///
/// Both axes are within `1..=1000`; the invariant is enforced on construction
/// and on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardSizeRepr", into = "BoardSizeRepr")]
pub struct BoardSize {
    width: usize,
    height: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BoardSizeRepr {
    width: usize,
    height: usize,
}

impl TryFrom<BoardSizeRepr> for BoardSize {
    type Error = AxisLengthError;

    fn try_from(repr: BoardSizeRepr) -> Result<Self, Self::Error> {
        Self::new(repr.width, repr.height)
    }
}

impl From<BoardSize> for BoardSizeRepr {
    fn from(size: BoardSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BoardSize {
    pub const DEFAULT: Self = Self {
        width: DEFAULT_BOARD_WIDTH,
        height: DEFAULT_BOARD_HEIGHT,
    };

    pub fn new(width: usize, height: usize) -> Result<Self, AxisLengthError> {
        for len in [width, height] {
            if !(1..=AXIS_LENGTH_MAX).contains(&len) {
                return Err(AxisLengthError { len });
            }
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(self) -> usize {
        self.height
    }
}

/// Settings a [`GameController`](crate::GameController) is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: BoardSize,
    pub shapes: Vec<ShapeDefinition>,
    pub palette: Palette,
    /// Start a new game right after a loss has been reported.
    pub auto_restart: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardSize::DEFAULT,
            shapes: default_shapes(),
            palette: Palette::default(),
            auto_restart: true,
        }
    }
}

impl GameConfig {
    /// Checks the configuration and builds the shape catalog from it.
    ///
    /// Every shape must fit on the board in all rotations, so that a freshly
    /// spawned piece on an empty board always has a legal placement. It must
    /// also fit in the [`PREVIEW_SIZE`]×[`PREVIEW_SIZE`] next-piece preview.
    pub fn build_catalog(&self) -> Result<Catalog, ConfigError> {
        let catalog = Catalog::new(&self.shapes)?;
        let limit = usize::min(self.board.width(), self.board.height());
        for (index, template) in catalog.templates().enumerate() {
            let extent = template.max_extent();
            if extent > limit {
                return Err(ConfigError::ShapeTooLarge {
                    index,
                    extent,
                    board_width: self.board.width(),
                    board_height: self.board.height(),
                });
            }
            if extent > PREVIEW_SIZE {
                return Err(ConfigError::ShapeExceedsPreview {
                    index,
                    extent,
                    preview_size: PREVIEW_SIZE,
                });
            }
        }
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_catalog().map(|_| ())
    }
}
