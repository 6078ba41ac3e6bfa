use serde::{Deserialize, Serialize};

use crate::{ShapeDefinitionError, core::piece::Rotation};

/// Character marking a filled cell in a shape definition.
pub const FILLED_MARKER: char = '*';

/// Textual definition of a shape, one string per row.
///
/// `*` marks a filled cell, any other character an empty one. All rows must
/// have the same number of characters.
///
/// # Example
///
/// ```
/// use bricks_engine::ShapeDefinition;
///
/// let t = ShapeDefinition::new(["***", " * "]);
/// let matrix = t.parse().unwrap();
/// assert_eq!((matrix.width(), matrix.height()), (3, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeDefinition {
    rows: Vec<String>,
}

impl ShapeDefinition {
    pub fn new<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Parses the definition into its base (unrotated) matrix.
    pub fn parse(&self) -> Result<ShapeMatrix, ShapeDefinitionError> {
        let first = self.rows.first().ok_or(ShapeDefinitionError::NoRows)?;
        let width = first.chars().count();
        if width == 0 {
            return Err(ShapeDefinitionError::EmptyRow { row: 0 });
        }

        let mut cells = Vec::with_capacity(width * self.rows.len());
        for (row, line) in self.rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual == 0 {
                return Err(ShapeDefinitionError::EmptyRow { row });
            }
            if actual != width {
                return Err(ShapeDefinitionError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
            cells.extend(line.chars().map(|c| c == FILLED_MARKER));
        }
        if !cells.contains(&true) {
            return Err(ShapeDefinitionError::NoFilledCell);
        }

        Ok(ShapeMatrix {
            width,
            height: self.rows.len(),
            cells,
        })
    }
}

/// The seven classic tetrominoes.
#[must_use]
pub fn default_shapes() -> Vec<ShapeDefinition> {
    vec![
        ShapeDefinition::new(["****"]),
        ShapeDefinition::new(["**", "**"]),
        ShapeDefinition::new(["***", " * "]),
        ShapeDefinition::new([" **", "** "]),
        ShapeDefinition::new(["** ", " **"]),
        ShapeDefinition::new(["*  ", "***"]),
        ShapeDefinition::new(["  *", "***"]),
    ]
}

/// Rectangular matrix of filled/empty cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMatrix {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl ShapeMatrix {
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns whether the cell at (`row`, `col`) is filled.
    ///
    /// Cells outside the matrix are empty.
    #[must_use]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    /// Iterates over the (row, col) of every filled cell in row-major order.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(|(i, _)| (i / self.width, i % self.width))
    }

    /// Rotates the matrix 90° clockwise.
    ///
    /// An `H×W` matrix becomes `W×H`, with `out[x][H-1-y] = in[y][x]`.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let (in_w, in_h) = (self.width, self.height);
        let mut cells = vec![false; in_w * in_h];
        for y in 0..in_h {
            for x in 0..in_w {
                let out_row = x;
                let out_col = in_h - 1 - y;
                cells[out_row * in_h + out_col] = self.cells[y * in_w + x];
            }
        }
        Self {
            width: in_h,
            height: in_w,
            cells,
        }
    }
}

/// Immutable four-rotation definition a piece is instantiated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeTemplate {
    rotations: [ShapeMatrix; Rotation::COUNT],
}

impl ShapeTemplate {
    /// Derives rotations 1 to 3 from `base` by repeated clockwise rotation.
    #[must_use]
    pub fn new(base: ShapeMatrix) -> Self {
        let r1 = base.rotated_clockwise();
        let r2 = r1.rotated_clockwise();
        let r3 = r2.rotated_clockwise();
        Self {
            rotations: [base, r1, r2, r3],
        }
    }

    #[must_use]
    pub fn matrix(&self, rotation: Rotation) -> &ShapeMatrix {
        &self.rotations[rotation.index()]
    }

    /// Largest width or height over all rotations.
    #[must_use]
    pub fn max_extent(&self) -> usize {
        let base = &self.rotations[0];
        usize::max(base.width(), base.height())
    }
}
