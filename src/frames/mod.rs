mod discovery;
mod parse;

use ndarray::{Array1, Array2, ArrayD, Ix1, Ix2};

use crate::error::{RenderError, RenderResult};

pub use discovery::{FramePattern, discover_frames, discover_simulations};
pub use parse::{parse_labels, read_labels};

/// Integer cell-type code stored in a simulation snapshot.
pub type Code = i32;

pub const CODE_EMPTY: Code = 0;
pub const CODE_XANTHOPHORE: Code = 1;
pub const CODE_MELANOPHORE: Code = 2;

/// Sentinel for space-time entries that hold no category.
pub const RESERVED_FILL: Code = 10;

/// Code given to fields that do not hold an integral number.
pub const UNREADABLE_CODE: Code = -1;

/// One simulation snapshot, as loaded from disk.
///
/// Snapshots degrade in rank the same way a text loader squeezes them: a
/// single value is a scalar, a single row or column is a line, anything else
/// is a grid. A line is laid out as a column vector when placed on a canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum LabelArray {
    Scalar(Code),
    Line(Array1<Code>),
    Grid(Array2<Code>),
}

impl LabelArray {
    pub fn from_rows(rows: Vec<Vec<Code>>) -> RenderResult<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(RenderError::InputType("snapshot holds no values".into()));
        }
        if let Some(bad) = rows.iter().position(|row| row.len() != width) {
            return Err(RenderError::InputType(format!(
                "row {bad} has {} values, expected {width}",
                rows[bad].len()
            )));
        }

        let labels = match (height, width) {
            (1, 1) => Self::Scalar(rows[0][0]),
            (1, _) => Self::Line(Array1::from_vec(rows.into_iter().flatten().collect())),
            (_, 1) => Self::Line(Array1::from_vec(rows.into_iter().flatten().collect())),
            _ => {
                let flat: Vec<Code> = rows.into_iter().flatten().collect();
                let grid = Array2::from_shape_vec((height, width), flat)
                    .map_err(|err| RenderError::InputType(err.to_string()))?;
                Self::Grid(grid)
            }
        };
        Ok(labels)
    }

    pub fn rank(&self) -> usize {
        match self {
            Self::Scalar(_) => 0,
            Self::Line(_) => 1,
            Self::Grid(_) => 2,
        }
    }

    /// `(rows, cols)` covered on a canvas.
    pub fn footprint(&self) -> (usize, usize) {
        match self {
            Self::Scalar(_) => (1, 1),
            Self::Line(line) => (line.len(), 1),
            Self::Grid(grid) => grid.dim(),
        }
    }

    /// Number of columns the snapshot has in its own layout.
    ///
    /// A line read from a single text row counts its values here; this is
    /// what sizes the space-time matrix.
    pub fn width(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Line(line) => line.len(),
            Self::Grid(grid) => grid.ncols(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Self::Scalar(_) | Self::Line(_) => 1,
            Self::Grid(grid) => grid.nrows(),
        }
    }

    pub fn cells(&self) -> Cells<'_> {
        let (rows, cols) = self.footprint();
        Cells {
            labels: self,
            cols,
            next: 0,
            len: rows * cols,
        }
    }

    fn code_at(&self, row: usize, col: usize) -> Code {
        match self {
            Self::Scalar(code) => *code,
            Self::Line(line) => line[row],
            Self::Grid(grid) => grid[[row, col]],
        }
    }

    /// Cross-section used as one space-time column.
    pub fn cross_section(&self, row: usize) -> Vec<Code> {
        match self {
            Self::Grid(grid) if row < grid.nrows() => grid.row(row).to_vec(),
            Self::Line(line) => vec![line.get(row).copied().unwrap_or(RESERVED_FILL)],
            _ => vec![RESERVED_FILL],
        }
    }
}

impl TryFrom<ArrayD<Code>> for LabelArray {
    type Error = RenderError;

    fn try_from(array: ArrayD<Code>) -> RenderResult<Self> {
        let rank = array.ndim();
        match rank {
            0 => array
                .first()
                .copied()
                .map(Self::Scalar)
                .ok_or(RenderError::Dimension(rank)),
            1 => array
                .into_dimensionality::<Ix1>()
                .map(Self::Line)
                .map_err(|_| RenderError::Dimension(rank)),
            2 => array
                .into_dimensionality::<Ix2>()
                .map(Self::Grid)
                .map_err(|_| RenderError::Dimension(rank)),
            _ => Err(RenderError::Dimension(rank)),
        }
    }
}

/// Row-major `((row, col), code)` walk over a [`LabelArray`] footprint.
pub struct Cells<'a> {
    labels: &'a LabelArray,
    cols: usize,
    next: usize,
    len: usize,
}

impl Iterator for Cells<'_> {
    type Item = ((usize, usize), Code);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let (row, col) = (self.next / self.cols, self.next % self.cols);
        self.next += 1;
        Some(((row, col), self.labels.code_at(row, col)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cells<'_> {}
