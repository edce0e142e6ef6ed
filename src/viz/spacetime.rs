use ndarray::{Array2, ArrayD, Axis, Ix3};

use super::canvas::{Canvas, Strictness, compose_with};
use super::palette::{COLOR_BACKGROUND, SPACE_TIME_TABLE};
use super::placement::Placement;
use crate::error::{RenderError, RenderResult};
use crate::frames::{Code, LabelArray, RESERVED_FILL};

/// Which cross-section of a `(rows, cols, time)` stack becomes the diagram.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SliceAxis {
    #[default]
    MiddleRow,
    Row(usize),
    Column(usize),
}

/// One cross-section per frame, one column per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SpaceTime {
    matrix: Array2<Code>,
}

impl SpaceTime {
    pub fn new(rows: usize, frames: usize) -> Self {
        Self {
            matrix: Array2::from_elem((rows, frames), RESERVED_FILL),
        }
    }

    pub fn from_stack(stack: &ArrayD<Code>, axis: SliceAxis) -> RenderResult<Self> {
        let stack = stack
            .view()
            .into_dimensionality::<Ix3>()
            .map_err(|_| RenderError::Dimension(stack.ndim()))?;
        let (rows, cols, _) = stack.dim();

        let (axis, index, len) = match axis {
            SliceAxis::MiddleRow => (Axis(0), rows.div_ceil(2), rows),
            SliceAxis::Row(row) => (Axis(0), row, rows),
            SliceAxis::Column(col) => (Axis(1), col, cols),
        };
        if index >= len {
            let (rows, cols) = if axis == Axis(0) {
                (index + 1, cols)
            } else {
                (rows, index + 1)
            };
            return Err(RenderError::Size {
                canvas_rows: stack.dim().0,
                canvas_cols: stack.dim().1,
                rows,
                cols,
            });
        }

        Ok(Self {
            matrix: stack.index_axis(axis, index).to_owned(),
        })
    }

    pub fn rows(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn frames(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn matrix(&self) -> &Array2<Code> {
        &self.matrix
    }

    /// Stores `slice` as frame `column`, padded with [`RESERVED_FILL`] or cut
    /// to the matrix height.
    pub fn accumulate(
        &mut self,
        column: usize,
        slice: &[Code],
        strictness: Strictness,
    ) -> RenderResult<()> {
        if column >= self.frames() {
            return Err(RenderError::ColumnOutOfRange {
                column,
                columns: self.frames(),
            });
        }
        if strictness == Strictness::Strict && slice.len() > self.rows() {
            return Err(RenderError::SliceOverflow {
                len: slice.len(),
                rows: self.rows(),
            });
        }

        let filled = fill_slice(slice, self.rows());
        for (cell, value) in self.matrix.column_mut(column).iter_mut().zip(filled) {
            *cell = value;
        }
        Ok(())
    }

    pub fn to_canvas(&self) -> Canvas {
        let shape = (self.rows(), self.frames()).into();
        let labels = LabelArray::Grid(self.matrix.clone());
        match compose_with(
            &labels,
            shape,
            Placement::Raw,
            &SPACE_TIME_TABLE,
            Strictness::Permissive,
        ) {
            Ok(canvas) => canvas,
            // Only an empty matrix fails the size check.
            Err(_) => Canvas::filled(shape, COLOR_BACKGROUND),
        }
    }
}

pub fn fill_slice(slice: &[Code], rows: usize) -> Vec<Code> {
    let mut out = vec![RESERVED_FILL; rows];
    let kept = slice.len().min(rows);
    out[..kept].copy_from_slice(&slice[..kept]);
    out
}
