use ndarray::{Array3, ArrayView3, s};
use serde::{Deserialize, Serialize};

use super::palette::{COLOR_BACKGROUND, ColorTable, FRAME_TABLE, Rgb};
use super::placement::{CanvasShape, Placement};
use crate::error::{RenderError, RenderResult};
use crate::frames::LabelArray;

/// How unrecognized codes and oversized space-time slices are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Unknown codes stay background, long slices are truncated.
    #[default]
    Permissive,
    Strict,
}

/// RGB image of shape `(rows, cols, 3)` with channels in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    pixels: Array3<f32>,
}

impl Canvas {
    pub fn filled(shape: CanvasShape, color: Rgb) -> Self {
        let mut pixels = Array3::<f32>::zeros((shape.rows, shape.cols, 3));
        for (channel, value) in color.into_iter().enumerate() {
            pixels.slice_mut(s![.., .., channel]).fill(value);
        }
        Self { pixels }
    }

    pub fn shape(&self) -> CanvasShape {
        let dims = self.pixels.dim();
        CanvasShape::new(dims.0, dims.1)
    }

    pub fn pixel(&self, row: usize, col: usize) -> Rgb {
        [
            self.pixels[[row, col, 0]],
            self.pixels[[row, col, 1]],
            self.pixels[[row, col, 2]],
        ]
    }

    pub fn set_pixel(&mut self, row: usize, col: usize, color: Rgb) {
        for (channel, value) in color.into_iter().enumerate() {
            self.pixels[[row, col, channel]] = value;
        }
    }

    pub fn view(&self) -> ArrayView3<'_, f32> {
        self.pixels.view()
    }

    pub fn into_array(self) -> Array3<f32> {
        self.pixels
    }

    pub fn count(&self, color: Rgb) -> usize {
        let shape = self.shape();
        (0..shape.rows)
            .flat_map(|row| (0..shape.cols).map(move |col| (row, col)))
            .filter(|&(row, col)| self.pixel(row, col) == color)
            .count()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Compositor {
    pub placement: Placement,
    pub strictness: Strictness,
}

impl Compositor {
    pub fn new(placement: Placement, strictness: Strictness) -> Self {
        Self {
            placement,
            strictness,
        }
    }

    pub fn compose(&self, labels: &LabelArray, shape: CanvasShape) -> RenderResult<Canvas> {
        compose_with(labels, shape, self.placement, &FRAME_TABLE, self.strictness)
    }
}

/// Permissive composition under `placement`.
pub fn compose(
    labels: &LabelArray,
    shape: CanvasShape,
    placement: Placement,
) -> RenderResult<Canvas> {
    Compositor::new(placement, Strictness::Permissive).compose(labels, shape)
}

/// Colors a label array onto a canvas of exactly its own footprint.
pub fn colorize(labels: &LabelArray) -> RenderResult<Canvas> {
    compose(labels, labels.footprint().into(), Placement::Raw)
}

pub(crate) fn compose_with(
    labels: &LabelArray,
    shape: CanvasShape,
    placement: Placement,
    table: &ColorTable,
    strictness: Strictness,
) -> RenderResult<Canvas> {
    let footprint = labels.footprint();
    if !shape.holds(footprint) {
        return Err(RenderError::Size {
            canvas_rows: shape.rows,
            canvas_cols: shape.cols,
            rows: footprint.0,
            cols: footprint.1,
        });
    }

    let offset = placement.offset(shape, footprint);
    let mut canvas = Canvas::filled(shape, COLOR_BACKGROUND);
    for ((row, col), code) in labels.cells() {
        let (row, col) = (offset.row + row, offset.col + col);
        match table.lookup(code) {
            Some(color) => canvas.set_pixel(row, col, color),
            None if strictness == Strictness::Strict => {
                return Err(RenderError::UnknownCode { code, row, col });
            }
            None => {}
        }
    }
    Ok(canvas)
}
