use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasShape {
    pub rows: usize,
    pub cols: usize,
}

impl CanvasShape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn holds(&self, (rows, cols): (usize, usize)) -> bool {
        self.rows > 0 && self.cols > 0 && rows <= self.rows && cols <= self.cols
    }
}

impl From<(usize, usize)> for CanvasShape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self { rows, cols }
    }
}

/// Canvas position of the label array's `(0, 0)` cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Offset {
    pub row: usize,
    pub col: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Top-left anchored.
    #[default]
    Raw,
    Centered,
    /// Rows centered, flush to the right edge.
    GrowLeft,
    /// Rows centered, flush to the left edge.
    GrowRight,
}

impl Placement {
    /// Callers check `canvas.holds(footprint)` first; the arithmetic assumes it.
    pub fn offset(self, canvas: CanvasShape, (rows, cols): (usize, usize)) -> Offset {
        match self {
            Placement::Raw => Offset::default(),
            Placement::Centered => Offset {
                row: center_shift(canvas.rows, rows),
                col: center_shift(canvas.cols, cols),
            },
            Placement::GrowLeft => Offset {
                row: center_shift(canvas.rows, rows),
                col: canvas.cols - cols,
            },
            Placement::GrowRight => Offset {
                row: center_shift(canvas.rows, rows),
                col: 0,
            },
        }
    }
}

fn center_shift(canvas: usize, extent: usize) -> usize {
    (canvas - 1) / 2 - (extent.max(1) - 1) / 2
}
