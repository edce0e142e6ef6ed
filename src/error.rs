use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::frames::Code;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid input: {0}")]
    InputType(String),

    #[error("no such file or directory: {}", .0.display())]
    NotFound(PathBuf),

    #[error(
        "final dimension too small: canvas {canvas_rows}x{canvas_cols} cannot hold {rows}x{cols}"
    )]
    Size {
        canvas_rows: usize,
        canvas_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("unsupported array rank {0}")]
    Dimension(usize),

    #[error("unrecognized label code {code} at ({row}, {col})")]
    UnknownCode { code: Code, row: usize, col: usize },

    #[error("slice of length {len} does not fit {rows} space-time rows")]
    SliceOverflow { len: usize, rows: usize },

    #[error("column {column} is outside a space-time matrix of {columns} frames")]
    ColumnOutOfRange { column: usize, columns: usize },

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("i/o error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;
