use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use plotters::prelude::*;
use plotters_bitmap::BitMapBackendError;

use super::raster::{Raster, image_dims};

type PlotResult = Result<(), DrawingAreaErrorKind<BitMapBackendError>>;

/// Encodes `image` through the bitmap backend; the format follows the
/// extension of `path`.
pub fn write_png(path: &Path, image: &Raster) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create image directory {parent:?}"))?;
    }

    let (width, height) = image_dims(image);
    if width == 0 || height == 0 {
        return Err(anyhow!("refusing to write empty image {}", path.display()));
    }
    let dims = (
        u32::try_from(width).context("image too wide")?,
        u32::try_from(height).context("image too tall")?,
    );

    let area = BitMapBackend::new(path, dims).into_drawing_area();
    paint(&area, image)
        .and_then(|_| area.present())
        .map_err(|err| anyhow!("failed to write {}: {err:?}", path.display()))
}

fn paint(area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>, image: &Raster) -> PlotResult {
    let (width, height) = image_dims(image);
    for y in 0..height {
        for x in 0..width {
            let color = RGBColor(image[[y, x, 0]], image[[y, x, 1]], image[[y, x, 2]]);
            area.draw_pixel((x as i32, y as i32), &color)?;
        }
    }
    Ok(())
}
