use ndarray::Array3;

use super::canvas::Canvas;
use super::palette::to_rgb8;

/// 8-bit RGB image laid out `(height, width, 3)`.
pub type Raster = Array3<u8>;

const GLYPH_WIDTH: usize = 3;
const GLYPH_HEIGHT: usize = 5;
const GLYPH_ADVANCE: usize = GLYPH_WIDTH + 1;

const LABEL_SCALE: usize = 2;
const LABEL_PAD: usize = 4;
const AXIS_MARGIN: usize = GLYPH_HEIGHT * LABEL_SCALE + 2 * LABEL_PAD;

const LABEL_BG: [u8; 3] = [255, 255, 255];
const LABEL_FG: [u8; 3] = [0, 0, 0];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Rect {
    pub fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0)
    }
}

pub fn image_dims(image: &Raster) -> (usize, usize) {
    let shape = image.shape();
    (shape[1], shape[0])
}

pub fn blank(width: usize, height: usize, color: [u8; 3]) -> Raster {
    let mut image = Raster::zeros((height, width, 3));
    fill_rect(
        &mut image,
        Rect {
            x0: 0,
            y0: 0,
            x1: width,
            y1: height,
        },
        color,
    );
    image
}

/// Every canvas cell becomes a `cell_px` square block.
pub fn rasterize(canvas: &Canvas, cell_px: usize) -> Raster {
    let cell_px = cell_px.max(1);
    let shape = canvas.shape();
    let mut image = Raster::zeros((shape.rows * cell_px, shape.cols * cell_px, 3));
    for row in 0..shape.rows {
        for col in 0..shape.cols {
            let color = to_rgb8(canvas.pixel(row, col));
            let rect = Rect {
                x0: col * cell_px,
                y0: row * cell_px,
                x1: (col + 1) * cell_px,
                y1: (row + 1) * cell_px,
            };
            fill_rect(&mut image, rect, color);
        }
    }
    image
}

/// Pads `plot` with a label margin: `y_label` runs down the left edge and
/// `x_label` sits centered underneath.
pub fn with_axis_labels(plot: &Raster, x_label: &str, y_label: &str) -> Raster {
    let (plot_w, plot_h) = image_dims(plot);
    let x_text_w = text_width(x_label) * LABEL_SCALE;
    let y_text_h = text_width(y_label) * LABEL_SCALE;

    let width = AXIS_MARGIN + plot_w.max(x_text_w) + LABEL_PAD;
    let height = LABEL_PAD + plot_h.max(y_text_h) + AXIS_MARGIN;
    let mut image = blank(width, height, LABEL_BG);

    blit(&mut image, plot, AXIS_MARGIN, LABEL_PAD);
    draw_border(
        &mut image,
        Rect {
            x0: AXIS_MARGIN - 1,
            y0: LABEL_PAD - 1,
            x1: AXIS_MARGIN + plot_w + 1,
            y1: LABEL_PAD + plot_h + 1,
        },
        LABEL_FG,
    );

    let x_start = AXIS_MARGIN + plot_w.saturating_sub(x_text_w) / 2;
    draw_text_line(
        &mut image,
        x_start,
        LABEL_PAD + plot_h + LABEL_PAD,
        x_label,
        LABEL_FG,
        LABEL_SCALE,
    );
    let y_start = LABEL_PAD + plot_h.saturating_sub(y_text_h) / 2;
    draw_text_column(&mut image, LABEL_PAD, y_start, y_label, LABEL_FG, LABEL_SCALE);
    image
}

pub fn put_pixel(image: &mut Raster, x: usize, y: usize, color: [u8; 3]) {
    let (width, height) = image_dims(image);
    if x < width && y < height {
        image[[y, x, 0]] = color[0];
        image[[y, x, 1]] = color[1];
        image[[y, x, 2]] = color[2];
    }
}

pub fn fill_rect(image: &mut Raster, rect: Rect, color: [u8; 3]) {
    let (width, height) = image_dims(image);
    let x0 = rect.x0.min(width);
    let x1 = rect.x1.min(width);
    let y0 = rect.y0.min(height);
    let y1 = rect.y1.min(height);
    for y in y0..y1 {
        for x in x0..x1 {
            image[[y, x, 0]] = color[0];
            image[[y, x, 1]] = color[1];
            image[[y, x, 2]] = color[2];
        }
    }
}

fn draw_border(image: &mut Raster, rect: Rect, color: [u8; 3]) {
    if rect.width() == 0 || rect.height() == 0 {
        return;
    }
    let (width, height) = image_dims(image);
    let x0 = rect.x0.min(width.saturating_sub(1));
    let x1 = rect.x1.min(width).saturating_sub(1);
    let y0 = rect.y0.min(height.saturating_sub(1));
    let y1 = rect.y1.min(height).saturating_sub(1);

    for x in x0..=x1 {
        put_pixel(image, x, y0, color);
        put_pixel(image, x, y1, color);
    }
    for y in y0..=y1 {
        put_pixel(image, x0, y, color);
        put_pixel(image, x1, y, color);
    }
}

fn blit(image: &mut Raster, src: &Raster, x: usize, y: usize) {
    let (src_w, src_h) = image_dims(src);
    for sy in 0..src_h {
        for sx in 0..src_w {
            let color = [src[[sy, sx, 0]], src[[sy, sx, 1]], src[[sy, sx, 2]]];
            put_pixel(image, x + sx, y + sy, color);
        }
    }
}

const fn glyph_bits(ch: char) -> [u8; 5] {
    match ch {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b111, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b111],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b011],
        'R' => [0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b010, 0b000],
        '_' => [0b000, 0b000, 0b000, 0b000, 0b111],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b111, 0b101, 0b010, 0b010, 0b111],
    }
}

fn text_width(text: &str) -> usize {
    text.chars().count() * GLYPH_ADVANCE
}

fn draw_char(image: &mut Raster, x: usize, y: usize, ch: char, color: [u8; 3], scale: usize) {
    let glyph = glyph_bits(ch.to_ascii_uppercase());
    for (row, pattern) in glyph.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if (pattern >> (GLYPH_WIDTH - 1 - col)) & 1 == 1 {
                let rect = Rect {
                    x0: x + col * scale,
                    y0: y + row * scale,
                    x1: x + (col + 1) * scale,
                    y1: y + (row + 1) * scale,
                };
                fill_rect(image, rect, color);
            }
        }
    }
}

pub fn draw_text_line(
    image: &mut Raster,
    x: usize,
    y: usize,
    text: &str,
    color: [u8; 3],
    scale: usize,
) {
    let mut cursor = x;
    for ch in text.chars() {
        draw_char(image, cursor, y, ch, color, scale);
        cursor += GLYPH_ADVANCE * scale;
    }
}

/// Stacks characters top to bottom, for vertical axis titles.
pub fn draw_text_column(
    image: &mut Raster,
    x: usize,
    y: usize,
    text: &str,
    color: [u8; 3],
    scale: usize,
) {
    let mut cursor = y;
    for ch in text.chars() {
        draw_char(image, x, cursor, ch, color, scale);
        cursor += (GLYPH_HEIGHT + 1) * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::palette::{COLOR_BACKGROUND, COLOR_XANTHOPHORE};
    use crate::viz::placement::CanvasShape;

    #[test]
    fn rasterize_scales_cells_into_blocks() {
        let mut canvas = Canvas::filled(CanvasShape::new(2, 3), COLOR_BACKGROUND);
        canvas.set_pixel(1, 2, COLOR_XANTHOPHORE);
        let image = rasterize(&canvas, 4);
        assert_eq!(image_dims(&image), (12, 8));
        assert_eq!(image[[0, 0, 2]], 255);
        assert_eq!(
            [image[[7, 11, 0]], image[[7, 11, 1]], image[[7, 11, 2]]],
            [255, 255, 0]
        );
        assert_eq!(
            [image[[4, 8, 0]], image[[4, 8, 1]], image[[4, 8, 2]]],
            [255, 255, 0]
        );
        assert_eq!(image[[3, 8, 2]], 255);
    }

    #[test]
    fn zero_cell_size_is_clamped() {
        let canvas = Canvas::filled(CanvasShape::new(2, 2), COLOR_BACKGROUND);
        assert_eq!(image_dims(&rasterize(&canvas, 0)), (2, 2));
    }

    #[test]
    fn glyph_rows_fit_three_columns() {
        for ch in "SPACETIME0123456789".chars() {
            assert!(glyph_bits(ch).iter().all(|row| *row < 0b1000));
        }
    }

    #[test]
    fn axis_labels_grow_the_image_and_draw_ink() {
        let plot = blank(20, 10, [0, 0, 255]);
        let labelled = with_axis_labels(&plot, "Time", "Space");
        let (width, height) = image_dims(&labelled);
        assert!(width > 20);
        assert!(height > 10);
        // The plot keeps its pixels at the margin offset.
        assert_eq!(labelled[[LABEL_PAD, AXIS_MARGIN, 2]], 255);
        assert_eq!(labelled[[LABEL_PAD, AXIS_MARGIN, 0]], 0);

        let ink = labelled
            .as_slice()
            .unwrap()
            .chunks(3)
            .filter(|px| *px == LABEL_FG)
            .count();
        assert!(ink > 0);
    }
}
