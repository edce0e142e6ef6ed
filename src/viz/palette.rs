use crate::frames::{CODE_EMPTY, CODE_MELANOPHORE, CODE_XANTHOPHORE, Code, RESERVED_FILL};

pub type Rgb = [f32; 3];

pub const COLOR_EMPTY: Rgb = [1.0, 1.0, 1.0];
pub const COLOR_XANTHOPHORE: Rgb = [1.0, 1.0, 0.0];
pub const COLOR_MELANOPHORE: Rgb = [0.0, 0.0, 0.0];

/// Outside the placed region.
pub const COLOR_BACKGROUND: Rgb = [0.0, 0.0, 1.0];
pub const COLOR_RESERVED: Rgb = [1.0, 0.0, 1.0];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorTable {
    entries: &'static [(Code, Rgb)],
}

pub const FRAME_TABLE: ColorTable = ColorTable {
    entries: &[
        (CODE_EMPTY, COLOR_EMPTY),
        (CODE_XANTHOPHORE, COLOR_XANTHOPHORE),
        (CODE_MELANOPHORE, COLOR_MELANOPHORE),
    ],
};

pub const SPACE_TIME_TABLE: ColorTable = ColorTable {
    entries: &[
        (CODE_EMPTY, COLOR_EMPTY),
        (CODE_XANTHOPHORE, COLOR_XANTHOPHORE),
        (CODE_MELANOPHORE, COLOR_MELANOPHORE),
        (RESERVED_FILL, COLOR_RESERVED),
    ],
};

impl ColorTable {
    pub fn lookup(&self, code: Code) -> Option<Rgb> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == code)
            .map(|(_, rgb)| *rgb)
    }
}

pub fn to_rgb8(rgb: Rgb) -> [u8; 3] {
    rgb.map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8)
}
