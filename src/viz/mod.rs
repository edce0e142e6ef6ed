pub mod animation;
pub mod canvas;
pub mod output;
pub mod palette;
pub mod placement;
pub mod raster;
pub mod spacetime;

pub use animation::{AnimationConfig, assemble_gif, collect_frames};
pub use canvas::{Canvas, Compositor, Strictness, colorize, compose};
pub use output::write_png;
pub use palette::{ColorTable, FRAME_TABLE, Rgb, SPACE_TIME_TABLE};
pub use placement::{CanvasShape, Offset, Placement};
pub use raster::{Raster, rasterize, with_axis_labels};
pub use spacetime::{SliceAxis, SpaceTime, fill_slice};
