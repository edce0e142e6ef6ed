pub mod config;
pub mod error;
pub mod frames;
pub mod pipeline;
pub mod viz;

pub use config::{RenderConfig, load_render_config};
pub use error::{RenderError, RenderResult};
pub use frames::{Code, FramePattern, LabelArray, RESERVED_FILL, read_labels};
pub use pipeline::{
    Geometry, ReanimateSummary, RunSummary, SimulationStatus, SimulationSummary, reanimate_run,
    render_run, render_simulation,
};
pub use viz::{
    Canvas, CanvasShape, Compositor, Placement, SliceAxis, SpaceTime, Strictness, colorize,
    compose,
};
