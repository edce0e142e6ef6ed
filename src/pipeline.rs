use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::RenderConfig;
use crate::frames::{LabelArray, discover_frames, discover_simulations, read_labels};
use crate::viz::{
    AnimationConfig, CanvasShape, Compositor, SpaceTime, assemble_gif, collect_frames, rasterize,
    with_axis_labels, write_png,
};

const TIME_LABEL: &str = "Time";
const SPACE_LABEL: &str = "Space";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationStatus {
    Rendered,
    /// The image directory already existed and overwriting is off.
    AlreadyRendered,
    NoFrames,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationSummary {
    pub simulation: PathBuf,
    pub status: SimulationStatus,
    pub frames_rendered: usize,
    pub frames_skipped: usize,
    pub space_time: Option<PathBuf>,
    pub animation: Option<PathBuf>,
}

impl SimulationSummary {
    fn empty(simulation: &Path, status: SimulationStatus) -> Self {
        Self {
            simulation: simulation.to_path_buf(),
            status,
            frames_rendered: 0,
            frames_skipped: 0,
            space_time: None,
            animation: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub simulations: Vec<SimulationSummary>,
    pub failed: Vec<PathBuf>,
}

/// Renders every simulation directory of the configured run. A simulation
/// that fails is logged and does not stop the others.
pub fn render_run(config: &RenderConfig) -> Result<RunSummary> {
    let run_dir = config.run_dir();
    let simulations = discover_simulations(&run_dir)
        .with_context(|| format!("failed to list simulations in {}", run_dir.display()))?;
    info!(run = %run_dir.display(), simulations = simulations.len(), "rendering run");

    let mut summary = RunSummary::default();
    for simulation in simulations {
        match render_simulation(&simulation, config) {
            Ok(result) => summary.simulations.push(result),
            Err(err) => {
                warn!(simulation = %simulation.display(), "simulation failed: {err:#}");
                summary.failed.push(simulation);
            }
        }
    }
    Ok(summary)
}

pub fn render_simulation(simulation: &Path, config: &RenderConfig) -> Result<SimulationSummary> {
    let image_dir = simulation.join(&config.paths.image_subdir);
    if image_dir.exists() && !config.render.overwrite {
        info!(simulation = %simulation.display(), "image directory exists; skipping");
        return Ok(SimulationSummary::empty(
            simulation,
            SimulationStatus::AlreadyRendered,
        ));
    }

    let frames = discover_frames(simulation, &config.frames.pattern())?;
    let Some(last) = frames.last() else {
        warn!(simulation = %simulation.display(), "no snapshot files found");
        return Ok(SimulationSummary::empty(simulation, SimulationStatus::NoFrames));
    };

    let delimiter = config.frames.delimiter;
    let final_labels = read_labels(last, delimiter)
        .with_context(|| format!("failed to load final snapshot {}", last.display()))?;
    let geometry = Geometry::from_final(&final_labels, config.space_time.slice_row);
    let shape = geometry.canvas;

    fs::create_dir_all(&image_dir)
        .with_context(|| format!("failed to create image directory {}", image_dir.display()))?;
    info!(
        simulation = %simulation.display(),
        frames = frames.len(),
        rows = shape.rows,
        cols = shape.cols,
        "rendering simulation"
    );

    let strictness = config.render.strictness;
    let compositor = Compositor::new(config.render.placement, strictness);
    let mut space_time = SpaceTime::new(geometry.space_time_rows, frames.len());
    let mut rendered = Vec::with_capacity(frames.len());
    let mut skipped = 0usize;

    for (column, frame) in frames.iter().enumerate() {
        let labels = if frame == last {
            final_labels.clone()
        } else {
            match read_labels(frame, delimiter) {
                Ok(labels) => labels,
                Err(err) => {
                    warn!(frame = %frame.display(), "skipping snapshot: {err}");
                    skipped += 1;
                    continue;
                }
            }
        };

        let slice = labels.cross_section(geometry.cut_row);
        if let Err(err) = space_time.accumulate(column, &slice, strictness) {
            warn!(frame = %frame.display(), "space-time column left empty: {err}");
        }

        let canvas = match compositor.compose(&labels, shape) {
            Ok(canvas) => canvas,
            Err(err) => {
                warn!(frame = %frame.display(), "skipping snapshot: {err}");
                skipped += 1;
                continue;
            }
        };

        let output = image_dir.join(frame_image_name(frame));
        write_png(&output, &rasterize(&canvas, config.render.cell_px))?;
        debug!(frame = %frame.display(), output = %output.display(), "frame written");
        rendered.push(output);
    }

    let space_time_path = if config.space_time.enabled {
        let path = image_dir.join(&config.space_time.file_name);
        let plot = rasterize(&space_time.to_canvas(), config.render.cell_px);
        write_png(&path, &with_axis_labels(&plot, TIME_LABEL, SPACE_LABEL))?;
        Some(path)
    } else {
        None
    };

    let animation_path = if config.animation.enabled && !rendered.is_empty() {
        let path = image_dir.join(&config.animation.file_name);
        let animation = AnimationConfig {
            fps: config.animation.fps,
        };
        assemble_gif(&rendered, &path, &animation)?;
        Some(path)
    } else {
        None
    };

    info!(
        simulation = %simulation.display(),
        rendered = rendered.len(),
        skipped,
        "simulation complete"
    );

    Ok(SimulationSummary {
        simulation: simulation.to_path_buf(),
        status: SimulationStatus::Rendered,
        frames_rendered: rendered.len(),
        frames_skipped: skipped,
        space_time: space_time_path,
        animation: animation_path,
    })
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReanimateSummary {
    pub animations: Vec<PathBuf>,
    /// Simulations without an image directory.
    pub missing: Vec<PathBuf>,
}

/// Rebuilds the animation of every simulation from its rendered images.
pub fn reanimate_run(config: &RenderConfig) -> Result<ReanimateSummary> {
    let run_dir = config.run_dir();
    let simulations = discover_simulations(&run_dir)
        .with_context(|| format!("failed to list simulations in {}", run_dir.display()))?;

    let excluded = [
        file_stem(&config.space_time.file_name),
        file_stem(&config.animation.file_name),
    ];
    let excluded: Vec<&str> = excluded.iter().map(String::as_str).collect();
    let animation = AnimationConfig {
        fps: config.animation.fps,
    };

    let mut summary = ReanimateSummary::default();
    for simulation in simulations {
        let image_dir = simulation.join(&config.paths.image_subdir);
        if !image_dir.is_dir() {
            warn!(
                simulation = %simulation.display(),
                "no image directory; render the simulation first"
            );
            summary.missing.push(simulation);
            continue;
        }

        let frames = collect_frames(&image_dir, &excluded)?;
        let output = image_dir.join(&config.animation.file_name);
        match assemble_gif(&frames, &output, &animation) {
            Ok(count) => {
                info!(output = %output.display(), frames = count, "animation rebuilt");
                summary.animations.push(output);
            }
            Err(err) => warn!(simulation = %simulation.display(), "animation failed: {err:#}"),
        }
    }
    Ok(summary)
}

fn frame_image_name(frame: &Path) -> String {
    let stem = frame
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".into());
    format!("{stem}.png")
}

fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_owned())
}

/// Canvas and space-time sizes fixed by the last snapshot of a simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub canvas: CanvasShape,
    pub space_time_rows: usize,
    pub cut_row: usize,
}

impl Geometry {
    /// `slice_row` defaults to `ceil(rows / 2)` of the final snapshot.
    pub fn from_final(labels: &LabelArray, slice_row: Option<usize>) -> Self {
        let (rows, cols) = labels.footprint();
        Self {
            canvas: CanvasShape::new(rows, cols),
            space_time_rows: labels.width(),
            cut_row: slice_row.unwrap_or_else(|| rows.div_ceil(2)),
        }
    }
}
