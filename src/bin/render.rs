use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use zebrafish_render::{
    Placement, RenderConfig, SimulationStatus, Strictness, load_render_config, render_run,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render frame images, a space-time plot and an animation for every simulation of a run"
)]
struct Args {
    /// Additional configuration files applied in order (later files override earlier ones).
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Vec<PathBuf>,
    /// Directory holding one folder per run.
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,
    /// Run identifier (sub-directory of the base directory).
    #[arg(long = "run", value_name = "ID")]
    run_id: Option<String>,
    /// How each snapshot is positioned on the final-size canvas.
    #[arg(long, value_enum)]
    placement: Option<PlacementArg>,
    /// Fail frames with unknown codes and oversized space-time slices.
    #[arg(long)]
    strict: bool,
    /// Animation playback rate.
    #[arg(long)]
    fps: Option<u32>,
    /// Re-render simulations that already have an image directory.
    #[arg(long)]
    overwrite: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PlacementArg {
    Raw,
    Centered,
    GrowLeft,
    GrowRight,
}

impl From<PlacementArg> for Placement {
    fn from(arg: PlacementArg) -> Self {
        match arg {
            PlacementArg::Raw => Placement::Raw,
            PlacementArg::Centered => Placement::Centered,
            PlacementArg::GrowLeft => Placement::GrowLeft,
            PlacementArg::GrowRight => Placement::GrowRight,
        }
    }
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn run() -> Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    let summary = render_run(&config)?;
    let rendered = summary
        .simulations
        .iter()
        .filter(|sim| sim.status == SimulationStatus::Rendered)
        .count();
    info!(
        rendered,
        skipped = summary.simulations.len() - rendered,
        failed = summary.failed.len(),
        "run complete"
    );

    if summary.failed.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(
            "{} simulation(s) failed to render",
            summary.failed.len()
        ))
    }
}

fn resolve_config(args: &Args) -> Result<RenderConfig> {
    let mut config_paths = vec![PathBuf::from("config/base.toml")];
    config_paths.extend(args.config.clone());
    let mut config = load_render_config(&config_paths)?;

    if let Some(base_dir) = &args.base_dir {
        config.paths.base_dir = base_dir.clone();
    }
    if let Some(run_id) = &args.run_id {
        config.paths.run_id = run_id.clone();
    }
    if let Some(placement) = args.placement {
        config.render.placement = placement.into();
    }
    if args.strict {
        config.render.strictness = Strictness::Strict;
    }
    if let Some(fps) = args.fps {
        config.animation.fps = fps;
    }
    if args.overwrite {
        config.render.overwrite = true;
    }
    Ok(config)
}
