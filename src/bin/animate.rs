use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use zebrafish_render::{load_render_config, reanimate_run};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Rebuild animations from images that were already rendered"
)]
struct Args {
    /// Additional configuration files applied in order (later files override earlier ones).
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Vec<PathBuf>,
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,
    #[arg(long = "run", value_name = "ID")]
    run_id: Option<String>,
    #[arg(long)]
    fps: Option<u32>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let mut config_paths = vec![PathBuf::from("config/base.toml")];
    config_paths.extend(args.config.clone());
    let mut config = load_render_config(&config_paths)?;

    if let Some(base_dir) = args.base_dir {
        config.paths.base_dir = base_dir;
    }
    if let Some(run_id) = args.run_id {
        config.paths.run_id = run_id;
    }
    if let Some(fps) = args.fps {
        config.animation.fps = fps;
    }

    let summary = reanimate_run(&config)?;
    for simulation in &summary.missing {
        warn!(
            simulation = %simulation.display(),
            "no image directory exists; use `render` to create images"
        );
    }
    info!(
        animations = summary.animations.len(),
        missing = summary.missing.len(),
        "animations rebuilt"
    );
    Ok(())
}
