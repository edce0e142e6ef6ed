use std::fs;
use std::path::Path;

use tempfile::tempdir;

use zebrafish_render::{
    Placement, RenderConfig, SimulationStatus, reanimate_run, render_run, render_simulation,
};

const RUN_ID: &str = "20_01_25";

fn write_growing_simulation(sim: &Path) {
    fs::create_dir_all(sim).expect("create simulation dir");
    fs::write(sim.join("img_0000.csv"), "1\n").unwrap();
    fs::write(sim.join("img_0001.csv"), "0,1\n2,1\n").unwrap();
    fs::write(sim.join("img_0002.csv"), "0,1,2,0\n2,1,0,0\n1,1,1,2\n").unwrap();
}

fn config_for(base: &Path) -> RenderConfig {
    let mut config = RenderConfig::new(base, RUN_ID);
    config.render.cell_px = 2;
    config.render.placement = Placement::Centered;
    config
}

#[test]
fn render_run_writes_frames_space_time_and_animation() {
    let dir = tempdir().expect("tempdir");
    let sim = dir.path().join(RUN_ID).join("sim_a");
    write_growing_simulation(&sim);

    let summary = render_run(&config_for(dir.path())).expect("render run");
    assert!(summary.failed.is_empty());
    assert_eq!(summary.simulations.len(), 1);

    let result = &summary.simulations[0];
    assert_eq!(result.status, SimulationStatus::Rendered);
    assert_eq!(result.frames_rendered, 3);
    assert_eq!(result.frames_skipped, 0);

    let images = sim.join("Images");
    for name in ["img_0000.png", "img_0001.png", "img_0002.png"] {
        let frame = image::open(images.join(name)).expect("frame png");
        assert_eq!((frame.width(), frame.height()), (8, 6));
    }
    assert_eq!(result.space_time.as_deref(), Some(images.join("SpaceTimePlot.png").as_path()));
    assert!(images.join("SpaceTimePlot.png").is_file());
    assert_eq!(result.animation.as_deref(), Some(images.join("Animation.gif").as_path()));
    assert!(images.join("Animation.gif").is_file());
}

#[test]
fn existing_image_directories_are_left_alone() {
    let dir = tempdir().expect("tempdir");
    let sim = dir.path().join(RUN_ID).join("sim_a");
    write_growing_simulation(&sim);
    let mut config = config_for(dir.path());

    let first = render_simulation(&sim, &config).unwrap();
    assert_eq!(first.status, SimulationStatus::Rendered);

    let second = render_simulation(&sim, &config).unwrap();
    assert_eq!(second.status, SimulationStatus::AlreadyRendered);
    assert_eq!(second.frames_rendered, 0);

    config.render.overwrite = true;
    let third = render_simulation(&sim, &config).unwrap();
    assert_eq!(third.status, SimulationStatus::Rendered);
    assert_eq!(third.frames_rendered, 3);
}

#[test]
fn broken_and_oversized_snapshots_are_skipped() {
    let dir = tempdir().expect("tempdir");
    let sim = dir.path().join(RUN_ID).join("sim_b");
    fs::create_dir_all(&sim).unwrap();
    fs::write(sim.join("img_0000.csv"), "0,1,2\n0,1\n").unwrap();
    fs::write(sim.join("img_0001.csv"), "1,1,1,1\n").unwrap();
    fs::write(sim.join("img_0002.csv"), "0,1\n2,1\n").unwrap();

    let result = render_simulation(&sim, &config_for(dir.path())).unwrap();
    assert_eq!(result.status, SimulationStatus::Rendered);
    assert_eq!(result.frames_rendered, 1);
    assert_eq!(result.frames_skipped, 2);

    let images = sim.join("Images");
    assert!(!images.join("img_0000.png").exists());
    assert!(!images.join("img_0001.png").exists());
    assert!(images.join("img_0002.png").is_file());
}

#[test]
fn simulations_without_snapshots_report_no_frames() {
    let dir = tempdir().expect("tempdir");
    let sim = dir.path().join(RUN_ID).join("empty");
    fs::create_dir_all(&sim).unwrap();
    fs::write(sim.join("params.txt"), "seed=1").unwrap();

    let result = render_simulation(&sim, &config_for(dir.path())).unwrap();
    assert_eq!(result.status, SimulationStatus::NoFrames);
    assert!(!sim.join("Images").exists());
}

#[test]
fn missing_run_directory_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let err = render_run(&config_for(dir.path())).unwrap_err();
    assert!(format!("{err:#}").contains("failed to list simulations"));
}

#[test]
fn reanimate_rebuilds_gifs_from_rendered_frames() {
    let dir = tempdir().expect("tempdir");
    let run = dir.path().join(RUN_ID);
    write_growing_simulation(&run.join("sim_a"));
    fs::create_dir_all(run.join("sim_unrendered")).unwrap();

    let mut config = config_for(dir.path());
    config.animation.enabled = false;
    render_run(&config).unwrap();
    let gif = run.join("sim_a").join("Images").join("Animation.gif");
    assert!(!gif.exists());

    config.animation.fps = 10;
    let summary = reanimate_run(&config).unwrap();
    assert_eq!(summary.animations, vec![gif.clone()]);
    assert_eq!(summary.missing, vec![run.join("sim_unrendered")]);
    assert!(gif.is_file());
}
