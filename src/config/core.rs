use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::frames::FramePattern;
use crate::viz::{Placement, Strictness};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RenderConfig {
    pub paths: PathsConfig,
    #[serde(default)]
    pub frames: FramesConfig,
    #[serde(default)]
    pub render: RenderOptions,
    #[serde(default)]
    pub animation: AnimationOptions,
    #[serde(default)]
    pub space_time: SpaceTimeOptions,
}

impl RenderConfig {
    pub fn new(base_dir: impl Into<PathBuf>, run_id: impl Into<String>) -> Self {
        Self {
            paths: PathsConfig {
                base_dir: base_dir.into(),
                run_id: run_id.into(),
                image_subdir: default_image_subdir(),
            },
            frames: FramesConfig::default(),
            render: RenderOptions::default(),
            animation: AnimationOptions::default(),
            space_time: SpaceTimeOptions::default(),
        }
    }

    /// Directory holding one sub-directory per simulation of this run.
    pub fn run_dir(&self) -> PathBuf {
        self.paths.base_dir.join(&self.paths.run_id)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PathsConfig {
    pub base_dir: PathBuf,
    /// Date or run identifier, e.g. `20_01_25`.
    #[serde(default)]
    pub run_id: String,
    #[serde(default = "default_image_subdir")]
    pub image_subdir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FramesConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl FramesConfig {
    pub fn pattern(&self) -> FramePattern {
        FramePattern::new(self.prefix.clone(), &self.extension)
    }
}

impl Default for FramesConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            extension: default_extension(),
            delimiter: default_delimiter(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RenderOptions {
    #[serde(default)]
    pub placement: Placement,
    #[serde(default)]
    pub strictness: Strictness,
    #[serde(default = "default_cell_px")]
    pub cell_px: usize,
    /// Re-render simulations whose image directory already exists.
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            strictness: Strictness::default(),
            cell_px: default_cell_px(),
            overwrite: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AnimationOptions {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_animation_file")]
    pub file_name: String,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            fps: default_fps(),
            file_name: default_animation_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SpaceTimeOptions {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Row cut from every frame; defaults to the middle row of the last frame.
    #[serde(default)]
    pub slice_row: Option<usize>,
    #[serde(default = "default_space_time_file")]
    pub file_name: String,
}

impl Default for SpaceTimeOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            slice_row: None,
            file_name: default_space_time_file(),
        }
    }
}

fn default_image_subdir() -> String {
    "Images".into()
}

fn default_prefix() -> String {
    "img".into()
}

fn default_extension() -> String {
    "csv".into()
}

fn default_delimiter() -> char {
    ','
}

fn default_cell_px() -> usize {
    8
}

fn default_true() -> bool {
    true
}

fn default_fps() -> u32 {
    50
}

fn default_animation_file() -> String {
    "Animation.gif".into()
}

fn default_space_time_file() -> String {
    "SpaceTimePlot.png".into()
}
