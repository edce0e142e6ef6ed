pub mod core;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use toml::Value;

pub use self::core::{
    AnimationOptions, FramesConfig, PathsConfig, RenderConfig, RenderOptions, SpaceTimeOptions,
};

/// Loads `paths` in order and deserializes the merged document. Tables are
/// merged key by key, so later files only need the keys they change.
pub fn load_render_config(paths: &[PathBuf]) -> Result<RenderConfig> {
    if paths.is_empty() {
        return Err(anyhow!("no configuration files given"));
    }

    let mut merged = Value::Table(Default::default());
    for path in paths {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let layer: Value = toml::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        merge_value(&mut merged, layer);
    }

    merged
        .try_into()
        .context("configuration does not describe a render run")
}

fn merge_value(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base), Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
