use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RenderError, RenderResult};

/// Matches snapshot file names of the form `<prefix>*.<extension>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramePattern {
    prefix: String,
    suffix: String,
}

impl FramePattern {
    pub fn new(prefix: impl Into<String>, extension: &str) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: format!(".{}", extension.trim_start_matches('.')),
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        file_name.len() >= self.prefix.len() + self.suffix.len()
            && file_name.starts_with(&self.prefix)
            && file_name.ends_with(&self.suffix)
    }
}

impl Default for FramePattern {
    fn default() -> Self {
        Self::new("img", "csv")
    }
}

/// Snapshot files directly inside `dir`, sorted by file name.
pub fn discover_frames(dir: &Path, pattern: &FramePattern) -> RenderResult<Vec<PathBuf>> {
    let mut frames = Vec::new();
    for entry in read_dir(dir)? {
        let entry = entry.map_err(|err| RenderError::io(dir, err))?;
        let is_file = entry
            .file_type()
            .map_err(|err| RenderError::io(entry.path(), err))?
            .is_file();
        if !is_file {
            continue;
        }
        if let Some(name) = entry.file_name().to_str()
            && pattern.matches(name)
        {
            frames.push(entry.path());
        }
    }
    frames.sort();
    Ok(frames)
}

/// Simulation directories of one run, sorted by name.
pub fn discover_simulations(run_dir: &Path) -> RenderResult<Vec<PathBuf>> {
    let mut sims = Vec::new();
    for entry in read_dir(run_dir)? {
        let entry = entry.map_err(|err| RenderError::io(run_dir, err))?;
        let path = entry.path();
        if path.is_dir() {
            sims.push(path);
        }
    }
    sims.sort();
    Ok(sims)
}

fn read_dir(dir: &Path) -> RenderResult<fs::ReadDir> {
    if !dir.exists() {
        return Err(RenderError::NotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(RenderError::InputType(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    fs::read_dir(dir).map_err(|err| RenderError::io(dir, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_requires_prefix_and_extension() {
        let pattern = FramePattern::default();
        assert!(pattern.matches("img_0001.csv"));
        assert!(pattern.matches("img.csv"));
        assert!(!pattern.matches("image.png"));
        assert!(!pattern.matches("frame_0001.csv"));
        assert!(!pattern.matches("img_0001.csv.bak"));
        assert!(!pattern.matches("imgcsv"));
    }

    #[test]
    fn extension_accepts_leading_dot() {
        assert_eq!(FramePattern::new("img", ".csv"), FramePattern::default());
    }
}
