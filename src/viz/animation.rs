use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use tracing::{debug, warn};

const GIF_SPEED: i32 = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationConfig {
    pub fps: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { fps: 50 }
    }
}

/// Writes the images at `frames`, in order, as a looping GIF.
///
/// Frames that cannot be decoded, or whose size differs from the first
/// decoded frame, are skipped. Returns the number of frames written.
pub fn assemble_gif(frames: &[PathBuf], output: &Path, config: &AnimationConfig) -> Result<usize> {
    let mut decoded: Vec<RgbaImage> = Vec::with_capacity(frames.len());
    for path in frames {
        let image = match image::open(path) {
            Ok(image) => image.to_rgba8(),
            Err(err) => {
                warn!(frame = %path.display(), "skipping undecodable animation frame: {err}");
                continue;
            }
        };
        if let Some(first) = decoded.first()
            && first.dimensions() != image.dimensions()
        {
            warn!(
                frame = %path.display(),
                expected = ?first.dimensions(),
                found = ?image.dimensions(),
                "skipping animation frame with mismatched size"
            );
            continue;
        }
        decoded.push(image);
    }

    if decoded.is_empty() {
        return Err(anyhow!(
            "no usable frames for animation {}",
            output.display()
        ));
    }

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create animation directory {parent:?}"))?;
    }
    let file = File::create(output)
        .with_context(|| format!("failed to create animation {}", output.display()))?;
    let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), GIF_SPEED);
    encoder
        .set_repeat(Repeat::Infinite)
        .context("failed to mark animation as looping")?;

    let delay = Delay::from_numer_denom_ms(1000, config.fps.max(1));
    let count = decoded.len();
    for image in decoded {
        encoder
            .encode_frame(Frame::from_parts(image, 0, 0, delay))
            .with_context(|| format!("failed to encode frame into {}", output.display()))?;
    }
    debug!(frames = count, fps = config.fps, output = %output.display(), "animation written");
    Ok(count)
}

/// PNG files in `dir`, sorted by name, leaving out names starting with any
/// of `exclude_prefixes`.
pub fn collect_frames(dir: &Path, exclude_prefixes: &[&str]) -> Result<Vec<PathBuf>> {
    let mut frames = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))?
    {
        let path = entry
            .with_context(|| format!("failed to list {}", dir.display()))?
            .path();
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let is_png = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if is_png
            && path.is_file()
            && !exclude_prefixes
                .iter()
                .any(|prefix| name.starts_with(prefix))
        {
            frames.push(path);
        }
    }
    frames.sort();
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::output::write_png;
    use crate::viz::raster::blank;
    use image::AnimationDecoder;
    use image::codecs::gif::GifDecoder;
    use std::io::BufReader;
    use tempfile::tempdir;

    #[test]
    fn gif_keeps_frame_order_and_skips_mismatched_sizes() {
        let dir = tempdir().expect("tempdir");
        let a = dir.path().join("img_0.png");
        let b = dir.path().join("img_1.png");
        let odd = dir.path().join("img_2.png");
        write_png(&a, &blank(4, 4, [255, 255, 255])).unwrap();
        write_png(&b, &blank(4, 4, [0, 0, 0])).unwrap();
        write_png(&odd, &blank(5, 4, [0, 0, 0])).unwrap();

        let output = dir.path().join("Animation.gif");
        let written = assemble_gif(
            &[a, b, odd],
            &output,
            &AnimationConfig::default(),
        )
        .unwrap();
        assert_eq!(written, 2);

        let reader = BufReader::new(File::open(&output).unwrap());
        let frames = GifDecoder::new(reader)
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].buffer().get_pixel(0, 0).0[..3], [255, 255, 255]);
        assert_eq!(frames[1].buffer().get_pixel(0, 0).0[..3], [0, 0, 0]);
        let (numer, denom) = frames[0].delay().numer_denom_ms();
        assert_eq!(numer / denom.max(1), 20);
    }

    #[test]
    fn no_frames_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let output = dir.path().join("Animation.gif");
        assert!(assemble_gif(&[], &output, &AnimationConfig::default()).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn collect_frames_excludes_summary_plots() {
        let dir = tempdir().expect("tempdir");
        for name in ["img_1.png", "img_0.png", "SpaceTimePlot.png", "notes.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        let frames = collect_frames(dir.path(), &["SpaceTimePlot"]).unwrap();
        let names: Vec<_> = frames
            .iter()
            .map(|path| path.file_name().unwrap().to_str().unwrap().to_owned())
            .collect();
        assert_eq!(names, vec!["img_0.png", "img_1.png"]);
    }
}
