use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::RgbaImage;

use crate::encode::sink::{FrameSink, SequenceGuard, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};

/// Writes each pushed frame to `<dir>/<index>.png`.
///
/// `begin` empties the directory first, so a sequence left behind by an earlier run can never
/// fill a gap in the new one. `end` fails unless exactly the announced number of frames arrived.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    guard: SequenceGuard,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            guard: SequenceGuard::default(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of frame `idx` inside `dir`.
    pub fn frame_path(dir: &Path, idx: FrameIndex) -> PathBuf {
        dir.join(format!("{idx}.png"))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(ReelError::validation("frame width/height must be non-zero"));
        }
        if self.dir.exists() {
            std::fs::remove_dir_all(&self.dir).with_context(|| {
                format!("failed to clear frame directory '{}'", self.dir.display())
            })?;
        }
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create frame directory '{}'", self.dir.display())
        })?;
        self.cfg = Some(cfg);
        self.guard.reset();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbaImage) -> ReelResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| ReelError::validation("png sequence sink not started"))?;
        if frame.dimensions() != (cfg.width, cfg.height) {
            return Err(ReelError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }
        self.guard.accept(idx)?;

        let path = Self::frame_path(&self.dir, idx);
        frame
            .save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        let cfg = self
            .cfg
            .take()
            .ok_or_else(|| ReelError::validation("png sequence sink not started"))?;
        if self.guard.written() != cfg.total_frames {
            return Err(ReelError::validation(format!(
                "frame sequence incomplete: wrote {} of {} frames",
                self.guard.written(),
                cfg.total_frames
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png_seq.rs"]
mod tests;
