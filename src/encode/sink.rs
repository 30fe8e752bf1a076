use image::RgbaImage;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Width shared by every frame of the sequence.
    pub width: u32,
    /// Height shared by every frame of the sequence.
    pub height: u32,
    /// Playback rate the sequence is meant for.
    pub fps: Fps,
    /// Number of frames that will be pushed.
    pub total_frames: u64,
}

/// Sink contract for consuming an expanded frame sequence.
///
/// Ordering contract: `push_frame` receives indices `1, 2, 3, …` with no gaps or repeats.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    /// Push the next frame of the sequence.
    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbaImage) -> ReelResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ReelResult<()>;
}

/// Tracks the dense numbering contract for sink implementations.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SequenceGuard {
    last: Option<FrameIndex>,
}

impl SequenceGuard {
    pub(crate) fn reset(&mut self) {
        self.last = None;
    }

    pub(crate) fn accept(&mut self, idx: FrameIndex) -> ReelResult<()> {
        let expected = self.last.map_or(FrameIndex::FIRST, FrameIndex::next);
        if idx != expected {
            return Err(ReelError::validation(format!(
                "frame sequence gap: expected frame {expected}, got {idx}"
            )));
        }
        self.last = Some(idx);
        Ok(())
    }

    pub(crate) fn written(&self) -> u64 {
        self.last.map_or(0, |i| i.0)
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    guard: SequenceGuard,
    frames: Vec<(FrameIndex, RgbaImage)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames, in push order.
    pub fn frames(&self) -> &[(FrameIndex, RgbaImage)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.guard.reset();
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbaImage) -> ReelResult<()> {
        self.guard.accept(idx)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
