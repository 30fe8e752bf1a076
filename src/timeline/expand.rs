use image::{RgbaImage, imageops};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::model::animation::Animation;
use crate::model::sprite::ComposedSprite;
use crate::render::bounds::ContentRect;

/// Counters for one expanded animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpandStats {
    /// Timeline entries consumed.
    pub source_frames: u64,
    /// Numbered frames pushed to the sink.
    pub frames_written: u64,
    pub width: u32,
    pub height: u32,
}

/// Crop every frame of `animation` to `bounds` and push it `duration` times into `sink`.
///
/// Output numbering is one counter across the whole animation, starting at 1. The crop window
/// is the same for every frame, so all output frames share one size. Degenerate bounds are
/// rejected before anything reaches the sink.
#[tracing::instrument(skip_all, fields(animation = %animation.name))]
pub fn expand_animation(
    animation: &Animation,
    sprites: &[ComposedSprite],
    bounds: ContentRect,
    fps: Fps,
    sink: &mut dyn FrameSink,
) -> ReelResult<ExpandStats> {
    if animation.frames.is_empty() {
        return Err(ReelError::degenerate(format!(
            "animation '{}' has no frames",
            animation.name
        )));
    }
    let (x, y, width, height) = bounds.crop_window().ok_or_else(|| {
        ReelError::degenerate(format!(
            "animation '{}' has no visible pixels (bounds {bounds:?})",
            animation.name
        ))
    })?;

    let mut cropped = Vec::with_capacity(animation.frames.len());
    for (pos, frame) in animation.frames.iter().enumerate() {
        let sprite = sprites.get(frame.sprite_index).ok_or_else(|| {
            ReelError::malformed(
                pos,
                format!(
                    "frame references sprite {} but only {} sprites exist",
                    frame.sprite_index,
                    sprites.len()
                ),
            )
        })?;
        cropped.push((crop_to_window(&sprite.image, x, y, width, height)?, frame.duration));
    }

    let total_frames = animation.total_ticks();
    sink.begin(SinkConfig {
        width,
        height,
        fps,
        total_frames,
    })?;

    let mut idx = FrameIndex::FIRST;
    for (image, duration) in &cropped {
        for _ in 0..*duration {
            sink.push_frame(idx, image)?;
            idx = idx.next();
        }
    }
    sink.end()?;

    Ok(ExpandStats {
        source_frames: animation.frames.len() as u64,
        frames_written: total_frames,
        width,
        height,
    })
}

fn crop_to_window(image: &RgbaImage, x: u32, y: u32, w: u32, h: u32) -> ReelResult<RgbaImage> {
    let fits = u64::from(x) + u64::from(w) <= u64::from(image.width())
        && u64::from(y) + u64::from(h) <= u64::from(image.height());
    if !fits {
        return Err(ReelError::degenerate(format!(
            "crop window {w}x{h}+{x}+{y} exceeds sprite image {}x{}",
            image.width(),
            image.height()
        )));
    }
    Ok(imageops::crop_imm(image, x, y, w, h).to_image())
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/expand.rs"]
mod tests;
