//! spritereel turns layered sprite definitions and animation timelines into video.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: geometry rows → [`SpriteDefinition`], frame rows → [`Animation`]
//! 2. **Composite**: each definition is drawn onto a fixed square canvas from crops of the unit's
//!    spritesheet ([`LayerCompositor`]) and measured ([`image_bounds`])
//! 3. **Bound**: an animation's crop window is the union of its sprites' bounds
//!    ([`animation_bounds`])
//! 4. **Expand**: every timeline entry is cropped and repeated `duration` times into a densely
//!    numbered [`FrameSink`] ([`expand_animation`])
//! 5. **Encode**: the numbered PNG directory is handed to a [`VideoEncoder`] (system `ffmpeg`)
//!
//! [`Pipeline`] drives all five steps per unit and records failures in a [`RunReport`] instead
//! of aborting the run.
#![forbid(unsafe_code)]

mod assets;
mod foundation;
mod model;
mod pipeline;
mod records;
mod render;
mod timeline;

/// Pipeline configuration.
pub mod config;
/// Frame sinks and video encoding.
pub mod encode;

pub use crate::assets::decode::{decode_spritesheet, load_spritesheet, load_table};
pub use crate::assets::layout::{UnitAssets, frames_dir, video_path};
pub use crate::config::{ReelConfig, Threading};
pub use crate::encode::ffmpeg::{
    EncodeJob, FfmpegEncoder, FfmpegEncoderOpts, VideoEncoder, ensure_parent_dir,
    is_ffmpeg_on_path,
};
pub use crate::encode::png_seq::PngSequenceSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::foundation::core::{Fps, FrameIndex, UnitId};
pub use crate::foundation::error::{ReelError, ReelResult};
pub use crate::model::animation::{Animation, AnimationFrameRef, AnimationName};
pub use crate::model::sprite::{
    ComposedSprite, LayerDescriptor, Orientation, SourceRect, SpriteDefinition,
};
pub use crate::pipeline::report::{
    AnimationReport, EncodedAnimation, RunReport, Stage, StageError, UnitReport,
};
pub use crate::pipeline::run::{Pipeline, compose_sprites, resolve_animations};
pub use crate::records::decode::{
    DEFAULT_LAYER_STRIDE, DecodeOptions, FRAME_FIELDS, LAYER_FIELDS, decode_animation_table,
    decode_frame_row, decode_sprite_row, decode_sprite_table,
};
pub use crate::records::tokens::{DELIMITER, TokenRow, tokenize};
pub use crate::render::blend::{blend_in_place, scale_alpha_in_place};
pub use crate::render::bounds::{ContentRect, animation_bounds, image_bounds};
pub use crate::render::composite::{DEFAULT_CANVAS_SIZE, LayerCompositor, over, over_in_place};
pub use crate::render::transform::{apply_orientation, rotate_expand};
pub use crate::timeline::expand::{ExpandStats, expand_animation};
