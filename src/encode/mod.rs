//! Frame sinks and the video encoder seam.
//!
//! The frame expander pushes numbered frames into a [`sink::FrameSink`]; a finished frame
//! directory is then handed to a [`ffmpeg::VideoEncoder`].

/// `ffmpeg`-based encoding of numbered PNG directories.
pub mod ffmpeg;
/// Numbered PNG directory sink.
pub mod png_seq;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
