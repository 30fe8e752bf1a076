use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};

/// One finished frame directory and where its video should go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeJob {
    /// Directory holding `1.png`, `2.png`, … with no gaps.
    pub frames_dir: PathBuf,
    /// Number of frames in `frames_dir`.
    pub frame_count: u64,
    pub fps: Fps,
    /// Output video path; its extension selects the codec.
    pub out_path: PathBuf,
}

/// Turns a numbered frame directory into a video file.
pub trait VideoEncoder: Send + Sync {
    fn encode(&self, job: &EncodeJob) -> ReelResult<()>;
}

/// Options for [`FfmpegEncoder`].
#[derive(Clone, Debug)]
pub struct FfmpegEncoderOpts {
    /// Program to invoke; `ffmpeg` from `PATH` by default.
    pub program: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
}

impl Default for FfmpegEncoderOpts {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            overwrite: true,
        }
    }
}

/// Encodes PNG sequences with the system `ffmpeg` binary.
#[derive(Clone, Debug, Default)]
pub struct FfmpegEncoder {
    opts: FfmpegEncoderOpts,
}

impl FfmpegEncoder {
    pub fn new(opts: FfmpegEncoderOpts) -> Self {
        Self { opts }
    }

    /// Build the full `ffmpeg` invocation for `job` without running it.
    pub fn command(&self, job: &EncodeJob) -> Command {
        let mut cmd = Command::new(&self.opts.program);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if self.opts.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args(["-loglevel", "error", "-framerate"])
            .arg(job.fps.get().to_string())
            .args(["-start_number", "1", "-i"])
            .arg(job.frames_dir.join("%d.png"));
        cmd.args(codec_args(&job.out_path));
        cmd.arg(&job.out_path);
        cmd
    }
}

impl VideoEncoder for FfmpegEncoder {
    fn encode(&self, job: &EncodeJob) -> ReelResult<()> {
        if job.frame_count == 0 {
            return Err(ReelError::encoder("refusing to encode an empty frame sequence"));
        }
        ensure_parent_dir(&job.out_path)?;
        if !self.opts.overwrite && job.out_path.exists() {
            return Err(ReelError::validation(format!(
                "output file '{}' already exists",
                job.out_path.display()
            )));
        }

        let mut cmd = self.command(job);
        tracing::debug!(?cmd, "running ffmpeg");
        let output = cmd.output().map_err(|e| {
            ReelError::encoder(format!(
                "failed to spawn '{}' (is it installed and on PATH?): {e}",
                self.opts.program.display()
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReelError::encoder(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

/// Codec flags chosen by output extension.
fn codec_args(out_path: &Path) -> &'static [&'static str] {
    let ext = out_path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        // VP9 keeps the alpha channel of the frames.
        Some("webm") => &["-c:v", "libvpx-vp9", "-pix_fmt", "yuva420p", "-an"],
        Some("mp4") | Some("mov") => &[
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-vf",
            "pad=ceil(iw/2)*2:ceil(ih/2)*2",
            "-movflags",
            "+faststart",
            "-an",
        ],
        _ => &["-an"],
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
