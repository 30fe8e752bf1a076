//! Pipeline configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all) is a valid
//! configuration. Command-line flags override individual fields after loading.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};
use crate::records::decode::{DEFAULT_LAYER_STRIDE, DecodeOptions};
use crate::render::composite::DEFAULT_CANVAS_SIZE;

/// Worker-pool controls for sprite composition.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Threading {
    /// Compose the sprites of a unit in parallel.
    pub parallel: bool,
    /// Worker thread count; rayon picks one per core when unset.
    pub threads: Option<usize>,
}

impl Default for Threading {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReelConfig {
    /// Frame rate handed to the encoder.
    pub fps: Fps,
    /// Extension of the output videos, without the dot.
    pub container_ext: String,
    /// Side of the square compositing canvas.
    pub canvas_size: u32,
    /// Tokens per layer group in geometry tables.
    pub layer_stride: usize,
    /// Replace existing output videos.
    pub overwrite: bool,
    /// Leave the numbered PNG directories behind after a successful encode.
    pub keep_frames: bool,
    /// Root for frame directories; `<output>/.frames` when unset.
    pub work_dir: Option<PathBuf>,
    pub threading: Threading,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            fps: Fps::DEFAULT,
            container_ext: "webm".to_string(),
            canvas_size: DEFAULT_CANVAS_SIZE,
            layer_stride: DEFAULT_LAYER_STRIDE,
            overwrite: true,
            keep_frames: true,
            work_dir: None,
            threading: Threading::default(),
        }
    }
}

impl ReelConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        let cfg: ReelConfig = serde_json::from_reader(r)
            .map_err(|e| ReelError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> ReelResult<()> {
        if self.canvas_size == 0 {
            return Err(ReelError::validation("canvas_size must be > 0"));
        }
        let ext = self.container_ext.trim();
        if ext.is_empty() || ext.contains(['.', '/', '\\']) {
            return Err(ReelError::validation(format!(
                "container_ext '{}' must be a bare extension such as 'webm'",
                self.container_ext
            )));
        }
        if self.threading.threads == Some(0) {
            return Err(ReelError::validation(
                "threading.threads must be >= 1 when set",
            ));
        }
        self.decode_options().validate()
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            layer_stride: self.layer_stride,
        }
    }

    /// Root for frame directories given the output directory.
    pub fn frames_root(&self, output_dir: &Path) -> PathBuf {
        self.work_dir
            .clone()
            .unwrap_or_else(|| output_dir.join(".frames"))
    }
}
