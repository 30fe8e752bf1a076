use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::{ReelError, ReelResult};

/// Decode encoded spritesheet bytes into straight RGBA8.
pub fn decode_spritesheet(bytes: &[u8]) -> ReelResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode spritesheet from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Read and decode the spritesheet at `path`.
pub fn load_spritesheet(path: &Path) -> ReelResult<RgbaImage> {
    let bytes = read_asset(path)?;
    decode_spritesheet(&bytes).map_err(|e| match e {
        ReelError::Other(err) => ReelError::Other(err.context(format!("{}", path.display()))),
        other => other,
    })
}

/// Read a text table at `path`.
pub fn load_table(path: &Path) -> ReelResult<String> {
    let bytes = read_asset(path)?;
    String::from_utf8(bytes)
        .with_context(|| format!("table '{}' is not valid UTF-8", path.display()))
        .map_err(ReelError::from)
}

fn read_asset(path: &Path) -> ReelResult<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ReelError::MissingAsset(path.to_path_buf()))
        }
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("read asset '{}'", path.display()))
            .into()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
