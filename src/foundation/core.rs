use std::fmt;

use crate::foundation::error::{ReelError, ReelResult};

/// One-based position of an output frame within an expanded animation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// First index handed to a sink; output numbering starts at 1.
    pub const FIRST: FrameIndex = FrameIndex(1);

    pub fn next(self) -> FrameIndex {
        FrameIndex(self.0 + 1)
    }
}

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer output frame rate handed to the encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32")]
pub struct Fps(u32);

impl Fps {
    pub const DEFAULT: Fps = Fps(60);

    pub fn new(fps: u32) -> ReelResult<Self> {
        if fps == 0 {
            return Err(ReelError::validation("fps must be > 0"));
        }
        Ok(Self(fps))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for Fps {
    type Error = ReelError;

    fn try_from(value: u32) -> ReelResult<Self> {
        Self::new(value)
    }
}

/// Identifier of a processing unit, as it appears in asset file names.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(String);

impl UnitId {
    /// Validate a unit id. Ids are embedded in file names, so path separators are rejected.
    pub fn new(id: impl Into<String>) -> ReelResult<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ReelError::validation("unit id must be non-empty"));
        }
        if trimmed.contains(['/', '\\']) || trimmed == "." || trimmed == ".." {
            return Err(ReelError::validation(format!(
                "unit id '{trimmed}' must not contain path components"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
