use std::fmt;
use std::path::PathBuf;

use crate::foundation::core::UnitId;
use crate::foundation::error::ReelError;
use crate::model::animation::AnimationName;

/// Pipeline step a failure was raised in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    LoadAssets,
    Decode,
    Composite,
    Bounds,
    Expand,
    Encode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::LoadAssets => "load-assets",
            Stage::Decode => "decode",
            Stage::Composite => "composite",
            Stage::Bounds => "bounds",
            Stage::Expand => "expand",
            Stage::Encode => "encode",
        })
    }
}

/// A failure together with the step that produced it.
#[derive(Debug, thiserror::Error)]
#[error("{stage}: {error}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub error: ReelError,
}

impl StageError {
    pub fn new(stage: Stage, error: ReelError) -> Self {
        Self { stage, error }
    }
}

/// Attach a [`Stage`] to a fallible step.
pub(crate) trait AtStage<T> {
    fn at(self, stage: Stage) -> Result<T, StageError>;
}

impl<T> AtStage<T> for Result<T, ReelError> {
    fn at(self, stage: Stage) -> Result<T, StageError> {
        self.map_err(|error| StageError::new(stage, error))
    }
}

/// A successfully encoded animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedAnimation {
    pub frames_written: u64,
    pub frames_dir: PathBuf,
    pub video_path: PathBuf,
}

#[derive(Debug)]
pub struct AnimationReport {
    pub animation: AnimationName,
    pub outcome: Result<EncodedAnimation, StageError>,
}

/// Result of one unit. `animations` is only populated when the unit's shared steps
/// (asset loading, decoding, composition) succeeded.
#[derive(Debug)]
pub struct UnitReport {
    pub unit: UnitId,
    pub animations: Result<Vec<AnimationReport>, StageError>,
}

impl UnitReport {
    pub fn failures(&self) -> usize {
        match &self.animations {
            Ok(anims) => anims.iter().filter(|a| a.outcome.is_err()).count(),
            Err(_) => 1,
        }
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub units: Vec<UnitReport>,
}

impl RunReport {
    /// Units that failed outright plus animations that failed within healthy units.
    pub fn failures(&self) -> usize {
        self.units.iter().map(UnitReport::failures).sum()
    }

    pub fn encoded(&self) -> usize {
        self.units
            .iter()
            .filter_map(|u| u.animations.as_ref().ok())
            .flatten()
            .filter(|a| a.outcome.is_ok())
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }

    /// One line per failure: unit, animation (when there is one), stage and cause.
    pub fn failure_lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        for u in &self.units {
            match &u.animations {
                Err(e) => out.push(format!("unit {}: {e}", u.unit)),
                Ok(anims) => {
                    for a in anims {
                        if let Err(e) = &a.outcome {
                            out.push(format!("unit {} animation {}: {e}", u.unit, a.animation));
                        }
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/report.rs"]
mod tests;
