use std::path::{Path, PathBuf};

use crate::foundation::core::UnitId;
use crate::model::animation::AnimationName;

/// File locations of one unit's inputs and outputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitAssets {
    pub unit: UnitId,
    /// `<input>/unit_anime_<unit>.png`
    pub spritesheet: PathBuf,
    /// `<input>/unit_cgg_<unit>.csv`
    pub geometry_table: PathBuf,
    input_dir: PathBuf,
}

impl UnitAssets {
    pub fn new(input_dir: &Path, unit: &UnitId) -> Self {
        Self {
            unit: unit.clone(),
            spritesheet: input_dir.join(format!("unit_anime_{unit}.png")),
            geometry_table: input_dir.join(format!("unit_cgg_{unit}.csv")),
            input_dir: input_dir.to_path_buf(),
        }
    }

    /// `<input>/unit_<animation>_cgs_<unit>.csv`
    pub fn animation_table(&self, name: AnimationName) -> PathBuf {
        self.input_dir
            .join(format!("unit_{name}_cgs_{}.csv", self.unit))
    }
}

/// `<output>/unit_<animation>_<unit>.<ext>`
pub fn video_path(output_dir: &Path, unit: &UnitId, name: AnimationName, ext: &str) -> PathBuf {
    output_dir.join(format!("unit_{name}_{unit}.{ext}"))
}

/// `<frames_root>/<unit>/<animation>`
pub fn frames_dir(frames_root: &Path, unit: &UnitId, name: AnimationName) -> PathBuf {
    frames_root.join(unit.as_str()).join(name.as_str())
}
