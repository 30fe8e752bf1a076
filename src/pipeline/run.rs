use std::path::{Path, PathBuf};

use image::RgbaImage;
use rayon::prelude::*;

use crate::assets::decode::{load_spritesheet, load_table};
use crate::assets::layout::{UnitAssets, frames_dir, video_path};
use crate::config::ReelConfig;
use crate::encode::ffmpeg::{EncodeJob, VideoEncoder};
use crate::encode::png_seq::PngSequenceSink;
use crate::foundation::core::UnitId;
use crate::foundation::error::{ReelError, ReelResult};
use crate::model::animation::AnimationName;
use crate::model::sprite::{ComposedSprite, SpriteDefinition};
use crate::pipeline::report::{
    AnimationReport, AtStage, EncodedAnimation, RunReport, Stage, StageError, UnitReport,
};
use crate::records::decode::{decode_animation_table, decode_sprite_table};
use crate::render::bounds::animation_bounds;
use crate::render::composite::LayerCompositor;
use crate::timeline::expand::expand_animation;

/// Parse requested animation names, rejecting anything outside the known set.
pub fn resolve_animations<S: AsRef<str>>(names: &[S]) -> ReelResult<Vec<AnimationName>> {
    names.iter().map(|n| n.as_ref().parse()).collect()
}

/// Compose every definition, returning sprites in decode order.
///
/// With a pool the work is spread across threads. Results are collected positionally, so
/// `out[i]` is always the composite of `defs[i]` regardless of completion order.
pub fn compose_sprites(
    sheet: &RgbaImage,
    defs: &[SpriteDefinition],
    compositor: &LayerCompositor,
    pool: Option<&rayon::ThreadPool>,
) -> ReelResult<Vec<ComposedSprite>> {
    let sprites = match pool {
        Some(pool) => pool.install(|| {
            defs.par_iter()
                .map(|def| compositor.compose(sheet, def))
                .collect::<ReelResult<Vec<_>>>()
        })?,
        None => defs
            .iter()
            .map(|def| compositor.compose(sheet, def))
            .collect::<ReelResult<Vec<_>>>()?,
    };

    for (slot, sprite) in sprites.iter().enumerate() {
        if sprite.definition.index != slot {
            return Err(ReelError::validation(format!(
                "sprite {} landed in slot {slot}",
                sprite.definition.index
            )));
        }
    }
    Ok(sprites)
}

/// Drives decode → composite → bound → expand → encode for a list of units.
///
/// Units run one after another and so do the animations of a unit. A failing unit or
/// animation is recorded in the [`RunReport`] and processing moves on.
pub struct Pipeline {
    input_dir: PathBuf,
    output_dir: PathBuf,
    config: ReelConfig,
    compositor: LayerCompositor,
    encoder: Box<dyn VideoEncoder>,
    pool: Option<rayon::ThreadPool>,
}

impl Pipeline {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        config: ReelConfig,
        encoder: Box<dyn VideoEncoder>,
    ) -> ReelResult<Self> {
        config.validate()?;
        let compositor = LayerCompositor::new(config.canvas_size)?;
        let pool = if config.threading.parallel {
            Some(build_thread_pool(config.threading.threads)?)
        } else {
            None
        };
        Ok(Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            config,
            compositor,
            encoder,
            pool,
        })
    }

    pub fn config(&self) -> &ReelConfig {
        &self.config
    }

    pub fn frames_dir(&self, unit: &UnitId, name: AnimationName) -> PathBuf {
        frames_dir(&self.config.frames_root(&self.output_dir), unit, name)
    }

    pub fn video_path(&self, unit: &UnitId, name: AnimationName) -> PathBuf {
        video_path(&self.output_dir, unit, name, &self.config.container_ext)
    }

    /// Process every unit in order.
    pub fn run(&self, units: &[UnitId], animations: &[AnimationName]) -> RunReport {
        let mut report = RunReport::default();
        for unit in units {
            let unit_report = self.process_unit(unit, animations);
            if let Err(e) = &unit_report.animations {
                tracing::warn!(unit = %unit, stage = %e.stage, error = %e.error, "unit failed");
            }
            report.units.push(unit_report);
        }
        tracing::info!(
            units = report.units.len(),
            encoded = report.encoded(),
            failures = report.failures(),
            "run finished"
        );
        report
    }

    /// Compose a unit's sprites once, then render each requested animation.
    #[tracing::instrument(skip(self, unit, animations), fields(unit = %unit))]
    pub fn process_unit(&self, unit: &UnitId, animations: &[AnimationName]) -> UnitReport {
        tracing::info!("processing unit");
        let outcomes = self.prepare_unit(unit).map(|(assets, sprites)| {
            tracing::info!(sprites = sprites.len(), "composed unit sprites");
            animations
                .iter()
                .map(|&name| {
                    let outcome = self.process_animation(&assets, &sprites, name);
                    match &outcome {
                        Ok(done) => tracing::info!(
                            animation = %name,
                            frames = done.frames_written,
                            video = %done.video_path.display(),
                            "animation encoded"
                        ),
                        Err(e) => tracing::warn!(
                            animation = %name,
                            stage = %e.stage,
                            error = %e.error,
                            "animation failed"
                        ),
                    }
                    AnimationReport {
                        animation: name,
                        outcome,
                    }
                })
                .collect::<Vec<_>>()
        });
        UnitReport {
            unit: unit.clone(),
            animations: outcomes,
        }
    }

    fn prepare_unit(
        &self,
        unit: &UnitId,
    ) -> Result<(UnitAssets, Vec<ComposedSprite>), StageError> {
        let assets = UnitAssets::new(&self.input_dir, unit);
        let sheet = load_spritesheet(&assets.spritesheet).at(Stage::LoadAssets)?;
        let geometry = load_table(&assets.geometry_table).at(Stage::LoadAssets)?;
        let defs =
            decode_sprite_table(&geometry, self.config.decode_options()).at(Stage::Decode)?;
        let sprites = compose_sprites(&sheet, &defs, &self.compositor, self.pool.as_ref())
            .at(Stage::Composite)?;
        Ok((assets, sprites))
    }

    /// Decode, bound, expand and encode one animation of an already-composed unit.
    pub fn process_animation(
        &self,
        assets: &UnitAssets,
        sprites: &[ComposedSprite],
        name: AnimationName,
    ) -> Result<EncodedAnimation, StageError> {
        tracing::info!(animation = %name, "processing animation");
        let table = load_table(&assets.animation_table(name)).at(Stage::LoadAssets)?;
        let animation = decode_animation_table(name, &table).at(Stage::Decode)?;
        let bounds = animation_bounds(&animation, sprites).at(Stage::Bounds)?;

        let frames_dir = self.frames_dir(&assets.unit, name);
        let mut sink = PngSequenceSink::new(&frames_dir);
        let stats = expand_animation(&animation, sprites, bounds, self.config.fps, &mut sink)
            .at(Stage::Expand)?;

        let job = EncodeJob {
            frames_dir: frames_dir.clone(),
            frame_count: stats.frames_written,
            fps: self.config.fps,
            out_path: self.video_path(&assets.unit, name),
        };
        self.encoder.encode(&job).at(Stage::Encode)?;

        if !self.config.keep_frames {
            remove_frames(&frames_dir);
        }
        Ok(EncodedAnimation {
            frames_written: stats.frames_written,
            frames_dir,
            video_path: job.out_path,
        })
    }
}

fn remove_frames(dir: &Path) {
    if let Err(e) = std::fs::remove_dir_all(dir) {
        tracing::warn!(dir = %dir.display(), error = %e, "failed to remove frame directory");
    }
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/run.rs"]
mod tests;
