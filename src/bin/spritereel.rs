use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use spritereel::{
    FfmpegEncoder, FfmpegEncoderOpts, Fps, Pipeline, ReelConfig, UnitId, resolve_animations,
};

/// Render unit animations from spritesheet geometry and frame tables into videos.
#[derive(Parser, Debug)]
#[command(name = "spritereel", version, about)]
struct Cli {
    /// Directory holding `unit_anime_<unit>.png` and the unit's CSV tables.
    input_dir: PathBuf,

    /// Directory the videos are written to.
    output_dir: PathBuf,

    /// Units to process.
    #[arg(short = 'u', long = "units", num_args = 1.., required = true)]
    units: Vec<String>,

    /// Animations to process (atk, dead, dying, idle, jump, limit_atk, magic_atk,
    /// magic_standby, move, standby, win_before, win).
    #[arg(short = 'a', long = "animations", num_args = 1.., required = true)]
    animations: Vec<String>,

    /// JSON configuration file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Output container extension (webm, mp4, ...).
    #[arg(long)]
    ext: Option<String>,

    /// Root directory for the numbered frame images.
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// Worker threads for sprite composition.
    #[arg(long)]
    threads: Option<usize>,

    /// Compose sprites on the calling thread only.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Delete frame directories after a successful encode.
    #[arg(long, default_value_t = false)]
    discard_frames: bool,

    /// Enable verbose logging.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("install log subscriber")?;

    let config = load_config(&cli)?;
    let animations = resolve_animations(&cli.animations)?;
    let units = cli
        .units
        .iter()
        .map(UnitId::new)
        .collect::<Result<Vec<_>, _>>()?;

    let encoder = FfmpegEncoder::new(FfmpegEncoderOpts {
        overwrite: config.overwrite,
        ..FfmpegEncoderOpts::default()
    });
    let pipeline = Pipeline::new(
        &cli.input_dir,
        &cli.output_dir,
        config,
        Box::new(encoder),
    )?;

    let report = pipeline.run(&units, &animations);
    for line in report.failure_lines() {
        eprintln!("failed: {line}");
    }
    if !report.is_success() {
        anyhow::bail!(
            "{} failure(s), {} video(s) written",
            report.failures(),
            report.encoded()
        );
    }

    eprintln!(
        "wrote {} video(s) to {}",
        report.encoded(),
        cli.output_dir.display()
    );
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<ReelConfig> {
    let mut config = match &cli.config {
        Some(path) => ReelConfig::from_path(path)?,
        None => ReelConfig::default(),
    };
    if let Some(fps) = cli.fps {
        config.fps = Fps::new(fps)?;
    }
    if let Some(ext) = &cli.ext {
        config.container_ext = ext.clone();
    }
    if let Some(dir) = &cli.work_dir {
        config.work_dir = Some(dir.clone());
    }
    if let Some(n) = cli.threads {
        config.threading.threads = Some(n);
    }
    if cli.sequential {
        config.threading.parallel = false;
    }
    if cli.discard_frames {
        config.keep_frames = false;
    }
    config.validate()?;
    Ok(config)
}
