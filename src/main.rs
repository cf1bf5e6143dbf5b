//! Render a scene file to an image
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use weekend_tracer::scene::SceneConfig;

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Path trace a scene of spheres")]
struct Args {
    /// YAML scene description; renders the built-in scene when omitted
    scene: Option<PathBuf>,

    /// Output image (.ppm, .png, or anything else the image crate can encode)
    #[arg(short, long, default_value = "image.png")]
    output: PathBuf,

    /// Override the image width
    #[arg(long)]
    width: Option<u32>,

    /// Override the samples per pixel
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    samples: Option<u32>,

    /// Override the maximum bounce depth
    #[arg(long)]
    max_depth: Option<u32>,

    /// Seed for a reproducible render
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Don't draw a progress bar
    #[arg(long)]
    no_progress: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.clone().into())
        .parse_default_env()
        .init();

    let mut config = match &args.scene {
        Some(path) => SceneConfig::from_path(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => {
            info!("No scene given, rendering the built-in one");
            SceneConfig::default_scene().context("built-in scene is malformed")?
        }
    };
    if let Some(width) = args.width {
        config.camera.image_width = width;
    }
    if let Some(samples) = args.samples {
        config.camera.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        config.camera.max_depth = max_depth;
    }

    let scene = config.build().context("failed to build scene")?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame = scene
        .camera
        .render(&scene.world, &mut rng, !args.no_progress);

    frame
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    Ok(())
}
