//! Sprite Matrix main entry point.
//!
//! Plays sprite-sheet animations on a fixed-resolution pixel panel using:
//! - **bevy_ecs** for the engine state and the per-tick schedule
//! - **image** for decoding the sprite sheet
//! - a double-buffered display sink (terminal preview, PNG frames, or none)
//!
//! # Main Loop
//!
//! 1. Load `spritematrix.ini` (if present) and apply command-line overrides
//! 2. Load sprite metadata and the sprite sheet, validate every cell
//! 3. Build the ECS world and make the initial animation selection
//! 4. Tick at the target rate until Ctrl-C (or `--max-ticks`)
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config spritematrix.ini
//! ```

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::World;
use clap::Parser;
use crossbeam_channel::{Receiver, bounded};
use log::{error, info, warn};

use spritematrix::display::{DisplaySink, MemorySink, PngSink, SinkKind, TerminalSink};
use spritematrix::engine::{build_schedule, build_world};
use spritematrix::error::Result;
use spritematrix::frameloop::{FrameLoop, StopReason};
use spritematrix::resources::engineconfig::{DEFAULT_CONFIG_PATH, EngineConfig};
use spritematrix::resources::scene::Scene;

/// Sprite Matrix
#[derive(Parser)]
#[command(
    version,
    about = "Plays sprite-sheet animations on a fixed-resolution pixel panel."
)]
struct Cli {
    /// INI configuration file (default: ./spritematrix.ini when it exists).
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Target frames per second; values below 1 run at 1.
    #[arg(long)]
    fps: Option<f32>,

    /// Output: terminal, png or null.
    #[arg(long)]
    sink: Option<SinkKind>,

    /// Directory for the png sink.
    #[arg(long, value_name = "DIR")]
    png_dir: Option<PathBuf>,

    /// Sprite sheet image.
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,

    /// Sprite sheet metadata (JSON).
    #[arg(long, value_name = "PATH")]
    metadata: Option<PathBuf>,

    /// Scene: sprites, pan or scanline.
    #[arg(long)]
    scene: Option<Scene>,

    /// Seed for random animation selection.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many frames.
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Write the effective configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

impl Cli {
    fn load_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let mut config = EngineConfig::with_path(path);
                config.load_from_file()?;
                config
            }
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                let mut config = EngineConfig::new();
                config.load_from_file()?;
                config
            }
            None => {
                info!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
                EngineConfig::new()
            }
        };

        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }
        if let Some(sink) = self.sink {
            config.sink = sink;
        }
        if let Some(dir) = &self.png_dir {
            config.png_dir = dir.clone();
        }
        if let Some(image) = &self.image {
            config.image = Some(image.clone());
        }
        if let Some(metadata) = &self.metadata {
            config.metadata = Some(metadata.clone());
        }
        if let Some(scene) = self.scene {
            config.set_scene(scene);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(StopReason::Interrupted) => {
            println!("Exiting...");
        }
        Ok(StopReason::TickLimit) => {}
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<StopReason> {
    let mut config = cli.load_config()?;

    // Early-exit: write the configuration and quit (no assets needed)
    if let Some(path) = &cli.write_config {
        config.config_path = path.clone();
        config.save_to_file()?;
        println!("Configuration written to {}", path.display());
        return Ok(StopReason::TickLimit);
    }

    let world = build_world(&config)?;

    let (tx, rx) = bounded::<()>(1);
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = tx.try_send(());
    }) {
        warn!("Could not install Ctrl-C handler: {}", e);
    }

    let (width, height) = config.panel_size();
    let reason = match config.sink {
        SinkKind::Terminal => drive(world, TerminalSink::stdout(width, height), &config, cli, rx),
        SinkKind::Png => drive(
            world,
            PngSink::new(width, height, &config.png_dir)?,
            &config,
            cli,
            rx,
        ),
        SinkKind::Null => drive(world, MemorySink::new(width, height), &config, cli, rx),
    };
    Ok(reason)
}

fn drive<S: DisplaySink>(
    world: World,
    sink: S,
    config: &EngineConfig,
    cli: &Cli,
    shutdown: Receiver<()>,
) -> StopReason {
    let mut frame_loop =
        FrameLoop::new(world, build_schedule(), sink, config.target_fps).with_shutdown(shutdown);
    if let Some(max) = cli.max_ticks {
        frame_loop = frame_loop.with_max_ticks(max);
    }
    frame_loop.run()
}
