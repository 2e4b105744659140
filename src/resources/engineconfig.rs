//! Engine configuration resource.
//!
//! Manages panel and asset settings loaded from an INI configuration file.
//! Provides defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [display]
//! width = 64
//! height = 32
//! target_fps = 50
//! sink = terminal
//! png_dir = ./frames
//!
//! [sprites]
//! image = ./assets/sheet.png
//! metadata = ./assets/sheet.json
//! seed = 1234
//!
//! [scene]
//! mode = sprites
//! pan_step_x = 1
//! pan_step_y = 0
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;

use crate::display::SinkKind;
use crate::error::{EngineError, Result};
use crate::resources::scene::Scene;

/// Default safe values for startup
const DEFAULT_WIDTH: u32 = 64;
const DEFAULT_HEIGHT: u32 = 32;
const DEFAULT_TARGET_FPS: f32 = 50.0;
const DEFAULT_PNG_DIR: &str = "./frames";
const DEFAULT_PAN_STEP: (i32, i32) = (1, 0);
pub const DEFAULT_CONFIG_PATH: &str = "./spritematrix.ini";

/// Engine configuration resource.
///
/// Everything here is read once before the first tick; nothing changes while
/// the loop runs.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Panel width in pixels.
    pub width: u32,
    /// Panel height in pixels.
    pub height: u32,
    /// Target ticks per second.
    pub target_fps: f32,
    /// Where presented frames go.
    pub sink: SinkKind,
    /// Output directory for the PNG sink.
    pub png_dir: PathBuf,
    /// Sprite sheet image.
    pub image: Option<PathBuf>,
    /// Sprite sheet metadata (JSON).
    pub metadata: Option<PathBuf>,
    /// Seed for random selection; unseeded when absent.
    pub seed: Option<u64>,
    /// What to draw.
    pub scene: Scene,
    /// Pixels the pan scene moves per tick, (x, y).
    pub pan_step: (i32, i32),
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn bad_value(section: &str, key: &str, err: String) -> EngineError {
    EngineError::Config(format!("[{}] {}: {}", section, key, err))
}

fn get_u32(config: &Ini, section: &str, key: &str) -> Result<Option<u32>> {
    config
        .getuint(section, key)
        .map_err(|e| bad_value(section, key, e))?
        .map(|v| u32::try_from(v).map_err(|e| bad_value(section, key, e.to_string())))
        .transpose()
}

fn get_i32(config: &Ini, section: &str, key: &str) -> Result<Option<i32>> {
    config
        .getint(section, key)
        .map_err(|e| bad_value(section, key, e))?
        .map(|v| i32::try_from(v).map_err(|e| bad_value(section, key, e.to_string())))
        .transpose()
}

impl EngineConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            sink: SinkKind::default(),
            png_dir: PathBuf::from(DEFAULT_PNG_DIR),
            image: None,
            metadata: None,
            seed: None,
            scene: Scene::default(),
            pan_step: DEFAULT_PAN_STEP,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values. Values that are
    /// present but malformed are configuration errors.
    pub fn load_from_file(&mut self) -> Result<()> {
        let mut config = Ini::new();
        config.load(&self.config_path).map_err(|e| {
            EngineError::Config(format!(
                "failed to load config file {:?}: {}",
                self.config_path, e
            ))
        })?;
        self.apply_ini(&config)?;

        info!(
            "Loaded config {:?}: {}x{} panel, fps={}, sink={:?}, scene={:?}",
            self.config_path, self.width, self.height, self.target_fps, self.sink, self.scene
        );

        Ok(())
    }

    /// Parse configuration from INI text; used for tests and embedded defaults.
    pub fn load_from_str(&mut self, text: &str) -> Result<()> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| EngineError::Config(format!("failed to parse config: {}", e)))?;
        self.apply_ini(&config)
    }

    fn apply_ini(&mut self, config: &Ini) -> Result<()> {
        // [display] section
        if let Some(width) = get_u32(config, "display", "width")? {
            self.width = width;
        }
        if let Some(height) = get_u32(config, "display", "height")? {
            self.height = height;
        }
        if let Some(fps) = config
            .getfloat("display", "target_fps")
            .map_err(|e| bad_value("display", "target_fps", e))?
        {
            self.target_fps = fps as f32;
        }
        if let Some(sink) = config.get("display", "sink") {
            self.sink = sink.parse()?;
        }
        if let Some(dir) = config.get("display", "png_dir") {
            self.png_dir = PathBuf::from(dir);
        }

        // [sprites] section
        if let Some(image) = config.get("sprites", "image") {
            self.image = Some(PathBuf::from(image));
        }
        if let Some(metadata) = config.get("sprites", "metadata") {
            self.metadata = Some(PathBuf::from(metadata));
        }
        if let Some(seed) = config
            .getuint("sprites", "seed")
            .map_err(|e| bad_value("sprites", "seed", e))?
        {
            self.seed = Some(seed);
        }

        // [scene] section
        if let Some(x) = get_i32(config, "scene", "pan_step_x")? {
            self.pan_step.0 = x;
        }
        if let Some(y) = get_i32(config, "scene", "pan_step_y")? {
            self.pan_step.1 = y;
        }
        let scene = match config.get("scene", "mode") {
            Some(mode) => mode.parse()?,
            None => self.scene,
        };
        self.set_scene(scene);

        self.validate()
    }

    /// Switch scenes; a pan scene takes its steps from `pan_step`.
    pub fn set_scene(&mut self, scene: Scene) {
        self.scene = match scene {
            Scene::Pan { .. } => Scene::Pan {
                step_x: self.pan_step.0,
                step_y: self.pan_step.1,
            },
            other => other,
        };
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::Config(format!(
                "panel size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<()> {
        let mut config = Ini::new();

        // [display] section
        config.set("display", "width", Some(self.width.to_string()));
        config.set("display", "height", Some(self.height.to_string()));
        config.set("display", "target_fps", Some(self.target_fps.to_string()));
        config.set("display", "sink", Some(self.sink.to_string()));
        config.set(
            "display",
            "png_dir",
            Some(self.png_dir.display().to_string()),
        );

        // [sprites] section
        if let Some(image) = &self.image {
            config.set("sprites", "image", Some(image.display().to_string()));
        }
        if let Some(metadata) = &self.metadata {
            config.set("sprites", "metadata", Some(metadata.display().to_string()));
        }
        if let Some(seed) = self.seed {
            config.set("sprites", "seed", Some(seed.to_string()));
        }

        // [scene] section
        let (mode, (step_x, step_y)) = match self.scene {
            Scene::Sprites => ("sprites", self.pan_step),
            Scene::Pan { step_x, step_y } => ("pan", (step_x, step_y)),
            Scene::Scanline => ("scanline", self.pan_step),
        };
        config.set("scene", "mode", Some(mode.to_string()));
        config.set("scene", "pan_step_x", Some(step_x.to_string()));
        config.set("scene", "pan_step_y", Some(step_y.to_string()));

        config.write(&self.config_path)?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the panel size.
    pub fn panel_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
