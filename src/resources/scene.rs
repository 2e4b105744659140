//! Scene selection resource.
//!
//! Decides what the compose step draws each tick.

use std::str::FromStr;

use bevy_ecs::prelude::Resource;

use crate::error::EngineError;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scene {
    /// Sequenced sprite animations, centered on the panel.
    #[default]
    Sprites,
    /// Scroll the panel across the whole sprite sheet.
    Pan { step_x: i32, step_y: i32 },
    /// Sweeping horizontal line, no atlas required.
    Scanline,
}

impl Scene {
    pub fn needs_atlas(&self) -> bool {
        !matches!(self, Scene::Scanline)
    }
}

impl FromStr for Scene {
    type Err = EngineError;

    /// Parses the mode name; `pan` starts with a one-pixel horizontal step.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sprites" => Ok(Scene::Sprites),
            "pan" => Ok(Scene::Pan {
                step_x: 1,
                step_y: 0,
            }),
            "scanline" => Ok(Scene::Scanline),
            other => Err(EngineError::Config(format!("unknown scene mode '{}'", other))),
        }
    }
}
