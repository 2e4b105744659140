//! Engine assembly.
//!
//! Builds the ECS world and the per-tick schedule from an [`EngineConfig`].
//! All validation happens here, before the frame loop starts:
//!
//! 1. Load sprite metadata (JSON) into an [`AnimationCatalog`].
//! 2. Decode the sprite sheet into a [`SpriteAtlas`].
//! 3. Check every catalog cell against the atlas.
//! 4. Insert resources, register observers and make the initial selection.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use log::info;

use crate::error::{EngineError, Result};
use crate::events::animation::log_animation_selected;
use crate::resources::animationcatalog::{AnimationCatalog, SpriteSheetMeta};
use crate::resources::composedframe::ComposedFrame;
use crate::resources::engineconfig::EngineConfig;
use crate::resources::scene::Scene;
use crate::resources::selection::Selector;
use crate::resources::sequencerstate::{CurrentCell, SequencerState};
use crate::resources::spriteatlas::SpriteAtlas;
use crate::resources::tickclock::TickClock;
use crate::resources::viewport::Viewport;
use crate::systems::render::compose_frame_system;
use crate::systems::sequencer::{scene_is_sprites, sequencer_system, start_sequencer};

/// Everything the engine needs, already decoded and validated.
pub struct EngineParts {
    pub viewport: Viewport,
    pub scene: Scene,
    pub catalog: AnimationCatalog,
    pub atlas: Option<SpriteAtlas>,
    pub seed: Option<u64>,
}

impl EngineParts {
    /// Load and validate the assets named by `config`.
    pub fn load(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let viewport = Viewport::new(config.width, config.height);

        let meta = config
            .metadata
            .as_ref()
            .map(SpriteSheetMeta::load_from_file)
            .transpose()?;

        if matches!(config.scene, Scene::Sprites) && meta.is_none() {
            return Err(EngineError::Config(
                "the sprites scene needs [sprites] metadata".into(),
            ));
        }

        // a sprites scene with no animations draws nothing and needs no sheet
        let no_animations = matches!(config.scene, Scene::Sprites)
            && meta.as_ref().is_some_and(|meta| meta.animations.is_empty());
        let needs_atlas = config.scene.needs_atlas() && !no_animations;

        let atlas = match (&config.image, needs_atlas) {
            (Some(path), true) => {
                // without metadata (pan scene) the whole sheet is one cell
                let (cell_w, cell_h) = match &meta {
                    Some(meta) => (meta.cell_width, meta.cell_height),
                    None => image::image_dimensions(path).map_err(|source| {
                        EngineError::Decode {
                            path: path.clone(),
                            source,
                        }
                    })?,
                };
                Some(SpriteAtlas::load_from_file(path, cell_w, cell_h)?)
            }
            (None, true) => {
                return Err(EngineError::Config(format!(
                    "the {:?} scene needs a [sprites] image",
                    config.scene
                )));
            }
            (_, false) => None,
        };

        let catalog = match meta {
            Some(meta) => meta.into_catalog()?,
            None => AnimationCatalog::default(),
        };

        Self::new(viewport, config.scene, catalog, atlas, config.seed)
    }

    /// Assemble parts, checking the catalog against the atlas.
    pub fn new(
        viewport: Viewport,
        scene: Scene,
        catalog: AnimationCatalog,
        atlas: Option<SpriteAtlas>,
        seed: Option<u64>,
    ) -> Result<Self> {
        if viewport.w == 0 || viewport.h == 0 {
            return Err(EngineError::Config(format!(
                "panel size must be non-zero, got {}x{}",
                viewport.w, viewport.h
            )));
        }
        match &atlas {
            Some(atlas) => atlas.validate_catalog(&catalog)?,
            None if !catalog.is_empty() && matches!(scene, Scene::Sprites) => {
                return Err(EngineError::Config(
                    "animations are configured but no sprite sheet is loaded".into(),
                ));
            }
            None => {}
        }
        info!(
            "Engine: {}x{} panel, scene {:?}, {} animation(s), {} selection",
            viewport.w,
            viewport.h,
            scene,
            catalog.len(),
            if catalog.is_random_mode() {
                "random"
            } else {
                "ordered"
            }
        );
        Ok(Self {
            viewport,
            scene,
            catalog,
            atlas,
            seed,
        })
    }

    /// Build the world: resources, observers and the initial selection.
    pub fn into_world(self) -> World {
        let mut world = World::new();
        world.spawn(Observer::new(log_animation_selected));
        world.flush();

        world.insert_resource(Selector::for_catalog(&self.catalog, self.seed));
        world.insert_resource(self.catalog);
        if let Some(atlas) = self.atlas {
            world.insert_resource(atlas);
        }
        world.insert_resource(self.viewport);
        world.insert_resource(self.scene);
        world.insert_resource(TickClock::default());
        world.insert_resource(ComposedFrame::default());

        if matches!(self.scene, Scene::Sprites) {
            start_sequencer(&mut world);
        } else {
            world.init_resource::<SequencerState>();
            world.init_resource::<CurrentCell>();
        }
        world
    }
}

/// The per-tick schedule: sequencer, then composition. Single-threaded.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems((sequencer_system.run_if(scene_is_sprites), compose_frame_system).chain());
    schedule
}

/// Load, validate and build the world for `config`.
pub fn build_world(config: &EngineConfig) -> Result<World> {
    Ok(EngineParts::load(config)?.into_world())
}
