//! Frame composition system.
//!
//! Turns the current scene into a [`ComposedFrame`]: the image the frame loop
//! blits into the back buffer and where it goes.
//!
//! - `Sprites`: crop the sequencer's [`CurrentCell`] from the atlas and
//!   center it.
//! - `Pan`: copy a panel-sized window out of the whole sheet.
//! - `Scanline`: a line sweeping down the panel.

use bevy_ecs::prelude::*;
use log::error;

use crate::resources::composedframe::{ComposedFrame, Placement};
use crate::resources::scene::Scene;
use crate::resources::sequencerstate::CurrentCell;
use crate::resources::spriteatlas::SpriteAtlas;
use crate::resources::tickclock::TickClock;
use crate::resources::viewport::Viewport;
use crate::systems::compositor::{pan_origin, panel_region, place_centered, scanline};

/// Compose this tick's frame.
///
/// Contract
/// - Reads [`Scene`], [`Viewport`], [`TickClock`], [`CurrentCell`] and the
///   optional [`SpriteAtlas`].
/// - Writes [`ComposedFrame`]; `None` leaves the cleared buffer as is.
pub fn compose_frame_system(
    scene: Res<Scene>,
    viewport: Res<Viewport>,
    clock: Res<TickClock>,
    current: Option<Res<CurrentCell>>,
    atlas: Option<Res<SpriteAtlas>>,
    mut frame: ResMut<ComposedFrame>,
) {
    frame.0 = match *scene {
        Scene::Sprites => {
            let cell = current.and_then(|c| c.0);
            match (cell, atlas.as_deref()) {
                (Some(cell), Some(atlas)) => match atlas.crop(cell) {
                    Ok(sprite) => Some(place_centered(sprite, *viewport)),
                    Err(e) => {
                        // cells are validated at startup
                        error!("Skipping frame: {}", e);
                        None
                    }
                },
                _ => None,
            }
        }
        Scene::Pan { step_x, step_y } => atlas.as_deref().map(|atlas| {
            let x = pan_origin(clock.ticks, step_x, atlas.width(), viewport.w);
            let y = pan_origin(clock.ticks, step_y, atlas.height(), viewport.h);
            Placement {
                image: panel_region(atlas.image(), x, y, *viewport),
                x: 0,
                y: 0,
            }
        }),
        Scene::Scanline => Some(scanline(clock.ticks, *viewport)),
    };
}
