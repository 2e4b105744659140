//! Animation selection event and observer.
//!
//! The sequencer triggers an [`AnimationSelected`] every time its selection
//! policy picks an animation, including the very first pick. The observer in
//! this module only reports it; playback does not depend on anyone listening.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

/// Emitted when the sequencer starts playing an animation.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct AnimationSelected {
    pub name: String,
    /// Tick on which the animation starts.
    pub tick: u64,
}

/// Observer that logs each selection.
pub fn log_animation_selected(trigger: On<AnimationSelected>) {
    let event = trigger.event();
    info!("Tick {}: playing '{}'", event.tick, event.name);
}
