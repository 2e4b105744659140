//! Playback state of the animation sequencer.
//!
//! This is plain data. [`crate::systems::sequencer::advance`] takes it by
//! value and hands back the next state, so it can be driven without a world.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::resources::spriteatlas::CellRef;

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerState {
    /// Name of the playing animation; `None` only for an empty catalog.
    pub current: Option<String>,
    /// Frame to draw on the next tick, always below the frame count.
    pub frame_index: u32,
    /// Full passes completed since the current animation was selected.
    pub loop_count: u32,
    /// Next position in the play order (ordered mode only).
    pub cursor: usize,
}

impl SequencerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `name` from its first frame.
    pub fn select(&mut self, name: Option<String>) {
        self.current = name;
        self.frame_index = 0;
        self.loop_count = 0;
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }
}

/// Cell the sequencer emitted for drawing this tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurrentCell(pub Option<CellRef>);
