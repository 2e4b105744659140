//! Engine systems.
//!
//! This module groups the per-tick logic that advances the sequencer and
//! composes frames.
//!
//! Submodules overview
//! - [`compositor`] – center sprites and cut panel-sized regions
//! - [`render`] – compose the current scene into a frame
//! - [`sequencer`] – advance the animation state machine and select animations
//! - [`time`] – update the tick clock

pub mod compositor;
pub mod render;
pub mod sequencer;
pub mod time;
