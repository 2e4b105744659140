//! Event types and observers used by the engine.
//!
//! Submodules:
//! - [`animation`] – notification that the sequencer picked a new animation
pub mod animation;
