//! Sprite Matrix library.
//!
//! Sprite-sheet animation engine for fixed-resolution pixel panels. This
//! module exposes the engine's resources, systems, events, display sinks and
//! the frame loop for use in integration tests and as a reusable library.

pub mod display;
pub mod engine;
pub mod error;
pub mod events;
pub mod frameloop;
pub mod resources;
pub mod systems;
