//! Viewport resource.
//!
//! Stores the fixed output dimensions of the panel in pixels. Every composed
//! frame has exactly this size.

use bevy_ecs::prelude::Resource;

/// Panel size in pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

impl Viewport {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}
