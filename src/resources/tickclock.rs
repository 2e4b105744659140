//! Tick clock resource.
//!
//! Counts render ticks and the wall-clock time since the loop started. Scenes
//! that move on their own (pan, scanline) derive their position from `ticks`.

use std::time::Duration;

use bevy_ecs::prelude::Resource;

/// Smallest rate the loop will run at.
pub const MIN_FPS: f32 = 1.0;

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct TickClock {
    /// Ticks completed before the current one.
    pub ticks: u64,
    /// Seconds since the first tick.
    pub elapsed: f32,
}

/// Delay between ticks for a target rate.
///
/// Rates below one per second (and NaN) clamp to one; an infinite rate means
/// no delay at all.
pub fn frame_delay(fps: f32) -> Duration {
    let fps = if fps.is_nan() { MIN_FPS } else { fps.max(MIN_FPS) };
    Duration::from_secs_f32(1.0 / fps)
}
