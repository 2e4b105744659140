//! Tick clock update.
//!
//! Updates the shared [`TickClock`](crate::resources::tickclock::TickClock)
//! resource once per presented frame.
use bevy_ecs::prelude::*;

use crate::resources::tickclock::TickClock;

/// Count a finished tick and add its wall-clock duration.
///
/// Called by the frame loop after present, so systems see the index of the
/// tick they are running in.
pub fn update_tick_clock(world: &mut World, dt: f32) {
    let mut clock = world.resource_mut::<TickClock>();
    clock.ticks += 1;
    clock.elapsed += dt;
}
