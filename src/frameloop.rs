//! Fixed-cadence frame loop.
//!
//! Each tick:
//! 1. Clear the back buffer handed out by the sink.
//! 2. Run the schedule (sequencer, then composition).
//! 3. Blit the [`ComposedFrame`] into the back buffer.
//! 4. Present it; the sink hands back the previously visible buffer.
//! 5. Update the [`TickClock`](crate::resources::tickclock::TickClock).
//!
//! Between ticks the loop waits one frame delay. The wait doubles as the
//! shutdown check: a message on the shutdown channel ends the loop before the
//! next tick starts, so no frame is ever presented half-drawn.

use std::time::{Duration, Instant};

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use log::{debug, info};

use crate::display::DisplaySink;
use crate::resources::composedframe::ComposedFrame;
use crate::resources::tickclock::frame_delay;
use crate::systems::time::update_tick_clock;

/// Why [`FrameLoop::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A shutdown request arrived.
    Interrupted,
    /// The configured tick limit was reached.
    TickLimit,
}

pub struct FrameLoop<S: DisplaySink> {
    world: World,
    schedule: Schedule,
    sink: S,
    back: Option<S::Buffer>,
    delay: Duration,
    shutdown: Option<Receiver<()>>,
    max_ticks: Option<u64>,
    last_tick: Option<Instant>,
}

impl<S: DisplaySink> FrameLoop<S> {
    /// Take ownership of the engine and the sink; allocates the extra buffer.
    pub fn new(world: World, schedule: Schedule, mut sink: S, target_fps: f32) -> Self {
        let back = sink.create_buffer();
        let delay = frame_delay(target_fps);
        info!("Frame loop at {:.2} fps ({:?} per tick)", 1.0 / delay.as_secs_f32(), delay);
        Self {
            world,
            schedule,
            sink,
            back: Some(back),
            delay,
            shutdown: None,
            max_ticks: None,
            last_tick: None,
        }
    }

    /// Stop when a message arrives on `rx`.
    pub fn with_shutdown(mut self, rx: Receiver<()>) -> Self {
        self.shutdown = Some(rx);
        self
    }

    /// Stop after `ticks` presented frames.
    pub fn with_max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = Some(ticks);
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Tear down the loop, returning the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Render and present one frame.
    pub fn tick(&mut self) {
        let Some(mut buffer) = self.back.take() else {
            return;
        };
        self.sink.clear(&mut buffer);
        self.schedule.run(&mut self.world);
        if let Some(placement) = &self.world.resource::<ComposedFrame>().0 {
            self.sink
                .draw_image(&mut buffer, &placement.image, placement.x, placement.y);
        }
        self.back = Some(self.sink.present_and_swap(buffer));

        let now = Instant::now();
        let dt = self
            .last_tick
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_tick = Some(now);
        update_tick_clock(&mut self.world, dt);
    }

    /// Tick until interrupted or the tick limit is hit.
    pub fn run(&mut self) -> StopReason {
        let mut ticks: u64 = 0;
        loop {
            if self.max_ticks.is_some_and(|max| ticks >= max) {
                info!("Tick limit of {} reached", ticks);
                return StopReason::TickLimit;
            }
            if self.shutdown_pending() {
                info!("Shutdown requested after {} ticks", ticks);
                return StopReason::Interrupted;
            }

            self.tick();
            ticks += 1;

            if self.wait_for_shutdown() {
                info!("Shutdown requested after {} ticks", ticks);
                return StopReason::Interrupted;
            }
        }
    }

    fn shutdown_pending(&self) -> bool {
        self.shutdown
            .as_ref()
            .is_some_and(|rx| rx.try_recv().is_ok())
    }

    /// Sleep one frame delay; true if a shutdown request arrived meanwhile.
    fn wait_for_shutdown(&mut self) -> bool {
        let Some(rx) = &self.shutdown else {
            std::thread::sleep(self.delay);
            return false;
        };
        match rx.recv_timeout(self.delay) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                debug!("Shutdown channel closed; running without it");
                self.shutdown = None;
                std::thread::sleep(self.delay);
                false
            }
        }
    }
}
