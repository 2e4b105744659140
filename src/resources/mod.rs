//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: configuration, sprite assets,
//! sequencer state, timing and the composed output frame.
//!
//! Overview
//! - `animationcatalog` – named animations and the optional play order
//! - `composedframe` – the image the frame loop blits this tick
//! - `engineconfig` – panel, asset and scene settings from the INI file
//! - `scene` – which scene the compose step draws
//! - `selection` – random and ordered selection policies
//! - `sequencerstate` – current animation, frame and loop counters
//! - `spriteatlas` – decoded sprite sheet and cell cropping
//! - `tickclock` – tick count, elapsed time and frame delay
//! - `viewport` – fixed panel dimensions
pub mod animationcatalog;
pub mod composedframe;
pub mod engineconfig;
pub mod scene;
pub mod selection;
pub mod sequencerstate;
pub mod spriteatlas;
pub mod tickclock;
pub mod viewport;
