//! Display sinks.
//!
//! A sink is the hardware side of the panel: it hands out a writable back
//! buffer, draws opaque RGB images into it, and on present makes it the
//! visible frame and returns the previous one for reuse.
//!
//! Submodules overview
//! - [`doublebuffer`] – two-slot buffer arena with a front index
//! - [`memory`] – keeps frames in memory, for headless runs and tests
//! - [`terminal`] – 24-bit colour preview in a terminal
//! - [`png`] – writes every presented frame to a PNG file

pub mod doublebuffer;
pub mod memory;
pub mod png;
pub mod terminal;

use std::fmt;
use std::str::FromStr;

use image::{Rgb, RgbImage, imageops};

use crate::error::EngineError;

pub use doublebuffer::{BackBuffer, DoubleBuffer};
pub use memory::MemorySink;
pub use png::PngSink;
pub use terminal::TerminalSink;

/// The double-buffered output the frame loop draws into.
pub trait DisplaySink {
    /// Writable frame buffer. Owned by the loop between handout and present.
    type Buffer;

    /// Hand out the extra off-screen buffer. Called once at startup.
    fn create_buffer(&mut self) -> Self::Buffer;

    /// Zero every pixel.
    fn clear(&mut self, buffer: &mut Self::Buffer);

    /// Opaque blit with `image`'s top-left at (x, y); out-of-panel pixels are dropped.
    fn draw_image(&mut self, buffer: &mut Self::Buffer, image: &RgbImage, x: i64, y: i64);

    /// Make `buffer` visible at the next refresh and return the previous one.
    fn present_and_swap(&mut self, buffer: Self::Buffer) -> Self::Buffer;
}

/// Which sink the binary drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkKind {
    #[default]
    Terminal,
    Png,
    Null,
}

impl FromStr for SinkKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "terminal" => Ok(SinkKind::Terminal),
            "png" => Ok(SinkKind::Png),
            "null" | "none" => Ok(SinkKind::Null),
            other => Err(EngineError::Config(format!("unknown sink '{}'", other))),
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SinkKind::Terminal => "terminal",
            SinkKind::Png => "png",
            SinkKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// Fill a frame with black.
pub fn clear_frame(frame: &mut RgbImage) {
    frame.pixels_mut().for_each(|p| *p = Rgb([0, 0, 0]));
}

/// Copy `image` into `frame` at (x, y), clipping at the frame edges.
pub fn blit(frame: &mut RgbImage, image: &RgbImage, x: i64, y: i64) {
    imageops::replace(frame, image, x, y);
}
