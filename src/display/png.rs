//! PNG sequence sink.
//!
//! Each presented frame is written to `<dir>/frame_NNNNNN.png`. Write
//! failures are logged and the loop keeps going.

use std::path::{Path, PathBuf};

use image::RgbImage;
use log::{info, warn};

use super::{BackBuffer, DisplaySink, DoubleBuffer, blit, clear_frame};
use crate::error::Result;

pub struct PngSink {
    frames: DoubleBuffer<RgbImage>,
    dir: PathBuf,
    written: u64,
}

impl PngSink {
    /// Creates `dir` if it does not exist.
    pub fn new(width: u32, height: u32, dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        info!("Writing frames to {:?}", dir);
        Ok(Self {
            frames: DoubleBuffer::new(RgbImage::new(width, height), RgbImage::new(width, height)),
            dir,
            written: 0,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    fn frame_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("frame_{:06}.png", index))
    }
}

impl DisplaySink for PngSink {
    type Buffer = BackBuffer;

    fn create_buffer(&mut self) -> BackBuffer {
        self.frames.back_buffer()
    }

    fn clear(&mut self, buffer: &mut BackBuffer) {
        clear_frame(self.frames.get_mut(buffer));
    }

    fn draw_image(&mut self, buffer: &mut BackBuffer, image: &RgbImage, x: i64, y: i64) {
        blit(self.frames.get_mut(buffer), image, x, y);
    }

    fn present_and_swap(&mut self, buffer: BackBuffer) -> BackBuffer {
        let back = self.frames.swap(buffer);
        let path = self.frame_path(self.written);
        match self.frames.front().save(&path) {
            Ok(()) => self.written += 1,
            Err(e) => warn!("Failed to write frame {:?}: {}", path, e),
        }
        back
    }
}
