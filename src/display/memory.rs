//! In-memory sink.
//!
//! Nothing leaves the process. Used for headless runs (`--sink null`) and to
//! inspect what the loop presented in tests.

use image::RgbImage;

use super::{BackBuffer, DisplaySink, DoubleBuffer, blit, clear_frame};

#[derive(Debug, Clone)]
pub struct MemorySink {
    frames: DoubleBuffer<RgbImage>,
    presented: u64,
    history: Option<Vec<RgbImage>>,
}

impl MemorySink {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frames: DoubleBuffer::new(RgbImage::new(width, height), RgbImage::new(width, height)),
            presented: 0,
            history: None,
        }
    }

    /// Also keep a copy of every presented frame.
    pub fn with_history(mut self) -> Self {
        self.history = Some(Vec::new());
        self
    }

    /// The frame currently on screen.
    pub fn front(&self) -> &RgbImage {
        self.frames.front()
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Presented frames in order; empty unless built [`with_history`](Self::with_history).
    pub fn history(&self) -> &[RgbImage] {
        self.history.as_deref().unwrap_or(&[])
    }
}

impl DisplaySink for MemorySink {
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
        self.presented += 1;
        if let Some(history) = self.history.as_mut() {
            history.push(self.frames.front().clone());
        }
        back
    }
}
