//! Terminal preview sink.
//!
//! Renders each presented frame with 24-bit ANSI colour. Every text cell is an
//! upper half block: the foreground colour is the top pixel, the background the
//! pixel below it, so a 64x32 panel fits in 64x16 characters.

use std::io::{self, Stdout, Write};

use image::{Rgb, RgbImage};
use log::warn;

use super::{BackBuffer, DisplaySink, DoubleBuffer, blit, clear_frame};

const HOME: &str = "\x1b[H";
const CLEAR_SCREEN: &str = "\x1b[2J";
const RESET: &str = "\x1b[0m";
const UPPER_HALF: char = '\u{2580}';

pub struct TerminalSink<W: Write = Stdout> {
    frames: DoubleBuffer<RgbImage>,
    out: W,
    started: bool,
}

impl TerminalSink<Stdout> {
    pub fn stdout(width: u32, height: u32) -> Self {
        Self::new(width, height, io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(width: u32, height: u32, out: W) -> Self {
        Self {
            frames: DoubleBuffer::new(RgbImage::new(width, height), RgbImage::new(width, height)),
            out,
            started: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_front(&mut self) -> io::Result<()> {
        let text = render_half_blocks(self.frames.front());
        if !self.started {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
            self.started = true;
        }
        self.out.write_all(HOME.as_bytes())?;
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}

/// ANSI text for a frame, two pixel rows per line.
pub fn render_half_blocks(frame: &RgbImage) -> String {
    let black = Rgb([0, 0, 0]);
    let mut text = String::new();
    for y in (0..frame.height()).step_by(2) {
        for x in 0..frame.width() {
            let Rgb([tr, tg, tb]) = *frame.get_pixel(x, y);
            let Rgb([br, bg, bb]) = if y + 1 < frame.height() {
                *frame.get_pixel(x, y + 1)
            } else {
                black
            };
            text.push_str(&format!(
                "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{}",
                tr, tg, tb, br, bg, bb, UPPER_HALF
            ));
        }
        text.push_str(RESET);
        text.push('\n');
    }
    text
}

impl<W: Write> DisplaySink for TerminalSink<W> {
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
        if let Err(e) = self.write_front() {
            warn!("Failed to write frame to terminal: {}", e);
        }
        back
    }
}
