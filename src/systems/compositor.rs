//! Viewport placement.
//!
//! Pure functions mapping source pixels onto the fixed-size panel:
//! - [`place_centered`] centers a sprite cell, clamping negative offsets to 0.
//! - [`panel_region`] copies a panel-sized window out of any source image,
//!   filling whatever falls outside the source with black.
//! - [`pan_origin`] and [`scanline`] feed the pan and scanline scenes.

use image::{Rgb, RgbImage};

use crate::resources::composedframe::Placement;
use crate::resources::viewport::Viewport;

/// Colour of the scanline test pattern.
pub const SCANLINE_COLOR: Rgb<u8> = Rgb([255, 80, 0]);

/// Top-left offset that centers a `w x h` sprite; floor division, never negative.
pub fn center_offset(w: u32, h: u32, viewport: Viewport) -> (u32, u32) {
    (viewport.w.saturating_sub(w) / 2, viewport.h.saturating_sub(h) / 2)
}

/// Center a sprite on the panel.
///
/// Sprites larger than the panel are placed at 0 on that axis and left for
/// the sink to clip.
pub fn place_centered(sprite: RgbImage, viewport: Viewport) -> Placement {
    let (x, y) = center_offset(sprite.width(), sprite.height(), viewport);
    Placement {
        image: sprite,
        x: x as i64,
        y: y as i64,
    }
}

/// Panel-sized copy of `source` starting at source coordinate (x, y).
///
/// Any part of the window outside the source is black, so every (x, y) is
/// valid, including negative and far out of range.
pub fn panel_region(source: &RgbImage, x: i64, y: i64, viewport: Viewport) -> RgbImage {
    let mut out = RgbImage::new(viewport.w, viewport.h);

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = x.saturating_add(viewport.w as i64).min(source.width() as i64);
    let y1 = y.saturating_add(viewport.h as i64).min(source.height() as i64);
    if x0 >= x1 || y0 >= y1 {
        return out;
    }

    for sy in y0..y1 {
        for sx in x0..x1 {
            let pixel = *source.get_pixel(sx as u32, sy as u32);
            out.put_pixel((sx - x) as u32, (sy - y) as u32, pixel);
        }
    }
    out
}

/// Window origin along one axis for the pan scene.
///
/// With a non-zero step the window starts one panel-length before the source
/// and wraps after it has scrolled fully past the far edge. A zero step keeps
/// the axis at 0.
pub fn pan_origin(tick: u64, step: i32, source_extent: u32, view_extent: u32) -> i64 {
    if step == 0 {
        return 0;
    }
    let span = source_extent as i128 + view_extent as i128;
    let travelled = (tick as i128 * step as i128).rem_euclid(span);
    (travelled - view_extent as i128) as i64
}

/// One-pixel-high orange line on row `tick % height`.
pub fn scanline(tick: u64, viewport: Viewport) -> Placement {
    let y = if viewport.h == 0 {
        0
    } else {
        tick % viewport.h as u64
    };
    Placement {
        image: RgbImage::from_pixel(viewport.w, 1, SCANLINE_COLOR),
        x: 0,
        y: y as i64,
    }
}
