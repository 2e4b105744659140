//! Sprite atlas resource.
//!
//! Holds the decoded sprite sheet as an opaque RGB grid and cuts fixed-size
//! cells out of it by row and frame column. Transparency is resolved once at
//! load time by compositing onto black, so every crop is fully opaque.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use image::{RgbImage, RgbaImage, imageops};
use log::info;

use crate::error::{EngineError, Result};
use crate::resources::animationcatalog::AnimationCatalog;

/// Row/column address of one atlas cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: u32,
    pub frame: u32,
}

#[derive(Resource, Debug, Clone)]
pub struct SpriteAtlas {
    image: RgbImage,
    cell_width: u32,
    cell_height: u32,
}

impl SpriteAtlas {
    pub fn new(image: RgbImage, cell_width: u32, cell_height: u32) -> Result<Self> {
        if cell_width == 0 || cell_height == 0 {
            return Err(EngineError::Config(format!(
                "sprite cell size must be non-zero, got {}x{}",
                cell_width, cell_height
            )));
        }
        Ok(Self {
            image,
            cell_width,
            cell_height,
        })
    }

    /// Decode an image file and flatten its alpha onto black.
    pub fn load_from_file(path: impl AsRef<Path>, cell_width: u32, cell_height: u32) -> Result<Self> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| EngineError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let rgb = flatten_onto_black(&decoded.to_rgba8());
        info!(
            "Loaded sprite sheet {:?}: {}x{}, cells {}x{}",
            path,
            rgb.width(),
            rgb.height(),
            cell_width,
            cell_height
        );
        Self::new(rgb, cell_width, cell_height)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    /// The whole decoded sheet.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Check that a cell lies fully inside the sheet.
    pub fn check_cell(&self, cell: CellRef) -> Result<(u32, u32)> {
        let out_of_bounds = || EngineError::OutOfBounds {
            row: cell.row,
            frame: cell.frame,
            x: cell.frame.saturating_mul(self.cell_width),
            y: cell.row.saturating_mul(self.cell_height),
            cell_w: self.cell_width,
            cell_h: self.cell_height,
            atlas_w: self.image.width(),
            atlas_h: self.image.height(),
        };
        // u64 so huge indices cannot wrap into range
        let x = cell.frame as u64 * self.cell_width as u64;
        let y = cell.row as u64 * self.cell_height as u64;
        if x + self.cell_width as u64 > self.image.width() as u64
            || y + self.cell_height as u64 > self.image.height() as u64
        {
            return Err(out_of_bounds());
        }
        Ok((x as u32, y as u32))
    }

    /// Copy one cell out of the sheet.
    pub fn crop(&self, cell: CellRef) -> Result<RgbImage> {
        let (x, y) = self.check_cell(cell)?;
        Ok(imageops::crop_imm(&self.image, x, y, self.cell_width, self.cell_height).to_image())
    }

    /// Verify every frame of every catalog entry fits inside the sheet.
    ///
    /// Checking the last frame of each row covers the whole run, since cells
    /// grow rightward and the row is fixed.
    pub fn validate_catalog(&self, catalog: &AnimationCatalog) -> Result<()> {
        for anim in catalog.rows() {
            self.check_cell(CellRef {
                row: anim.row,
                frame: anim.frames - 1,
            })?;
        }
        Ok(())
    }
}

/// Composite RGBA pixels over an opaque black background.
pub fn flatten_onto_black(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let scale = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
        image::Rgb([scale(r), scale(g), scale(b)])
    })
}
