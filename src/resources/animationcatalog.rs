//! Animation catalog resource.
//!
//! The catalog is the immutable list of named animations a sprite sheet
//! provides. Each entry binds a name to an atlas row, a frame count and the
//! minimum number of full passes it plays once selected. An optional explicit
//! play order switches the sequencer from random to ordered selection.
//!
//! Catalogs are usually built from a JSON metadata file next to the sprite
//! sheet image:
//!
//! ```json
//! {
//!   "cell_width": 32,
//!   "cell_height": 32,
//!   "animations": [
//!     { "name": "idle", "frames": 4, "row": 0, "min_loops": 2 },
//!     { "name": "walk", "frames": 6, "row": 1 }
//!   ],
//!   "play_order": ["idle", "walk"]
//! }
//! ```

use std::path::Path;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

fn default_min_loops() -> u32 {
    1
}

/// One named animation: a run of `frames` cells on atlas row `row`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationRow {
    pub name: String,
    /// Number of cells, read left to right starting at column 0.
    pub frames: u32,
    /// Atlas row index.
    pub row: u32,
    /// Full passes to play before the next selection.
    #[serde(default = "default_min_loops")]
    pub min_loops: u32,
}

impl AnimationRow {
    pub fn new(name: impl Into<String>, frames: u32, row: u32) -> Self {
        Self {
            name: name.into(),
            frames,
            row,
            min_loops: 1,
        }
    }

    pub fn with_min_loops(mut self, min_loops: u32) -> Self {
        self.min_loops = min_loops;
        self
    }
}

/// Read-only set of animations, keyed by name, plus the optional play order.
#[derive(Resource, Debug, Clone, Default)]
pub struct AnimationCatalog {
    rows: Vec<AnimationRow>,
    play_order: Vec<String>,
    by_name: FxHashMap<String, usize>,
}

impl AnimationCatalog {
    /// Build and validate a catalog.
    ///
    /// Fails on duplicate names, zero frame or loop counts, and play order
    /// entries that do not name a row.
    pub fn new(rows: Vec<AnimationRow>, play_order: Vec<String>) -> Result<Self> {
        let mut by_name = FxHashMap::default();
        for (idx, row) in rows.iter().enumerate() {
            if row.frames == 0 {
                return Err(EngineError::InvalidAnimation {
                    name: row.name.clone(),
                    reason: "frame count must be at least 1".into(),
                });
            }
            if row.min_loops == 0 {
                return Err(EngineError::InvalidAnimation {
                    name: row.name.clone(),
                    reason: "min_loops must be at least 1".into(),
                });
            }
            if by_name.insert(row.name.clone(), idx).is_some() {
                return Err(EngineError::DuplicateAnimation(row.name.clone()));
            }
        }
        if let Some(missing) = play_order.iter().find(|n| !by_name.contains_key(*n)) {
            return Err(EngineError::UnknownInPlayOrder(missing.clone()));
        }
        Ok(Self {
            rows,
            play_order,
            by_name,
        })
    }

    pub fn lookup(&self, name: &str) -> Option<&AnimationRow> {
        self.by_name.get(name).map(|&idx| &self.rows[idx])
    }

    /// Random selection applies when no play order was given.
    pub fn is_random_mode(&self) -> bool {
        self.play_order.is_empty()
    }

    pub fn rows(&self) -> &[AnimationRow] {
        &self.rows
    }

    pub fn play_order(&self) -> &[String] {
        &self.play_order
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Sprite sheet metadata as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteSheetMeta {
    pub cell_width: u32,
    pub cell_height: u32,
    #[serde(default)]
    pub animations: Vec<AnimationRow>,
    #[serde(default)]
    pub play_order: Vec<String>,
}

impl SpriteSheetMeta {
    /// Load sprite sheet metadata from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata_err = |source: Box<dyn std::error::Error + Send + Sync>| {
            EngineError::Metadata {
                path: path.to_path_buf(),
                source,
            }
        };
        let content = std::fs::read_to_string(path).map_err(|e| metadata_err(Box::new(e)))?;
        let meta: SpriteSheetMeta =
            serde_json::from_str(&content).map_err(|e| metadata_err(Box::new(e)))?;
        Ok(meta)
    }

    /// Consume the metadata into a validated catalog.
    pub fn into_catalog(self) -> Result<AnimationCatalog> {
        AnimationCatalog::new(self.animations, self.play_order)
    }
}
