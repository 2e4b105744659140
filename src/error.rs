//! Engine error types.
//!
//! Every variant here is a setup-time failure. Once the frame loop is running
//! with a validated catalog and a decoded atlas, ticks do not fail.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building the engine from its configuration and assets.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or inconsistent settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// Two catalog entries share a name.
    #[error("animation '{0}' is defined more than once")]
    DuplicateAnimation(String),

    /// The explicit play order names an animation the catalog does not have.
    #[error("play order references unknown animation '{0}'")]
    UnknownInPlayOrder(String),

    /// A catalog entry has a zero frame count or zero minimum loop count.
    #[error("animation '{name}' is invalid: {reason}")]
    InvalidAnimation { name: String, reason: String },

    /// A cell rectangle does not fit inside the decoded atlas.
    #[error(
        "cell row {row} frame {frame} ({cell_w}x{cell_h} at {x},{y}) exceeds atlas {atlas_w}x{atlas_h}"
    )]
    OutOfBounds {
        row: u32,
        frame: u32,
        x: u32,
        y: u32,
        cell_w: u32,
        cell_h: u32,
        atlas_w: u32,
        atlas_h: u32,
    },

    /// The sprite sheet image is missing or not a supported encoding.
    #[error("failed to decode image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The sprite sheet metadata file is missing or not valid JSON.
    #[error("failed to read sprite metadata {path:?}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// True for the configuration class (catalog or atlas mismatch).
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            EngineError::Config(_)
                | EngineError::DuplicateAnimation(_)
                | EngineError::UnknownInPlayOrder(_)
                | EngineError::InvalidAnimation { .. }
                | EngineError::OutOfBounds { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
