//! Composed frame resource.
//!
//! Output of the compose step: the image to blit into the back buffer this
//! tick and where to put it. `None` means the tick draws nothing and the
//! cleared buffer is presented as is.

use bevy_ecs::prelude::Resource;
use image::RgbImage;

/// An image and the top-left panel coordinate it is drawn at.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub image: RgbImage,
    pub x: i64,
    pub y: i64,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ComposedFrame(pub Option<Placement>);
