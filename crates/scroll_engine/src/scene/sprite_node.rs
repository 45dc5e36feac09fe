//! Static textured node, used for backgrounds

use std::any::Any;

use crate::assets::TextureId;
use crate::foundation::math::{IntRect, Mat3};
use crate::render::{RenderTarget, Sprite};

use super::node::NodeBehavior;

/// A node that only draws a sprite
///
/// The sprite's top-left corner sits at the node's origin. The texture rect
/// may be larger than the texture, in which case the backend repeats it.
#[derive(Debug, Clone)]
pub struct SpriteNode {
    sprite: Sprite,
}

impl SpriteNode {
    /// Show `texture_rect` of `texture`
    pub fn new(texture: TextureId, texture_rect: IntRect) -> Self {
        Self {
            sprite: Sprite::new(texture, texture_rect),
        }
    }

    /// The drawn sprite
    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }
}

impl NodeBehavior for SpriteNode {
    fn draw_current(&self, target: &mut dyn RenderTarget, transform: &Mat3) {
        self.sprite.draw(target, transform);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
