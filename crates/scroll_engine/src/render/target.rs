//! Render target abstraction
//!
//! The scene graph never talks to a graphics API. Nodes describe what to
//! draw (a textured rectangle or a string) together with a world
//! transform, and a [`RenderTarget`] implementation turns that into actual
//! draw calls.

use crate::assets::{FontId, TextureId};
use crate::foundation::math::{FloatRect, IntRect, Mat3, Vec2};

/// Anything the scene graph can draw into
pub trait RenderTarget {
    /// Set the camera used for the following draw calls
    fn set_view(&mut self, view: &View);

    /// Draw `texture_rect` of `texture` with the given transform
    fn draw_sprite(&mut self, texture: TextureId, texture_rect: IntRect, transform: &Mat3);

    /// Draw a string with the given transform
    fn draw_text(&mut self, font: FontId, text: &str, character_size: u32, transform: &Mat3);
}

/// 2D camera: a rectangle of the world, given by center and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// Center of the view in world coordinates
    pub center: Vec2,
    /// Size of the view in world units
    pub size: Vec2,
}

impl View {
    /// Create a view
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Move the view by an offset
    pub fn move_by(&mut self, offset: Vec2) {
        self.center += offset;
    }

    /// World-space rectangle covered by the view
    pub fn bounds(&self) -> FloatRect {
        FloatRect::new(
            self.center.x - self.size.x * 0.5,
            self.center.y - self.size.y * 0.5,
            self.size.x,
            self.size.y,
        )
    }
}

/// A textured rectangle with its own local origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    texture: TextureId,
    texture_rect: IntRect,
    origin: Vec2,
}

impl Sprite {
    /// Create a sprite showing `texture_rect` of `texture`
    pub fn new(texture: TextureId, texture_rect: IntRect) -> Self {
        Self {
            texture,
            texture_rect,
            origin: Vec2::zeros(),
        }
    }

    /// Create a sprite whose origin is its center
    pub fn centered(texture: TextureId, texture_rect: IntRect) -> Self {
        let mut sprite = Self::new(texture, texture_rect);
        sprite.origin = texture_rect.size() * 0.5;
        sprite
    }

    /// Texture this sprite samples from
    pub fn texture(&self) -> TextureId {
        self.texture
    }

    /// Area of the texture shown
    pub fn texture_rect(&self) -> IntRect {
        self.texture_rect
    }

    /// Bounds in the owning node's local coordinates
    pub fn local_bounds(&self) -> FloatRect {
        let size = self.texture_rect.size();
        FloatRect::new(-self.origin.x, -self.origin.y, size.x, size.y)
    }

    /// Draw with the owning node's world transform
    pub fn draw(&self, target: &mut dyn RenderTarget, transform: &Mat3) {
        let local = Mat3::new_translation(&-self.origin);
        target.draw_sprite(self.texture, self.texture_rect, &(transform * local));
    }
}
