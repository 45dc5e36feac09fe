//! Recorded draw commands
//!
//! [`DrawRecorder`] is a [`RenderTarget`] that stores every draw call as a
//! [`DrawCommand`] instead of rasterizing it. A backend can replay the
//! batch; headless hosts and tests inspect it directly.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut recorder = DrawRecorder::new();
//! world.draw(&mut recorder);
//! for command in recorder.commands() {
//!     backend.submit(command)?;
//! }
//! ```

use crate::assets::{FontId, TextureId};
use crate::foundation::math::{IntRect, Mat3};

use super::target::{RenderTarget, View};

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Textured rectangle
    Sprite {
        /// Source texture
        texture: TextureId,
        /// Area of the texture
        texture_rect: IntRect,
        /// Local-to-world transform of the rectangle's top-left corner
        transform: Mat3,
    },

    /// Text string
    Text {
        /// Font
        font: FontId,
        /// String to render
        text: String,
        /// Character size in pixels
        character_size: u32,
        /// Local-to-world transform
        transform: Mat3,
    },
}

/// Render target that records draw calls in submission order
#[derive(Debug, Default)]
pub struct DrawRecorder {
    view: Option<View>,
    commands: Vec<DrawCommand>,
}

impl DrawRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands, back to front
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Last view set on this target
    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    /// Number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Count sprites drawn from a texture area
    pub fn count_sprites(&self, texture_rect: IntRect) -> usize {
        self.commands
            .iter()
            .filter(|command| {
                matches!(command, DrawCommand::Sprite { texture_rect: rect, .. } if *rect == texture_rect)
            })
            .count()
    }

    /// Drop all recorded commands, keeping the allocation
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl RenderTarget for DrawRecorder {
    fn set_view(&mut self, view: &View) {
        self.view = Some(*view);
    }

    fn draw_sprite(&mut self, texture: TextureId, texture_rect: IntRect, transform: &Mat3) {
        self.commands.push(DrawCommand::Sprite {
            texture,
            texture_rect,
            transform: *transform,
        });
    }

    fn draw_text(&mut self, font: FontId, text: &str, character_size: u32, transform: &Mat3) {
        self.commands.push(DrawCommand::Text {
            font,
            text: text.to_string(),
            character_size,
            transform: *transform,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{transform_point, Vec2};
    use crate::render::target::Sprite;
    use approx::assert_relative_eq;

    #[test]
    fn test_centered_sprite_draws_from_top_left() {
        let mut recorder = DrawRecorder::new();
        let sprite = Sprite::centered(TextureId::Entities, IntRect::new(0, 0, 40, 20));

        sprite.draw(&mut recorder, &Mat3::new_translation(&Vec2::new(100.0, 100.0)));

        assert_eq!(recorder.len(), 1);
        match &recorder.commands()[0] {
            DrawCommand::Sprite { transform, .. } => {
                let corner = transform_point(transform, Vec2::zeros());
                assert_relative_eq!(corner, Vec2::new(80.0, 90.0));
            }
            other => panic!("expected a sprite, got {other:?}"),
        }
    }

    #[test]
    fn test_view_bounds() {
        let view = View::new(Vec2::new(320.0, 240.0), Vec2::new(640.0, 480.0));
        let bounds = view.bounds();
        assert_relative_eq!(bounds.left, 0.0);
        assert_relative_eq!(bounds.top, 0.0);
        assert_relative_eq!(bounds.right(), 640.0);
    }
}
