// Rendering contract
//
// The game never touches pixels. Each frame it builds a `DrawList` in
// back-to-front order and hands it to whatever `Renderer` the shell owns.

mod camera;
mod dirty;
mod headless;

pub use camera::{Camera, SMOOTHING};
pub use dirty::DirtyRects;
pub use headless::HeadlessRenderer;

use crate::core::Rect;
use crate::engine::animation::FrameRef;
use crate::engine::assets::TextureHandle;

/// Which static layer a blit list belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerSlot {
    Background,
    Foreground,
}

/// Full-screen banner drawn over everything else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Banner {
    Paused,
    GameOver,
    Won,
}

/// Heads-up display state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    /// Frame of the health bar sheet; equal to the player's health
    pub health_frame: u16,
    /// Score, zero-padded to eight digits
    pub score_text: String,
    pub has_key: bool,
    /// Black fade over the play field, 0 (clear) to 255 (opaque)
    pub fade_alpha: u8,
    pub banner: Option<Banner>,
}

impl Hud {
    pub fn score_text(score: u32) -> String {
        format!("{:08}", score)
    }
}

/// One draw operation, in screen space
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Layer {
        slot: LayerSlot,
        tiles: Vec<(TextureHandle, Rect)>,
    },
    Sprite {
        frame: FrameRef,
        dest: Rect,
        /// Mirror horizontally
        flip: bool,
        /// Draw with the damage tint
        tint: bool,
    },
    Overlay(Hud),
}

/// Draw commands for one frame, back to front
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Sprite commands only, in draw order
    pub fn sprites(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { .. }))
    }
}

/// A backend that can present a draw list
pub trait Renderer {
    fn draw(&mut self, list: &DrawList);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_text_padding() {
        assert_eq!(Hud::score_text(0), "00000000");
        assert_eq!(Hud::score_text(1230), "00001230");
    }

    #[test]
    fn test_sprites_filter() {
        let mut list = DrawList::new();
        list.push(DrawCommand::Layer {
            slot: LayerSlot::Background,
            tiles: Vec::new(),
        });
        list.push(DrawCommand::Sprite {
            frame: FrameRef::new(TextureHandle::from_path("coin.png"), 0),
            dest: Rect::new(0, 0, 32, 32),
            flip: false,
            tint: false,
        });
        assert_eq!(list.len(), 2);
        assert_eq!(list.sprites().count(), 1);
    }
}
