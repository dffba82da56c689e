// Kinematic bodies for actors

use glam::Vec2;

use crate::core::Rect;

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    Right,
}

impl Default for Facing {
    fn default() -> Self {
        Self::Left
    }
}

impl Facing {
    /// Unit direction along x
    pub fn sign(&self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }

    /// Art is drawn facing left, so right-facing sprites are mirrored
    pub fn flip(&self) -> bool {
        matches!(self, Self::Right)
    }
}

/// A moving rectangle with velocity and contact state.
///
/// `rect` is the physical body used against platforms. `image_rect` is the
/// visual bounds used for attack hits; the two are never interchangeable.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub rect: Rect,
    pub image_rect: Rect,
    /// Sprite draw offset from `rect`'s top-left
    pub offset: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    pub facing: Facing,
}

impl Body {
    /// Body at rest with the image bounds matching the physical rect
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            image_rect: rect,
            offset: Vec2::ZERO,
            vel: Vec2::ZERO,
            on_ground: false,
            facing: Facing::default(),
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self.image_rect = self.rect.offset_by(offset);
        self
    }

    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    /// Re-place the image bounds for a new frame size and offset
    pub fn sync_image(&mut self, size: (i32, i32), offset: Vec2) {
        self.offset = offset;
        self.image_rect = Rect::new(0, 0, size.0, size.1);
        let placed = self.rect.offset_by(offset);
        self.image_rect.x = placed.x;
        self.image_rect.y = placed.y;
    }

    /// Where the sprite should be drawn, in level space
    pub fn draw_rect(&self) -> Rect {
        self.image_rect
    }

    pub fn center(&self) -> (i32, i32) {
        self.rect.center()
    }

    /// Distance between body centers
    pub fn distance_to(&self, other: &Rect) -> f32 {
        crate::core::math::distance(self.rect.center(), other.center())
    }
}
