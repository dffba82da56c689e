// One-shot particle effects

use crate::core::Rect;
use crate::engine::animation::{FrameRef, Timeline};
use crate::game::effects::Visual;
use crate::game::entity::EntityId;
use crate::game::sprites::{SheetId, SpriteLibrary};

/// Plays its sheet once, then is removed
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: EntityId,
    pub rect: Rect,
    anim: Timeline<FrameRef>,
}

impl Particle {
    pub fn new(id: EntityId, sheet: SheetId, library: &SpriteLibrary, at: (i32, i32)) -> Self {
        let (width, height) = library.frame_size(sheet);
        Self {
            id,
            rect: Rect::new(at.0, at.1, width, height),
            anim: library.playing(sheet),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.anim.is_finished()
    }

    pub fn visual(&self) -> Option<Visual> {
        Some(Visual {
            frame: *self.anim.frame_to_draw()?,
            dest: self.rect,
            flip: false,
            tint: false,
            center_x: self.rect.center_x(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::ManualClock;
    use crate::game::entity::IdAllocator;
    use std::rc::Rc;

    #[test]
    fn test_plays_once() {
        let clock = Rc::new(ManualClock::new(0));
        let library = SpriteLibrary::new(clock.clone()).unwrap();
        let mut ids = IdAllocator::new();
        let particle = Particle::new(ids.next_id(), SheetId::Star, &library, (10, 20));

        assert_eq!(particle.rect, Rect::new(10, 20, 32, 32));
        assert!(particle.visual().is_some());

        clock.advance(319);
        assert!(!particle.is_finished());
        assert_eq!(particle.visual().map(|v| v.frame.index), Some(7));

        clock.advance(1);
        assert!(particle.is_finished());
        assert!(particle.visual().is_none());
    }

    #[test]
    fn test_cloud_is_half_size() {
        let library = SpriteLibrary::new(Rc::new(ManualClock::new(0))).unwrap();
        let particle = Particle::new(EntityId(0), SheetId::Cloud, &library, (0, 0));
        assert_eq!(particle.rect.width, 16);
    }
}
