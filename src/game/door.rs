// Doors between levels

use log::debug;

use crate::core::Rect;
use crate::engine::animation::{FrameRef, Millis, Timeline};
use crate::game::cutscene::{Cutscene, CutsceneRequest};
use crate::game::effects::{Effects, LevelChange, Visual};
use crate::game::entity::EntityId;
use crate::game::sounds::SoundCue;
use crate::game::sprites::{SheetId, SpriteLibrary};

/// Cutscene time at which the player is moved to the destination
const TRAVEL_AT: Millis = 400;

/// Door frame to show `elapsed` ms into the transition, if it changes
fn opening_frame(elapsed: Millis) -> Option<i64> {
    match elapsed {
        1..=49 => Some(1),
        50..=99 => Some(2),
        100..=149 => Some(3),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct Door {
    pub id: EntityId,
    /// Id painted into the level image
    pub door_id: u8,
    /// Id of the door this one leads to, searched across every level
    pub target: u8,
    pub rect: Rect,
    /// The door the player is walking through
    pub selected: bool,
    destination: Option<LevelChange>,
    anim: Timeline<FrameRef>,
}

impl Door {
    pub fn new(
        id: EntityId,
        door_id: u8,
        target: u8,
        library: &SpriteLibrary,
        pos: (i32, i32),
    ) -> Self {
        let (width, height) = library.frame_size(SheetId::Door);
        Self {
            id,
            door_id,
            target,
            rect: Rect::new(pos.0, pos.1, width, height),
            selected: false,
            destination: None,
            anim: library.timeline(SheetId::Door),
        }
    }

    /// Start walking through toward `destination`
    pub fn use_door(&mut self, destination: LevelChange, fx: &mut Effects) {
        debug!(
            "Door {} -> {} (level {})",
            self.door_id, self.target, destination.level
        );
        self.destination = Some(destination);
        self.selected = true;
        fx.sound(SoundCue::DoorOpen);
        fx.cutscene = Some(CutsceneRequest::DOOR);
    }

    pub fn update(&mut self, cutscene: &Cutscene, fx: &mut Effects) {
        if !cutscene.in_progress() {
            self.show(0);
            return;
        }
        if !self.selected {
            return;
        }

        let elapsed = cutscene.elapsed();
        if let Some(frame) = opening_frame(elapsed) {
            self.show(frame);
        }
        if elapsed > TRAVEL_AT {
            if let Some(destination) = self.destination.take() {
                fx.sound(SoundCue::DoorClose);
                self.show(0);
                fx.level_change = Some(destination);
                self.selected = false;
            }
        }
    }

    fn show(&mut self, frame: i64) {
        if self.anim.current_index() as i64 != frame {
            self.anim.seek_to_frame(frame);
        }
    }

    pub fn frame_index(&self) -> usize {
        self.anim.current_index()
    }

    pub fn visual(&self) -> Visual {
        Visual {
            frame: *self.anim.current_frame(),
            dest: self.rect,
            flip: false,
            tint: false,
            center_x: self.rect.center_x(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::ManualClock;
    use crate::game::entity::IdAllocator;
    use std::rc::Rc;

    fn door() -> Door {
        let library = SpriteLibrary::new(Rc::new(ManualClock::new(0))).unwrap();
        let mut ids = IdAllocator::new();
        Door::new(ids.next_id(), 1, 2, &library, (64, 96))
    }

    #[test]
    fn test_geometry() {
        let door = door();
        assert_eq!(door.rect, Rect::new(64, 96, 64, 64));
        assert_eq!(door.frame_index(), 0);
    }

    #[test]
    fn test_walk_through() {
        let mut door = door();
        let destination = LevelChange {
            level: 2,
            center: (300, 200),
        };
        let mut fx = Effects::new();
        door.use_door(destination, &mut fx);
        assert_eq!(fx.sounds, vec![SoundCue::DoorOpen]);
        assert_eq!(fx.cutscene, Some(CutsceneRequest::DOOR));

        let mut cutscene = Cutscene::new();
        cutscene.start(CutsceneRequest::DOOR);

        let mut frames = Vec::new();
        let mut fx = Effects::new();
        for _ in 0..10 {
            cutscene.update(25);
            door.update(&cutscene, &mut fx);
            frames.push(door.frame_index());
        }
        assert_eq!(&frames[..6], &[1, 2, 2, 3, 3, 3]);
        assert!(fx.level_change.is_none());

        for _ in 0..7 {
            cutscene.update(25);
            door.update(&cutscene, &mut fx);
        }
        assert_eq!(fx.level_change, Some(destination));
        assert_eq!(fx.sounds, vec![SoundCue::DoorClose]);
        assert_eq!(door.frame_index(), 0);
        assert!(!door.selected);
    }

    #[test]
    fn test_unselected_door_ignores_cutscene() {
        let mut door = door();
        let mut cutscene = Cutscene::new();
        cutscene.start(CutsceneRequest::DOOR);
        cutscene.update(75);
        let mut fx = Effects::new();
        door.update(&cutscene, &mut fx);
        assert_eq!(door.frame_index(), 0);
        assert!(fx.is_empty());
    }
}
