// Locked gates
//
// A gate blocks horizontal movement until the player unlocks it with a key.
// Unlocking starts a short cutscene during which the gate animates open.

use glam::Vec2;
use log::debug;

use crate::core::Rect;
use crate::engine::animation::{FrameRef, Millis, Timeline};
use crate::game::actors::Player;
use crate::game::cutscene::{Cutscene, CutsceneKind, CutsceneRequest};
use crate::game::effects::{Effects, Visual};
use crate::game::entity::EntityId;
use crate::game::sounds::SoundCue;
use crate::game::sprites::{SheetId, SpriteLibrary};

/// How close the player must be to select a gate
pub const GATE_RANGE: f32 = 64.0;

/// Cutscene milliseconds spent on the unlock animation
const UNLOCK_END: Millis = 200;
/// Cutscene milliseconds at which the gate counts as open
const OPEN_END: Millis = 450;

const DRAW_SIZE: (i32, i32) = (64, 96);
const DRAW_OFFSET: Vec2 = Vec2::new(-16.0, 0.0);

#[derive(Debug, Clone)]
pub struct Gate {
    pub id: EntityId,
    /// Solid part, the middle of the drawn image
    pub rect: Rect,
    /// Closest gate to a player in range
    pub selected: bool,
    locked: bool,
    open: bool,
    played_sound: bool,
    idle: Timeline<FrameRef>,
    interact: Timeline<FrameRef>,
    unlocking: Timeline<FrameRef>,
    opening: Timeline<FrameRef>,
    frame: FrameRef,
}

impl Gate {
    /// Gate whose image has its top-left at `pos`
    pub fn new(id: EntityId, library: &SpriteLibrary, pos: (i32, i32)) -> Self {
        let idle = library.timeline(SheetId::GateLocked);
        let frame = *idle.current_frame();
        Self {
            id,
            rect: Rect::new(pos.0 + 48, pos.1, 32, 96),
            selected: false,
            locked: true,
            open: false,
            played_sound: false,
            idle,
            interact: library.playing(SheetId::GateInteract),
            unlocking: library.timeline(SheetId::GateUnlock),
            opening: library.timeline(SheetId::GateOpen),
            frame,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Locked gates block movement
    pub fn is_solid(&self) -> bool {
        self.locked
    }

    /// Unlock and start the opening cutscene
    pub fn unlock(&mut self, fx: &mut Effects) {
        self.locked = false;
        self.unlocking.play();
        fx.sound(SoundCue::GateUnlock);
        fx.cutscene = Some(CutsceneRequest::GATE);
    }

    pub fn update(&mut self, player: &Player, cutscene: &Cutscene, fx: &mut Effects) {
        if self.locked {
            self.update_locked(player);
        } else if !self.open {
            self.update_opening(cutscene, fx);
        }
        if self.open {
            if let Some(&last) = self.opening.frame(self.opening.frame_count() - 1) {
                self.frame = last;
            }
        }
    }

    fn update_locked(&mut self, player: &Player) {
        if !player.has_key {
            self.selected = false;
            self.frame = *self.idle.current_frame();
            return;
        }
        if !self.selected {
            return;
        }
        if player.body.distance_to(&self.rect) <= GATE_RANGE {
            self.frame = *self.interact.current_frame();
        } else {
            self.selected = false;
            self.frame = *self.idle.current_frame();
        }
    }

    fn update_opening(&mut self, cutscene: &Cutscene, fx: &mut Effects) {
        if cutscene.kind() != Some(CutsceneKind::GateUnlock) {
            // Unlocked with nothing to animate
            self.open = true;
            return;
        }

        let elapsed = cutscene.elapsed();
        if elapsed <= 0 {
            return;
        }
        if elapsed < UNLOCK_END {
            let count = self.unlocking.frame_count() as Millis;
            let index = (elapsed * count / UNLOCK_END).min(count - 1);
            if let Some(&frame) = self.unlocking.frame(index as usize) {
                self.frame = frame;
            }
        } else if elapsed < OPEN_END {
            if !self.played_sound {
                fx.sound(SoundCue::GateOpen);
                self.played_sound = true;
                self.opening.play();
            }
            let count = self.opening.frame_count() as Millis;
            let index = ((elapsed - UNLOCK_END) * count / (OPEN_END - UNLOCK_END)).min(count - 1);
            if let Some(&frame) = self.opening.frame(index as usize) {
                self.frame = frame;
            }
        } else {
            self.open = true;
            fx.end_cutscene = true;
            debug!("Gate {:?} open", self.id);
        }
    }

    pub fn frame(&self) -> FrameRef {
        self.frame
    }

    pub fn visual(&self) -> Visual {
        let mut dest = self.rect.offset_by(DRAW_OFFSET);
        dest.width = DRAW_SIZE.0;
        dest.height = DRAW_SIZE.1;
        Visual {
            frame: self.frame,
            dest,
            flip: false,
            tint: false,
            center_x: self.rect.center_x(),
        }
    }
}
