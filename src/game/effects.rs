// Side effects collected during an update
//
// Entity updates never reach back into the session. They push requests here
// and the session applies them once the update pass is done.

use crate::core::Rect;
use crate::engine::animation::FrameRef;
use crate::game::cutscene::CutsceneRequest;
use crate::game::sounds::SoundCue;
use crate::game::sprites::SheetId;

/// A one-shot particle to add to the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleSpawn {
    pub sheet: SheetId,
    /// Top-left corner in level space
    pub at: (i32, i32),
}

/// Where a door leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    /// Index into the level list
    pub level: usize,
    /// Centre of the destination door; the player is placed here
    pub center: (i32, i32),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    pub sounds: Vec<SoundCue>,
    pub particles: Vec<ParticleSpawn>,
    pub cutscene: Option<CutsceneRequest>,
    pub end_cutscene: bool,
    /// Index of the door in the current level the player walked through
    pub door_used: Option<usize>,
    pub level_change: Option<LevelChange>,
    pub won: bool,
    pub game_over: bool,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sound(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }

    pub fn particle(&mut self, sheet: SheetId, at: (i32, i32)) {
        self.particles.push(ParticleSpawn { sheet, at });
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One sprite ready for the draw list, in level space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visual {
    pub frame: FrameRef,
    pub dest: Rect,
    pub flip: bool,
    pub tint: bool,
    /// Depth sort key: horizontal centre of the physical body
    pub center_x: i32,
}
