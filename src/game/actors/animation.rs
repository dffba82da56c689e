// Keyed animation clips for actors

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use glam::Vec2;
use log::warn;

use crate::engine::animation::{FrameRef, Timeline};
use crate::engine::physics::{Body, Facing};
use crate::game::sprites::{SheetId, SpriteLibrary};

/// Sprite draw offsets for each facing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacingOffsets {
    pub left: Vec2,
    pub right: Vec2,
}

impl FacingOffsets {
    pub const fn new(left: (f32, f32), right: (f32, f32)) -> Self {
        Self {
            left: Vec2::new(left.0, left.1),
            right: Vec2::new(right.0, right.1),
        }
    }

    /// Same offset whichever way the actor faces
    pub const fn both(offset: (f32, f32)) -> Self {
        Self::new(offset, offset)
    }

    pub fn for_facing(&self, facing: Facing) -> Vec2 {
        match facing {
            Facing::Left => self.left,
            Facing::Right => self.right,
        }
    }
}

/// One animation an actor can show
#[derive(Debug, Clone)]
pub struct Clip {
    pub timeline: Timeline<FrameRef>,
    pub offsets: FacingOffsets,
    /// Drawn size of one frame
    pub size: (i32, i32),
}

impl Clip {
    /// Clip for `sheet`, started immediately when `playing`
    pub fn from_library(
        library: &SpriteLibrary,
        sheet: SheetId,
        offsets: FacingOffsets,
        playing: bool,
    ) -> Self {
        let timeline = if playing {
            library.playing(sheet)
        } else {
            library.timeline(sheet)
        };
        Self {
            timeline,
            offsets,
            size: library.frame_size(sheet),
        }
    }
}

/// The clips of one actor, exactly one of which is active
#[derive(Debug, Clone)]
pub struct AnimationSet<K> {
    clips: HashMap<K, Clip>,
    current: K,
}

impl<K> AnimationSet<K>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Set whose active key is `initial`, which must be given a clip
    pub fn new(initial: K, clip: Clip) -> Self {
        let mut clips = HashMap::new();
        clips.insert(initial, clip);
        Self {
            clips,
            current: initial,
        }
    }

    pub fn with_clip(mut self, key: K, clip: Clip) -> Self {
        self.clips.insert(key, clip);
        self
    }

    /// Make `key` the active clip. Keys without a clip are ignored.
    pub fn set(&mut self, key: K) -> bool {
        if !self.clips.contains_key(&key) {
            warn!("No animation clip for {:?}", key);
            return false;
        }
        self.current = key;
        true
    }

    pub fn current(&self) -> K {
        self.current
    }

    pub fn clip(&self, key: K) -> Option<&Clip> {
        self.clips.get(&key)
    }

    pub fn clip_mut(&mut self, key: K) -> Option<&mut Clip> {
        self.clips.get_mut(&key)
    }

    pub fn timeline_mut(&mut self, key: K) -> Option<&mut Timeline<FrameRef>> {
        self.clips.get_mut(&key).map(|clip| &mut clip.timeline)
    }

    /// Frame the active clip shows right now
    pub fn current_frame(&self) -> Option<FrameRef> {
        self.clips
            .get(&self.current)
            .map(|clip| *clip.timeline.current_frame())
    }

    /// Frame index of the clip under `key`
    pub fn frame_index(&self, key: K) -> Option<usize> {
        self.clips.get(&key).map(|clip| clip.timeline.current_index())
    }

    /// Place `body`'s image bounds for the active clip
    pub fn apply(&self, body: &mut Body) {
        if let Some(clip) = self.clips.get(&self.current) {
            body.sync_image(clip.size, clip.offsets.for_facing(body.facing));
        }
    }
}
