// Dirty-rectangle bookkeeping for incremental redraw

use std::collections::HashMap;
use std::hash::Hash;

use crate::core::Rect;

/// Tracks where each sprite was last drawn and collects the screen areas that
/// need repainting this frame
#[derive(Debug, Clone)]
pub struct DirtyRects<K> {
    previous: HashMap<K, Rect>,
    dirty: Vec<Rect>,
}

impl<K: Hash + Eq> DirtyRects<K> {
    pub fn new() -> Self {
        Self {
            previous: HashMap::new(),
            dirty: Vec::new(),
        }
    }

    /// Record that sprite `key` was drawn at `rect`.
    ///
    /// A first draw dirties just `rect`. Otherwise the old and new areas are
    /// merged when they overlap and dirtied separately when they don't.
    pub fn record(&mut self, key: K, rect: Rect) {
        match self.previous.insert(key, rect) {
            None => self.dirty.push(rect),
            Some(old) if old.intersects(&rect) => self.dirty.push(old.union(&rect)),
            Some(old) => {
                self.dirty.push(rect);
                self.dirty.push(old);
            }
        }
    }

    /// Mark an area dirty without tying it to a sprite (layers, overlays)
    pub fn mark(&mut self, rect: Rect) {
        self.dirty.push(rect);
    }

    /// Forget a sprite that is no longer drawn; its last area becomes dirty
    pub fn remove(&mut self, key: &K) {
        if let Some(old) = self.previous.remove(key) {
            self.dirty.push(old);
        }
    }

    /// Forget every sprite, e.g. on level change
    pub fn clear(&mut self) {
        self.previous.clear();
        self.dirty.clear();
    }

    /// Areas dirtied since the last call
    pub fn take(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.dirty)
    }
}

impl<K: Hash + Eq> Default for DirtyRects<K> {
    fn default() -> Self {
        Self::new()
    }
}
