// Entity identity and kind tags

use super::palette::{EnemyKind, ItemKind};

/// Stable per-session id, used to track where each sprite was last drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Hands out unique entity ids
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

/// What an entity is. Behaviour and draw order dispatch on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Door,
    Gate,
    Platform,
    Item(ItemKind),
    Enemy(EnemyKind),
    Particle,
}

impl EntityKind {
    /// Drawn in the first sprite pass, before the depth-sorted actors
    pub fn is_backdrop(&self) -> bool {
        matches!(self, EntityKind::Door | EntityKind::Item(_))
    }

    /// Collision-only; never drawn
    pub fn is_invisible(&self) -> bool {
        matches!(self, EntityKind::Platform)
    }
}
