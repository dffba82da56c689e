// Pickups

use log::debug;

use crate::core::Rect;
use crate::engine::animation::{FrameRef, Timeline};
use crate::game::actors::Player;
use crate::game::effects::{Effects, Visual};
use crate::game::entity::EntityId;
use crate::game::palette::ItemKind;
use crate::game::sounds::SoundCue;
use crate::game::sprites::{SheetId, SpriteLibrary};

const COIN_SCORE: u32 = 10;
const HEART_HEALTH: i32 = 2;

impl ItemKind {
    pub fn sheet(&self) -> SheetId {
        match self {
            ItemKind::Coin => SheetId::Coin,
            ItemKind::Key => SheetId::Key,
            ItemKind::Heart => SheetId::Heart,
            ItemKind::Diamond => SheetId::Diamond,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Item {
    pub id: EntityId,
    pub kind: ItemKind,
    /// Pickup area, one cell
    pub rect: Rect,
    anim: Timeline<FrameRef>,
    draw_size: (i32, i32),
}

impl Item {
    pub fn new(
        id: EntityId,
        kind: ItemKind,
        library: &SpriteLibrary,
        pos: (i32, i32),
        tile_size: i32,
    ) -> Self {
        Self {
            id,
            kind,
            rect: Rect::new(pos.0, pos.1, tile_size, tile_size),
            anim: library.playing(kind.sheet()),
            draw_size: library.frame_size(kind.sheet()),
        }
    }

    /// Apply the pickup if the player touches this item. Returns true when
    /// the item was used up.
    pub fn update(&mut self, player: &mut Player, fx: &mut Effects) -> bool {
        if !self.rect.intersects(&player.body.rect) {
            return false;
        }
        let at = (self.rect.x, self.rect.y);

        match self.kind {
            ItemKind::Coin => {
                player.score += COIN_SCORE;
                fx.sound(SoundCue::Coin);
                fx.particle(SheetId::Star, at);
            }
            ItemKind::Key => {
                player.has_key = true;
                fx.sound(SoundCue::Key);
                fx.particle(SheetId::Star, at);
            }
            ItemKind::Heart => {
                if !player.is_hurt() {
                    return false;
                }
                player.heal(HEART_HEALTH);
                fx.sound(SoundCue::Heart);
                fx.particle(SheetId::HealthSparkle, at);
            }
            ItemKind::Diamond => {
                fx.won = true;
                return false;
            }
        }
        debug!("Picked up {:?} at {:?}", self.kind, at);
        true
    }

    pub fn visual(&self) -> Visual {
        Visual {
            frame: *self.anim.current_frame(),
            dest: Rect::new(self.rect.x, self.rect.y, self.draw_size.0, self.draw_size.1),
            flip: false,
            tint: false,
            center_x: self.rect.center_x(),
        }
    }
}
