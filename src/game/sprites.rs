// Sprite sheet catalog

use std::rc::Rc;

use log::info;

use crate::engine::animation::{Clock, ConfigError, FrameRef, Millis, SheetLayout, Timeline};
use crate::engine::assets::{AssetType, TextureHandle};

/// Every sprite sheet the game draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetId {
    PlayerIdle,
    PlayerWalking,
    PlayerJumping,
    PlayerFalling,
    PlayerAttackHigh,
    PlayerAttackLow,
    PlayerDeath,
    SnakeIdle,
    RatIdle,
    Coin,
    Key,
    Heart,
    Diamond,
    Door,
    GateLocked,
    GateInteract,
    GateUnlock,
    GateOpen,
    Star,
    Cloud,
    HealthSparkle,
    HealthBar,
}

impl SheetId {
    pub const ALL: [SheetId; 22] = [
        SheetId::PlayerIdle,
        SheetId::PlayerWalking,
        SheetId::PlayerJumping,
        SheetId::PlayerFalling,
        SheetId::PlayerAttackHigh,
        SheetId::PlayerAttackLow,
        SheetId::PlayerDeath,
        SheetId::SnakeIdle,
        SheetId::RatIdle,
        SheetId::Coin,
        SheetId::Key,
        SheetId::Heart,
        SheetId::Diamond,
        SheetId::Door,
        SheetId::GateLocked,
        SheetId::GateInteract,
        SheetId::GateUnlock,
        SheetId::GateOpen,
        SheetId::Star,
        SheetId::Cloud,
        SheetId::HealthSparkle,
        SheetId::HealthBar,
    ];

    /// Authoring data for this sheet
    pub fn info(&self) -> SheetInfo {
        use AssetType::{Entity, Gui, Particle, Tile};

        match self {
            SheetId::PlayerIdle => SheetInfo::strip(Entity, "player_idle.png", 4, 150, true, (64, 64)),
            SheetId::PlayerWalking => {
                SheetInfo::strip(Entity, "player_walking.png", 8, 100, true, (64, 64))
            }
            SheetId::PlayerJumping => {
                SheetInfo::strip(Entity, "player_jumping.png", 1, 100, true, (80, 64))
            }
            SheetId::PlayerFalling => {
                SheetInfo::strip(Entity, "player_falling.png", 1, 100, true, (80, 64))
            }
            SheetId::PlayerAttackHigh => {
                SheetInfo::strip(Entity, "player_attacking_high.png", 3, 150, false, (128, 80))
            }
            SheetId::PlayerAttackLow => {
                SheetInfo::strip(Entity, "player_attacking_low.png", 3, 150, false, (128, 80))
            }
            SheetId::PlayerDeath => {
                SheetInfo::strip(Entity, "player_death.png", 6, 100, false, (96, 72))
            }
            SheetId::SnakeIdle => SheetInfo::strip(Entity, "snake_idle.png", 2, 300, true, (64, 48)),
            SheetId::RatIdle => SheetInfo::strip(Entity, "rat_idle.png", 1, 300, true, (64, 48)),
            SheetId::Coin => SheetInfo::strip(Entity, "coin.png", 9, 100, true, (32, 32)),
            SheetId::Key => SheetInfo::strip(Entity, "key.png", 1, 100, true, (32, 32)),
            SheetId::Heart => SheetInfo::strip(Entity, "heart.png", 6, 120, true, (32, 32)),
            SheetId::Diamond => SheetInfo::strip(Entity, "diamond.png", 4, 200, true, (64, 64)),
            SheetId::Door => SheetInfo::strip(Tile, "door.png", 4, 150, false, (64, 64)),
            SheetId::GateLocked => SheetInfo::row(Tile, "gate_locked.png", 1, 150, false, (64, 96)),
            SheetId::GateInteract => {
                SheetInfo::row(Tile, "gate_interact.png", 2, 200, true, (64, 96))
            }
            SheetId::GateUnlock => SheetInfo::row(Tile, "gate_unlock.png", 9, 75, false, (64, 96)),
            SheetId::GateOpen => SheetInfo::row(Tile, "gate_open.png", 8, 150, false, (64, 96)),
            SheetId::Star => SheetInfo::strip(Particle, "star.png", 8, 40, false, (32, 32)),
            SheetId::Cloud => SheetInfo::strip(Particle, "cloud.png", 8, 250, false, (16, 16)),
            SheetId::HealthSparkle => {
                SheetInfo::strip(Particle, "health.png", 8, 40, false, (32, 32))
            }
            SheetId::HealthBar => SheetInfo::strip(Gui, "health.png", 14, 100, false, (128, 32)),
        }
    }
}

/// How a sheet is laid out and played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetInfo {
    pub asset_type: AssetType,
    pub file: &'static str,
    pub rows: u32,
    pub cols: u32,
    pub frame_ms: Millis,
    pub looping: bool,
    /// On-screen size of one frame
    pub frame_size: (i32, i32),
}

impl SheetInfo {
    /// Frames stacked vertically
    const fn strip(
        asset_type: AssetType,
        file: &'static str,
        rows: u32,
        frame_ms: Millis,
        looping: bool,
        frame_size: (i32, i32),
    ) -> Self {
        Self {
            asset_type,
            file,
            rows,
            cols: 1,
            frame_ms,
            looping,
            frame_size,
        }
    }

    /// Frames side by side
    const fn row(
        asset_type: AssetType,
        file: &'static str,
        cols: u32,
        frame_ms: Millis,
        looping: bool,
        frame_size: (i32, i32),
    ) -> Self {
        Self {
            asset_type,
            file,
            rows: 1,
            cols,
            frame_ms,
            looping,
            frame_size,
        }
    }

    /// Path relative to the asset root, also used as the texture key
    pub fn path(&self) -> String {
        format!("{}/{}", self.asset_type.default_directory(), self.file)
    }

    pub fn texture(&self) -> TextureHandle {
        TextureHandle::from_path(&self.path())
    }
}

/// One prototype timeline per sheet. Entities get shared copies with their
/// own playback state.
#[derive(Debug)]
pub struct SpriteLibrary {
    prototypes: Vec<Timeline<FrameRef>>,
    clock: Rc<dyn Clock>,
}

impl SpriteLibrary {
    pub fn new(clock: Rc<dyn Clock>) -> Result<Self, ConfigError> {
        let mut prototypes = Vec::with_capacity(SheetId::ALL.len());

        for id in SheetId::ALL {
            let info = id.info();
            let layout = SheetLayout::new(info.rows, info.cols)?;
            let frames = FrameRef::sequence(info.texture(), layout.cell_count());
            prototypes.push(Timeline::uniform(
                frames,
                info.frame_ms,
                info.looping,
                clock.clone(),
            )?);
        }

        info!("Sprite library ready with {} sheets", prototypes.len());
        Ok(Self { prototypes, clock })
    }

    /// A fresh, stopped timeline for `id`
    pub fn timeline(&self, id: SheetId) -> Timeline<FrameRef> {
        self.prototypes[id as usize].share()
    }

    /// A timeline for `id` that is already playing
    pub fn playing(&self, id: SheetId) -> Timeline<FrameRef> {
        let mut timeline = self.timeline(id);
        timeline.play();
        timeline
    }

    pub fn frame_size(&self, id: SheetId) -> (i32, i32) {
        id.info().frame_size
    }

    pub fn clock(&self) -> &Rc<dyn Clock> {
        &self.clock
    }
}
