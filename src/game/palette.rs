// Level colour palettes
//
// Spawn maps and decoration layers are separate images, each with its own
// colour table.

use crate::engine::assets::TextureHandle;
use crate::engine::tilemap::{ColorTable, Rgba};

/// Green channel value marking a door pixel. Red holds the door id, blue the
/// id of the door it leads to.
pub const DOOR_MARKER: u8 = 248;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformKind {
    /// Solid over the whole cell
    Full,
    /// Solid over the top half of the cell only
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Snake,
    Rat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Coin,
    Key,
    Heart,
    Diamond,
}

/// What a spawn-map pixel places in the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Platform(PlatformKind),
    Gate,
    Enemy(EnemyKind),
    Item(ItemKind),
    Door { id: u8, target: u8 },
}

/// Spawn-map colour table
pub fn entity_palette() -> ColorTable<Placement> {
    ColorTable::new()
        .with(Rgba::rgb(0, 0, 0), Placement::Platform(PlatformKind::Full))
        .with(Rgba::rgb(20, 20, 20), Placement::Platform(PlatformKind::Upper))
        .with(Rgba::rgb(128, 0, 255), Placement::Gate)
        .with(Rgba::rgb(255, 128, 0), Placement::Enemy(EnemyKind::Snake))
        .with(Rgba::rgb(128, 64, 0), Placement::Enemy(EnemyKind::Rat))
        .with(Rgba::rgb(255, 216, 0), Placement::Item(ItemKind::Coin))
        .with(Rgba::rgb(0, 0, 255), Placement::Item(ItemKind::Key))
        .with(Rgba::rgb(0, 255, 255), Placement::Item(ItemKind::Diamond))
        .with(Rgba::rgb(255, 0, 0), Placement::Item(ItemKind::Heart))
        .with_rule(door_marker)
}

fn door_marker(color: Rgba) -> Option<Placement> {
    (color.g() == DOOR_MARKER).then(|| Placement::Door {
        id: color.r(),
        target: color.b(),
    })
}

/// Decoration tiles for background and foreground layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerTile {
    Foreground0,
    Foreground1,
    Foreground2,
    Floor,
    FloorMedium,
    FloorThick,
    FloorRight,
    FloorLeft,
    FloorStopRight,
    FloorStopLeft,
    Ceiling,
    CeilingRightInner,
    CeilingRightOuter,
    CeilingLeftInner,
    CeilingLeftOuter,
    WallRight,
    WallLeft,
    Platform,
    PlatformRight,
    PlatformLeft,
    PlatformSmall,
    Background2,
    Background1,
    Background0,
}

impl LayerTile {
    /// Every tile with its grey level, in palette order
    const TABLE: [(u8, LayerTile); 24] = [
        (0, LayerTile::Foreground0),
        (5, LayerTile::Foreground1),
        (10, LayerTile::Foreground2),
        (15, LayerTile::Floor),
        (16, LayerTile::FloorMedium),
        (17, LayerTile::FloorThick),
        (20, LayerTile::FloorRight),
        (25, LayerTile::FloorLeft),
        (30, LayerTile::FloorStopRight),
        (35, LayerTile::FloorStopLeft),
        (40, LayerTile::Ceiling),
        (45, LayerTile::CeilingRightInner),
        (50, LayerTile::CeilingRightOuter),
        (55, LayerTile::CeilingLeftInner),
        (60, LayerTile::CeilingLeftOuter),
        (65, LayerTile::WallRight),
        (70, LayerTile::WallLeft),
        (75, LayerTile::Platform),
        (80, LayerTile::PlatformRight),
        (85, LayerTile::PlatformLeft),
        (90, LayerTile::PlatformSmall),
        (245, LayerTile::Background2),
        (250, LayerTile::Background1),
        (255, LayerTile::Background0),
    ];

    pub fn file(&self) -> &'static str {
        match self {
            LayerTile::Foreground0 => "foreground_0.png",
            LayerTile::Foreground1 => "foreground_1.png",
            LayerTile::Foreground2 => "foreground_2.png",
            LayerTile::Floor => "floor.png",
            LayerTile::FloorMedium => "floor_medium.png",
            LayerTile::FloorThick => "floor_thick.png",
            LayerTile::FloorRight => "floor_right.png",
            LayerTile::FloorLeft => "floor_left.png",
            LayerTile::FloorStopRight => "floor_stop_right.png",
            LayerTile::FloorStopLeft => "floor_stop_left.png",
            LayerTile::Ceiling => "ceiling.png",
            LayerTile::CeilingRightInner => "ceiling_right_inner.png",
            LayerTile::CeilingRightOuter => "ceiling_right_outer.png",
            LayerTile::CeilingLeftInner => "ceiling_left_inner.png",
            LayerTile::CeilingLeftOuter => "ceiling_left_outer.png",
            LayerTile::WallRight => "wall_right.png",
            LayerTile::WallLeft => "wall_left.png",
            LayerTile::Platform => "platform.png",
            LayerTile::PlatformRight => "platform_right.png",
            LayerTile::PlatformLeft => "platform_left.png",
            LayerTile::PlatformSmall => "platform_small.png",
            LayerTile::Background2 => "background_2.png",
            LayerTile::Background1 => "background_1.png",
            LayerTile::Background0 => "background_0.png",
        }
    }

    pub fn texture(&self) -> TextureHandle {
        TextureHandle::from_path(&format!("images/tiles/{}", self.file()))
    }
}

/// Decoration-layer colour table. Every entry is an opaque grey.
pub fn layer_palette() -> ColorTable<LayerTile> {
    LayerTile::TABLE
        .iter()
        .fold(ColorTable::new(), |table, &(grey, tile)| {
            table.with(Rgba::rgb(grey, grey, grey), tile)
        })
}
